use crate::select::influencers::{CascadingFetchProfile, LoadQueryInfluencers};
use relmeta_runtime::{
    descriptor::EntityDescriptor,
    lock::{LockMode, LockOptions},
    typesys::Dialect,
};
use std::{
    collections::BTreeMap,
    sync::{Arc, OnceLock, RwLock},
};
use tracing::trace;

const LOCK_MODE_COUNT: usize = LockMode::ALL.len();

///
/// JdbcSelect
///
/// One parameterized select statement: the text plus the number of `?`
/// placeholders it carries. The count is the wire contract with execution.
///

#[derive(Clone, Debug)]
pub struct JdbcSelect {
    pub sql: String,
    pub parameter_count: usize,
}

///
/// SingleIdLoader
///
/// Load-by-identifier statements with a three-tier cache policy:
///
/// 1. Filter-affected loads always build fresh — filters change the WHERE
///    clause per session state and must never be reused across sessions.
/// 2. An internal cascade fetch profile below the `Upgrade` threshold caches
///    per profile.
/// 3. Otherwise, a cacheable load (no entity graph, no indefinite wait)
///    caches per lock mode.
/// 4. Everything else builds an uncached statement for the one call.
///
/// First-use races on one key may each build a statement; last writer wins,
/// which is a performance cost, not a correctness hazard — statements for
/// one key are identical.
///

pub struct SingleIdLoader {
    entity: Arc<EntityDescriptor>,
    dialect: Arc<dyn Dialect>,
    by_lock_mode: RwLock<[Option<Arc<JdbcSelect>>; LOCK_MODE_COUNT]>,
    by_fetch_profile: RwLock<BTreeMap<CascadingFetchProfile, Arc<JdbcSelect>>>,
    snapshot_select: OnceLock<Arc<JdbcSelect>>,
}

impl SingleIdLoader {
    #[must_use]
    pub fn new(entity: Arc<EntityDescriptor>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            entity,
            dialect,
            by_lock_mode: RwLock::new(std::array::from_fn(|_| None)),
            by_fetch_profile: RwLock::new(BTreeMap::new()),
            snapshot_select: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn entity(&self) -> &Arc<EntityDescriptor> {
        &self.entity
    }

    /// Resolve the select for this call, reusing a cached statement when the
    /// caching policy allows it.
    #[must_use]
    pub fn resolve_jdbc_select(
        &self,
        influencers: &LoadQueryInfluencers,
        lock: &LockOptions,
    ) -> Arc<JdbcSelect> {
        if influencers.affects_with_filters(&self.entity) {
            trace!(entity = %self.entity.entity_name(), "filter-affected load, bypassing statement cache");
            return self.build_select(influencers, lock);
        }

        if let Some(profile) = influencers.internal_fetch_profile
            && lock.mode < LockMode::Upgrade
        {
            if let Some(cached) = self
                .by_fetch_profile
                .read()
                .expect("fetch-profile statement cache poisoned while reading")
                .get(&profile)
            {
                return cached.clone();
            }
            let built = self.build_select(influencers, lock);
            self.by_fetch_profile
                .write()
                .expect("fetch-profile statement cache poisoned while storing")
                .insert(profile, built.clone());
            return built;
        }

        let cacheable =
            influencers.effective_entity_graph.is_none() && !lock.wait_forever();
        if cacheable {
            if let Some(cached) = &self
                .by_lock_mode
                .read()
                .expect("lock-mode statement cache poisoned while reading")[lock.mode.index()]
            {
                return cached.clone();
            }
            let built = self.build_select(influencers, lock);
            self.by_lock_mode
                .write()
                .expect("lock-mode statement cache poisoned while storing")[lock.mode.index()] =
                Some(built.clone());
            return built;
        }

        self.build_select(influencers, lock)
    }

    /// The dirty-check select: every state-array-contributing column plus
    /// the identifier. Built once, lazily; it never varies by lock mode or
    /// fetch profile because it exists for internal comparison only.
    #[must_use]
    pub fn database_snapshot_select(&self) -> Arc<JdbcSelect> {
        self.snapshot_select
            .get_or_init(|| {
                let columns = column_list(&self.entity);
                let sql = format!(
                    "select {} from {} where {} = ?",
                    columns,
                    self.entity.table().qualified_name(),
                    identifier_column(&self.entity),
                );
                Arc::new(JdbcSelect {
                    sql,
                    parameter_count: 1,
                })
            })
            .clone()
    }

    fn build_select(&self, influencers: &LoadQueryInfluencers, lock: &LockOptions) -> Arc<JdbcSelect> {
        let mut sql = format!(
            "select {} from {} where {} = ?",
            column_list(&self.entity),
            self.entity.table().qualified_name(),
            identifier_column(&self.entity),
        );

        for condition in influencers.enabled_filter_conditions(&self.entity) {
            sql.push_str(" and (");
            sql.push_str(condition);
            sql.push(')');
        }

        if let Some(hint) = self.dialect.lock_hint(lock.mode) {
            sql.push(' ');
            sql.push_str(&hint);
        }

        Arc::new(JdbcSelect {
            sql,
            parameter_count: 1,
        })
    }
}

///
/// MultiIdLoader
///
/// Batched load-by-identifier; statements cache per batch size.
///

pub struct MultiIdLoader {
    entity: Arc<EntityDescriptor>,
    by_batch_size: RwLock<BTreeMap<usize, Arc<JdbcSelect>>>,
}

impl MultiIdLoader {
    #[must_use]
    pub fn new(entity: Arc<EntityDescriptor>) -> Self {
        Self {
            entity,
            by_batch_size: RwLock::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub fn select_for_batch(&self, batch_size: usize) -> Arc<JdbcSelect> {
        let batch_size = batch_size.max(1);

        if let Some(cached) = self
            .by_batch_size
            .read()
            .expect("batch statement cache poisoned while reading")
            .get(&batch_size)
        {
            return cached.clone();
        }

        let placeholders = (0..batch_size)
            .map(|_| "?")
            .collect::<Vec<_>>()
            .join(", ");
        let built = Arc::new(JdbcSelect {
            sql: format!(
                "select {} from {} where {} in ({})",
                column_list(&self.entity),
                self.entity.table().qualified_name(),
                identifier_column(&self.entity),
                placeholders,
            ),
            parameter_count: batch_size,
        });
        self.by_batch_size
            .write()
            .expect("batch statement cache poisoned while storing")
            .insert(batch_size, built.clone());
        built
    }
}

///
/// UniqueKeyLoader
///
/// Load by a unique column. Shape never varies, so one cached statement.
///

pub struct UniqueKeyLoader {
    entity: Arc<EntityDescriptor>,
    unique_column: String,
    select: OnceLock<Arc<JdbcSelect>>,
}

impl UniqueKeyLoader {
    #[must_use]
    pub fn new(entity: Arc<EntityDescriptor>, unique_column: impl Into<String>) -> Self {
        Self {
            entity,
            unique_column: unique_column.into(),
            select: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn resolve_jdbc_select(&self) -> Arc<JdbcSelect> {
        self.select
            .get_or_init(|| {
                Arc::new(JdbcSelect {
                    sql: format!(
                        "select {} from {} where {} = ?",
                        column_list(&self.entity),
                        self.entity.table().qualified_name(),
                        self.unique_column,
                    ),
                    parameter_count: 1,
                })
            })
            .clone()
    }
}

fn identifier_column(entity: &EntityDescriptor) -> String {
    entity
        .identifier_attribute()
        .map_or_else(|| "id".to_string(), |id| id.column.name.clone())
}

fn column_list(entity: &EntityDescriptor) -> String {
    let columns = entity.state_columns();
    if columns.is_empty() {
        return identifier_column(entity);
    }
    columns
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

use crate::{
    descriptor::attribute::{BasicAttribute, RuntimeAttribute, resolve_attributes, resolve_basic},
    error::RuntimeModelError,
    model::InFlightRuntimeModel,
    process::{NavigableTask, RuntimeCreationContext},
};
use relmeta_boot::model::{
    identifiable::{CacheConfig, CustomSql, EntityMapping, FilterMapping, MappedSuperclassMapping},
    table::{Column, Table},
};
use std::sync::{Arc, OnceLock};

///
/// ForeignKeyDescriptor
///
/// Resolved to-one key linkage, produced by the navigable finalization queue
/// once the target side's identifier is known.
///

#[derive(Clone, Debug)]
pub struct ForeignKeyDescriptor {
    pub role: String,
    pub column: Column,
    pub target_entity: String,
    pub target_column: Column,
}

///
/// EntityRuntimeState
/// Attribute-level state filled by finish-initialization.
///

#[derive(Debug)]
pub struct EntityRuntimeState {
    pub identifier: Option<BasicAttribute>,
    pub version: Option<BasicAttribute>,
    pub attributes: Vec<RuntimeAttribute>,
}

///
/// EntityDescriptor
///
/// Runtime descriptor for one entity type. Structure is fixed at creation;
/// the attribute state lands exactly once during the finish pass. After boot
/// the whole descriptor is read concurrently without locking.
///

#[derive(Debug)]
pub struct EntityDescriptor {
    boot: Arc<EntityMapping>,
    hierarchy_root: String,
    state: OnceLock<EntityRuntimeState>,
}

impl EntityDescriptor {
    #[must_use]
    pub fn new(boot: Arc<EntityMapping>, hierarchy_root: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            boot,
            hierarchy_root: hierarchy_root.into(),
            state: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.boot.entity_name
    }

    #[must_use]
    pub fn managed_name(&self) -> &str {
        &self.boot.managed_name
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.boot.table
    }

    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.boot.is_abstract
    }

    #[must_use]
    pub fn super_type(&self) -> Option<&str> {
        self.boot.super_type.as_deref()
    }

    #[must_use]
    pub fn sub_types(&self) -> &[String] {
        &self.boot.sub_types
    }

    /// Managed name of the hierarchy's root entity.
    #[must_use]
    pub fn hierarchy_root(&self) -> &str {
        &self.hierarchy_root
    }

    #[must_use]
    pub fn cache(&self) -> Option<&CacheConfig> {
        self.boot.cache.as_ref()
    }

    #[must_use]
    pub fn filters(&self) -> &[FilterMapping] {
        &self.boot.filters
    }

    #[must_use]
    pub fn custom_insert(&self) -> Option<&CustomSql> {
        self.boot.custom_insert.as_ref()
    }

    #[must_use]
    pub fn custom_update(&self) -> Option<&CustomSql> {
        self.boot.custom_update.as_ref()
    }

    #[must_use]
    pub fn custom_delete(&self) -> Option<&CustomSql> {
        self.boot.custom_delete.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.get().is_some()
    }

    #[must_use]
    pub fn state(&self) -> Option<&EntityRuntimeState> {
        self.state.get()
    }

    /// Identifier declared directly on this type (root entities); subclass
    /// identifiers resolve through the hierarchy via the model.
    #[must_use]
    pub fn identifier_attribute(&self) -> Option<&BasicAttribute> {
        self.state.get().and_then(|s| s.identifier.as_ref())
    }

    #[must_use]
    pub fn version_attribute(&self) -> Option<&BasicAttribute> {
        self.state.get().and_then(|s| s.version.as_ref())
    }

    #[must_use]
    pub fn attributes(&self) -> &[RuntimeAttribute] {
        self.state.get().map_or(&[], |s| s.attributes.as_slice())
    }

    /// Every state-array-contributing column on this type's table, in
    /// attribute order: identifier first, then attributes, then version.
    #[must_use]
    pub fn state_columns(&self) -> Vec<Column> {
        let mut columns = Vec::new();
        if let Some(identifier) = self.identifier_attribute() {
            columns.push(identifier.column.clone());
        }
        for attribute in self.attributes() {
            if let Some(column) = attribute.column() {
                columns.push(column.clone());
            }
        }
        if let Some(version) = self.version_attribute() {
            columns.push(version.column.clone());
        }
        columns
    }

    /// Attribute-level initialization. Requires the full type tree to be
    /// linked already; embedded and plural references are checked for
    /// presence, and to-one key resolution is deferred onto the navigable
    /// queue.
    pub(crate) fn finish_initialization(
        &self,
        model: &InFlightRuntimeModel,
        ctx: &RuntimeCreationContext,
        tasks: &mut Vec<NavigableTask>,
    ) -> Result<(), RuntimeModelError> {
        if self.is_finished() {
            return Ok(());
        }

        let attributes = resolve_attributes(
            &self.boot.managed_name,
            &self.boot.attributes,
            model,
            ctx,
            tasks,
            false,
        )?
        .unwrap_or_default();

        let state = EntityRuntimeState {
            identifier: self
                .boot
                .identifier
                .as_ref()
                .map(|id| resolve_basic(&id.attribute, &ctx.types)),
            version: self
                .boot
                .version
                .as_ref()
                .map(|v| resolve_basic(v, &ctx.types)),
            attributes,
        };
        self.state.set(state).ok();
        Ok(())
    }
}

///
/// MappedSuperclassDescriptor
///

#[derive(Debug)]
pub struct MappedSuperclassDescriptor {
    boot: Arc<MappedSuperclassMapping>,
    state: OnceLock<EntityRuntimeState>,
}

impl MappedSuperclassDescriptor {
    #[must_use]
    pub fn new(boot: Arc<MappedSuperclassMapping>) -> Arc<Self> {
        Arc::new(Self {
            boot,
            state: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn managed_name(&self) -> &str {
        &self.boot.managed_name
    }

    #[must_use]
    pub fn super_type(&self) -> Option<&str> {
        self.boot.super_type.as_deref()
    }

    #[must_use]
    pub fn sub_types(&self) -> &[String] {
        &self.boot.sub_types
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.get().is_some()
    }

    #[must_use]
    pub fn identifier_attribute(&self) -> Option<&BasicAttribute> {
        self.state.get().and_then(|s| s.identifier.as_ref())
    }

    #[must_use]
    pub fn attributes(&self) -> &[RuntimeAttribute] {
        self.state.get().map_or(&[], |s| s.attributes.as_slice())
    }

    pub(crate) fn finish_initialization(
        &self,
        model: &InFlightRuntimeModel,
        ctx: &RuntimeCreationContext,
        tasks: &mut Vec<NavigableTask>,
    ) -> Result<(), RuntimeModelError> {
        if self.is_finished() {
            return Ok(());
        }

        let attributes = resolve_attributes(
            &self.boot.managed_name,
            &self.boot.attributes,
            model,
            ctx,
            tasks,
            false,
        )?
        .unwrap_or_default();

        let state = EntityRuntimeState {
            identifier: self
                .boot
                .identifier
                .as_ref()
                .map(|id| resolve_basic(&id.attribute, &ctx.types)),
            version: self
                .boot
                .version
                .as_ref()
                .map(|v| resolve_basic(v, &ctx.types)),
            attributes,
        };
        self.state.set(state).ok();
        Ok(())
    }
}

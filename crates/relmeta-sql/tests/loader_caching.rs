//! Statement-cache policy coverage for the entity loaders.

use relmeta_boot::{
    collector::InFlightMetadataCollector,
    model::{
        AttributeMapping, BasicAttributeMapping, BootModel, Column, EntityHierarchy,
        EntityMapping, IdentifiableTypeMapping, IdentifierMapping, Table,
        identifiable::FilterMapping,
    },
};
use relmeta_runtime::{
    cache::CollectingRegionSink,
    descriptor::EntityDescriptor,
    lock::{LockMode, LockOptions, LockTimeout},
    process::{RuntimeCreationContext, RuntimeModelCreationProcess},
    typesys::AnsiDialect,
};
use relmeta_sql::select::{
    AppliedGraph, CascadingFetchProfile, LoadQueryInfluencers, MultiIdLoader, SingleIdLoader,
    UniqueKeyLoader,
};
use std::sync::Arc;

fn customer_descriptor() -> Arc<EntityDescriptor> {
    let mut boot = BootModel::default();
    let entity = EntityMapping {
        managed_name: "Customer".to_string(),
        entity_name: "Customer".to_string(),
        table: Table::named("customer"),
        is_abstract: false,
        identifier: Some(IdentifierMapping {
            attribute: BasicAttributeMapping::new("id", Column::named("id")),
            generator: None,
        }),
        version: Some(BasicAttributeMapping::new("version", Column::named("version"))),
        attributes: vec![
            AttributeMapping::Basic(BasicAttributeMapping::new("name", Column::named("name"))),
            AttributeMapping::Basic(BasicAttributeMapping::new("email", Column::named("email"))),
        ],
        super_type: None,
        sub_types: Vec::new(),
        cache: None,
        custom_insert: None,
        custom_update: None,
        custom_delete: None,
        filters: vec![FilterMapping {
            name: "active".to_string(),
            condition: "active = true".to_string(),
        }],
    };
    boot.hierarchies.push(EntityHierarchy {
        root_entity: "Customer".to_string(),
    });
    boot.types.insert(
        "Customer".to_string(),
        IdentifiableTypeMapping::Entity(Arc::new(entity)),
    );

    let collector = InFlightMetadataCollector::new();
    let ctx = RuntimeCreationContext::standard();
    let mut sink = CollectingRegionSink::default();
    let runtime = RuntimeModelCreationProcess::new(&boot, &collector)
        .execute(&ctx, &mut sink)
        .unwrap();
    runtime.find_entity_descriptor("Customer").unwrap()
}

fn loader() -> SingleIdLoader {
    SingleIdLoader::new(customer_descriptor(), Arc::new(AnsiDialect))
}

#[test]
fn plain_loads_cache_per_lock_mode() {
    let loader = loader();
    let influencers = LoadQueryInfluencers::none();

    let read_one = loader.resolve_jdbc_select(&influencers, &LockOptions::read());
    let read_two = loader.resolve_jdbc_select(&influencers, &LockOptions::read());
    assert!(Arc::ptr_eq(&read_one, &read_two));
    assert_eq!(
        read_one.sql,
        "select id, name, email, version from customer where id = ?"
    );
    assert_eq!(read_one.parameter_count, 1);

    let upgrade = loader.resolve_jdbc_select(&influencers, &LockOptions::of(LockMode::Upgrade));
    assert!(!Arc::ptr_eq(&read_one, &upgrade));
    assert!(upgrade.sql.ends_with("for update"));
}

#[test]
fn filter_affected_loads_are_never_cached() {
    let loader = loader();
    let mut influencers = LoadQueryInfluencers::none();
    influencers.enable_filter("active");

    let first = loader.resolve_jdbc_select(&influencers, &LockOptions::read());
    let second = loader.resolve_jdbc_select(&influencers, &LockOptions::read());
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(first.sql.contains("and (active = true)"));
}

#[test]
fn unrelated_filters_do_not_bypass_the_cache() {
    let loader = loader();
    let mut influencers = LoadQueryInfluencers::none();
    influencers.enable_filter("somebody-elses-filter");

    let first = loader.resolve_jdbc_select(&influencers, &LockOptions::read());
    let second = loader.resolve_jdbc_select(&influencers, &LockOptions::read());
    assert!(Arc::ptr_eq(&first, &second));
    assert!(!first.sql.contains("and ("));
}

#[test]
fn internal_fetch_profiles_cache_below_the_upgrade_threshold() {
    let loader = loader();
    let mut influencers = LoadQueryInfluencers::none();
    influencers.internal_fetch_profile = Some(CascadingFetchProfile::Merge);

    let first = loader.resolve_jdbc_select(&influencers, &LockOptions::read());
    let second = loader.resolve_jdbc_select(&influencers, &LockOptions::read());
    assert!(Arc::ptr_eq(&first, &second));

    // At or above Upgrade the profile tier is skipped; the lock-mode tier
    // serves instead.
    let upgraded_one =
        loader.resolve_jdbc_select(&influencers, &LockOptions::of(LockMode::Upgrade));
    let upgraded_two =
        loader.resolve_jdbc_select(&influencers, &LockOptions::of(LockMode::Upgrade));
    assert!(Arc::ptr_eq(&upgraded_one, &upgraded_two));
    assert!(!Arc::ptr_eq(&first, &upgraded_one));
}

#[test]
fn graph_and_indefinite_wait_loads_are_uncached() {
    let loader = loader();

    let mut graphed = LoadQueryInfluencers::none();
    graphed.effective_entity_graph = Some(AppliedGraph {
        name: "with-orders".to_string(),
    });
    let first = loader.resolve_jdbc_select(&graphed, &LockOptions::read());
    let second = loader.resolve_jdbc_select(&graphed, &LockOptions::read());
    assert!(!Arc::ptr_eq(&first, &second));

    let wait = LockOptions {
        mode: LockMode::Upgrade,
        timeout: LockTimeout::WaitForever,
    };
    let waiting_one = loader.resolve_jdbc_select(&LoadQueryInfluencers::none(), &wait);
    let waiting_two = loader.resolve_jdbc_select(&LoadQueryInfluencers::none(), &wait);
    assert!(!Arc::ptr_eq(&waiting_one, &waiting_two));
}

#[test]
fn snapshot_select_is_built_exactly_once() {
    let loader = loader();
    let first = loader.database_snapshot_select();
    let second = loader.database_snapshot_select();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        first.sql,
        "select id, name, email, version from customer where id = ?"
    );
}

#[test]
fn multi_id_selects_cache_per_batch_size() {
    let loader = MultiIdLoader::new(customer_descriptor());

    let batch = loader.select_for_batch(3);
    assert_eq!(
        batch.sql,
        "select id, name, email, version from customer where id in (?, ?, ?)"
    );
    assert_eq!(batch.parameter_count, 3);
    assert!(Arc::ptr_eq(&batch, &loader.select_for_batch(3)));
    assert!(!Arc::ptr_eq(&batch, &loader.select_for_batch(5)));
}

#[test]
fn unique_key_loads_use_the_unique_column() {
    let loader = UniqueKeyLoader::new(customer_descriptor(), "email");
    let select = loader.resolve_jdbc_select();
    assert_eq!(
        select.sql,
        "select id, name, email, version from customer where email = ?"
    );
    assert!(Arc::ptr_eq(&select, &loader.resolve_jdbc_select()));
}

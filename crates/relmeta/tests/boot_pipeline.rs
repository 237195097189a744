//! Full-pipeline coverage: XML document → synthesized class details → boot
//! model → runtime metamodel → SQL statements.

use relmeta::{BootOptions, boot_runtime_model};
use relmeta_annotate::registry::ClassDetailsRegistry;
use relmeta_boot::document::{
    AttributesElement, BasicElement, DocumentRoot, EntityElement, EntityMappingsRoot, IdElement,
    MappingDocument, TableElement,
};
use relmeta_runtime::{
    cache::CollectingRegionSink,
    lock::LockOptions,
    typesys::AnsiDialect,
};
use relmeta_sql::{
    mutation::{StandardTableDeleteBuilder, StandardTableInsertBuilder, TableMutation},
    select::{LoadQueryInfluencers, SingleIdLoader},
};
use std::sync::Arc;

fn customer_document() -> MappingDocument {
    MappingDocument {
        origin: "customer-orm.xml".into(),
        root: DocumentRoot::EntityMappings(EntityMappingsRoot {
            entities: vec![EntityElement {
                class: Some("Customer".into()),
                table: Some(TableElement {
                    name: Some("T1".into()),
                    ..TableElement::default()
                }),
                attributes: AttributesElement {
                    ids: vec![IdElement {
                        name: "id".into(),
                        ..IdElement::default()
                    }],
                    basics: vec![BasicElement {
                        name: "name".into(),
                        optimistic_lock: Some(false),
                        ..BasicElement::default()
                    }],
                    ..AttributesElement::default()
                },
                ..EntityElement::default()
            }],
            ..EntityMappingsRoot::default()
        }),
    }
}

#[test]
fn xml_document_boots_to_an_executable_model() {
    let classes = ClassDetailsRegistry::new();
    let mut sink = CollectingRegionSink::default();

    let runtime = boot_runtime_model(
        &[customer_document()],
        &classes,
        &BootOptions::default(),
        &mut sink,
    )
    .unwrap();

    let customer = runtime.find_entity_descriptor("Customer").unwrap();
    assert!(customer.is_finished());
    assert_eq!(customer.table().name, "T1");

    // The excluded-from-optimistic-lock flag survived the whole pipeline.
    let name_attr = customer
        .attributes()
        .iter()
        .find(|a| a.name() == "name")
        .unwrap();
    assert!(!name_attr.optimistic_locked());

    // Loads select from the XML-declared table.
    let loader = SingleIdLoader::new(customer.clone(), Arc::new(AnsiDialect));
    let select = loader.resolve_jdbc_select(&LoadQueryInfluencers::none(), &LockOptions::read());
    assert_eq!(select.sql, "select id, name from T1 where id = ?");

    // Mutations against the same table keep the wire contract: placeholder
    // count equals the parameter map size.
    let mut insert = StandardTableInsertBuilder::new(customer.table().name.clone(), 0);
    for column in customer.state_columns() {
        if Some(&column.name)
            == customer.identifier_attribute().map(|id| &id.column.name)
        {
            continue;
        }
        insert.add_values_column(column.name);
    }
    if let Some(id) = customer.identifier_attribute() {
        insert.add_key_column(id.column.name.clone());
    }
    let insert = insert.build();
    assert_eq!(insert.sql(), "insert into T1 (name, id) values (?, ?)");
    assert_eq!(
        insert.parameter_count(),
        insert.sql().matches('?').count()
    );

    let mut delete = StandardTableDeleteBuilder::new(customer.table().name.clone(), 0);
    delete.add_primary_key_column("id");
    let delete = delete.build();
    assert_eq!(delete.sql(), "delete from T1 where id = ?");
}

#[test]
fn boot_failures_abort_without_partial_models() {
    let classes = ClassDetailsRegistry::new();
    let mut sink = CollectingRegionSink::default();

    let result = boot_runtime_model(
        &[MappingDocument {
            origin: "legacy.hbm.xml".into(),
            root: DocumentRoot::Legacy,
        }],
        &classes,
        &BootOptions::default(),
        &mut sink,
    );

    assert!(result.is_err());
    assert!(sink.configs.is_empty());
}

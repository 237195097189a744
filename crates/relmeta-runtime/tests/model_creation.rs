//! End-to-end coverage of runtime model creation over hand-built boot models.

use relmeta_annotate::{
    standard::{self, standard_registry},
    usage::AnnotationUsage,
    value::AnnotationValue,
};
use relmeta_boot::{
    collector::{InFlightMetadataCollector, NamedGraphDefinition},
    model::{
        AttributeMapping, BasicAttributeMapping, BootModel, CollectionElement, CollectionMapping,
        Column, EmbeddedValueMapping, EntityHierarchy, EntityMapping, IdentifiableTypeMapping,
        IdentifierMapping, Table,
        attribute::{EmbeddedAttributeMapping, PluralAttributeMapping, ToOneAttributeMapping},
        identifiable::CacheConfig,
    },
};
use relmeta_runtime::{
    cache::CollectingRegionSink,
    error::RuntimeModelError,
    model::RuntimeModel,
    process::{RuntimeCreationContext, RuntimeModelCreationProcess},
};
use relmeta_boot::model::attribute::FetchTiming;
use std::sync::Arc;

fn entity(name: &str, attributes: Vec<AttributeMapping>) -> EntityMapping {
    EntityMapping {
        managed_name: name.to_string(),
        entity_name: name.to_string(),
        table: Table::named(name.to_lowercase()),
        is_abstract: false,
        identifier: Some(IdentifierMapping {
            attribute: BasicAttributeMapping::new("id", Column::named("id")),
            generator: None,
        }),
        version: None,
        attributes,
        super_type: None,
        sub_types: Vec::new(),
        cache: None,
        custom_insert: None,
        custom_update: None,
        custom_delete: None,
        filters: Vec::new(),
    }
}

fn embeddable(name: &str, attributes: Vec<AttributeMapping>) -> EmbeddedValueMapping {
    EmbeddedValueMapping {
        managed_name: name.to_string(),
        attributes,
    }
}

fn embedded_attr(attribute: &str, target: &str) -> AttributeMapping {
    AttributeMapping::Embedded(EmbeddedAttributeMapping {
        name: attribute.to_string(),
        embeddable: target.to_string(),
    })
}

fn basic_attr(attribute: &str) -> AttributeMapping {
    AttributeMapping::Basic(BasicAttributeMapping::new(
        attribute,
        Column::named(attribute),
    ))
}

fn boot_model(
    entities: Vec<EntityMapping>,
    embeddables: Vec<EmbeddedValueMapping>,
) -> BootModel {
    let mut model = BootModel::default();
    for entity in entities {
        model.hierarchies.push(EntityHierarchy {
            root_entity: entity.managed_name.clone(),
        });
        model.types.insert(
            entity.managed_name.clone(),
            IdentifiableTypeMapping::Entity(Arc::new(entity)),
        );
    }
    for embeddable in embeddables {
        model
            .embeddables
            .insert(embeddable.managed_name.clone(), Arc::new(embeddable));
    }
    model
}

fn execute(model: &BootModel) -> Result<RuntimeModel, RuntimeModelError> {
    let collector = InFlightMetadataCollector::new();
    execute_with(model, &collector)
}

fn execute_with(
    model: &BootModel,
    collector: &InFlightMetadataCollector,
) -> Result<RuntimeModel, RuntimeModelError> {
    let ctx = RuntimeCreationContext::standard();
    let mut sink = CollectingRegionSink::default();
    RuntimeModelCreationProcess::new(model, collector).execute(&ctx, &mut sink)
}

#[test]
fn acyclic_embeddables_converge_completely() {
    let model = boot_model(
        vec![entity("Order", vec![embedded_attr("address", "Address")])],
        vec![
            embeddable("Address", vec![embedded_attr("geo", "GeoPoint")]),
            embeddable("GeoPoint", vec![basic_attr("lat"), basic_attr("lon")]),
        ],
    );

    let runtime = execute(&model).unwrap();
    assert!(runtime.embeddable("Address").unwrap().is_finished());
    assert!(runtime.embeddable("GeoPoint").unwrap().is_finished());
    assert!(runtime.find_entity_descriptor("Order").unwrap().is_finished());
}

#[test]
fn circular_embeddables_fail_with_non_convergence() {
    let model = boot_model(
        Vec::new(),
        vec![
            embeddable("Chicken", vec![embedded_attr("egg", "Egg")]),
            embeddable("Egg", vec![embedded_attr("chicken", "Chicken")]),
        ],
    );

    match execute(&model) {
        Err(RuntimeModelError::NonConvergent { pending }) => {
            assert_eq!(pending.len(), 2);
        }
        other => panic!("expected non-convergence, got {other:?}"),
    }
}

#[test]
fn duplicate_hierarchy_is_encountered_twice() {
    let mut model = boot_model(vec![entity("Customer", Vec::new())], Vec::new());
    model.hierarchies.push(EntityHierarchy {
        root_entity: "Customer".to_string(),
    });

    assert!(matches!(
        execute(&model),
        Err(RuntimeModelError::EncounteredTwice { .. })
    ));
}

#[test]
fn to_one_keys_resolve_through_the_navigable_queue() {
    let order = entity(
        "Order",
        vec![AttributeMapping::ToOne(ToOneAttributeMapping {
            name: "customer".to_string(),
            target_entity: "Customer".to_string(),
            fetch: FetchTiming::Eager,
            optional: false,
            join_column: Column::named("customer_id"),
        })],
    );
    let model = boot_model(vec![order, entity("Customer", Vec::new())], Vec::new());

    let runtime = execute(&model).unwrap();
    let fk = runtime.foreign_key("Order.customer").unwrap();
    assert_eq!(fk.column.name, "customer_id");
    assert_eq!(fk.target_entity, "Customer");
    assert_eq!(fk.target_column.name, "id");
}

#[test]
fn collections_wait_for_their_element_entity() {
    let mut order = entity(
        "Order",
        vec![AttributeMapping::Plural(PluralAttributeMapping {
            name: "lines".to_string(),
            role: "Order.lines".to_string(),
            fetch: FetchTiming::Lazy,
        })],
    );
    order.sub_types = Vec::new();

    let mut model = boot_model(vec![order, entity("OrderLine", Vec::new())], Vec::new());
    model.collections.insert(
        "Order.lines".to_string(),
        Arc::new(CollectionMapping {
            role: "Order.lines".to_string(),
            owner_entity: "Order".to_string(),
            attribute: "lines".to_string(),
            element: CollectionElement::Entity {
                entity_name: "OrderLine".to_string(),
                mapped_by: Some("order".to_string()),
            },
            table: None,
            cache: None,
        }),
    );

    let runtime = execute(&model).unwrap();
    let collection = runtime.collection("Order.lines").unwrap();
    assert!(collection.is_finished());
    let state = collection.state().unwrap();
    assert_eq!(state.key_column.name, "order_id");
}

#[test]
fn subclasses_inherit_identifier_resolution() {
    let mut animal = entity("Animal", vec![basic_attr("name")]);
    animal.sub_types = vec!["Dog".to_string()];

    let mut dog = entity("Dog", vec![basic_attr("breed")]);
    dog.identifier = None;
    dog.super_type = Some("Animal".to_string());

    let mut model = BootModel::default();
    model.hierarchies.push(EntityHierarchy {
        root_entity: "Animal".to_string(),
    });
    model.types.insert(
        "Animal".to_string(),
        IdentifiableTypeMapping::Entity(Arc::new(animal)),
    );
    model.types.insert(
        "Dog".to_string(),
        IdentifiableTypeMapping::Entity(Arc::new(dog)),
    );

    let runtime = execute(&model).unwrap();
    let dog = runtime.find_entity_descriptor("Dog").unwrap();
    assert!(dog.is_finished());
    assert!(dog.identifier_attribute().is_none());
    assert_eq!(
        runtime.identifier_attribute("Dog").unwrap().column.name,
        "id"
    );
}

#[test]
fn named_entity_graphs_apply_with_subgraphs() {
    let descriptors = standard_registry();
    let node = AnnotationUsage::builder(descriptors.require(standard::NAMED_ATTRIBUTE_NODE).unwrap())
        .value("value", AnnotationValue::str("lines"))
        .unwrap()
        .value("subgraph", AnnotationValue::str("lineDetail"))
        .unwrap()
        .build();
    let qty_node =
        AnnotationUsage::builder(descriptors.require(standard::NAMED_ATTRIBUTE_NODE).unwrap())
            .value("value", AnnotationValue::str("qty"))
            .unwrap()
            .build();
    let subgraph = AnnotationUsage::builder(descriptors.require(standard::NAMED_SUBGRAPH).unwrap())
        .value("name", AnnotationValue::str("lineDetail"))
        .unwrap()
        .value(
            "attributeNodes",
            AnnotationValue::List(vec![AnnotationValue::Nested(qty_node)]),
        )
        .unwrap()
        .build();
    let graph = AnnotationUsage::builder(descriptors.require(standard::NAMED_ENTITY_GRAPH).unwrap())
        .value("name", AnnotationValue::str("order-with-lines"))
        .unwrap()
        .value(
            "attributeNodes",
            AnnotationValue::List(vec![AnnotationValue::Nested(node)]),
        )
        .unwrap()
        .value(
            "subgraphs",
            AnnotationValue::List(vec![AnnotationValue::Nested(subgraph)]),
        )
        .unwrap()
        .build();

    let mut collector = InFlightMetadataCollector::new();
    collector
        .add_entity_graph(NamedGraphDefinition {
            name: "order-with-lines".to_string(),
            entity_name: "Order".to_string(),
            usage: graph,
        })
        .unwrap();

    let model = boot_model(vec![entity("Order", Vec::new())], Vec::new());
    let runtime = execute_with(&model, &collector).unwrap();

    let applied = runtime.entity_graph("order-with-lines").unwrap();
    assert_eq!(applied.entity_name, "Order");
    let lines = applied.node("lines").unwrap();
    let detail = lines.subgraph.as_ref().unwrap();
    assert_eq!(detail.name, "lineDetail");
    assert!(detail.nodes.contains_key("qty"));
}

#[test]
fn unknown_graph_entity_is_fatal() {
    let descriptors = standard_registry();
    let graph = AnnotationUsage::builder(descriptors.require(standard::NAMED_ENTITY_GRAPH).unwrap())
        .value("name", AnnotationValue::str("ghost"))
        .unwrap()
        .build();

    let mut collector = InFlightMetadataCollector::new();
    collector
        .add_entity_graph(NamedGraphDefinition {
            name: "ghost".to_string(),
            entity_name: "Ghost".to_string(),
            usage: graph,
        })
        .unwrap();

    let model = boot_model(vec![entity("Order", Vec::new())], Vec::new());
    assert!(matches!(
        execute_with(&model, &collector),
        Err(RuntimeModelError::UnknownGraphEntity { .. })
    ));
}

#[test]
fn cache_regions_are_shared_by_name() {
    let mut customer = entity("Customer", Vec::new());
    customer.cache = Some(CacheConfig {
        region: Some("shared".to_string()),
        concurrency: Some("READ_ONLY".to_string()),
    });
    let mut order = entity("Order", Vec::new());
    order.cache = Some(CacheConfig {
        region: Some("shared".to_string()),
        concurrency: None,
    });

    let model = boot_model(vec![customer, order], Vec::new());
    let collector = InFlightMetadataCollector::new();
    let ctx = RuntimeCreationContext::standard();
    let mut sink = CollectingRegionSink::default();
    RuntimeModelCreationProcess::new(&model, &collector)
        .execute(&ctx, &mut sink)
        .unwrap();

    assert_eq!(sink.configs.len(), 1);
    let config = &sink.configs[0];
    assert_eq!(config.region_name, "shared");
    assert_eq!(config.entity_roles.len(), 2);
}

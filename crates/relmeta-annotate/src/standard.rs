//! Standard mapping-annotation catalog.
//!
//! Every annotation type the binding pipeline understands is declared here as
//! a descriptor with its attribute table and repeatable linkage, then
//! registered into a fresh per-boot registry. Attribute names follow the
//! camelCase convention of the annotation model they describe.

use crate::{
    descriptor::{AnnotationDescriptor, AnnotationDescriptorRegistry},
    value::AnnotationValue,
};

pub const ENTITY: &str = "Entity";
pub const TABLE: &str = "Table";
pub const SECONDARY_TABLE: &str = "SecondaryTable";
pub const MAPPED_SUPERCLASS: &str = "MappedSuperclass";
pub const EMBEDDABLE: &str = "Embeddable";
pub const EMBEDDED: &str = "Embedded";
pub const EMBEDDED_ID: &str = "EmbeddedId";
pub const ID: &str = "Id";
pub const BASIC: &str = "Basic";
pub const VERSION: &str = "Version";
pub const ACCESS: &str = "Access";
pub const ENUMERATED: &str = "Enumerated";
pub const LOB: &str = "Lob";
pub const NATIONALIZED: &str = "Nationalized";
pub const OPTIMISTIC_LOCK: &str = "OptimisticLock";
pub const CHECK: &str = "Check";
pub const COMMENT: &str = "Comment";
pub const CACHEABLE: &str = "Cacheable";
pub const CACHE: &str = "Cache";
pub const CONVERT: &str = "Convert";
pub const SEQUENCE_GENERATOR: &str = "SequenceGenerator";
pub const TABLE_GENERATOR: &str = "TableGenerator";
pub const GENERIC_GENERATOR: &str = "GenericGenerator";
pub const NAMED_QUERY: &str = "NamedQuery";
pub const NAMED_QUERIES: &str = "NamedQueries";
pub const NAMED_ENTITY_GRAPH: &str = "NamedEntityGraph";
pub const NAMED_ENTITY_GRAPHS: &str = "NamedEntityGraphs";
pub const NAMED_ATTRIBUTE_NODE: &str = "NamedAttributeNode";
pub const NAMED_SUBGRAPH: &str = "NamedSubgraph";
pub const FILTER: &str = "Filter";
pub const SQL_INSERT: &str = "SqlInsert";
pub const SQL_UPDATE: &str = "SqlUpdate";
pub const SQL_DELETE: &str = "SqlDelete";
pub const MANY_TO_ONE: &str = "ManyToOne";
pub const ONE_TO_MANY: &str = "OneToMany";
pub const ELEMENT_COLLECTION: &str = "ElementCollection";
pub const JOIN_COLUMN: &str = "JoinColumn";

pub const ACCESS_TYPE: &str = "AccessType";
pub const FETCH_TYPE: &str = "FetchType";
pub const ENUM_TYPE: &str = "EnumType";
pub const CACHE_CONCURRENCY: &str = "CacheConcurrencyStrategy";

fn empty_str() -> Option<AnnotationValue> {
    Some(AnnotationValue::str(""))
}

fn empty_list() -> Option<AnnotationValue> {
    Some(AnnotationValue::List(Vec::new()))
}

/// Build a registry populated with the standard catalog.
#[must_use]
pub fn standard_registry() -> AnnotationDescriptorRegistry {
    let registry = AnnotationDescriptorRegistry::new();
    register_standard(&registry);
    registry
}

/// Register the standard catalog into an existing registry.
pub fn register_standard(registry: &AnnotationDescriptorRegistry) {
    registry.register(
        AnnotationDescriptor::builder(ENTITY)
            .attribute("name", empty_str())
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(TABLE)
            .attribute("name", empty_str())
            .attribute("catalog", empty_str())
            .attribute("schema", empty_str())
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(SECONDARY_TABLE)
            .attribute("name", empty_str())
            .build(),
    );
    registry.register(AnnotationDescriptor::builder(MAPPED_SUPERCLASS).build());
    registry.register(AnnotationDescriptor::builder(EMBEDDABLE).build());
    registry.register(AnnotationDescriptor::builder(EMBEDDED).build());
    registry.register(AnnotationDescriptor::builder(EMBEDDED_ID).build());
    registry.register(AnnotationDescriptor::builder(ID).build());
    registry.register(
        AnnotationDescriptor::builder(BASIC)
            .attribute("optional", Some(AnnotationValue::Bool(true)))
            .attribute(
                "fetch",
                Some(AnnotationValue::enum_const(FETCH_TYPE, "EAGER")),
            )
            .build(),
    );
    registry.register(AnnotationDescriptor::builder(VERSION).build());
    registry.register(
        AnnotationDescriptor::builder(ACCESS)
            .attribute("value", None)
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(ENUMERATED)
            .attribute(
                "value",
                Some(AnnotationValue::enum_const(ENUM_TYPE, "ORDINAL")),
            )
            .build(),
    );
    registry.register(AnnotationDescriptor::builder(LOB).build());
    registry.register(AnnotationDescriptor::builder(NATIONALIZED).build());
    registry.register(
        AnnotationDescriptor::builder(OPTIMISTIC_LOCK)
            .attribute("excluded", Some(AnnotationValue::Bool(false)))
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(CHECK)
            .attribute("constraints", None)
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(COMMENT)
            .attribute("value", None)
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(CACHEABLE)
            .attribute("value", Some(AnnotationValue::Bool(true)))
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(CACHE)
            .attribute("usage", None)
            .attribute("region", empty_str())
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(CONVERT)
            .attribute("converter", None)
            .attribute("attributeName", empty_str())
            .attribute("disableConversion", Some(AnnotationValue::Bool(false)))
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(SEQUENCE_GENERATOR)
            .attribute("name", None)
            .attribute("sequenceName", empty_str())
            .attribute("initialValue", Some(AnnotationValue::Int(1)))
            .attribute("allocationSize", Some(AnnotationValue::Int(50)))
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(TABLE_GENERATOR)
            .attribute("name", None)
            .attribute("table", empty_str())
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(GENERIC_GENERATOR)
            .attribute("name", None)
            .attribute("strategy", None)
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(NAMED_QUERY)
            .attribute("name", None)
            .attribute("query", None)
            .repeatable_in(NAMED_QUERIES)
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(NAMED_QUERIES)
            .attribute("value", empty_list())
            .container_of(NAMED_QUERY)
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(NAMED_ENTITY_GRAPH)
            .attribute("name", empty_str())
            .attribute("attributeNodes", empty_list())
            .attribute("subgraphs", empty_list())
            .repeatable_in(NAMED_ENTITY_GRAPHS)
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(NAMED_ENTITY_GRAPHS)
            .attribute("value", empty_list())
            .container_of(NAMED_ENTITY_GRAPH)
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(NAMED_ATTRIBUTE_NODE)
            .attribute("value", None)
            .attribute("subgraph", empty_str())
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(NAMED_SUBGRAPH)
            .attribute("name", None)
            .attribute("attributeNodes", empty_list())
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(FILTER)
            .attribute("name", None)
            .attribute("condition", empty_str())
            .build(),
    );
    for custom_sql in [SQL_INSERT, SQL_UPDATE, SQL_DELETE] {
        registry.register(
            AnnotationDescriptor::builder(custom_sql)
                .attribute("sql", None)
                .attribute("callable", Some(AnnotationValue::Bool(false)))
                .build(),
        );
    }
    registry.register(
        AnnotationDescriptor::builder(MANY_TO_ONE)
            .attribute("targetEntity", empty_str())
            .attribute(
                "fetch",
                Some(AnnotationValue::enum_const(FETCH_TYPE, "EAGER")),
            )
            .attribute("optional", Some(AnnotationValue::Bool(true)))
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(ONE_TO_MANY)
            .attribute("targetEntity", empty_str())
            .attribute("mappedBy", empty_str())
            .attribute(
                "fetch",
                Some(AnnotationValue::enum_const(FETCH_TYPE, "LAZY")),
            )
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(ELEMENT_COLLECTION)
            .attribute(
                "fetch",
                Some(AnnotationValue::enum_const(FETCH_TYPE, "LAZY")),
            )
            .build(),
    );
    registry.register(
        AnnotationDescriptor::builder(JOIN_COLUMN)
            .attribute("name", empty_str())
            .build(),
    );

    // Meta-annotations are registered so raw sources can hand them over;
    // classification drops them.
    for meta in ["Target", "Retention", "Documented", "Inherited", "Repeatable"] {
        registry.register(AnnotationDescriptor::builder(meta).build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TypeName;

    #[test]
    fn catalog_registers_repeatable_linkage() {
        let registry = standard_registry();

        let graph = registry.require(NAMED_ENTITY_GRAPH).unwrap();
        assert_eq!(
            graph.repeatable_container(),
            Some(&TypeName::from(NAMED_ENTITY_GRAPHS))
        );

        let graphs = registry.require(NAMED_ENTITY_GRAPHS).unwrap();
        assert_eq!(
            graphs.container_element(),
            Some(&TypeName::from(NAMED_ENTITY_GRAPH))
        );
    }

    #[test]
    fn basic_defaults_are_declared() {
        let registry = standard_registry();
        let basic = registry.require(BASIC).unwrap();
        assert_eq!(
            basic.attribute("optional").unwrap().default,
            Some(AnnotationValue::Bool(true))
        );
    }
}

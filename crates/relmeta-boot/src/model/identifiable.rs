use crate::model::{
    attribute::{AttributeMapping, BasicAttributeMapping},
    table::Table,
};
use std::sync::Arc;

///
/// IdentifierMapping
///
/// Simple (single-attribute) identifier. Composite and embedded identifiers
/// are rejected upstream before a mapping is ever built.
///

#[derive(Clone, Debug)]
pub struct IdentifierMapping {
    pub attribute: BasicAttributeMapping,
    pub generator: Option<String>,
}

///
/// CacheConfig
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CacheConfig {
    /// Explicit region name; defaults to the hierarchy root's entity name.
    pub region: Option<String>,
    pub concurrency: Option<String>,
}

///
/// CustomSql
///
/// Author-supplied statement overriding the generated one for a table
/// mutation. Once set, no generated fragment may be layered on top.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CustomSql {
    pub sql: String,
    pub callable: bool,
}

///
/// FilterMapping
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterMapping {
    pub name: String,
    pub condition: String,
}

///
/// EntityMapping
///
/// Boot-time description of one entity type. Super/sub links are held as
/// managed names; the tree is navigated through the boot model.
///

#[derive(Clone, Debug)]
pub struct EntityMapping {
    /// Registry key (class name, or logical name for dynamic models).
    pub managed_name: String,
    pub entity_name: String,
    pub table: Table,
    pub is_abstract: bool,
    pub identifier: Option<IdentifierMapping>,
    pub version: Option<BasicAttributeMapping>,
    pub attributes: Vec<AttributeMapping>,
    pub super_type: Option<String>,
    pub sub_types: Vec<String>,
    pub cache: Option<CacheConfig>,
    pub custom_insert: Option<CustomSql>,
    pub custom_update: Option<CustomSql>,
    pub custom_delete: Option<CustomSql>,
    pub filters: Vec<FilterMapping>,
}

///
/// MappedSuperclassMapping
///

#[derive(Clone, Debug)]
pub struct MappedSuperclassMapping {
    pub managed_name: String,
    pub identifier: Option<IdentifierMapping>,
    pub version: Option<BasicAttributeMapping>,
    pub attributes: Vec<AttributeMapping>,
    pub super_type: Option<String>,
    pub sub_types: Vec<String>,
}

///
/// IdentifiableTypeMapping
///
/// One node of an entity hierarchy tree: entity or mapped-superclass.
///

#[derive(Clone, Debug)]
pub enum IdentifiableTypeMapping {
    Entity(Arc<EntityMapping>),
    MappedSuperclass(Arc<MappedSuperclassMapping>),
}

impl IdentifiableTypeMapping {
    #[must_use]
    pub fn managed_name(&self) -> &str {
        match self {
            Self::Entity(e) => &e.managed_name,
            Self::MappedSuperclass(m) => &m.managed_name,
        }
    }

    #[must_use]
    pub fn super_type(&self) -> Option<&str> {
        match self {
            Self::Entity(e) => e.super_type.as_deref(),
            Self::MappedSuperclass(m) => m.super_type.as_deref(),
        }
    }

    #[must_use]
    pub fn sub_types(&self) -> &[String] {
        match self {
            Self::Entity(e) => &e.sub_types,
            Self::MappedSuperclass(m) => &m.sub_types,
        }
    }

    #[must_use]
    pub const fn is_entity(&self) -> bool {
        matches!(self, Self::Entity(_))
    }

    #[must_use]
    pub const fn as_entity(&self) -> Option<&Arc<EntityMapping>> {
        match self {
            Self::Entity(e) => Some(e),
            Self::MappedSuperclass(_) => None,
        }
    }
}

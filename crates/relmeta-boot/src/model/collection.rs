use crate::model::table::Table;
use relmeta_annotate::value::TypeName;

///
/// CollectionElement
///

#[derive(Clone, Debug)]
pub enum CollectionElement {
    Basic {
        attribute_type: Option<TypeName>,
    },
    Entity {
        entity_name: String,
        mapped_by: Option<String>,
    },
}

///
/// CollectionMapping
///
/// One plural attribute, keyed by role (`OwnerEntity.attribute`).
///

#[derive(Clone, Debug)]
pub struct CollectionMapping {
    pub role: String,
    pub owner_entity: String,
    pub attribute: String,
    pub element: CollectionElement,
    /// Join/collection table; absent when the element side owns the key.
    pub table: Option<Table>,
    pub cache: Option<crate::model::identifiable::CacheConfig>,
}

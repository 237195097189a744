//! Boot-time object/relational model.
//!
//! Validated-but-not-yet-runtime metadata: what the binder produces and what
//! runtime-model creation consumes. Types here describe *what exists*; the
//! runtime descriptors describe *what runs*.

pub mod attribute;
pub mod collection;
pub mod embedded;
pub mod hierarchy;
pub mod identifiable;
pub mod table;

pub use attribute::{
    AttributeMapping, BasicAttributeMapping, EmbeddedAttributeMapping, FetchTiming,
    PluralAttributeMapping, ToOneAttributeMapping,
};
pub use collection::{CollectionElement, CollectionMapping};
pub use embedded::EmbeddedValueMapping;
pub use hierarchy::{BootModel, EntityHierarchy};
pub use identifiable::{
    CacheConfig, CustomSql, EntityMapping, FilterMapping, IdentifiableTypeMapping,
    IdentifierMapping, MappedSuperclassMapping,
};
pub use table::{Column, Table};

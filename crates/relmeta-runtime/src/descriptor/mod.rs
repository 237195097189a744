//! Runtime descriptor graph.
//!
//! Descriptors are created 1:1 from boot mappings, registered into the
//! in-flight model, then finished — possibly across several fixed-point
//! passes, because attribute resolution can reference entities, embeddables,
//! and collections that are not ready yet.

pub mod attribute;
pub mod collection;
pub mod embedded;
pub mod entity;

pub use attribute::{
    BasicAttribute, EmbeddedAttribute, PluralAttribute, RuntimeAttribute, ToOneAttribute,
};
pub use collection::{
    CollectionRuntimeState, PersistentCollectionDescriptor, ResolvedCollectionElement,
};
pub use embedded::EmbeddedTypeDescriptor;
pub use entity::{
    EntityDescriptor, EntityRuntimeState, ForeignKeyDescriptor, MappedSuperclassDescriptor,
};

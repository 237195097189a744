//! Boot-time metadata binding.
//!
//! Consumes mapping metadata through the source-agnostic annotation layer —
//! real usages and XML-synthesized usages look identical here — and produces
//! the validated boot model that runtime-model creation transforms.

pub mod binder;
pub mod collector;
pub mod document;
pub mod error;
pub mod model;
pub mod xml;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        binder::bind_boot_model,
        collector::{
            ConverterRegistration, GeneratorKind, GeneratorRegistration,
            InFlightMetadataCollector, NamedGraphDefinition, NamedQueryDefinition,
        },
        document::{
            AccessKind, AttributesElement, BasicElement, DocumentRoot, EmbeddableElement,
            EntityElement, EntityMappingsRoot, IdElement, MappingDocument,
            MappedSuperclassElement, TableElement, VersionElement,
        },
        error::BootError,
        model::{
            AttributeMapping, BasicAttributeMapping, BootModel, CollectionElement,
            CollectionMapping, Column, EmbeddedValueMapping, EntityHierarchy, EntityMapping,
            FetchTiming, IdentifiableTypeMapping, IdentifierMapping, MappedSuperclassMapping,
            Table,
        },
        xml::{XmlMappingProcessor, XmlProcessingContext, XmlProcessingOptions},
    };
}

pub use error::BootError;

//! relmeta: declarative mapping metadata, compiled.
//!
//! One pipeline, four layers: source-agnostic annotation metadata
//! ([`relmeta_annotate`]), boot-time binding ([`relmeta_boot`]), runtime
//! metamodel creation ([`relmeta_runtime`]), and parameterized SQL
//! construction ([`relmeta_sql`]). This crate re-exports the public surface
//! and offers a one-call boot entry point.

pub use relmeta_annotate as annotate;
pub use relmeta_boot as boot;
pub use relmeta_error as error;
pub use relmeta_runtime as runtime;
pub use relmeta_sql as sql;

use relmeta_annotate::{
    descriptor::AnnotationDescriptorRegistry, registry::ClassDetailsRegistry, standard,
};
use relmeta_boot::{
    binder::bind_boot_model,
    collector::InFlightMetadataCollector,
    document::MappingDocument,
    xml::{XmlMappingProcessor, XmlProcessingContext, XmlProcessingOptions},
};
use relmeta_runtime::{
    cache::RegionConfigSink,
    model::RuntimeModel,
    process::{RuntimeCreationContext, RuntimeModelCreationProcess},
};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{BootOptions, Error, boot_runtime_model};
    pub use relmeta_annotate::prelude::*;
    pub use relmeta_boot::prelude::*;
    pub use relmeta_runtime::prelude::*;
    pub use relmeta_sql::prelude::*;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Annotate(#[from] relmeta_annotate::Error),

    #[error(transparent)]
    Boot(#[from] relmeta_boot::BootError),

    #[error(transparent)]
    Runtime(#[from] relmeta_runtime::RuntimeModelError),
}

///
/// BootOptions
///

#[derive(Debug, Default)]
pub struct BootOptions {
    pub xml: XmlProcessingOptions,
}

/// Run the full boot pipeline: XML synthesis over the class registry, boot
/// model binding, then runtime model creation. Any failure aborts the whole
/// boot; no partially-built model is ever returned.
pub fn boot_runtime_model(
    documents: &[MappingDocument],
    classes: &ClassDetailsRegistry,
    options: &BootOptions,
    region_sink: &mut dyn RegionConfigSink,
) -> Result<RuntimeModel, Error> {
    let descriptors: AnnotationDescriptorRegistry = standard::standard_registry();
    let mut collector = InFlightMetadataCollector::new();

    let mut xml_ctx = XmlProcessingContext {
        descriptors: &descriptors,
        classes,
        collector: &mut collector,
        options: options.xml,
    };
    XmlMappingProcessor::process_xml_mappings(documents, &mut xml_ctx)?;

    let boot_model = bind_boot_model(classes, &descriptors, &mut collector)?;

    let ctx = RuntimeCreationContext::standard();
    let runtime = RuntimeModelCreationProcess::new(&boot_model, &collector)
        .execute(&ctx, region_sink)?;
    Ok(runtime)
}

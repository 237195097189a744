//! Source-agnostic annotation metadata model.
//!
//! Everything downstream of this crate (boot binding, runtime-model creation)
//! reads mapping metadata through one contract: a target that carries
//! annotation usages. Whether those usages came from a reflective provider or
//! were synthesized from an XML mapping document is invisible past this layer.

pub mod class_details;
pub mod descriptor;
pub mod error;
pub mod member;
pub mod registry;
pub mod standard;
pub mod target;
pub mod usage;
pub mod value;

use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        class_details::{ClassDetails, ClassDetailsBuilder},
        descriptor::{AnnotationDescriptor, AnnotationDescriptorRegistry, AttributeDescriptor},
        error::{AccessError, RegistryError},
        member::{MemberDetails, MemberKind},
        registry::ClassDetailsRegistry,
        target::{AnnotationTarget, TargetKind, Usages},
        usage::{AnnotationUsage, UsageBuilder},
        value::{AnnotationValue, AttributeValue, TypeName},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Access(#[from] error::AccessError),

    #[error(transparent)]
    Registry(#[from] error::RegistryError),
}

use crate::value::TypeName;
use thiserror::Error as ThisError;

///
/// AccessError
///
/// Raised when annotation usages are read or applied in a way that breaks the
/// modeling contract. Always fatal; indicates a modeling bug, not a
/// recoverable runtime condition.
///

#[derive(Clone, Debug, ThisError)]
pub enum AccessError {
    #[error("multiple usages of non-repeatable annotation '{annotation}' on {target}")]
    MultipleUsages { annotation: TypeName, target: String },

    #[error("annotation '{annotation}' has no attribute named '{attribute}'")]
    UnknownAttribute {
        annotation: TypeName,
        attribute: String,
    },

    #[error("attribute '{attribute}' of annotation '{annotation}' is not a {expected}")]
    AttributeType {
        annotation: TypeName,
        attribute: String,
        expected: &'static str,
    },

    #[error("cannot apply usage of '{annotation}' to eagerly-built target {target}")]
    ImmutableTarget { annotation: TypeName, target: String },
}

///
/// RegistryError
///

#[derive(Clone, Debug, ThisError)]
pub enum RegistryError {
    #[error("unknown managed class: '{name}'")]
    UnknownManagedClass { name: String },

    #[error("unknown annotation type: '{name}'")]
    UnknownAnnotationType { name: TypeName },
}

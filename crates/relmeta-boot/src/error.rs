use relmeta_annotate::error::{AccessError, RegistryError};
use relmeta_error::ErrorTree;
use thiserror::Error as ThisError;

///
/// BootError
///
/// Failures during boot-time binding. All are fatal: the boot aborts and the
/// partially-built model is discarded, never published.
///

#[derive(Debug, ThisError)]
pub enum BootError {
    /// A mapping shape deliberately not handled yet. Raised loudly instead of
    /// silently degrading — correctness over completeness.
    #[error("not yet implemented: {construct} (in {origin})")]
    Unsupported { construct: String, origin: String },

    #[error("duplicate {kind} registration: '{name}'")]
    Duplicate { kind: &'static str, name: String },

    #[error("invalid entity hierarchy: {0}")]
    Hierarchy(String),

    #[error("unknown attribute '{attribute}' on managed class '{class}' (in {origin})")]
    UnknownAttribute {
        class: String,
        attribute: String,
        origin: String,
    },

    #[error("boot validation failed:\n{0}")]
    Validation(ErrorTree),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl BootError {
    pub fn unsupported(construct: impl Into<String>, origin: impl Into<String>) -> Self {
        Self::Unsupported {
            construct: construct.into(),
            origin: origin.into(),
        }
    }
}

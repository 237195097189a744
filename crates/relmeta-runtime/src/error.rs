use relmeta_annotate::error::AccessError;
use thiserror::Error as ThisError;

///
/// RuntimeModelError
///
/// Failures while transforming the boot model into the runtime metamodel.
/// Never caught and retried internally; any of these aborts the boot and the
/// partially-built model is discarded.
///

#[derive(Debug, ThisError)]
pub enum RuntimeModelError {
    /// A hierarchy was handed to the creation process twice. Hierarchies are
    /// transformed exactly once.
    #[error("entity hierarchy rooted at '{root}' encountered twice")]
    EncounteredTwice { root: String },

    /// A full completion pass removed nothing while items remained: an
    /// unresolvable circular dependency in the metadata graph.
    #[error("runtime model completion made no progress; unresolved: {}", pending.join(", "))]
    NonConvergent { pending: Vec<String> },

    #[error("unknown entity '{entity}' referenced by named entity graph '{graph}'")]
    UnknownGraphEntity { entity: String, graph: String },

    #[error("unknown {kind} '{name}' referenced from '{referenced_from}'")]
    UnknownReference {
        kind: &'static str,
        name: String,
        referenced_from: String,
    },

    #[error(transparent)]
    Access(#[from] AccessError),
}

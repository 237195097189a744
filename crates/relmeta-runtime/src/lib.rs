//! Runtime metamodel creation.
//!
//! Transforms the validated boot model into the frozen, concurrently-readable
//! descriptor graph that query and mutation machinery executes against.
//! Cross-references that no single traversal order can satisfy are resolved
//! by iterative fixed-point completion.

pub mod cache;
pub mod descriptor;
pub mod error;
pub mod graph;
pub mod lock;
pub mod model;
pub mod process;
pub mod typesys;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        cache::{CacheRegionConfig, CollectingRegionSink, RegionConfigSink},
        descriptor::{
            BasicAttribute, EmbeddedTypeDescriptor, EntityDescriptor, ForeignKeyDescriptor,
            MappedSuperclassDescriptor, PersistentCollectionDescriptor, RuntimeAttribute,
        },
        error::RuntimeModelError,
        graph::{AttributeNode, RootGraph, SubGraph},
        lock::{LockMode, LockOptions, LockTimeout},
        model::RuntimeModel,
        process::{RuntimeCreationContext, RuntimeModelCreationProcess},
        typesys::{AnsiDialect, Dialect, JdbcTypeCode, TypeConfiguration},
    };
}

pub use error::RuntimeModelError;

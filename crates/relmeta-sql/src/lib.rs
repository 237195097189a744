//! Parameterized SQL construction over the runtime metamodel.
//!
//! Two surfaces: table-mutation builders whose call order *is* the JDBC
//! bind-parameter order, and entity-load selects cached by lock mode and
//! fetch profile. The ordered column → parameter-index maps produced here are
//! the wire contract with the execution layer: their count and order must
//! match the literal `?` placeholders in the SQL text exactly.

pub mod error;
pub mod mutation;
pub mod select;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::SqlBuildError,
        mutation::{
            CustomSqlMutation, CustomSqlMutationBuilder, Expectation, MutationKind,
            StandardTableDeleteBuilder, StandardTableInsertBuilder, StandardTableUpdateBuilder,
            TableDelete, TableInsert, TableMutation, TableUpdate, delete_for_entity,
            insert_for_entity, update_for_entity,
        },
        select::{
            CascadingFetchProfile, JdbcSelect, LoadQueryInfluencers, MultiIdLoader,
            SingleIdLoader, UniqueKeyLoader,
        },
    };
}

//! Table mutations and their builders.
//!
//! A table mutation describes one statement against one physical table.
//! Builders accumulate columns in a strict call sequence because parameter
//! position assignment is order-dependent and must match the generated SQL
//! text's placeholder order exactly.

pub mod custom;
pub mod delete;
pub mod entity;
pub mod insert;
pub mod update;

pub use custom::{CustomSqlMutation, CustomSqlMutationBuilder, MutationKind};
pub use delete::{StandardTableDeleteBuilder, TableDelete};
pub use entity::{delete_for_entity, insert_for_entity, update_for_entity};
pub use insert::{StandardTableInsertBuilder, TableInsert};
pub use update::{StandardTableUpdateBuilder, TableUpdate};

use indexmap::IndexMap;

///
/// Expectation
/// How the execution layer checks the statement's outcome.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Expectation {
    None,
    #[default]
    RowCount,
    OutParameter,
}

///
/// TableMutation
///
/// Read contract shared by all mutation variants. The parameter map is the
/// wire format handed to the execution layer.
///

pub trait TableMutation {
    fn table_name(&self) -> &str;

    /// Position of this table within a multi-table entity mutation.
    fn table_index(&self) -> usize;

    fn sql(&self) -> &str;

    fn is_callable(&self) -> bool;

    fn expectation(&self) -> Expectation;

    /// Whether a missing row is acceptable for this table.
    fn is_optional(&self) -> bool;

    /// Complete column → bind-position map, in placeholder order.
    fn combined_parameter_indexes(&self) -> IndexMap<String, usize>;

    fn parameter_count(&self) -> usize {
        self.combined_parameter_indexes().len()
    }
}

pub(crate) fn placeholders(count: usize) -> String {
    let mut out = String::new();
    for i in 0..count {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('?');
    }
    out
}

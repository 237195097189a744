use thiserror::Error as ThisError;

///
/// SqlBuildError
///

#[derive(Clone, Debug, ThisError)]
pub enum SqlBuildError {
    /// A generated WHERE restriction was layered onto author-supplied SQL.
    /// Once a mutation is custom SQL, no part of it may be rewritten.
    #[error("cannot add a generated restriction to custom sql for table '{table}'")]
    CustomSqlRestriction { table: String },
}

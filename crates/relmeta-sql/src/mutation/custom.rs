use crate::{
    error::SqlBuildError,
    mutation::{Expectation, TableMutation},
};
use indexmap::IndexMap;

///
/// MutationKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MutationKind {
    Insert,
    Update,
    Delete,
}

///
/// CustomSqlMutation
///
/// Author-supplied statement used verbatim. Parameter positions follow the
/// author's declared column order; the framework never rewrites any part of
/// the text.
///

#[derive(Clone, Debug)]
pub struct CustomSqlMutation {
    kind: MutationKind,
    table_name: String,
    table_index: usize,
    sql: String,
    callable: bool,
    expectation: Expectation,
    optional: bool,
    parameters: IndexMap<String, usize>,
}

impl CustomSqlMutation {
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        self.kind
    }
}

impl TableMutation for CustomSqlMutation {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn table_index(&self) -> usize {
        self.table_index
    }

    fn sql(&self) -> &str {
        &self.sql
    }

    fn is_callable(&self) -> bool {
        self.callable
    }

    fn expectation(&self) -> Expectation {
        self.expectation
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn combined_parameter_indexes(&self) -> IndexMap<String, usize> {
        self.parameters.clone()
    }
}

///
/// CustomSqlMutationBuilder
///

#[derive(Debug)]
pub struct CustomSqlMutationBuilder {
    kind: MutationKind,
    table_name: String,
    table_index: usize,
    sql: String,
    callable: bool,
    expectation: Expectation,
    optional: bool,
    parameter_columns: Vec<String>,
}

impl CustomSqlMutationBuilder {
    #[must_use]
    pub fn insert(table_name: impl Into<String>, table_index: usize, sql: impl Into<String>) -> Self {
        Self::new(MutationKind::Insert, table_name, table_index, sql)
    }

    #[must_use]
    pub fn update(table_name: impl Into<String>, table_index: usize, sql: impl Into<String>) -> Self {
        Self::new(MutationKind::Update, table_name, table_index, sql)
    }

    #[must_use]
    pub fn delete(table_name: impl Into<String>, table_index: usize, sql: impl Into<String>) -> Self {
        Self::new(MutationKind::Delete, table_name, table_index, sql)
    }

    fn new(
        kind: MutationKind,
        table_name: impl Into<String>,
        table_index: usize,
        sql: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            table_name: table_name.into(),
            table_index,
            sql: sql.into(),
            callable: false,
            expectation: Expectation::None,
            optional: false,
            parameter_columns: Vec::new(),
        }
    }

    /// Declare the next bind parameter's column, in the author's SQL order.
    pub fn add_parameter_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.parameter_columns.push(column.into());
        self
    }

    pub fn set_callable(&mut self, callable: bool) -> &mut Self {
        self.callable = callable;
        self
    }

    pub fn set_expectation(&mut self, expectation: Expectation) -> &mut Self {
        self.expectation = expectation;
        self
    }

    /// A generated restriction cannot be layered onto custom SQL; a non-null
    /// fragment is an illegal combination, a null fragment is a no-op.
    pub fn set_where(&mut self, fragment: Option<&str>) -> Result<&mut Self, SqlBuildError> {
        match fragment {
            Some(_) => Err(SqlBuildError::CustomSqlRestriction {
                table: self.table_name.clone(),
            }),
            None => Ok(self),
        }
    }

    pub fn add_where_fragment(&mut self, fragment: Option<&str>) -> Result<&mut Self, SqlBuildError> {
        self.set_where(fragment)
    }

    #[must_use]
    pub fn build(&self) -> CustomSqlMutation {
        let mut parameters = IndexMap::new();
        for (i, column) in self.parameter_columns.iter().enumerate() {
            parameters.insert(column.clone(), i);
        }

        CustomSqlMutation {
            kind: self.kind,
            table_name: self.table_name.clone(),
            table_index: self.table_index,
            sql: self.sql.clone(),
            callable: self.callable,
            expectation: self.expectation,
            optional: self.optional,
            parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_sql_is_used_verbatim() {
        let mut builder =
            CustomSqlMutationBuilder::update("t1", 0, "exec update_t1(?, ?)");
        builder.add_parameter_column("name").add_parameter_column("id");
        builder.set_callable(true);
        let mutation = builder.build();

        assert_eq!(mutation.sql(), "exec update_t1(?, ?)");
        assert!(mutation.is_callable());
        assert_eq!(mutation.combined_parameter_indexes()["name"], 0);
        assert_eq!(mutation.combined_parameter_indexes()["id"], 1);
    }

    #[test]
    fn non_null_where_is_an_illegal_combination() {
        for mut builder in [
            CustomSqlMutationBuilder::update("t1", 0, "update t1 set a = ?"),
            CustomSqlMutationBuilder::delete("t1", 0, "delete from t1"),
        ] {
            assert!(matches!(
                builder.set_where(Some("id = ?")),
                Err(SqlBuildError::CustomSqlRestriction { .. })
            ));
            assert!(matches!(
                builder.add_where_fragment(Some("ver = ?")),
                Err(SqlBuildError::CustomSqlRestriction { .. })
            ));
        }
    }

    #[test]
    fn null_where_is_a_no_op() {
        let mut builder = CustomSqlMutationBuilder::delete("t1", 0, "delete from t1 where id = ?");
        builder.set_where(None).unwrap();
        builder.add_where_fragment(None).unwrap();
        assert_eq!(builder.build().sql(), "delete from t1 where id = ?");
    }
}

use crate::mutation::{Expectation, TableMutation};
use indexmap::IndexMap;

///
/// TableDelete
///

#[derive(Clone, Debug)]
pub struct TableDelete {
    table_name: String,
    table_index: usize,
    sql: String,
    callable: bool,
    expectation: Expectation,
    optional: bool,
    restriction_parameters: IndexMap<String, usize>,
}

impl TableDelete {
    #[must_use]
    pub const fn restriction_parameter_indexes(&self) -> &IndexMap<String, usize> {
        &self.restriction_parameters
    }
}

impl TableMutation for TableDelete {
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
        self.restriction_parameters.clone()
    }
}

///
/// StandardTableDeleteBuilder
///
/// Restriction positions are strictly call-order: primary key columns before
/// the version column, so the version-mismatch comparison is the final WHERE
/// predicate.
///

#[derive(Debug)]
pub struct StandardTableDeleteBuilder {
    table_name: String,
    table_index: usize,
    callable: bool,
    expectation: Expectation,
    optional: bool,
    restriction_columns: Vec<String>,
    where_fragments: Vec<String>,
}

impl StandardTableDeleteBuilder {
    #[must_use]
    pub fn new(table_name: impl Into<String>, table_index: usize) -> Self {
        Self {
            table_name: table_name.into(),
            table_index,
            callable: false,
            expectation: Expectation::default(),
            optional: false,
            restriction_columns: Vec::new(),
            where_fragments: Vec::new(),
        }
    }

    pub fn add_primary_key_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.restriction_columns.push(column.into());
        self
    }

    pub fn set_version_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.restriction_columns.push(column.into());
        self
    }

    pub fn set_expectation(&mut self, expectation: Expectation) -> &mut Self {
        self.expectation = expectation;
        self
    }

    pub fn set_callable(&mut self, callable: bool) -> &mut Self {
        self.callable = callable;
        self
    }

    /// Append a non-parameter restriction fragment. A null fragment is a
    /// no-op.
    pub fn set_where(&mut self, fragment: Option<&str>) -> &mut Self {
        if let Some(fragment) = fragment {
            self.where_fragments.push(fragment.to_string());
        }
        self
    }

    pub fn add_where_fragment(&mut self, fragment: Option<&str>) -> &mut Self {
        self.set_where(fragment)
    }

    #[must_use]
    pub fn build(&self) -> TableDelete {
        let mut restriction_parameters = IndexMap::new();
        for (i, column) in self.restriction_columns.iter().enumerate() {
            restriction_parameters.insert(column.clone(), i);
        }

        let mut where_parts: Vec<String> = self
            .restriction_columns
            .iter()
            .map(|c| format!("{c} = ?"))
            .collect();
        where_parts.extend(self.where_fragments.iter().map(|f| format!("({f})")));

        let sql = format!(
            "delete from {} where {}",
            self.table_name,
            where_parts.join(" and "),
        );

        TableDelete {
            table_name: self.table_name.clone(),
            table_index: self.table_index,
            sql,
            callable: self.callable,
            expectation: self.expectation,
            optional: self.optional,
            restriction_parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restriction_indexes_follow_call_order() {
        let mut builder = StandardTableDeleteBuilder::new("t1", 0);
        builder.add_primary_key_column("id").set_version_column("ver");
        let delete = builder.build();

        assert_eq!(delete.restriction_parameter_indexes()["id"], 0);
        assert_eq!(delete.restriction_parameter_indexes()["ver"], 1);
        assert_eq!(delete.sql(), "delete from t1 where id = ? and ver = ?");
    }

    #[test]
    fn reversed_call_order_reverses_indexes() {
        let mut builder = StandardTableDeleteBuilder::new("t1", 0);
        builder.set_version_column("ver").add_primary_key_column("id");
        let delete = builder.build();

        assert_eq!(delete.restriction_parameter_indexes()["ver"], 0);
        assert_eq!(delete.restriction_parameter_indexes()["id"], 1);
        assert_eq!(delete.sql(), "delete from t1 where ver = ? and id = ?");
    }
}

use crate::mutation::{Expectation, TableMutation, placeholders};
use indexmap::IndexMap;

///
/// TableInsert
///
/// LOB columns are kept in their own ordered map and sort after every
/// non-LOB value column in the combined ordering, regardless of insertion
/// order — some drivers require LOB parameters bound last.
///

#[derive(Clone, Debug)]
pub struct TableInsert {
    table_name: String,
    table_index: usize,
    sql: String,
    callable: bool,
    expectation: Expectation,
    optional: bool,
    values_parameters: IndexMap<String, usize>,
    lob_parameters: IndexMap<String, usize>,
    value_column_count: usize,
}

impl TableInsert {
    /// Base map: non-LOB value columns then key columns, in call order.
    #[must_use]
    pub const fn parameter_indexes(&self) -> &IndexMap<String, usize> {
        &self.values_parameters
    }

    /// LOB columns, positioned in the combined ordering.
    #[must_use]
    pub const fn lob_parameter_indexes(&self) -> &IndexMap<String, usize> {
        &self.lob_parameters
    }
}

impl TableMutation for TableInsert {
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
        let lob_count = self.lob_parameters.len();
        let value_count = self.value_column_count;

        let mut combined = IndexMap::new();
        for (column, index) in &self.values_parameters {
            if *index < value_count {
                combined.insert(column.clone(), *index);
            }
        }
        for (column, index) in &self.lob_parameters {
            combined.insert(column.clone(), *index);
        }
        for (column, index) in &self.values_parameters {
            if *index >= value_count {
                combined.insert(column.clone(), *index + lob_count);
            }
        }
        combined
    }
}

///
/// StandardTableInsertBuilder
///
/// Call sequence is significant: values columns, then key columns. LOB value
/// columns go through their dedicated method and are re-positioned after all
/// non-LOB values when positions are finally collected.
///

#[derive(Debug)]
pub struct StandardTableInsertBuilder {
    table_name: String,
    table_index: usize,
    callable: bool,
    expectation: Expectation,
    optional: bool,
    values_columns: Vec<String>,
    lob_columns: Vec<String>,
    key_columns: Vec<String>,
}

impl StandardTableInsertBuilder {
    #[must_use]
    pub fn new(table_name: impl Into<String>, table_index: usize) -> Self {
        Self {
            table_name: table_name.into(),
            table_index,
            callable: false,
            expectation: Expectation::default(),
            optional: false,
            values_columns: Vec::new(),
            lob_columns: Vec::new(),
            key_columns: Vec::new(),
        }
    }

    pub fn add_values_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.values_columns.push(column.into());
        self
    }

    pub fn add_values_lob_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.lob_columns.push(column.into());
        self
    }

    pub fn add_key_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.key_columns.push(column.into());
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

    pub fn set_optional(&mut self, optional: bool) -> &mut Self {
        self.optional = optional;
        self
    }

    #[must_use]
    pub fn build(&self) -> TableInsert {
        let value_count = self.values_columns.len();
        let lob_count = self.lob_columns.len();

        // Base map: values then keys, one running counter, LOBs excluded.
        let mut values_parameters = IndexMap::new();
        for (i, column) in self.values_columns.iter().enumerate() {
            values_parameters.insert(column.clone(), i);
        }
        for (i, column) in self.key_columns.iter().enumerate() {
            values_parameters.insert(column.clone(), value_count + i);
        }

        // LOBs land after every non-LOB value in the combined ordering.
        let mut lob_parameters = IndexMap::new();
        for (i, column) in self.lob_columns.iter().enumerate() {
            lob_parameters.insert(column.clone(), value_count + i);
        }

        // Column list mirrors the combined parameter order exactly.
        let mut columns: Vec<&str> = Vec::new();
        columns.extend(self.values_columns.iter().map(String::as_str));
        columns.extend(self.lob_columns.iter().map(String::as_str));
        columns.extend(self.key_columns.iter().map(String::as_str));

        let sql = format!(
            "insert into {} ({}) values ({})",
            self.table_name,
            columns.join(", "),
            placeholders(columns.len()),
        );

        TableInsert {
            table_name: self.table_name.clone(),
            table_index: self.table_index,
            sql,
            callable: self.callable,
            expectation: self.expectation,
            optional: self.optional,
            values_parameters,
            lob_parameters,
            value_column_count: value_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_map_counts_keys_after_values() {
        let mut builder = StandardTableInsertBuilder::new("t1", 0);
        builder
            .add_values_column("values_col1")
            .add_values_column("values_col2")
            .add_values_lob_column("lob_col1")
            .add_key_column("key_col1");
        let insert = builder.build();

        let base = insert.parameter_indexes();
        assert_eq!(base["values_col1"], 0);
        assert_eq!(base["values_col2"], 1);
        assert_eq!(base["key_col1"], 2);
        assert!(!base.contains_key("lob_col1"));
    }

    #[test]
    fn lobs_sort_after_non_lob_values_in_the_combined_map() {
        let mut builder = StandardTableInsertBuilder::new("t1", 0);
        builder
            .add_values_column("values_col1")
            .add_values_column("values_col2")
            .add_values_lob_column("lob_col1")
            .add_key_column("key_col1");
        let insert = builder.build();

        let combined = insert.combined_parameter_indexes();
        assert_eq!(combined["values_col1"], 0);
        assert_eq!(combined["values_col2"], 1);
        assert_eq!(combined["lob_col1"], 2);
        assert_eq!(combined["key_col1"], 3);

        // Interleaved insertion still lands LOBs after every non-LOB value.
        let mut interleaved = StandardTableInsertBuilder::new("t1", 0);
        interleaved
            .add_values_lob_column("lob_col1")
            .add_values_column("values_col1")
            .add_values_column("values_col2")
            .add_key_column("key_col1");
        let combined = interleaved.build().combined_parameter_indexes();
        assert_eq!(combined["values_col1"], 0);
        assert_eq!(combined["values_col2"], 1);
        assert_eq!(combined["lob_col1"], 2);
    }

    #[test]
    fn sql_placeholder_order_matches_the_combined_map() {
        let mut builder = StandardTableInsertBuilder::new("t1", 0);
        builder
            .add_values_column("a")
            .add_values_lob_column("blob_b")
            .add_key_column("id");
        let insert = builder.build();

        assert_eq!(
            insert.sql(),
            "insert into t1 (a, blob_b, id) values (?, ?, ?)"
        );
        assert_eq!(insert.parameter_count(), 3);

        let combined = insert.combined_parameter_indexes();
        let ordered: Vec<_> = combined.keys().map(String::as_str).collect();
        assert_eq!(ordered, vec!["a", "blob_b", "id"]);
    }
}

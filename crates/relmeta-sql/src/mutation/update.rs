use crate::mutation::{Expectation, TableMutation};
use indexmap::IndexMap;

///
/// TableUpdate
///
/// SET-side and WHERE-side columns bind at physically different places in
/// the SQL text, but one running counter assigns positions across both.
///

#[derive(Clone, Debug)]
pub struct TableUpdate {
    table_name: String,
    table_index: usize,
    sql: String,
    callable: bool,
    expectation: Expectation,
    optional: bool,
    values_parameters: IndexMap<String, usize>,
    restriction_parameters: IndexMap<String, usize>,
}

impl TableUpdate {
    /// SET-side columns (LOBs included, in call order).
    #[must_use]
    pub const fn values_parameter_indexes(&self) -> &IndexMap<String, usize> {
        &self.values_parameters
    }

    /// WHERE-side columns: primary key, then version.
    #[must_use]
    pub const fn restriction_parameter_indexes(&self) -> &IndexMap<String, usize> {
        &self.restriction_parameters
    }
}

impl TableMutation for TableUpdate {
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
        let mut combined = self.values_parameters.clone();
        for (column, index) in &self.restriction_parameters {
            combined.insert(column.clone(), *index);
        }
        combined
    }

    // A column may sit on both the SET and WHERE side (the version column
    // does); the merged map collapses the duplicate key, so the placeholder
    // count comes from the two sides directly.
    fn parameter_count(&self) -> usize {
        self.values_parameters.len() + self.restriction_parameters.len()
    }
}

///
/// StandardTableUpdateBuilder
///
/// Call sequence: values columns (LOBs inline), then primary-key
/// restrictions, then the version restriction.
///

#[derive(Debug)]
pub struct StandardTableUpdateBuilder {
    table_name: String,
    table_index: usize,
    callable: bool,
    expectation: Expectation,
    optional: bool,
    values_columns: Vec<String>,
    primary_key_columns: Vec<String>,
    version_column: Option<String>,
    where_fragments: Vec<String>,
}

impl StandardTableUpdateBuilder {
    #[must_use]
    pub fn new(table_name: impl Into<String>, table_index: usize) -> Self {
        Self {
            table_name: table_name.into(),
            table_index,
            callable: false,
            expectation: Expectation::default(),
            optional: false,
            values_columns: Vec::new(),
            primary_key_columns: Vec::new(),
            version_column: None,
            where_fragments: Vec::new(),
        }
    }

    pub fn add_values_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.values_columns.push(column.into());
        self
    }

    /// LOB values keep their call-order position on updates; only inserts
    /// re-sort them.
    pub fn add_values_lob_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.values_columns.push(column.into());
        self
    }

    pub fn add_primary_key_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.primary_key_columns.push(column.into());
        self
    }

    pub fn set_version_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.version_column = Some(column.into());
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
    pub fn build(&self) -> TableUpdate {
        let mut position = 0usize;

        let mut values_parameters = IndexMap::new();
        for column in &self.values_columns {
            values_parameters.insert(column.clone(), position);
            position += 1;
        }

        let mut restriction_parameters = IndexMap::new();
        for column in &self.primary_key_columns {
            restriction_parameters.insert(column.clone(), position);
            position += 1;
        }
        if let Some(version) = &self.version_column {
            restriction_parameters.insert(version.clone(), position);
        }

        let set_clause = self
            .values_columns
            .iter()
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut where_parts: Vec<String> = restriction_parameters
            .keys()
            .map(|c| format!("{c} = ?"))
            .collect();
        where_parts.extend(self.where_fragments.iter().map(|f| format!("({f})")));

        let sql = format!(
            "update {} set {} where {}",
            self.table_name,
            set_clause,
            where_parts.join(" and "),
        );

        TableUpdate {
            table_name: self.table_name.clone(),
            table_index: self.table_index,
            sql,
            callable: self.callable,
            expectation: self.expectation,
            optional: self.optional,
            values_parameters,
            restriction_parameters,
        }
    }
}

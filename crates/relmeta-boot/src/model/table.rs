///
/// Table
///

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub check: Option<String>,
    pub comment: Option<String>,
}

impl Table {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Qualified form: `catalog.schema.name`, omitting absent parts.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(catalog) = &self.catalog {
            parts.push(catalog.as_str());
        }
        if let Some(schema) = &self.schema {
            parts.push(schema.as_str());
        }
        parts.push(&self.name);
        parts.join(".")
    }
}

///
/// Column
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Column {
    pub name: String,
    pub nullable: bool,
}

impl Column {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_skips_absent_parts() {
        let mut table = Table::named("orders");
        assert_eq!(table.qualified_name(), "orders");

        table.schema = Some("sales".into());
        assert_eq!(table.qualified_name(), "sales.orders");

        table.catalog = Some("main".into());
        assert_eq!(table.qualified_name(), "main.sales.orders");
    }
}

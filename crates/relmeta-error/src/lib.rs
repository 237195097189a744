//! Route-aware error aggregation for staged metadata validation.
//!
//! Binding and validation passes collect every failure they encounter rather
//! than stopping at the first one; `ErrorTree` is the accumulator they share.

use std::fmt;

///
/// ErrorTree
///
/// Flat list of validation failures, each optionally tagged with the route
/// (class, attribute, document) it was collected under.
///

#[derive(Clone, Debug, Default)]
pub struct ErrorTree {
    entries: Vec<Entry>,
}

#[derive(Clone, Debug)]
struct Entry {
    route: Option<String>,
    message: String,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a failure with no route context.
    pub fn add(&mut self, err: impl ToString) {
        self.entries.push(Entry {
            route: None,
            message: err.to_string(),
        });
    }

    /// Record a failure under an explicit route.
    pub fn add_route(&mut self, route: impl Into<String>, err: impl ToString) {
        self.entries.push(Entry {
            route: Some(route.into()),
            message: err.to_string(),
        });
    }

    /// Fold another tree into this one, prefixing its routes.
    pub fn merge(&mut self, route: &str, other: Self) {
        for entry in other.entries {
            let route = match entry.route {
                Some(inner) => format!("{route}.{inner}"),
                None => route.to_string(),
            };
            self.entries.push(Entry {
                route: Some(route),
                message: entry.message,
            });
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Collapse into a `Result`, consuming the tree.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match &entry.route {
                Some(route) => write!(f, "{route}: {}", entry.message)?,
                None => write!(f, "{}", entry.message)?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Append a formatted failure to an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($tree:expr, $($arg:tt)*) => {
        $tree.add(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_ok() {
        assert!(ErrorTree::new().result().is_ok());
    }

    #[test]
    fn collects_and_displays_routes() {
        let mut errs = ErrorTree::new();
        errs.add("top level failure");
        errs.add_route("Customer.name", "column missing");
        err!(errs, "bad identifier '{}'", "x");

        assert_eq!(errs.len(), 3);
        let rendered = errs.clone().result().unwrap_err().to_string();
        assert!(rendered.contains("Customer.name: column missing"));
        assert!(rendered.contains("bad identifier 'x'"));
    }

    #[test]
    fn merge_prefixes_routes() {
        let mut inner = ErrorTree::new();
        inner.add("unset");
        inner.add_route("id", "duplicate");

        let mut outer = ErrorTree::new();
        outer.merge("Order", inner);

        let rendered = outer.result().unwrap_err().to_string();
        assert!(rendered.contains("Order: unset"));
        assert!(rendered.contains("Order.id: duplicate"));
    }
}

//! Tabular rows.
//!
//! [`Row`] is the contract the descriptor needs from a row source or sink:
//! an ordered set of named columns readable and writable by name.
//! [`DataRow`] is a plain in-memory implementation.

use indexmap::IndexMap;

use crate::error::ArgumentError;
use crate::value::Value;

pub trait Row {
    /// Column names in column order.
    fn column_names(&self) -> Vec<&str>;

    /// Cell value, or `None` when the row has no such column.
    fn get(&self, column: &str) -> Option<&Value>;

    fn set(&mut self, column: &str, value: Value) -> Result<(), ArgumentError>;
}

/// A row with a fixed, ordered column set. Cells start out `Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRow {
    cells: IndexMap<String, Value>,
}

impl DataRow {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: columns
                .into_iter()
                .map(|column| (column.into(), Value::Null))
                .collect(),
        }
    }

    /// Sets a cell and returns the row, for building fixtures.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Result<Self, ArgumentError> {
        self.set(column, value.into())?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Row for DataRow {
    fn column_names(&self) -> Vec<&str> {
        self.cells.keys().map(String::as_str).collect()
    }

    fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    fn set(&mut self, column: &str, value: Value) -> Result<(), ArgumentError> {
        match self.cells.get_mut(column) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(ArgumentError::invalid(
                "column",
                format!("row has no column `{column}`"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_start_null_and_keep_column_order() {
        let row = DataRow::new(["b", "a"]);
        assert_eq!(row.column_names(), ["b", "a"]);
        assert_eq!(row.get("a"), Some(&Value::Null));
        assert_eq!(row.get("c"), None);
    }

    #[test]
    fn writing_an_unknown_column_fails() {
        let mut row = DataRow::new(["id"]);
        assert!(row.set("id", Value::Int(1)).is_ok());
        assert!(matches!(
            row.set("name", Value::Null),
            Err(ArgumentError::InvalidArgument { name: "column", .. })
        ));
    }
}

//! Rows of the data model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A data row, possibly with nested sub rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Unique identifier for this row.
    pub id: String,
    /// Original position among its siblings. Final tiebreak when sorting.
    #[serde(default)]
    pub index: usize,
    /// Cell values keyed by column id.
    #[serde(default)]
    pub values: HashMap<String, Value>,
    /// Nested rows.
    #[serde(default)]
    pub sub_rows: Vec<Row>,
    /// Whether this row is expanded.
    #[serde(default)]
    pub is_expanded: bool,
}

impl Row {
    /// Create a row with the given id and original index.
    pub fn new(id: impl Into<String>, index: usize) -> Self {
        Self {
            id: id.into(),
            index,
            ..Default::default()
        }
    }

    /// Set a cell value.
    pub fn with_value(mut self, column_id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column_id.into(), value.into());
        self
    }

    /// Set the sub rows.
    pub fn with_sub_rows(mut self, sub_rows: Vec<Row>) -> Self {
        self.sub_rows = sub_rows;
        self
    }

    /// Mark this row as expanded or collapsed.
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.is_expanded = expanded;
        self
    }

    /// Whether this row is expanded.
    pub fn get_is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Get the value of a cell.
    pub fn value(&self, column_id: &str) -> Option<&Value> {
        self.values.get(column_id)
    }
}

/// Items that remember their original position.
pub trait Indexed {
    fn index(&self) -> usize;
}

impl Indexed for Row {
    fn index(&self) -> usize {
        self.index
    }
}

impl<T: Indexed + ?Sized> Indexed for &T {
    fn index(&self) -> usize {
        (**self).index()
    }
}

//! Column definitions and the flattened column arena.
//!
//! Applications describe columns as a tree of [`ColumnDef`]s. Every render
//! pass flattens that tree into a list of [`Column`]s (parents included) in
//! depth-first pre-order. Columns refer to their parent and children by
//! position in that list.
//!
//! Column ids are expected to be unique across the whole tree. Duplicate ids
//! are not validated; lookups by id then resolve to the last column with that
//! id.

use serde::{Deserialize, Serialize};

/// A column definition as supplied by the application.
///
/// # Example
///
/// ```
/// use tabula::ColumnDef;
///
/// let columns = vec![
///     ColumnDef::group("name", vec![ColumnDef::new("first"), ColumnDef::new("last")]),
///     ColumnDef::new("age").disable_hiding(),
/// ];
/// assert!(!columns[0].is_leaf());
/// assert!(columns[1].is_leaf());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Unique identifier for this column.
    pub id: String,
    /// Header text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Child columns. Present (and non-empty) for group columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ColumnDef>>,
    /// Never allow this column to be hidden.
    #[serde(default)]
    pub disable_hiding: bool,
    /// Visibility used when the state has no entry for this column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_is_visible: Option<bool>,
    /// Hideability used when nothing forbids hiding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_can_hide: Option<bool>,
}

impl ColumnDef {
    /// Create a leaf column.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Create a group column.
    pub fn group(id: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            id: id.into(),
            columns: Some(columns),
            ..Default::default()
        }
    }

    /// Set the header text.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Never allow this column to be hidden.
    pub fn disable_hiding(mut self) -> Self {
        self.disable_hiding = true;
        self
    }

    /// Set the default visibility.
    pub fn default_visible(mut self, visible: bool) -> Self {
        self.default_is_visible = Some(visible);
        self
    }

    /// Set the default hideability.
    pub fn default_can_hide(mut self, can_hide: bool) -> Self {
        self.default_can_hide = Some(can_hide);
        self
    }

    /// Child definitions (empty for leaves).
    pub fn children(&self) -> &[ColumnDef] {
        self.columns.as_deref().unwrap_or(&[])
    }

    /// A column with no (or an empty list of) child columns.
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }
}

/// A column in the flattened arena of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Unique identifier for this column.
    pub id: String,
    /// Header text.
    pub header: Option<String>,
    /// Position in the arena.
    pub index: usize,
    /// Distance from the root (top-level columns have depth 0).
    pub depth: usize,
    /// Arena position of the parent column.
    pub parent: Option<usize>,
    /// Arena positions of the child columns. `Some` for group columns.
    pub columns: Option<Vec<usize>>,
    pub disable_hiding: bool,
    pub default_is_visible: Option<bool>,
    pub default_can_hide: Option<bool>,
    /// Names of the plugins that decorated this column.
    decorated_by: Vec<&'static str>,
}

impl Column {
    /// A column with no child columns.
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Arena positions of the child columns.
    pub fn children(&self) -> &[usize] {
        self.columns.as_deref().unwrap_or(&[])
    }

    /// Record that `plugin` attached its capabilities to this column.
    pub fn mark_decorated(&mut self, plugin: &'static str) {
        if !self.decorated_by.contains(&plugin) {
            self.decorated_by.push(plugin);
        }
    }

    /// Check whether `plugin` decorated this column.
    pub fn is_decorated_by(&self, plugin: &str) -> bool {
        self.decorated_by.iter().any(|p| *p == plugin)
    }
}

/// Flatten a definition tree into the column arena (parents included,
/// depth-first pre-order), assigning depth, parent and child positions.
pub fn build_columns(defs: &[ColumnDef]) -> Vec<Column> {
    let mut out = Vec::new();
    push_columns(defs, 0, None, &mut out);
    out
}

fn push_columns(
    defs: &[ColumnDef],
    depth: usize,
    parent: Option<usize>,
    out: &mut Vec<Column>,
) -> Vec<usize> {
    let mut positions = Vec::with_capacity(defs.len());
    for def in defs {
        let index = out.len();
        positions.push(index);
        out.push(Column {
            id: def.id.clone(),
            header: def.header.clone(),
            index,
            depth,
            parent,
            columns: None,
            disable_hiding: def.disable_hiding,
            default_is_visible: def.default_is_visible,
            default_can_hide: def.default_can_hide,
            decorated_by: Vec::new(),
        });
        if let Some(children) = &def.columns {
            let child_positions = push_columns(children, depth + 1, Some(index), out);
            out[index].columns = Some(child_positions);
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_columns_assigns_depth_and_parent() {
        let defs = vec![
            ColumnDef::group(
                "a",
                vec![ColumnDef::group("a1", vec![ColumnDef::new("a1x")]), ColumnDef::new("a2")],
            ),
            ColumnDef::new("b"),
        ];
        let columns = build_columns(&defs);
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "a1", "a1x", "a2", "b"]);

        assert_eq!(columns[0].depth, 0);
        assert_eq!(columns[0].children(), &[1, 3]);
        assert_eq!(columns[2].depth, 2);
        assert_eq!(columns[2].parent, Some(1));
        assert_eq!(columns[3].parent, Some(0));
        assert_eq!(columns[4].parent, None);
        assert!(columns[4].is_leaf());
    }

    #[test]
    fn test_empty_group_is_leaf() {
        let columns = build_columns(&[ColumnDef::group("g", vec![])]);
        assert!(columns[0].is_leaf());
        assert_eq!(columns[0].columns, Some(vec![]));
    }

    #[test]
    fn test_mark_decorated_once() {
        let mut columns = build_columns(&[ColumnDef::new("a")]);
        columns[0].mark_decorated("p");
        columns[0].mark_decorated("p");
        assert!(columns[0].is_decorated_by("p"));
        assert!(!columns[0].is_decorated_by("q"));
    }
}

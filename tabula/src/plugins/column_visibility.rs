//! Column visibility: showing and hiding columns.
//!
//! State lives in [`TableState::column_visibility`]. A column's visibility
//! resolves, in order, to its state entry, its `default_is_visible`, then
//! `true`. Whether it may be hidden resolves to `false` if hiding is disabled
//! globally or for the column, else its `default_can_hide`, else `true`.
//! Unknown column ids are visible and cannot be hidden.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::column::Column;
use crate::instance::Instance;
use crate::options::TableOptions;
use crate::plugin::Plugin;
use crate::props::{ChangeHandler, Props};
use crate::state::{Action, TableState, Updater};
use crate::table::{ColumnHandle, Table};
use crate::utils::apply_defaults;

/// Name of the column visibility plugin.
pub const COLUMN_VISIBILITY: &str = "column_visibility";

/// Data the plugin derives during a render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnVisibilityData {
    /// Arena positions of the leaf columns that can be hidden.
    pub pre_visible_leaf_columns: Vec<usize>,
}

/// The column visibility plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnVisibilityPlugin;

impl Plugin for ColumnVisibilityPlugin {
    fn name(&self) -> &'static str {
        COLUMN_VISIBILITY
    }

    fn reduce_options(&self, mut options: TableOptions) -> TableOptions {
        let mut defaults = Map::new();
        defaults.insert("columnVisibility".to_string(), Value::Object(Map::new()));
        options.initial_state = apply_defaults(options.initial_state, defaults);
        options
    }

    fn instance_after_state(&self, instance: &mut Instance) {
        instance
            .extensions_mut()
            .get_or_insert_with(COLUMN_VISIBILITY, ColumnVisibilityData::default);
    }

    fn decorate_column(&self, column: &mut Column, _options: &TableOptions) {
        column.mark_decorated(COLUMN_VISIBILITY);
    }

    fn reduce_leaf_columns(&self, leaf_columns: Vec<usize>, instance: &mut Instance) -> Vec<usize> {
        let pre_visible_leaf_columns = instance
            .columns_at(&leaf_columns)
            .into_iter()
            .filter(|column| instance.get_column_can_hide(&column.id))
            .map(|column| column.index)
            .collect();
        instance.extensions_mut().insert(
            COLUMN_VISIBILITY,
            ColumnVisibilityData {
                pre_visible_leaf_columns,
            },
        );

        leaf_columns
            .into_iter()
            .filter(|&index| {
                instance
                    .column_at(index)
                    .is_none_or(|column| instance.get_column_is_visible(&column.id))
            })
            .collect()
    }
}

/// Column visibility methods on the instance.
pub trait ColumnVisibilityInstance {
    /// Resolved visibility of a column. Unknown ids are visible.
    fn get_column_is_visible(&self, column_id: &str) -> bool;

    /// Whether a column may be hidden. Unknown ids cannot be hidden.
    fn get_column_can_hide(&self, column_id: &str) -> bool;

    /// Show or hide a column. `None` flips the current visibility. Does
    /// nothing if the column cannot be hidden.
    fn toggle_column_visibility(&mut self, column_id: &str, value: Option<bool>);

    /// Show or hide every hideable leaf column. `None` hides all if all are
    /// visible and shows all otherwise. The visibility map is rebuilt from the
    /// hideable leaves alone, so every other column falls back to its default.
    fn toggle_all_columns_visible(&mut self, value: Option<bool>);

    /// True if no hideable leaf column is hidden.
    fn get_is_all_columns_visible(&self) -> bool;

    /// True if at least one hideable leaf column is visible.
    fn get_is_some_columns_visible(&self) -> bool;

    /// Leaf columns that can be hidden, as recorded by the last render pass.
    fn pre_visible_leaf_columns(&self) -> Vec<&Column>;

    /// Visibility used for header layout: columns the plugin did not
    /// decorate are always shown.
    fn column_is_displayed(&self, column: &Column) -> bool;
}

impl ColumnVisibilityInstance for Instance {
    fn get_column_is_visible(&self, column_id: &str) -> bool {
        let Some(column) = self.find_column(column_id) else {
            return true;
        };
        self.state()
            .column_visibility
            .get(column_id)
            .copied()
            .or(column.default_is_visible)
            .unwrap_or(true)
    }

    fn get_column_can_hide(&self, column_id: &str) -> bool {
        let Some(column) = self.find_column(column_id) else {
            return false;
        };
        if self.options().disabled_hiding || column.disable_hiding {
            return false;
        }
        column.default_can_hide.unwrap_or(true)
    }

    fn toggle_column_visibility(&mut self, column_id: &str, value: Option<bool>) {
        let value = value.unwrap_or_else(|| !self.get_column_is_visible(column_id));

        if !self.get_column_can_hide(column_id) {
            return;
        }

        let id = column_id.to_string();
        let action = Action::ToggleColumnVisibility {
            column_id: id.clone(),
            value,
        };
        self.set_state(
            Updater::func(move |old: &TableState| {
                let mut next = old.clone();
                next.column_visibility.insert(id, value);
                next
            }),
            action,
        );
    }

    fn toggle_all_columns_visible(&mut self, value: Option<bool>) {
        let value = value.unwrap_or_else(|| !self.get_is_all_columns_visible());

        let entries: Vec<(String, bool)> = self
            .pre_visible_leaf_columns()
            .into_iter()
            .map(|column| {
                let visible = if value { true } else { !self.get_column_can_hide(&column.id) };
                (column.id.clone(), visible)
            })
            .collect();

        self.set_state(
            Updater::func(move |old: &TableState| {
                let mut next = old.clone();
                next.column_visibility = entries.into_iter().collect();
                next
            }),
            Action::ToggleAllColumnsVisible { value },
        );
    }

    fn get_is_all_columns_visible(&self) -> bool {
        !self
            .pre_visible_leaf_columns()
            .iter()
            .any(|column| !self.get_column_is_visible(&column.id))
    }

    fn get_is_some_columns_visible(&self) -> bool {
        self.pre_visible_leaf_columns()
            .iter()
            .any(|column| self.get_column_is_visible(&column.id))
    }

    fn pre_visible_leaf_columns(&self) -> Vec<&Column> {
        match self.extensions().get::<ColumnVisibilityData>(COLUMN_VISIBILITY) {
            Some(data) => self.columns_at(&data.pre_visible_leaf_columns),
            None => Vec::new(),
        }
    }

    fn column_is_displayed(&self, column: &Column) -> bool {
        !column.is_decorated_by(COLUMN_VISIBILITY) || self.get_column_is_visible(&column.id)
    }
}

/// Column visibility methods on the table handle.
///
/// Each call locks the instance for its duration only.
pub trait ColumnVisibilityTable {
    fn get_column_is_visible(&self, column_id: &str) -> bool;
    fn get_column_can_hide(&self, column_id: &str) -> bool;
    fn toggle_column_visibility(&self, column_id: &str, value: Option<bool>);
    fn toggle_all_columns_visible(&self, value: Option<bool>);
    fn get_is_all_columns_visible(&self) -> bool;
    fn get_is_some_columns_visible(&self) -> bool;

    /// Props for a "toggle all columns" checkbox.
    fn get_toggle_all_columns_visibility_props(&self, overrides: Props) -> Props;
}

impl ColumnVisibilityTable for Table {
    fn get_column_is_visible(&self, column_id: &str) -> bool {
        self.read().get_column_is_visible(column_id)
    }

    fn get_column_can_hide(&self, column_id: &str) -> bool {
        self.read().get_column_can_hide(column_id)
    }

    fn toggle_column_visibility(&self, column_id: &str, value: Option<bool>) {
        self.write().toggle_column_visibility(column_id, value);
    }

    fn toggle_all_columns_visible(&self, value: Option<bool>) {
        self.write().toggle_all_columns_visible(value);
    }

    fn get_is_all_columns_visible(&self) -> bool {
        self.read().get_is_all_columns_visible()
    }

    fn get_is_some_columns_visible(&self) -> bool {
        self.read().get_is_some_columns_visible()
    }

    fn get_toggle_all_columns_visibility_props(&self, overrides: Props) -> Props {
        let (all, some) = {
            let instance = self.read();
            (
                instance.get_is_all_columns_visible(),
                instance.get_is_some_columns_visible(),
            )
        };

        let table = self.clone();
        let on_change: ChangeHandler = Arc::new(move |checked| {
            table.toggle_all_columns_visible(Some(checked));
        });

        Props::new()
            .with("onChange", on_change)
            .with("title", "Toggle visibility for all columns")
            .with("checked", all)
            .with("indeterminate", !all && some)
            .merge(overrides)
    }
}

/// Column visibility capabilities of a single column.
pub trait ColumnVisibilityColumn {
    fn get_can_hide(&self) -> bool;
    fn get_is_visible(&self) -> bool;
    fn toggle_visibility(&self, value: Option<bool>);

    /// Props for a checkbox showing and toggling this column.
    fn get_toggle_visibility_props(&self, overrides: Props) -> Props;
}

impl ColumnVisibilityColumn for ColumnHandle {
    fn get_can_hide(&self) -> bool {
        self.table().get_column_can_hide(self.id())
    }

    fn get_is_visible(&self) -> bool {
        self.table().get_column_is_visible(self.id())
    }

    fn toggle_visibility(&self, value: Option<bool>) {
        self.table().toggle_column_visibility(self.id(), value);
    }

    fn get_toggle_visibility_props(&self, overrides: Props) -> Props {
        let column = self.clone();
        let on_change: ChangeHandler =
            Arc::new(move |checked| column.toggle_visibility(Some(checked)));

        Props::new()
            .with("type", "checkbox")
            .with("onChange", on_change)
            .with("checked", self.get_is_visible())
            .with("title", "Toggle Column Visible")
            .merge(overrides)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::column::ColumnDef;

    fn table(options: TableOptions) -> Table {
        Table::builder()
            .with_options(options)
            .with_plugin(ColumnVisibilityPlugin)
            .with_columns(vec![
                ColumnDef::new("a"),
                ColumnDef::new("b").disable_hiding(),
                ColumnDef::new("c").default_visible(false),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_reduce_options_keeps_existing_state() {
        let mut initial = Map::new();
        initial.insert("columnVisibility".to_string(), json!({ "a": false }));
        let options = TableOptions::new().with_initial_state(initial);

        let reduced = ColumnVisibilityPlugin.reduce_options(options);
        assert_eq!(reduced.initial_state["columnVisibility"], json!({ "a": false }));

        let reduced = ColumnVisibilityPlugin.reduce_options(TableOptions::new());
        assert_eq!(reduced.initial_state["columnVisibility"], json!({}));
    }

    #[test]
    fn test_pre_visible_leaf_columns_excludes_unhideable() {
        let table = table(TableOptions::new());
        let instance = table.read();
        let ids: Vec<&str> = instance
            .pre_visible_leaf_columns()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_default_visible_false_filters_leaf() {
        let table = table(TableOptions::new());
        let ids: Vec<String> = table.visible_leaf_columns().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(!table.get_is_all_columns_visible());
        assert!(table.get_is_some_columns_visible());
    }

    #[test]
    fn test_hide_all_keeps_unhideable_visible() {
        let table = table(TableOptions::new());
        table.toggle_all_columns_visible(Some(false));
        table.render();

        let state = table.state();
        assert_eq!(state.column_visibility.get("a"), Some(&false));
        assert_eq!(state.column_visibility.get("c"), Some(&false));
        assert!(!state.column_visibility.contains_key("b"));
        assert!(!table.get_is_some_columns_visible());

        let ids: Vec<String> = table.visible_leaf_columns().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_column_is_displayed_ignores_undecorated() {
        let table = table(TableOptions::new());
        let instance = table.read();
        let decorated = instance.find_column("c").unwrap();
        assert!(!instance.column_is_displayed(decorated));

        let plain = crate::column::build_columns(&[ColumnDef::new("c")]);
        assert!(instance.column_is_displayed(&plain[0]));
    }
}

//! The table handle.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use crate::column::{Column, ColumnDef};
use crate::error::TableError;
use crate::header::HeaderGroups;
use crate::instance::Instance;
use crate::options::TableOptions;
use crate::plugin::{Plugin, sort_plugins};
use crate::row::Row;
use crate::state::{Action, TableState, Updater};

/// Handle to a table instance.
///
/// `Table` is cheap to clone; clones share the same instance. Callbacks
/// handed to the rendering layer hold a clone and lock the instance when
/// called, so they always act on the latest state.
///
/// # Example
///
/// ```
/// use tabula::prelude::*;
///
/// let table = Table::builder()
///     .with_plugin(ColumnVisibilityPlugin)
///     .with_columns(vec![
///         ColumnDef::group("name", vec![ColumnDef::new("first"), ColumnDef::new("last")]),
///         ColumnDef::new("age"),
///     ])
///     .build()
///     .unwrap();
///
/// table.toggle_column_visibility("last", Some(false));
/// table.render();
///
/// let groups = table.header_groups();
/// assert_eq!(groups.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Table {
    inner: Arc<RwLock<Instance>>,
}

impl Table {
    /// Start assembling a table.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Read access to the instance.
    pub fn read(&self) -> RwLockReadGuard<'_, Instance> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the instance.
    pub fn write(&self) -> RwLockWriteGuard<'_, Instance> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the hook pipeline again with the current state.
    pub fn render(&self) {
        self.write().render_pass();
    }

    /// Render only if the state or inputs changed since the last pass.
    /// Returns true if a pass ran.
    pub fn render_if_dirty(&self) -> bool {
        let mut guard = self.write();
        if guard.needs_render() {
            guard.render_pass();
            true
        } else {
            false
        }
    }

    /// True after a change that no render pass has seen yet.
    pub fn is_dirty(&self) -> bool {
        self.read().needs_render()
    }

    /// Get a clone of the current state.
    pub fn state(&self) -> TableState {
        self.read().state().clone()
    }

    /// Update the state. See [`Instance::set_state`].
    pub fn set_state(&self, updater: impl Into<Updater<TableState>>, action: Action) {
        self.write().set_state(updater, action);
    }

    /// Replace the column definitions and render.
    pub fn set_columns(&self, columns: Vec<ColumnDef>) {
        let mut guard = self.write();
        guard.set_column_defs(columns);
        guard.render_pass();
    }

    /// Replace the rows and render.
    pub fn set_rows(&self, rows: Vec<Row>) {
        let mut guard = self.write();
        guard.set_rows(rows);
        guard.render_pass();
    }

    /// Get a clone of the header rows from the last render pass.
    pub fn header_groups(&self) -> HeaderGroups {
        self.read().header_groups().clone()
    }

    /// Get clones of the visible leaf columns from the last render pass.
    pub fn visible_leaf_columns(&self) -> Vec<Column> {
        self.read().visible_leaf_columns().into_iter().cloned().collect()
    }

    /// Get a clone of every column from the last render pass.
    pub fn all_columns(&self) -> Vec<Column> {
        self.read().all_columns().to_vec()
    }

    /// Handle to a single column. The column does not have to exist.
    pub fn column(&self, column_id: impl Into<String>) -> ColumnHandle {
        ColumnHandle {
            table: self.clone(),
            column_id: column_id.into(),
        }
    }
}

/// Handle to one column of a [`Table`].
///
/// Column capabilities are added by plugins as extension traits on this type.
#[derive(Clone, Debug)]
pub struct ColumnHandle {
    table: Table,
    column_id: String,
}

impl ColumnHandle {
    /// Id of the column.
    pub fn id(&self) -> &str {
        &self.column_id
    }

    /// The table this column belongs to.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Get a clone of the column from the last render pass, if it exists.
    pub fn get(&self) -> Option<Column> {
        self.table.read().find_column(&self.column_id).cloned()
    }
}

/// Assembles a [`Table`] from options, columns, rows and plugins.
#[derive(Default)]
pub struct TableBuilder {
    options: TableOptions,
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
    plugins: Vec<Arc<dyn Plugin>>,
}

impl TableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the options.
    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the column definitions.
    pub fn with_columns(mut self, columns: Vec<ColumnDef>) -> Self {
        self.columns = columns;
        self
    }

    /// Set the rows.
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    /// Register a plugin.
    pub fn with_plugin(mut self, plugin: impl Plugin) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    /// Register an already shared plugin.
    pub fn with_shared_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Order the plugins, reduce the options, build the initial state and run
    /// the first render pass.
    pub fn build(self) -> Result<Table, TableError> {
        let plugins = sort_plugins(self.plugins)?;

        let options = plugins
            .iter()
            .fold(self.options, |options, plugin| plugin.reduce_options(options));

        let state = TableState::from_initial(&options.initial_state)
            .map_err(TableError::InvalidInitialState)?;

        debug!(
            "Assembled table with {} plugins, {} top-level columns, {} rows",
            plugins.len(),
            self.columns.len(),
            self.rows.len()
        );

        let mut instance = Instance::new(options, state, self.columns, self.rows, plugins);
        instance.render_pass();

        Ok(Table {
            inner: Arc::new(RwLock::new(instance)),
        })
    }
}

//! The table instance and its render pass.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace};

use crate::column::{Column, ColumnDef, build_columns};
use crate::header::{HeaderGroups, build_header_groups};
use crate::options::TableOptions;
use crate::plugin::{Plugin, Plugs};
use crate::plugins::column_visibility::ColumnVisibilityInstance;
use crate::row::Row;
use crate::state::{Action, TableState, Updater, functional_update};
use crate::utils::{Decorator, compose_decorator, expand_rows, flatten_by};

/// Plugin-derived data, keyed by plugin name.
#[derive(Default)]
pub struct Extensions {
    map: HashMap<&'static str, Box<dyn Any + Send + Sync>>,
}

impl Extensions {
    /// Store data for `plugin`, replacing what was there.
    pub fn insert<T: Any + Send + Sync>(&mut self, plugin: &'static str, value: T) {
        self.map.insert(plugin, Box::new(value));
    }

    /// Get the data stored for `plugin`, if it has type `T`.
    pub fn get<T: Any>(&self, plugin: &str) -> Option<&T> {
        self.map.get(plugin).and_then(|v| v.downcast_ref())
    }

    /// Get the data stored for `plugin` mutably, if it has type `T`.
    pub fn get_mut<T: Any>(&mut self, plugin: &str) -> Option<&mut T> {
        self.map.get_mut(plugin).and_then(|v| v.downcast_mut())
    }

    /// Get the data for `plugin`, inserting `init()` if missing or of another
    /// type.
    pub fn get_or_insert_with<T, F>(&mut self, plugin: &'static str, init: F) -> &mut T
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        if !self.map.get(plugin).is_some_and(|v| v.is::<T>()) {
            self.map.insert(plugin, Box::new(init()));
        }
        match self.map.get_mut(plugin).and_then(|v| v.downcast_mut::<T>()) {
            Some(value) => value,
            None => unreachable!("extension slot for '{plugin}' holds a different type"),
        }
    }

    /// Check whether `plugin` stored any data.
    pub fn contains(&self, plugin: &str) -> bool {
        self.map.contains_key(plugin)
    }
}

impl std::fmt::Debug for Extensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.map.keys()).finish()
    }
}

/// The shared context all plugins work on.
///
/// Core fields have a fixed schema; anything a plugin derives goes into
/// [`extensions`](Self::extensions). The instance is rebuilt by every render
/// pass with the state carried over.
pub struct Instance {
    state: TableState,
    options: TableOptions,
    column_defs: Vec<ColumnDef>,
    all_columns: Vec<Column>,
    column_positions: HashMap<String, usize>,
    leaf_columns: Vec<usize>,
    visible_leaf_columns: Vec<usize>,
    header_groups: HeaderGroups,
    rows: Vec<Row>,
    plugins: Arc<[Arc<dyn Plugin>]>,
    plugs: Plugs,
    extensions: Extensions,
    needs_render: bool,
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("state", &self.state)
            .field("options", &self.options)
            .field("all_columns", &self.all_columns.len())
            .field("visible_leaf_columns", &self.visible_leaf_columns)
            .field("rows", &self.rows.len())
            .field("plugins", &self.plugin_names())
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

impl Instance {
    /// Create an instance from already ordered plugins and reduced options.
    /// Call [`render_pass`](Self::render_pass) before reading derived data.
    pub(crate) fn new(
        options: TableOptions,
        state: TableState,
        column_defs: Vec<ColumnDef>,
        rows: Vec<Row>,
        plugins: Vec<Arc<dyn Plugin>>,
    ) -> Self {
        let plugs = Plugs::new(&plugins);
        Self {
            state,
            options,
            column_defs,
            all_columns: Vec::new(),
            column_positions: HashMap::new(),
            leaf_columns: Vec::new(),
            visible_leaf_columns: Vec::new(),
            header_groups: HeaderGroups::default(),
            rows,
            plugins: plugins.into(),
            plugs,
            extensions: Extensions::default(),
            needs_render: true,
        }
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Current state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Options after every plugin's option reducer ran.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// The only way to change the state.
    ///
    /// The options' state reducer, if any, sees the transition first.
    pub fn set_state(&mut self, updater: impl Into<Updater<TableState>>, action: Action) {
        let next = functional_update(updater.into(), &self.state);
        let next = match &self.options.state_reducer {
            Some(reducer) => reducer(&self.state, next, &action),
            None => next,
        };
        debug!("State transition: {} {:?}", action.kind(), action);
        self.state = next;
        self.needs_render = true;
    }

    /// True after a state change that no render pass has seen yet.
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Column definitions as supplied.
    pub fn column_defs(&self) -> &[ColumnDef] {
        &self.column_defs
    }

    /// Every column, parents included, in depth-first pre-order.
    pub fn all_columns(&self) -> &[Column] {
        &self.all_columns
    }

    /// Look up a column by id.
    pub fn find_column(&self, column_id: &str) -> Option<&Column> {
        self.column_positions
            .get(column_id)
            .and_then(|&i| self.all_columns.get(i))
    }

    /// Get a column by arena position.
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.all_columns.get(index)
    }

    /// Leaf columns before any plugin reduced them.
    pub fn leaf_columns(&self) -> Vec<&Column> {
        self.columns_at(&self.leaf_columns)
    }

    /// Leaf columns that survived every plugin's leaf reducer.
    pub fn visible_leaf_columns(&self) -> Vec<&Column> {
        self.columns_at(&self.visible_leaf_columns)
    }

    /// Resolve arena positions to columns, skipping unknown positions.
    pub fn columns_at(&self, positions: &[usize]) -> Vec<&Column> {
        positions.iter().filter_map(|&i| self.all_columns.get(i)).collect()
    }

    /// Header rows built by the last render pass.
    pub fn header_groups(&self) -> &HeaderGroups {
        &self.header_groups
    }

    pub(crate) fn set_column_defs(&mut self, column_defs: Vec<ColumnDef>) {
        self.column_defs = column_defs;
        self.needs_render = true;
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Top-level rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Every row and sub row, parents included, in pre-order.
    pub fn flat_rows(&self) -> Vec<&Row> {
        flatten_by(&self.rows, |row| row.sub_rows.as_slice(), true)
    }

    /// Rows to render: top-level rows plus the sub rows of expanded rows.
    pub fn expanded_rows(&self) -> Vec<&Row> {
        expand_rows(&self.rows, &self.options)
    }

    pub(crate) fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.needs_render = true;
    }

    // -------------------------------------------------------------------------
    // Plugins
    // -------------------------------------------------------------------------

    /// Names of the registered plugins, in execution order.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Composed plugin prop reducers.
    pub fn plugs(&self) -> &Plugs {
        &self.plugs
    }

    /// Plugin-derived data.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Plugin-derived data, mutably.
    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    // -------------------------------------------------------------------------
    // Render pass
    // -------------------------------------------------------------------------

    /// Run every hook phase in plugin order and rebuild the derived data.
    pub(crate) fn render_pass(&mut self) {
        let plugins = Arc::clone(&self.plugins);

        trace!("Render pass: instance after state");
        for plugin in plugins.iter() {
            plugin.instance_after_state(self);
        }

        trace!("Render pass: instance after data model ({} rows)", self.rows.len());
        for plugin in plugins.iter() {
            plugin.instance_after_data_model(self);
        }

        trace!("Render pass: decorating columns");
        let decorators: Vec<Decorator<Column, TableOptions>> = plugins
            .iter()
            .map(|plugin| {
                let plugin = Arc::clone(plugin);
                Box::new(move |column: &mut Column, options: &TableOptions| {
                    plugin.decorate_column(column, options)
                }) as Decorator<Column, TableOptions>
            })
            .collect();
        let decorate = compose_decorator(decorators);

        let mut columns = build_columns(&self.column_defs);
        for column in &mut columns {
            decorate(column, &self.options);
        }
        self.column_positions = columns.iter().map(|c| (c.id.clone(), c.index)).collect();
        self.leaf_columns = columns.iter().filter(|c| c.is_leaf()).map(|c| c.index).collect();
        self.all_columns = columns;

        trace!("Render pass: reducing {} leaf columns", self.leaf_columns.len());
        let mut leaf_columns = self.leaf_columns.clone();
        for plugin in plugins.iter() {
            leaf_columns = plugin.reduce_leaf_columns(leaf_columns, self);
        }
        self.visible_leaf_columns = leaf_columns;

        let is_visible = |column: &Column| self.column_is_displayed(column);
        let header_groups = build_header_groups(
            &self.all_columns,
            &self.visible_leaf_columns,
            &is_visible,
            self.plugs.clone(),
        );
        self.header_groups = header_groups;
        self.needs_render = false;
    }
}

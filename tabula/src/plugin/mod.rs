//! The plugin contract.
//!
//! A plugin is a named bundle of optional hooks. The assembler orders the
//! registered plugins once (see [`sort_plugins`]) and every render pass calls
//! each hook phase as a loop over that order:
//!
//! 1. [`reduce_options`](Plugin::reduce_options), once at assembly
//! 2. [`instance_after_state`](Plugin::instance_after_state)
//! 3. [`instance_after_data_model`](Plugin::instance_after_data_model)
//! 4. [`decorate_column`](Plugin::decorate_column), for every column
//! 5. [`reduce_leaf_columns`](Plugin::reduce_leaf_columns)
//!
//! Every hook defaults to the identity (or a no-op), so a plugin only
//! implements the phases it cares about.

mod registry;

pub use registry::sort_plugins;

use std::sync::Arc;

use crate::column::Column;
use crate::header::HeaderGroup;
use crate::instance::Instance;
use crate::options::TableOptions;
use crate::props::Props;
use crate::utils::{Reducer, compose_reducer};

/// A table plugin.
///
/// Plugin-specific instance methods are provided through extension traits
/// implemented for [`Instance`] and [`Table`](crate::Table); plugin-derived
/// data lives in the instance [`Extensions`](crate::Extensions) under the
/// plugin's name.
pub trait Plugin: Send + Sync + 'static {
    /// Unique plugin name.
    fn name(&self) -> &'static str;

    /// Names of the plugins that must run before this one in every phase.
    fn after(&self) -> &[&'static str] {
        &[]
    }

    /// Merge plugin defaults into the options. Must only add missing values.
    fn reduce_options(&self, options: TableOptions) -> TableOptions {
        options
    }

    /// Runs once the state for this pass is available.
    fn instance_after_state(&self, _instance: &mut Instance) {}

    /// Runs once the row model for this pass is available.
    fn instance_after_data_model(&self, _instance: &mut Instance) {}

    /// Attach column-level capabilities. Called for every column, parents
    /// included.
    fn decorate_column(&self, _column: &mut Column, _options: &TableOptions) {}

    /// Filter or transform the leaf columns (arena positions). Receives the
    /// output of the previous plugin.
    fn reduce_leaf_columns(
        &self,
        leaf_columns: Vec<usize>,
        _instance: &mut Instance,
    ) -> Vec<usize> {
        leaf_columns
    }

    /// Adjust the props of a header row.
    fn reduce_header_group_props(&self, props: Props, _header_group: &HeaderGroup) -> Props {
        props
    }

    /// Adjust the props of a footer row.
    fn reduce_footer_group_props(&self, props: Props, _header_group: &HeaderGroup) -> Props {
        props
    }
}

type PropsReducer = Arc<dyn Fn(Props, &HeaderGroup) -> Props + Send + Sync>;

/// Prop reducers composed from every plugin, in plugin order.
#[derive(Clone)]
pub struct Plugs {
    header_group_props: PropsReducer,
    footer_group_props: PropsReducer,
}

impl Plugs {
    /// Compose the prop reducers of the (already ordered) plugins.
    pub fn new(plugins: &[Arc<dyn Plugin>]) -> Self {
        let header: Vec<Reducer<Props, HeaderGroup>> = plugins
            .iter()
            .map(|plugin| {
                let plugin = Arc::clone(plugin);
                Box::new(move |props: Props, group: &HeaderGroup| {
                    plugin.reduce_header_group_props(props, group)
                }) as Reducer<Props, HeaderGroup>
            })
            .collect();
        let footer: Vec<Reducer<Props, HeaderGroup>> = plugins
            .iter()
            .map(|plugin| {
                let plugin = Arc::clone(plugin);
                Box::new(move |props: Props, group: &HeaderGroup| {
                    plugin.reduce_footer_group_props(props, group)
                }) as Reducer<Props, HeaderGroup>
            })
            .collect();

        Self {
            header_group_props: Arc::new(compose_reducer(header)),
            footer_group_props: Arc::new(compose_reducer(footer)),
        }
    }

    pub fn reduce_header_group_props(&self, props: Props, header_group: &HeaderGroup) -> Props {
        (self.header_group_props)(props, header_group)
    }

    pub fn reduce_footer_group_props(&self, props: Props, header_group: &HeaderGroup) -> Props {
        (self.footer_group_props)(props, header_group)
    }
}

impl Default for Plugs {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl std::fmt::Debug for Plugs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugs").finish_non_exhaustive()
    }
}

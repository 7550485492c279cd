//! Headless, plugin-extensible table engine.
//!
//! A [`Table`] owns column definitions, rows and state. Every render pass
//! threads them through the registered [`Plugin`]s and produces the visible
//! leaf columns and the [`HeaderGroups`] a renderer lays out. Nothing here
//! draws; rendering is left to the caller through [`render::flex_render`].

pub mod capability;
pub mod column;
pub mod error;
pub mod header;
pub mod instance;
pub mod options;
pub mod plugin;
pub mod plugins;
pub mod props;
pub mod render;
pub mod row;
pub mod state;
pub mod table;
pub mod utils;

pub use column::{Column, ColumnDef};
pub use error::TableError;
pub use header::{Header, HeaderGroup, HeaderGroups};
pub use instance::{Extensions, Instance};
pub use options::TableOptions;
pub use plugin::{Plugin, Plugs};
pub use plugins::ColumnVisibilityPlugin;
pub use props::{PropValue, Props};
pub use render::{Renderable, flex_render, make_renderer};
pub use row::Row;
pub use state::{Action, TableState, Updater};
pub use table::{ColumnHandle, Table, TableBuilder};

/// Everything needed to build a table and call plugin methods.
pub mod prelude {
    pub use crate::plugins::{
        ColumnVisibilityColumn, ColumnVisibilityInstance, ColumnVisibilityPlugin,
        ColumnVisibilityTable,
    };
    pub use crate::{
        Action, Column, ColumnDef, ColumnHandle, Header, HeaderGroup, HeaderGroups, Instance,
        Plugin, Props, Renderable, Row, Table, TableError, TableOptions, TableState, Updater,
        flex_render, make_renderer,
    };
}

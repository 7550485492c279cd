//! Built-in plugins.

pub mod column_visibility;

pub use column_visibility::{
    COLUMN_VISIBILITY, ColumnVisibilityColumn, ColumnVisibilityData, ColumnVisibilityInstance,
    ColumnVisibilityPlugin, ColumnVisibilityTable,
};

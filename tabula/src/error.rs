//! Table assembly errors.

use thiserror::Error;

/// Errors that can occur while assembling a table.
///
/// Lookups by column id never produce an error; they resolve to a default
/// instead. Only configuration problems detected at assembly time end up here.
#[derive(Debug, Error)]
pub enum TableError {
    /// The `after` constraints between plugins form a cycle.
    #[error("Plugin dependency cycle between: {}", .plugins.join(", "))]
    PluginCycle {
        /// Names of the plugins that could not be ordered.
        plugins: Vec<String>,
    },

    /// Two plugins were registered under the same name.
    #[error("Plugin '{0}' registered more than once")]
    DuplicatePlugin(String),

    /// The reduced `initialState` could not be turned into a table state.
    #[error("Invalid initial state: {0}")]
    InvalidInitialState(#[source] serde_json::Error),

    /// An options document could not be parsed.
    #[error("Invalid table options: {0}")]
    InvalidOptions(#[source] serde_json::Error),
}

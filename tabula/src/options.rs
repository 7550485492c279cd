//! Table options.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TableError;
use crate::state::{Action, TableState};

/// Hook that sees every state transition before it is committed.
///
/// Receives the current state, the proposed next state and the action that
/// produced it, and returns the state to store.
pub type StateReducer = Arc<dyn Fn(&TableState, TableState, &Action) -> TableState + Send + Sync>;

/// Per-table configuration.
///
/// Plugins add their defaults through [`Plugin::reduce_options`] before the
/// instance is built. Keys this crate does not know about are kept in
/// [`extra`](Self::extra) and survive a round trip untouched.
///
/// # Example
///
/// ```
/// use tabula::TableOptions;
///
/// let options = TableOptions::from_json(r#"{ "disabledHiding": true, "pageSize": 20 }"#)
///     .unwrap()
///     .with_expand_sub_rows(false);
///
/// assert!(options.disabled_hiding);
/// assert!(!options.expand_sub_rows);
/// assert_eq!(options.extra["pageSize"], 20);
/// ```
///
/// [`Plugin::reduce_options`]: crate::plugin::Plugin::reduce_options
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    /// Initial state document. Plugins merge their own defaults into it.
    #[serde(default)]
    pub initial_state: Map<String, Value>,

    /// Disables hiding for every column when set.
    #[serde(default)]
    pub disabled_hiding: bool,

    /// Whether expanded rows contribute their sub rows to the row model.
    ///
    /// Default: true
    #[serde(default = "default_expand_sub_rows")]
    pub expand_sub_rows: bool,

    /// Optional hook run on every state transition.
    #[serde(skip)]
    pub state_reducer: Option<StateReducer>,

    /// Unrecognized keys, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_expand_sub_rows() -> bool {
    true
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            initial_state: Map::new(),
            disabled_hiding: false,
            expand_sub_rows: default_expand_sub_rows(),
            state_reducer: None,
            extra: Map::new(),
        }
    }
}

impl std::fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableOptions")
            .field("initial_state", &self.initial_state)
            .field("disabled_hiding", &self.disabled_hiding)
            .field("expand_sub_rows", &self.expand_sub_rows)
            .field("state_reducer", &self.state_reducer.is_some())
            .field("extra", &self.extra)
            .finish()
    }
}

impl TableOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an options document.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        serde_json::from_str(json).map_err(TableError::InvalidOptions)
    }

    /// Sets the initial state document.
    pub fn with_initial_state(mut self, initial_state: Map<String, Value>) -> Self {
        self.initial_state = initial_state;
        self
    }

    /// Disables hiding for every column.
    pub fn with_disabled_hiding(mut self, disabled: bool) -> Self {
        self.disabled_hiding = disabled;
        self
    }

    /// Sets whether expanded rows show their sub rows.
    pub fn with_expand_sub_rows(mut self, expand: bool) -> Self {
        self.expand_sub_rows = expand;
        self
    }

    /// Installs a hook that sees every state transition.
    pub fn with_state_reducer<F>(mut self, reducer: F) -> Self
    where
        F: Fn(&TableState, TableState, &Action) -> TableState + Send + Sync + 'static,
    {
        self.state_reducer = Some(Arc::new(reducer));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TableOptions::default();
        assert!(options.initial_state.is_empty());
        assert!(!options.disabled_hiding);
        assert!(options.expand_sub_rows);
        assert!(options.state_reducer.is_none());
    }

    #[test]
    fn test_from_json_keeps_unknown_keys() {
        let json = r#"{"initialState": {"columnVisibility": {"a": false}}, "custom": "x"}"#;
        let options = TableOptions::from_json(json).unwrap();
        assert!(options.expand_sub_rows);
        assert_eq!(options.extra.get("custom"), Some(&Value::from("x")));
        assert!(options.initial_state.contains_key("columnVisibility"));

        let round_trip = serde_json::to_value(&options).unwrap();
        assert_eq!(round_trip["custom"], "x");
    }

    #[test]
    fn test_from_json_rejects_bad_types() {
        let err = TableOptions::from_json(r#"{"disabledHiding": "yes"}"#).unwrap_err();
        assert!(matches!(err, TableError::InvalidOptions(_)));
    }
}

//! Table state, actions and updaters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serializable table state.
///
/// Only changed through [`Instance::set_state`](crate::Instance::set_state).
/// State owned by plugins this crate does not know about lives in
/// [`extra`](Self::extra).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    /// Column id to visibility. Missing ids fall back to the column default.
    #[serde(default)]
    pub column_visibility: HashMap<String, bool>,

    /// State of other plugins, keyed by their state key.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TableState {
    /// Builds a state from a (reduced) `initialState` document.
    pub fn from_initial(initial: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(initial.clone()))
    }
}

/// Tagged description of a state transition.
///
/// Serializes as `{"type": "toggleColumnVisibility", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// A single column was shown or hidden.
    #[serde(rename_all = "camelCase")]
    ToggleColumnVisibility { column_id: String, value: bool },
    /// Every hideable leaf column was shown or hidden.
    ToggleAllColumnsVisible { value: bool },
    /// Transition issued by another plugin or by the application.
    Custom { name: String, payload: Value },
}

impl Action {
    /// The `type` tag of this action.
    pub fn kind(&self) -> &str {
        match self {
            Action::ToggleColumnVisibility { .. } => "toggleColumnVisibility",
            Action::ToggleAllColumnsVisible { .. } => "toggleAllColumnsVisible",
            Action::Custom { name, .. } => name,
        }
    }
}

/// Either a replacement value or a function of the previous value.
pub enum Updater<T> {
    /// Replace the value.
    Value(T),
    /// Derive the next value from the previous one.
    Func(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> Updater<T> {
    /// Wraps a function of the previous value.
    pub fn func<F>(f: F) -> Self
    where
        F: FnOnce(&T) -> T + Send + 'static,
    {
        Updater::Func(Box::new(f))
    }
}

impl<T> From<T> for Updater<T> {
    fn from(value: T) -> Self {
        Updater::Value(value)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Updater<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Updater::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Updater::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Resolves an updater against the previous value.
pub fn functional_update<T>(updater: Updater<T>, old: &T) -> T {
    match updater {
        Updater::Value(value) => value,
        Updater::Func(f) => f(old),
    }
}

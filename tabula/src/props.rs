//! Prop bags handed to the rendering layer.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Callback invoked with the new checked state of a checkbox-like control.
pub type ChangeHandler = Arc<dyn Fn(bool) + Send + Sync>;

/// A single prop value.
#[derive(Clone)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Handler(ChangeHandler),
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Number(a), PropValue::Number(b)) => a == b,
            (PropValue::Text(a), PropValue::Text(b)) => a == b,
            (PropValue::Handler(a), PropValue::Handler(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for PropValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropValue::Bool(v) => write!(f, "{v}"),
            PropValue::Number(v) => write!(f, "{v}"),
            PropValue::Text(v) => write!(f, "{v:?}"),
            PropValue::Handler(_) => f.write_str("<handler>"),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<ChangeHandler> for PropValue {
    fn from(value: ChangeHandler) -> Self {
        PropValue::Handler(value)
    }
}

/// An ordered bag of named props.
///
/// Prop builders start from computed defaults and finish with
/// [`merge`](Self::merge), so keys supplied by the caller always win.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    /// Create an empty prop bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prop, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add an `onChange` handler, builder style.
    pub fn with_on_change<F>(self, handler: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let handler: ChangeHandler = Arc::new(handler);
        self.with("onChange", handler)
    }

    /// Insert or replace a prop.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a prop.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// Get a boolean prop.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(PropValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get a text prop.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(PropValue::Text(v)) => Some(v),
            _ => None,
        }
    }

    /// Check whether a prop is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Overlay `overrides` on top of these props.
    pub fn merge(mut self, overrides: Props) -> Self {
        self.0.extend(overrides.0);
        self
    }

    /// Invoke the `onChange` handler, if any. Returns true if one ran.
    pub fn on_change(&self, checked: bool) -> bool {
        match self.0.get("onChange") {
            Some(PropValue::Handler(handler)) => {
                handler(checked);
                true
            }
            _ => false,
        }
    }

    /// Number of props.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over props in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

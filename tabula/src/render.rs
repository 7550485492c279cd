//! The render collaborator contract.
//!
//! A [`Renderable`] is what a column or header supplies for display: either a
//! component, called with props, or a plain value used as is.

use std::sync::Arc;

use crate::props::Props;
use crate::table::Table;

/// A component function.
pub type Component<P, O> = Arc<dyn Fn(&P) -> O + Send + Sync>;

/// Something that can be rendered with props of type `P` into an `O`.
pub enum Renderable<P, O> {
    /// Called with the props.
    Component(Component<P, O>),
    /// Returned unchanged.
    Value(O),
}

impl<P, O> Renderable<P, O> {
    /// Wrap a component function.
    pub fn component<F>(f: F) -> Self
    where
        F: Fn(&P) -> O + Send + Sync + 'static,
    {
        Self::Component(Arc::new(f))
    }
}

impl<P, O: Clone> Clone for Renderable<P, O> {
    fn clone(&self) -> Self {
        match self {
            Self::Component(f) => Self::Component(Arc::clone(f)),
            Self::Value(v) => Self::Value(v.clone()),
        }
    }
}

impl<P, O: std::fmt::Debug> std::fmt::Debug for Renderable<P, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Component(_) => f.write_str("Component(..)"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

impl<P> From<&str> for Renderable<P, String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl<P> From<String> for Renderable<P, String> {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

/// Render `renderable`: call it if it is a component, otherwise return the
/// value.
pub fn flex_render<P, O: Clone>(renderable: &Renderable<P, O>, props: &P) -> O {
    match renderable {
        Renderable::Component(component) => component(props),
        Renderable::Value(value) => value.clone(),
    }
}

/// Props handed to components rendered through [`make_renderer`].
#[derive(Debug, Clone)]
pub struct RenderProps {
    /// Handle to the table being rendered.
    pub table: Table,
    /// Metadata props merged with the caller's props (caller wins).
    pub props: Props,
}

/// Build a render function bound to `table` and `meta`.
///
/// Each call renders with `{table, ...meta, ...user_props}`.
pub fn make_renderer<O: Clone>(
    table: Table,
    meta: Props,
) -> impl Fn(&Renderable<RenderProps, O>, Props) -> O {
    move |renderable: &Renderable<RenderProps, O>, user_props: Props| {
        let props = RenderProps {
            table: table.clone(),
            props: meta.clone().merge(user_props),
        };
        flex_render(renderable, &props)
    }
}

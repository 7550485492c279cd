//! Pure helpers shared by the instance, the header builder and plugins.

mod rows;
mod sort;

pub use rows::{expand_rows, find_expanded_depth, get_row_is_selected, group_by};
pub use sort::{SortDirection, SortFn, by_column, order_by};

use serde_json::{Map, Value};

use crate::column::ColumnDef;

/// A reducer threaded through a composed pipeline.
pub type Reducer<T, C> = Box<dyn Fn(T, &C) -> T + Send + Sync>;

/// A decorator run for its side effects on a shared value.
pub type Decorator<T, C> = Box<dyn Fn(&mut T, &C) + Send + Sync>;

/// Depth-first pre-order flattening of a tree.
///
/// Leaves are always included. Nodes with a non-empty child list are only
/// included when `include_parents` is set.
pub fn flatten_by<'a, T, F>(items: &'a [T], children: F, include_parents: bool) -> Vec<&'a T>
where
    F: Fn(&'a T) -> &'a [T],
{
    fn recurse<'a, T, F>(items: &'a [T], children: &F, include_parents: bool, flat: &mut Vec<&'a T>)
    where
        F: Fn(&'a T) -> &'a [T],
    {
        for item in items {
            let kids = children(item);
            if kids.is_empty() {
                flat.push(item);
            } else {
                if include_parents {
                    flat.push(item);
                }
                recurse(kids, children, include_parents, flat);
            }
        }
    }

    let mut flat = Vec::new();
    recurse(items, &children, include_parents, &mut flat);
    flat
}

/// [`flatten_by`] over column definitions.
pub fn flatten_columns(columns: &[ColumnDef], include_parents: bool) -> Vec<&ColumnDef> {
    flatten_by(columns, ColumnDef::children, include_parents)
}

/// Compose reducers left to right: each receives the previous output.
pub fn compose_reducer<T, C: ?Sized>(fns: Vec<Reducer<T, C>>) -> impl Fn(T, &C) -> T + Send + Sync {
    move |initial: T, ctx: &C| fns.iter().fold(initial, |prev, next| next(prev, ctx))
}

/// Compose decorators: each runs, in order, on the same value.
pub fn compose_decorator<T: ?Sized, C: ?Sized>(
    fns: Vec<Decorator<T, C>>,
) -> impl Fn(&mut T, &C) + Send + Sync {
    move |target: &mut T, ctx: &C| {
        for decorate in &fns {
            decorate(target, ctx);
        }
    }
}

/// Fill the keys of `obj` that are missing with the values from `defaults`.
pub fn apply_defaults(
    mut obj: Map<String, Value>,
    defaults: Map<String, Value>,
) -> Map<String, Value> {
    for (key, value) in defaults {
        obj.entry(key).or_insert(value);
    }
    obj
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Node {
        id: &'static str,
        children: Vec<Node>,
    }

    fn node(id: &'static str, children: Vec<Node>) -> Node {
        Node { id, children }
    }

    fn tree() -> Vec<Node> {
        vec![
            node("a", vec![node("a1", vec![node("a1x", vec![])]), node("a2", vec![])]),
            node("b", vec![]),
            node("c", vec![node("c1", vec![])]),
        ]
    }

    #[test]
    fn test_flatten_by_leaves_only() {
        let tree = tree();
        let flat = flatten_by(&tree, |n| n.children.as_slice(), false);
        let ids: Vec<&str> = flat.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["a1x", "a2", "b", "c1"]);
    }

    #[test]
    fn test_flatten_by_with_parents() {
        let tree = tree();
        let flat = flatten_by(&tree, |n| n.children.as_slice(), true);
        let ids: Vec<&str> = flat.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["a", "a1", "a1x", "a2", "b", "c", "c1"]);
    }

    #[test]
    fn test_flatten_columns() {
        let columns = vec![
            ColumnDef::group("a", vec![ColumnDef::new("a1"), ColumnDef::new("a2")]),
            ColumnDef::group("empty", vec![]),
        ];
        let ids: Vec<&str> = flatten_columns(&columns, false)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a1", "a2", "empty"]);
    }

    #[test]
    fn test_compose_reducer_runs_in_order() {
        let reduce = compose_reducer::<Vec<i32>, i32>(vec![
            Box::new(|mut v: Vec<i32>, ctx: &i32| {
                v.push(*ctx);
                v
            }),
            Box::new(|mut v: Vec<i32>, ctx: &i32| {
                v.push(ctx * 10);
                v
            }),
        ]);
        assert_eq!(reduce(vec![0], &2), vec![0, 2, 20]);
    }

    #[test]
    fn test_compose_reducer_empty_is_identity() {
        let reduce = compose_reducer::<i32, ()>(Vec::new());
        assert_eq!(reduce(7, &()), 7);
    }

    #[test]
    fn test_compose_decorator() {
        let decorate = compose_decorator::<Vec<String>, str>(vec![
            Box::new(|v: &mut Vec<String>, ctx: &str| v.push(format!("first:{ctx}"))),
            Box::new(|v: &mut Vec<String>, _: &str| v.push("second".to_string())),
        ]);
        let mut out = Vec::new();
        decorate(&mut out, "x");
        assert_eq!(out, vec!["first:x".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_apply_defaults_keeps_existing() {
        let Value::Object(obj) = json!({"a": 1}) else { unreachable!() };
        let Value::Object(defaults) = json!({"a": 2, "b": 3}) else { unreachable!() };
        let merged = apply_defaults(obj, defaults);
        assert_eq!(Value::Object(merged), json!({"a": 1, "b": 3}));
    }
}

//! Multi-key sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::row::{Indexed, Row};

/// Sort direction for one key of a multi-key sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn is_desc(self) -> bool {
        self == SortDirection::Desc
    }
}

/// A comparator. The third argument tells it whether the key sorts descending;
/// the result is always given in ascending terms and reversed by [`order_by`].
pub type SortFn<T> = dyn Fn(&T, &T, bool) -> Ordering;

/// Sort `items` by several keys.
///
/// For key `i`, `directions[i]` decides the direction; a missing entry sorts
/// descending. The first comparator with a non-equal result decides. Items
/// equal on every key are ordered by their original index, ascending when the
/// first key sorts ascending and descending otherwise, so the result never
/// depends on the stability of the underlying sort.
pub fn order_by<'a, T: Indexed>(
    items: &'a [T],
    comparators: &[&SortFn<T>],
    directions: &[SortDirection],
) -> Vec<&'a T> {
    let is_desc = |i: usize| directions.get(i).is_none_or(|d| d.is_desc());

    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| {
        for (i, compare) in comparators.iter().enumerate() {
            let desc = is_desc(i);
            let ordering = compare(a, b, desc);
            if ordering != Ordering::Equal {
                return if desc { ordering.reverse() } else { ordering };
            }
        }
        if is_desc(0) {
            b.index().cmp(&a.index())
        } else {
            a.index().cmp(&b.index())
        }
    });
    sorted
}

/// Basic comparator over the JSON values of one column.
///
/// Numbers compare numerically, strings lexically, booleans false-first.
/// Missing and null values sort first; values of different kinds compare by
/// kind.
pub fn by_column(column_id: impl Into<String>) -> impl Fn(&Row, &Row, bool) -> Ordering {
    let column_id = column_id.into();
    move |a: &Row, b: &Row, _desc: bool| compare_values(a.value(&column_id), b.value(&column_id))
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (a, b) => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[i64]) -> Vec<Row> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Row::new(i.to_string(), i).with_value("v", *v))
            .collect()
    }

    fn ids(sorted: &[&Row]) -> Vec<String> {
        sorted.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_ties_keep_original_order_ascending() {
        let rows = rows(&[1, 1]);
        let cmp = by_column("v");
        let sorted = order_by(&rows, &[&cmp], &[SortDirection::Asc]);
        assert_eq!(ids(&sorted), vec!["0", "1"]);
    }

    #[test]
    fn test_ties_reverse_original_order_descending() {
        let rows = rows(&[1, 1]);
        let cmp = by_column("v");
        let sorted = order_by(&rows, &[&cmp], &[SortDirection::Desc]);
        assert_eq!(ids(&sorted), vec!["1", "0"]);
    }

    #[test]
    fn test_direction() {
        let rows = rows(&[2, 3, 1]);
        let cmp = by_column("v");
        assert_eq!(ids(&order_by(&rows, &[&cmp], &[SortDirection::Asc])), vec!["2", "0", "1"]);
        assert_eq!(ids(&order_by(&rows, &[&cmp], &[SortDirection::Desc])), vec!["1", "0", "2"]);
        // a missing direction sorts descending
        assert_eq!(ids(&order_by(&rows, &[&cmp], &[])), vec!["1", "0", "2"]);
    }

    #[test]
    fn test_second_key_breaks_ties() {
        let rows = vec![
            Row::new("a", 0).with_value("g", 1).with_value("n", "z"),
            Row::new("b", 1).with_value("g", 0).with_value("n", "y"),
            Row::new("c", 2).with_value("g", 1).with_value("n", "x"),
        ];
        let by_g = by_column("g");
        let by_n = by_column("n");
        let sorted = order_by(
            &rows,
            &[&by_g, &by_n],
            &[SortDirection::Asc, SortDirection::Asc],
        );
        assert_eq!(ids(&sorted), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_missing_values_sort_first() {
        let rows = vec![Row::new("a", 0).with_value("v", 1), Row::new("b", 1)];
        let cmp = by_column("v");
        assert_eq!(ids(&order_by(&rows, &[&cmp], &[SortDirection::Asc])), vec!["b", "a"]);
    }
}

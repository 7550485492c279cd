//! Row model helpers: expansion, selection aggregation and grouping.

use std::collections::HashMap;

use serde_json::Value;

use crate::options::TableOptions;
use crate::row::Row;

/// Flatten rows in pre-order, descending into the sub rows of expanded rows.
///
/// Sub rows are only emitted when `options.expand_sub_rows` is set and the
/// row reports itself expanded. Hierarchy is kept through adjacency.
pub fn expand_rows<'a>(rows: &'a [Row], options: &TableOptions) -> Vec<&'a Row> {
    fn handle_row<'a>(row: &'a Row, expand: bool, out: &mut Vec<&'a Row>) {
        out.push(row);
        if expand && !row.sub_rows.is_empty() && row.get_is_expanded() {
            for sub_row in &row.sub_rows {
                handle_row(sub_row, expand, out);
            }
        }
    }

    let mut expanded = Vec::new();
    for row in rows {
        handle_row(row, options.expand_sub_rows, &mut expanded);
    }
    expanded
}

/// Resolve the selection state of a row.
///
/// Returns `Some(true)` if the row is selected directly or all of its sub rows
/// resolve to selected, `None` if only some of them do (partial), and
/// `Some(false)` otherwise.
pub fn get_row_is_selected(row: &Row, selection: &HashMap<String, bool>) -> Option<bool> {
    if selection.get(&row.id).copied().unwrap_or(false) {
        return Some(true);
    }

    if row.sub_rows.is_empty() {
        return Some(false);
    }

    let mut all_children_selected = true;
    let mut some_selected = false;

    for sub_row in &row.sub_rows {
        // Both flags are settled
        if some_selected && !all_children_selected {
            break;
        }

        if get_row_is_selected(sub_row, selection) == Some(true) {
            some_selected = true;
        } else {
            all_children_selected = false;
        }
    }

    if all_children_selected {
        Some(true)
    } else if some_selected {
        None
    } else {
        Some(false)
    }
}

/// Group rows by the string form of their value for `column_id`.
///
/// Groups appear in the order their key is first seen. Missing values group
/// under `"undefined"`.
pub fn group_by<'a>(rows: &'a [Row], column_id: &str) -> Vec<(String, Vec<&'a Row>)> {
    let mut groups: Vec<(String, Vec<&'a Row>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let key = row.value(column_id).map_or_else(|| "undefined".to_string(), value_key);
        match positions.get(&key) {
            Some(&i) => groups[i].1.push(row),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, vec![row]));
            }
        }
    }

    groups
}

fn value_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Deepest level referenced by a map of dotted row-id paths (`"0.1.2"`).
pub fn find_expanded_depth(expanded: &HashMap<String, bool>) -> usize {
    expanded
        .keys()
        .map(|id| id.split('.').count())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(ids: &[&str]) -> HashMap<String, bool> {
        ids.iter().map(|id| (id.to_string(), true)).collect()
    }

    fn parent() -> Row {
        Row::new("p", 0).with_sub_rows(vec![Row::new("a", 0), Row::new("b", 1)])
    }

    #[test]
    fn test_selection_partial() {
        assert_eq!(get_row_is_selected(&parent(), &selection(&["a"])), None);
    }

    #[test]
    fn test_selection_all_children() {
        assert_eq!(get_row_is_selected(&parent(), &selection(&["a", "b"])), Some(true));
    }

    #[test]
    fn test_selection_none() {
        assert_eq!(get_row_is_selected(&parent(), &HashMap::new()), Some(false));
        assert_eq!(get_row_is_selected(&Row::new("a", 0), &HashMap::new()), Some(false));
    }

    #[test]
    fn test_selection_direct_wins() {
        assert_eq!(get_row_is_selected(&parent(), &selection(&["p"])), Some(true));
    }

    #[test]
    fn test_selection_false_entry_is_unselected() {
        let mut sel = HashMap::new();
        sel.insert("a".to_string(), false);
        assert_eq!(get_row_is_selected(&Row::new("a", 0), &sel), Some(false));
    }

    #[test]
    fn test_selection_nested_partial_counts_as_not_selected() {
        let row = Row::new("root", 0).with_sub_rows(vec![
            parent(),
            Row::new("c", 1),
        ]);
        // "p" is partial and "c" is selected: some, but not all
        assert_eq!(get_row_is_selected(&row, &selection(&["a", "c"])), None);
        // only the partial child: nothing fully selected
        assert_eq!(get_row_is_selected(&row, &selection(&["a"])), Some(false));
    }

    #[test]
    fn test_expand_rows() {
        let rows = vec![
            Row::new("1", 0)
                .expanded(true)
                .with_sub_rows(vec![Row::new("1.0", 0), Row::new("1.1", 1)]),
            Row::new("2", 1).with_sub_rows(vec![Row::new("2.0", 0)]),
        ];

        let options = TableOptions::default();
        let ids: Vec<&str> = expand_rows(&rows, &options).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "1.0", "1.1", "2"]);

        let options = TableOptions::default().with_expand_sub_rows(false);
        let ids: Vec<&str> = expand_rows(&rows, &options).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_group_by() {
        let rows = vec![
            Row::new("1", 0).with_value("kind", "x"),
            Row::new("2", 1).with_value("kind", 3),
            Row::new("3", 2).with_value("kind", "x"),
            Row::new("4", 3),
        ];
        let groups = group_by(&rows, "kind");
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["x", "3", "undefined"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_find_expanded_depth() {
        let mut expanded = HashMap::new();
        assert_eq!(find_expanded_depth(&expanded), 0);
        expanded.insert("0".to_string(), true);
        expanded.insert("0.3.1".to_string(), true);
        assert_eq!(find_expanded_depth(&expanded), 3);
    }
}

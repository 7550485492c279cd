use std::collections::HashMap;

use log::trace;

use super::{Header, HeaderGroup, HeaderGroups};
use crate::column::Column;
use crate::plugin::Plugs;

/// Build the header rows for `leaf_columns` (arena positions into `columns`).
///
/// The deepest row holds one header per leaf column. Each row above is made
/// by resolving a parent for every header of the row below: the parent
/// column when the header's column sits exactly at that row's depth, or a
/// placeholder repeating the same column otherwise. Adjacent headers with the
/// same parent column share one parent header; a non-adjacent run of the same
/// column starts a new one, told apart by `placeholder_id`.
///
/// Spans are filled in before returning. A column tree without visible
/// columns yields a single empty row at depth 0. Leaf positions outside
/// `columns` are skipped.
pub fn build_header_groups(
    columns: &[Column],
    leaf_columns: &[usize],
    is_visible: &dyn Fn(&Column) -> bool,
    plugs: Plugs,
) -> HeaderGroups {
    let roots: Vec<usize> = columns
        .iter()
        .filter(|c| c.parent.is_none())
        .map(|c| c.index)
        .collect();
    let mut max_depth = 0;
    find_max_depth(columns, &roots, 0, is_visible, &mut max_depth);

    let mut headers: Vec<Header> = Vec::new();
    let mut column_headers: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<HeaderGroup> = Vec::new();

    let mut current: Vec<usize> = leaf_columns
        .iter()
        .filter(|&&column| column < columns.len())
        .map(|&column| {
            headers.push(Header {
                id: String::new(),
                column,
                depth: max_depth,
                is_placeholder: false,
                placeholder_id: 0,
                sub_headers: Vec::new(),
                col_span: 0,
                row_span: 0,
            });
            headers.len() - 1
        })
        .collect();

    let mut depth = max_depth;
    loop {
        let mut parents: Vec<usize> = Vec::new();

        for &index in &current {
            let column = &columns[headers[index].column];

            if depth > 0 {
                let (parent_column, is_placeholder) = match column.parent {
                    Some(parent) if column.depth == depth => (parent, false),
                    _ => (column.index, true),
                };

                match parents.last() {
                    Some(&last) if headers[last].column == parent_column => {
                        headers[last].sub_headers.push(index);
                    }
                    _ => {
                        let placeholder_id = parents
                            .iter()
                            .filter(|&&p| headers[p].column == parent_column)
                            .count();
                        headers.push(Header {
                            id: String::new(),
                            column: parent_column,
                            depth: depth - 1,
                            is_placeholder,
                            placeholder_id,
                            sub_headers: vec![index],
                            col_span: 0,
                            row_span: 0,
                        });
                        parents.push(headers.len() - 1);
                    }
                }
            }

            let header = &mut headers[index];
            if !header.is_placeholder {
                column_headers.insert(header.column, index);
            }
            header.id = if header.placeholder_id > 0 {
                format!("{}_{}", column.id, header.placeholder_id)
            } else {
                column.id.clone()
            };
        }

        groups.push(HeaderGroup {
            depth,
            id: depth,
            headers: current,
            plugs: plugs.clone(),
        });

        if depth == 0 {
            break;
        }
        current = parents;
        depth -= 1;
    }

    groups.reverse();

    if let Some(top) = groups.first() {
        for &index in &top.headers {
            recurse_header_for_spans(&mut headers, index, columns, is_visible);
        }
    }

    trace!(
        "Built {} header groups ({} headers, max depth {})",
        groups.len(),
        headers.len(),
        max_depth
    );

    HeaderGroups {
        headers,
        groups,
        column_headers,
    }
}

fn find_max_depth(
    columns: &[Column],
    level: &[usize],
    depth: usize,
    is_visible: &dyn Fn(&Column) -> bool,
    max_depth: &mut usize,
) {
    for &index in level {
        let column = &columns[index];
        if !is_visible(column) {
            continue;
        }
        *max_depth = (*max_depth).max(depth);
        if !column.is_leaf() {
            find_max_depth(columns, column.children(), depth + 1, is_visible, max_depth);
        }
    }
}

/// Fill in `col_span` and `row_span` for a header and everything below it.
/// Returns `(col_span, row_span)`.
///
/// `col_span` counts the visible leaves below the header (0 when its column
/// is hidden). `row_span` is 1 plus the smallest row span carried up from
/// the sub headers, where only a sub header repeating the same column carries
/// its span; a header over a genuine group boundary covers a single row.
pub fn recurse_header_for_spans(
    headers: &mut [Header],
    index: usize,
    columns: &[Column],
    is_visible: &dyn Fn(&Column) -> bool,
) -> (usize, usize) {
    let column = headers[index].column;
    let mut col_span = 0;
    let mut child_row_spans = vec![0];

    if columns.get(column).is_some_and(is_visible) {
        let sub_headers = headers[index].sub_headers.clone();
        if sub_headers.is_empty() {
            col_span = 1;
        } else {
            child_row_spans.clear();
            for sub in sub_headers {
                let (count, row_span) = recurse_header_for_spans(headers, sub, columns, is_visible);
                col_span += count;
                child_row_spans.push(if headers[sub].column == column { row_span } else { 0 });
            }
        }
    }

    let row_span = 1 + child_row_spans.into_iter().min().unwrap_or(0);

    let header = &mut headers[index];
    header.col_span = col_span;
    header.row_span = row_span;

    (col_span, row_span)
}

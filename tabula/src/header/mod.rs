//! Header groups: the rows of header cells derived from the column tree.
//!
//! Headers live in one arena ([`HeaderGroups`]); groups and parent headers
//! refer to them by position. The whole structure is rebuilt every render
//! pass.

mod build;

pub use build::{build_header_groups, recurse_header_for_spans};

use std::collections::HashMap;

use crate::plugin::Plugs;
use crate::props::Props;

/// One cell of the header (or footer) grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Column id, suffixed with `_<placeholder_id>` for repeated parents.
    pub id: String,
    /// Arena position of the column this header shows.
    pub column: usize,
    /// Depth of the header row this header belongs to.
    pub depth: usize,
    /// True when this header repeats a column whose subtree ends above the
    /// deepest row.
    pub is_placeholder: bool,
    /// Number of earlier parents for the same column in the same row.
    pub placeholder_id: usize,
    /// Arena positions of the headers one row below.
    pub sub_headers: Vec<usize>,
    /// Number of visible leaf columns below this header.
    pub col_span: usize,
    /// Number of header rows this cell covers.
    pub row_span: usize,
}

/// One row of headers.
#[derive(Debug, Clone)]
pub struct HeaderGroup {
    /// Depth of this row (0 is the top row).
    pub depth: usize,
    /// Same as `depth`.
    pub id: usize,
    /// Arena positions of the headers in this row, left to right.
    pub headers: Vec<usize>,
    plugs: Plugs,
}

impl HeaderGroup {
    /// Props for a header row: a `row` role, plugin adjustments, then
    /// `overrides`.
    pub fn get_header_group_props(&self, overrides: Props) -> Props {
        let props = Props::new().with("role", "row");
        self.plugs.reduce_header_group_props(props, self).merge(overrides)
    }

    /// Props for a footer row: a `row` role, plugin adjustments, then
    /// `overrides`.
    pub fn get_footer_group_props(&self, overrides: Props) -> Props {
        let props = Props::new().with("role", "row");
        self.plugs.reduce_footer_group_props(props, self).merge(overrides)
    }
}

/// All header rows of a render pass, top row first.
#[derive(Debug, Clone, Default)]
pub struct HeaderGroups {
    headers: Vec<Header>,
    groups: Vec<HeaderGroup>,
    column_headers: HashMap<usize, usize>,
}

impl HeaderGroups {
    /// Header rows, top to bottom.
    pub fn groups(&self) -> &[HeaderGroup] {
        &self.groups
    }

    /// Footer rows: the header rows bottom to top.
    pub fn footer_groups(&self) -> impl Iterator<Item = &HeaderGroup> {
        self.groups.iter().rev()
    }

    /// Number of header rows.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no header rows.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Get a header by arena position.
    pub fn header(&self, index: usize) -> Option<&Header> {
        self.headers.get(index)
    }

    /// Every header in the arena, in creation order.
    pub fn all_headers(&self) -> &[Header] {
        &self.headers
    }

    /// Headers of a row, left to right.
    pub fn headers_of<'a>(
        &'a self,
        group: &'a HeaderGroup,
    ) -> impl Iterator<Item = &'a Header> + 'a {
        group.headers.iter().filter_map(|&i| self.headers.get(i))
    }

    /// Sub headers of a header, left to right.
    pub fn sub_headers<'a>(&'a self, header: &'a Header) -> impl Iterator<Item = &'a Header> + 'a {
        header.sub_headers.iter().filter_map(|&i| self.headers.get(i))
    }

    /// The non-placeholder header showing the column at `column`, if any.
    pub fn column_header(&self, column: usize) -> Option<&Header> {
        self.column_headers.get(&column).and_then(|&i| self.headers.get(i))
    }

    /// A header and all of its descendants, children before their parent.
    pub fn get_leaf_headers<'a>(&'a self, header: &'a Header) -> Vec<&'a Header> {
        let mut leaf_headers = Vec::new();
        self.collect_leaf_headers(header, &mut leaf_headers);
        leaf_headers
    }

    fn collect_leaf_headers<'a>(&'a self, header: &'a Header, out: &mut Vec<&'a Header>) {
        for sub in self.sub_headers(header) {
            self.collect_leaf_headers(sub, out);
        }
        out.push(header);
    }
}

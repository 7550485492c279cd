use tabula::prelude::*;

fn table(columns: Vec<ColumnDef>) -> Table {
    Table::builder()
        .with_plugin(ColumnVisibilityPlugin)
        .with_columns(columns)
        .build()
        .unwrap()
}

fn ids(groups: &HeaderGroups) -> Vec<Vec<String>> {
    groups
        .groups()
        .iter()
        .map(|group| groups.headers_of(group).map(|h| h.id.clone()).collect())
        .collect()
}

fn row(groups: &HeaderGroups, depth: usize) -> Vec<&Header> {
    groups.headers_of(&groups.groups()[depth]).collect()
}

/// Moves the second leaf column to the end.
struct MoveSecondLeafToEnd;

impl Plugin for MoveSecondLeafToEnd {
    fn name(&self) -> &'static str {
        "move_second_leaf_to_end"
    }

    fn after(&self) -> &[&'static str] {
        &["column_visibility"]
    }

    fn reduce_leaf_columns(
        &self,
        mut leaf_columns: Vec<usize>,
        _instance: &mut Instance,
    ) -> Vec<usize> {
        if leaf_columns.len() > 1 {
            let second = leaf_columns.remove(1);
            leaf_columns.push(second);
        }
        leaf_columns
    }
}

/// Appends a leaf position that matches no column.
struct DanglingLeaf;

impl Plugin for DanglingLeaf {
    fn name(&self) -> &'static str {
        "dangling_leaf"
    }

    fn reduce_leaf_columns(
        &self,
        mut leaf_columns: Vec<usize>,
        _instance: &mut Instance,
    ) -> Vec<usize> {
        leaf_columns.push(usize::MAX);
        leaf_columns
    }
}

struct RowClass;

impl Plugin for RowClass {
    fn name(&self) -> &'static str {
        "row_class"
    }

    fn reduce_header_group_props(&self, props: Props, header_group: &HeaderGroup) -> Props {
        props
            .with("className", format!("header-{}", header_group.depth))
            .with("role", "presentation")
    }

    fn reduce_footer_group_props(&self, props: Props, header_group: &HeaderGroup) -> Props {
        props.with("className", format!("footer-{}", header_group.depth))
    }
}

#[test]
fn test_group_and_placeholder_spans() {
    let table = table(vec![
        ColumnDef::group("A", vec![ColumnDef::new("A1"), ColumnDef::new("A2")]),
        ColumnDef::new("B"),
    ]);
    let groups = table.header_groups();

    assert_eq!(groups.len(), 2);
    assert_eq!(ids(&groups), vec![vec!["A", "B"], vec!["A1", "A2", "B"]]);

    let top = row(&groups, 0);
    assert_eq!((top[0].col_span, top[0].row_span), (2, 1));
    assert!(!top[0].is_placeholder);
    assert_eq!((top[1].col_span, top[1].row_span), (1, 2));
    assert!(top[1].is_placeholder);

    for (depth, group) in groups.groups().iter().enumerate() {
        assert_eq!(group.depth, depth);
        assert_eq!(group.id, depth);
    }
}

#[test]
fn test_irregular_tree() {
    let table = table(vec![
        ColumnDef::group(
            "A",
            vec![
                ColumnDef::group("A1", vec![ColumnDef::new("A1a"), ColumnDef::new("A1b")]),
                ColumnDef::new("A2"),
            ],
        ),
        ColumnDef::new("B"),
    ]);
    let groups = table.header_groups();

    assert_eq!(
        ids(&groups),
        vec![
            vec!["A", "B"],
            vec!["A1", "A2", "B"],
            vec!["A1a", "A1b", "A2", "B"],
        ]
    );

    let top = row(&groups, 0);
    assert_eq!((top[0].col_span, top[0].row_span), (3, 1));
    assert_eq!((top[1].col_span, top[1].row_span), (1, 3));

    let middle = row(&groups, 1);
    assert_eq!((middle[0].col_span, middle[0].row_span), (2, 1));
    assert!(middle[1].is_placeholder);
    assert_eq!((middle[1].col_span, middle[1].row_span), (1, 2));
}

#[test]
fn test_non_adjacent_runs_get_placeholder_ids() {
    let table = Table::builder()
        .with_plugin(MoveSecondLeafToEnd)
        .with_plugin(ColumnVisibilityPlugin)
        .with_columns(vec![
            ColumnDef::group("A", vec![ColumnDef::new("A1"), ColumnDef::new("A2")]),
            ColumnDef::new("B"),
        ])
        .build()
        .unwrap();
    let groups = table.header_groups();

    assert_eq!(ids(&groups), vec![vec!["A", "B", "A_1"], vec!["A1", "B", "A2"]]);

    let top = row(&groups, 0);
    assert_eq!(top[0].placeholder_id, 0);
    assert_eq!(top[2].placeholder_id, 1);
    assert_eq!(top[0].col_span, 1);
    assert_eq!(top[2].col_span, 1);
}

#[test]
fn test_hiding_children_collapses_rows() {
    let table = table(vec![
        ColumnDef::group("A", vec![ColumnDef::new("A1"), ColumnDef::new("A2")]),
        ColumnDef::new("B"),
    ]);
    table.toggle_column_visibility("A1", Some(false));
    table.toggle_column_visibility("A2", Some(false));
    table.render();

    let groups = table.header_groups();
    assert_eq!(ids(&groups), vec![vec!["B"]]);
    assert_eq!(row(&groups, 0)[0].row_span, 1);
}

#[test]
fn test_no_columns() {
    let table = table(Vec::new());
    let groups = table.header_groups();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups.groups()[0].depth, 0);
    assert!(groups.groups()[0].headers.is_empty());
}

#[test]
fn test_group_props_merge_plugin_values_and_overrides() {
    let table = Table::builder()
        .with_plugin(RowClass)
        .with_columns(vec![
            ColumnDef::group("A", vec![ColumnDef::new("A1")]),
            ColumnDef::new("B"),
        ])
        .build()
        .unwrap();
    let groups = table.header_groups();
    let top = &groups.groups()[0];

    let props = top.get_header_group_props(Props::new());
    assert_eq!(props.get_str("className"), Some("header-0"));
    assert_eq!(props.get_str("role"), Some("presentation"));

    let props = top.get_header_group_props(Props::new().with("role", "rowgroup"));
    assert_eq!(props.get_str("role"), Some("rowgroup"));

    let footer: Vec<&HeaderGroup> = groups.footer_groups().collect();
    assert_eq!(footer[0].depth, 1);
    let props = footer[0].get_footer_group_props(Props::new());
    assert_eq!(props.get_str("className"), Some("footer-1"));
    assert_eq!(props.get_str("role"), Some("row"));
}

#[test]
fn test_column_header_and_leaf_headers() {
    let table = table(vec![
        ColumnDef::group("A", vec![ColumnDef::new("A1"), ColumnDef::new("A2")]),
        ColumnDef::new("B"),
    ]);
    let groups = table.header_groups();
    let columns = table.all_columns();

    let b = columns.iter().find(|c| c.id == "B").unwrap();
    let header = groups.column_header(b.index).unwrap();
    assert!(!header.is_placeholder);
    assert_eq!(header.depth, 1);

    let top = row(&groups, 0);
    let order: Vec<&str> = groups.get_leaf_headers(top[0]).iter().map(|h| h.id.as_str()).collect();
    assert_eq!(order, vec!["A1", "A2", "A"]);
}

#[test]
fn test_unknown_leaf_position_is_skipped() {
    let table = Table::builder()
        .with_plugin(ColumnVisibilityPlugin)
        .with_plugin(DanglingLeaf)
        .with_columns(vec![
            ColumnDef::group("A", vec![ColumnDef::new("A1")]),
            ColumnDef::new("B"),
        ])
        .build()
        .unwrap();
    let groups = table.header_groups();

    assert_eq!(ids(&groups), vec![vec!["A", "B"], vec!["A1", "B"]]);
    let leaf_ids: Vec<String> = table.visible_leaf_columns().into_iter().map(|c| c.id).collect();
    assert_eq!(leaf_ids, vec!["A1", "B"]);
}

use std::fs::File;

use log::info;
use serde_json::json;
use simplelog::{Config, LevelFilter, WriteLogger};
use tabula::prelude::*;
use tabula::render::RenderProps;
use tabula::utils::{SortDirection, by_column, order_by};

const CELL_WIDTH: usize = 10;

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::group(
            "name",
            vec![
                ColumnDef::new("first").header("First"),
                ColumnDef::new("last").header("Last"),
            ],
        )
        .header("Name"),
        ColumnDef::group(
            "info",
            vec![
                ColumnDef::new("age").header("Age"),
                ColumnDef::new("visits").header("Visits"),
            ],
        )
        .header("Info"),
        ColumnDef::new("id").header("Id").disable_hiding(),
    ]
}

fn rows() -> Vec<Row> {
    [
        ("ada", "Ada", "Lovelace", 36, 12),
        ("alan", "Alan", "Turing", 41, 3),
        ("grace", "Grace", "Hopper", 85, 7),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (id, first, last, age, visits))| {
        Row::new(id, index)
            .with_value("id", id)
            .with_value("first", first)
            .with_value("last", last)
            .with_value("age", age)
            .with_value("visits", visits)
    })
    .collect()
}

fn print_table(table: &Table) {
    let render = make_renderer::<String>(table.clone(), Props::new());
    let label: Renderable<RenderProps, String> = Renderable::component(|props: &RenderProps| {
        props.props.get_str("label").unwrap_or_default().to_string()
    });

    let groups = table.header_groups();
    let columns = table.all_columns();
    for group in groups.groups() {
        let mut line = String::new();
        for header in groups.headers_of(group) {
            let column = &columns[header.column];
            let text = if header.is_placeholder {
                String::new()
            } else {
                let name = column.header.clone().unwrap_or_else(|| column.id.clone());
                render(&label, Props::new().with("label", name))
            };
            let width = CELL_WIDTH * header.col_span;
            line.push_str(&format!("{text:<width$}"));
        }
        println!("{}", line.trim_end());
    }

    let leaves = table.visible_leaf_columns();
    let rows = table.read().rows().to_vec();
    let by_age = by_column("age");
    for row in order_by(&rows, &[&by_age], &[SortDirection::Desc]) {
        let line: String = leaves
            .iter()
            .map(|column| {
                let value = row.value(&column.id).map(|v| v.to_string()).unwrap_or_default();
                format!("{:<CELL_WIDTH$}", value.trim_matches('"'))
            })
            .collect();
        println!("{}", line.trim_end());
    }
    println!();
}

fn main() {
    let log_file = File::create("tabula-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let document = json!({ "initialState": { "columnVisibility": { "visits": false } } });
    let options = TableOptions::from_json(&document.to_string()).expect("Invalid demo options");

    let table = match Table::builder()
        .with_options(options)
        .with_plugin(ColumnVisibilityPlugin)
        .with_columns(columns())
        .with_rows(rows())
        .build()
    {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };

    print_table(&table);

    info!("Hiding the last name column");
    let toggle = table.column("last").get_toggle_visibility_props(Props::new());
    toggle.on_change(false);
    table.render_if_dirty();
    print_table(&table);

    info!("Showing every column");
    let toggle_all = table.get_toggle_all_columns_visibility_props(Props::new());
    toggle_all.on_change(true);
    table.render_if_dirty();
    print_table(&table);
}

use serde_json::json;

use tablemaker::state::data_model::{Column, RowCells};
use tablemaker::state::grid::{CellKind, ColumnSpec, EditableGrid, GridOptions};
use tablemaker::state::sync;

fn row(id: &str, cells: &[(&str, &str)]) -> (String, RowCells) {
    let cells = cells
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    (id.to_string(), cells)
}

fn columns_grid(rows: Vec<(String, RowCells)>) -> EditableGrid {
    EditableGrid::create(
        "fields-t-columns",
        "fields[t][columns]",
        vec![
            ColumnSpec::new("heading", "Heading", CellKind::Singleline),
            ColumnSpec::new("show", "Show", CellKind::Checkbox),
            ColumnSpec::new("metaheading", "Meta", CellKind::Singleline),
        ],
        rows,
        GridOptions::with_prefix("col"),
    )
}

fn rows_grid(columns: &[&str], rows: Vec<(String, RowCells)>) -> EditableGrid {
    EditableGrid::create(
        "fields-t-rows",
        "fields[t][rows]",
        columns
            .iter()
            .map(|key| ColumnSpec::new(*key, *key, CellKind::Singleline))
            .collect(),
        rows,
        GridOptions::with_prefix("row"),
    )
    .with_generation(3)
}

#[test]
fn test_empty_heading_keeps_header_height() {
    assert_eq!(sync::heading_label(&Column::default()), "\u{a0}");
}

#[test]
fn test_metaheading_is_appended_when_set() {
    let column = Column {
        metaheading: Some("EUR".to_string()),
        ..Column::new("Price")
    };
    assert_eq!(sync::heading_label(&column), "Price (EUR)");

    let blank = Column {
        metaheading: Some(String::new()),
        ..Column::new("Price")
    };
    assert_eq!(sync::heading_label(&blank), "Price");
}

#[test]
fn test_data_columns_are_always_single_line() {
    let raw = json!({
        "col0": {"heading": "A", "show": "1"},
        "col1": {"heading": "", "metaheading": "m"}
    });

    let specs = sync::data_columns(raw.as_object().unwrap());

    assert_eq!(
        specs,
        vec![
            ColumnSpec::new("col0", "A", CellKind::Singleline),
            ColumnSpec::new("col1", "\u{a0} (m)", CellKind::Singleline),
        ]
    );
}

#[test]
fn test_rebuild_carries_values_by_row_and_column_id() {
    let columns = columns_grid(vec![
        row("col2", &[("heading", "C")]),
        row("col0", &[("heading", "A"), ("show", "1")]),
    ]);
    let rows = rows_grid(
        &["col0", "col1", "col2"],
        vec![
            row("row0", &[("col0", "a0"), ("col1", "b0"), ("col2", "c0")]),
            row("row2", &[("col0", "a2"), ("col1", "b2"), ("col2", " c2 ")]),
        ],
    );

    let rebuilt = sync::rebuild_rows_grid(&columns, &rows);

    assert_eq!(rebuilt.dom_id(), "fields-t-rows");
    assert_eq!(rebuilt.name_prefix(), "fields[t][rows]");
    assert_eq!(rebuilt.generation(), 4);
    assert_eq!(rebuilt.row_ids(), vec!["row0", "row2"]);
    let keys: Vec<&str> = rebuilt.columns().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["col2", "col0"]);
    assert_eq!(rebuilt.cell(0, 0), Some("c0"));
    assert_eq!(rebuilt.cell(0, 1), Some("a0"));
    assert_eq!(rebuilt.cell(1, 0), Some(" c2 "));
    assert!(rebuilt.rows()[0].cells.get("col1").is_none());
}

#[test]
fn test_rebuild_gives_new_columns_empty_cells() {
    let columns = columns_grid(vec![
        row("col0", &[("heading", "A")]),
        row("col1", &[("heading", "B")]),
    ]);
    let rows = rows_grid(&["col0"], vec![row("row0", &[("col0", "kept")])]);

    let rebuilt = sync::rebuild_rows_grid(&columns, &rows);

    assert_eq!(rebuilt.cell(0, 0), Some("kept"));
    assert_eq!(rebuilt.cell(0, 1), Some(""));
}

#[test]
fn test_rebuild_keeps_row_id_counter() {
    let columns = columns_grid(vec![row("col0", &[("heading", "A")])]);
    let rows = rows_grid(&["col0"], vec![row("row7", &[("col0", "x")])]);

    let mut rebuilt = sync::rebuild_rows_grid(&columns, &rows);
    rebuilt.add_row().unwrap();

    assert_eq!(rebuilt.row_ids(), vec!["row7", "row8"]);
}

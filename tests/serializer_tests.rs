use serde_json::{json, Value};

use tablemaker::state::data_model::RowCells;
use tablemaker::state::grid::{CellKind, ColumnSpec, EditableGrid, GridOptions};
use tablemaker::state::post_data;
use tablemaker::state::serializer;

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn row(id: &str, cells: &[(&str, &str)]) -> (String, RowCells) {
    let cells = cells
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    (id.to_string(), cells)
}

fn grid(
    dom_id: &str,
    name: &str,
    columns: Vec<ColumnSpec>,
    rows: Vec<(String, RowCells)>,
) -> EditableGrid {
    EditableGrid::create(dom_id, name, columns, rows, GridOptions::default())
}

#[test]
fn test_expand_nests_bracketed_names_in_order() {
    let tree = post_data::expand_post_array(&pairs(&[
        ("fields[t][rows][row1][col0]", "b"),
        ("fields[t][rows][row0][col0]", "a"),
        ("other", "x"),
    ]));

    let rows = post_data::extract_subtree(&tree, &post_data::input_path("fields-t-rows"));
    let ids: Vec<&str> = rows.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["row1", "row0"]);
    assert_eq!(Value::Object(rows), json!({"row1": {"col0": "b"}, "row0": {"col0": "a"}}));
    assert_eq!(tree["other"], "x");
}

#[test]
fn test_empty_brackets_append_numeric_keys() {
    let tree = post_data::expand_post_array(&pairs(&[("tags[]", "a"), ("tags[]", "b")]));
    assert_eq!(Value::Object(tree), json!({"tags": {"0": "a", "1": "b"}}));
}

#[test]
fn test_missing_path_yields_empty_object() {
    let tree = post_data::expand_post_array(&pairs(&[("fields[t][rows][row0][col0]", "a")]));
    assert!(post_data::extract_subtree(&tree, &post_data::input_path("fields-u-rows")).is_empty());
    assert!(post_data::extract_subtree(&serde_json::Map::new(), &["x".to_string()]).is_empty());
}

#[test]
fn test_unchecked_checkboxes_are_not_posted() {
    let grid = grid(
        "fields-t-columns",
        "fields[t][columns]",
        vec![
            ColumnSpec::new("heading", "Heading", CellKind::Singleline),
            ColumnSpec::new("show", "Show", CellKind::Checkbox),
        ],
        vec![row("col0", &[("heading", "A")]), row("col1", &[("heading", "B"), ("show", "1")])],
    );

    assert_eq!(
        post_data::post_data(&grid),
        pairs(&[
            ("fields[t][columns][col0][heading]", "A"),
            ("fields[t][columns][col1][heading]", "B"),
            ("fields[t][columns][col1][show]", "1"),
        ])
    );
}

#[test]
fn test_serialize_strips_keys_and_follows_screen_order() {
    let columns = grid(
        "fields-t-columns",
        "fields[t][columns]",
        vec![ColumnSpec::new("heading", "Heading", CellKind::Singleline)],
        vec![row("col1", &[("heading", "Second")]), row("col0", &[("heading", "First")])],
    );
    let rows = grid(
        "fields-t-rows",
        "fields[t][rows]",
        vec![
            ColumnSpec::new("col1", "Second", CellKind::Singleline),
            ColumnSpec::new("col0", "First", CellKind::Singleline),
        ],
        vec![row("row0", &[("col0", "a"), ("col1", "b")])],
    );

    let raw = serializer::extract_raw(&columns, &rows);
    assert_eq!(raw.columns.keys().collect::<Vec<_>>(), vec!["col1", "col0"]);

    let json: Value = serde_json::from_str(&serializer::serialize(&columns, &rows).unwrap()).unwrap();
    assert_eq!(
        json,
        json!({
            "columns": [{"heading": "Second"}, {"heading": "First"}],
            "rows": [["b", "a"]]
        })
    );
}

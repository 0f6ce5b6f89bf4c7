use serde_json::{json, Value};

use tablemaker::state::clipboard::{self, ClipboardError, PasteOutcome};
use tablemaker::state::data_model::{Column, DataBlob};
use tablemaker::state::grid::{CellKind, ColumnSpec, EditableGrid, GridOptions};
use tablemaker::state::selection::{CellRef, GridKind, SelectionRange};
use tablemaker::state::settings::FieldSettings;
use tablemaker::state::table_maker::{FieldInit, TableMaker};

fn two_column_maker() -> TableMaker {
    let blob = DataBlob {
        columns: vec![Column::new("A"), Column::new("B")],
        rows: vec![vec!["a1".to_string(), "b1".to_string()]],
    };
    TableMaker::new(FieldInit::new(
        "fields",
        "table",
        FieldSettings::default(),
        Some(&blob),
    ))
}

fn rows_of(maker: &TableMaker) -> Value {
    let carrier: Value = serde_json::from_str(maker.carrier_value()).unwrap();
    carrier["rows"].clone()
}

const THREE_BY_TWO: &str = "<table><tr><td>1</td><td>2</td></tr>\
                            <tr><td>3</td><td>4</td></tr>\
                            <tr><td>5</td><td>6</td></tr></table>";

#[test]
fn test_paste_grows_rows_to_fit_source() {
    let mut maker = two_column_maker();

    let outcome = maker
        .paste(CellRef::new(GridKind::Rows, 0, 0), THREE_BY_TWO)
        .unwrap();

    assert_eq!(
        outcome,
        PasteOutcome {
            rows_added: 2,
            cells_written: 6
        }
    );
    assert_eq!(maker.rows_grid().row_ids(), vec!["row0", "row1", "row2"]);
    assert_eq!(rows_of(&maker), json!([["1", "2"], ["3", "4"], ["5", "6"]]));
}

#[test]
fn test_paste_is_clipped_at_right_edge() {
    let mut maker = two_column_maker();

    let outcome = maker
        .paste(
            CellRef::new(GridKind::Rows, 0, 1),
            "<table><tr><td>x</td><td>y</td><td>z</td></tr></table>",
        )
        .unwrap();

    assert_eq!(outcome.cells_written, 1);
    assert_eq!(rows_of(&maker), json!([["a1", "x"]]));
}

#[test]
fn test_short_source_rows_write_empty_cells() {
    let mut maker = two_column_maker();

    maker
        .paste(
            CellRef::new(GridKind::Rows, 0, 0),
            "<table><tr><td> p </td><td>q</td></tr><tr><td>r</td></tr></table>",
        )
        .unwrap();

    assert_eq!(rows_of(&maker), json!([["p", "q"], ["r", ""]]));
}

#[test]
fn test_paste_into_columns_grid_reshapes_rows_grid() {
    let mut maker = two_column_maker();

    maker
        .paste(
            CellRef::new(GridKind::Columns, 0, 0),
            "<table><tr><td>Name</td></tr><tr><td>Price</td></tr><tr><td>Stock</td></tr></table>",
        )
        .unwrap();

    let headings: Vec<&str> = maker
        .rows_grid()
        .columns()
        .iter()
        .map(|column| column.heading.as_str())
        .collect();
    assert_eq!(headings, vec!["Name", "Price", "Stock"]);
    assert_eq!(rows_of(&maker), json!([["a1", "b1", ""]]));
}

#[test]
fn test_malformed_paste_is_ignored_by_default() {
    let mut maker = two_column_maker();
    let before = maker.carrier_value().to_string();

    let outcome = maker
        .paste(CellRef::new(GridKind::Rows, 0, 0), "just some text")
        .unwrap();

    assert_eq!(outcome, PasteOutcome::default());
    assert_eq!(maker.carrier_value(), before);
}

#[test]
fn test_malformed_paste_is_reported_in_strict_mode() {
    let mut maker = two_column_maker().with_strict_clipboard(true);

    let err = maker
        .paste(CellRef::new(GridKind::Rows, 0, 0), "just some text")
        .unwrap_err();

    assert!(matches!(err, ClipboardError::NoTable));
}

#[test]
fn test_copy_emits_selected_cells_escaped() {
    let mut maker = two_column_maker();
    maker
        .set_cell(GridKind::Rows, "row0", "col1", "<b>&")
        .unwrap();

    maker.mouse_down(CellRef::new(GridKind::Rows, 0, 0));
    maker.mouse_over(CellRef::new(GridKind::Rows, 0, 1));
    assert!(maker.mouse_up(Some(CellRef::new(GridKind::Rows, 0, 1))));

    assert_eq!(
        maker.copy_selection().as_deref(),
        Some("<table><tr><td>a1</td><td>&lt;b&gt;&amp;</td></tr></table>")
    );
}

#[test]
fn test_copy_skips_non_text_columns() {
    let grid = EditableGrid::create(
        "fields-table-columns",
        "fields[table][columns]",
        vec![
            ColumnSpec::new("heading", "Heading", CellKind::Singleline),
            ColumnSpec::new("show", "Show", CellKind::Checkbox),
            ColumnSpec::new("columnWidth", "Width", CellKind::Singleline),
        ],
        vec![(
            "col0".to_string(),
            [
                ("heading".to_string(), "Name".to_string()),
                ("show".to_string(), "1".to_string()),
                ("columnWidth".to_string(), "80".to_string()),
            ]
            .into_iter()
            .collect(),
        )],
        GridOptions::with_prefix("col"),
    );
    let range = SelectionRange::between(
        CellRef::new(GridKind::Columns, 0, 0),
        CellRef::new(GridKind::Columns, 0, 2),
    );

    assert_eq!(
        clipboard::copy_html(&range, &grid).as_deref(),
        Some("<table><tr><td>Name</td><td>80</td></tr></table>")
    );
}

#[test]
fn test_copied_markup_pastes_back_unchanged() {
    let mut maker = two_column_maker();
    maker
        .set_cell(GridKind::Rows, "row0", "col0", "Fish & Chips")
        .unwrap();
    maker.mouse_down(CellRef::new(GridKind::Rows, 0, 0));
    maker.mouse_over(CellRef::new(GridKind::Rows, 0, 1));
    maker.mouse_up(Some(CellRef::new(GridKind::Rows, 0, 1)));
    let html = maker.copy_selection().unwrap();

    maker.add_row(GridKind::Rows).unwrap();
    maker
        .paste(CellRef::new(GridKind::Rows, 1, 0), &html)
        .unwrap();

    assert_eq!(
        rows_of(&maker),
        json!([["Fish & Chips", "b1"], ["Fish & Chips", "b1"]])
    );
}

#[test]
fn test_parse_keeps_header_cells_and_decodes_entities() {
    let rows = clipboard::parse_html_table(
        "<table><tr><th>Tom&nbsp;&amp;&nbsp;Jerry</th><td>&quot;hi&quot;</td></tr></table>",
    )
    .unwrap();

    assert_eq!(
        rows,
        vec![vec!["Tom\u{a0}&\u{a0}Jerry".to_string(), "\"hi\"".to_string()]]
    );
}

#[test]
fn test_parse_tolerates_browser_fragment_markup() {
    let html = "<meta charset='utf-8'><html><body><!--StartFragment--><table>\
                <tr><td> a </td><td>b&amp;c</td></tr><tr><td>d<br>e</td><td></td></tr>\
                </table><!--EndFragment--></body></html>";

    let rows = clipboard::parse_html_table(html).unwrap();

    assert_eq!(
        rows,
        vec![
            vec![" a ".to_string(), "b&c".to_string()],
            vec!["d\ne".to_string(), String::new()],
        ]
    );
}

#[test]
fn test_parse_rejects_text_without_table() {
    assert!(matches!(
        clipboard::parse_html_table(""),
        Err(ClipboardError::NoTable)
    ));
}

#[test]
fn test_parse_keeps_unknown_entities_verbatim() {
    let rows = clipboard::parse_html_table("<table><tr><td>&copy; 1</td></tr></table>").unwrap();
    assert_eq!(rows[0][0], "&copy; 1");
}

#[test]
fn test_paste_outside_grid_is_rejected() {
    let mut maker = two_column_maker().with_strict_clipboard(true);

    let err = maker
        .paste(
            CellRef::new(GridKind::Rows, 4, 0),
            "<table><tr><td>x</td></tr></table>",
        )
        .unwrap_err();

    assert!(matches!(
        err,
        ClipboardError::TargetOutOfRange { row: 4, rows: 1 }
    ));
}

#[test]
fn test_parse_skips_office_conditional_markers() {
    let html = "<table><tr><td>a</td><td>b</td></tr>\
                <![if supportMisalignedColumns]><tr height=0 style='display:none'><td></td></tr><![endif]>\
                </table>";

    let rows = clipboard::parse_html_table(html).unwrap();

    assert_eq!(rows[0], vec!["a".to_string(), "b".to_string()]);
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_parse_keeps_bare_less_than_in_cell_text() {
    let rows =
        clipboard::parse_html_table("<table><tr><td>a < b</td><td>c</td></tr></table>").unwrap();

    assert_eq!(rows, vec![vec!["a < b".to_string(), "c".to_string()]]);
}

#[test]
fn test_parse_keeps_rows_read_before_broken_markup() {
    let rows = clipboard::parse_html_table(
        "<table><tr><td>kept</td></tr></table><![CDATA[never closed",
    )
    .unwrap();

    assert_eq!(rows, vec![vec!["kept".to_string()]]);
}

#[test]
fn test_broken_markup_before_any_row_is_an_error() {
    assert!(matches!(
        clipboard::parse_html_table("<![CDATA[never closed"),
        Err(ClipboardError::Markup(_))
    ));
}

#[test]
fn test_excel_fragment_pastes_into_rows_grid() {
    let mut maker = two_column_maker();
    let html = "<html xmlns:o=\"urn:schemas-microsoft-com:office:office\">\
                <body><!--StartFragment--><table border=0 cellpadding=0>\
                <col width=64 span=2>\
                <tr height=20><td height=20 width=64>Tea</td><td align=right>3</td></tr>\
                <tr height=20><td height=20>Jam</td><td align=right>4</td></tr>\
                <![if supportMisalignedColumns]><tr height=0 style='display:none'>\
                <td width=64></td><td width=64></td></tr><![endif]>\
                </table><!--EndFragment--></body></html>";

    let outcome = maker
        .paste(CellRef::new(GridKind::Rows, 0, 0), html)
        .unwrap();

    assert_eq!(outcome.cells_written, 6);
    assert_eq!(
        rows_of(&maker),
        json!([["Tea", "3"], ["Jam", "4"], ["", ""]])
    );
}

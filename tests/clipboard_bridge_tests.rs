use serde_json::json;

use tablemaker::state::selection::{CellRef, GridKind};
use tablemaker::ui::clipboard_bridge::{paste_request, PasteRequestError};

#[test]
fn test_paste_event_resolves_target_cell() {
    let value = json!({
        "grid": "rows",
        "row": 2,
        "col": 1,
        "html": "<table><tr><td>x</td></tr></table>",
    });

    let (target, html) = paste_request(value).unwrap();
    assert_eq!(target, CellRef::new(GridKind::Rows, 2, 1));
    assert_eq!(html, "<table><tr><td>x</td></tr></table>");
}

#[test]
fn test_paste_event_without_numeric_row_is_rejected() {
    // Number(undefined) in the page serializes as null.
    let value = json!({ "grid": "columns", "row": null, "col": 0, "html": "" });

    let err = paste_request(value).unwrap_err();
    assert!(matches!(err, PasteRequestError::Decode(_)));
}

#[test]
fn test_paste_event_for_unknown_grid_is_rejected() {
    let value = json!({ "grid": "sidebar", "row": 0, "col": 0, "html": "" });

    let err = paste_request(value).unwrap_err();
    assert!(matches!(err, PasteRequestError::UnknownGrid(ref code) if code == "sidebar"));
    assert_eq!(err.to_string(), "Unknown grid 'sidebar'");
}

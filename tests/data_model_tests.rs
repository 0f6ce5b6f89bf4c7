use serde_json::json;

use tablemaker::state::data_model::{self, Column, DataBlob};

#[test]
fn test_column_tolerates_missing_heading() {
    let column = Column::from_value(&json!({"show": "1", "columnWidth": 80}));
    assert_eq!(column.heading, "");
    assert_eq!(column.show, Some(true));
    assert_eq!(column.column_width.as_deref(), Some("80"));
}

#[test]
fn test_column_from_non_object_is_blank() {
    assert_eq!(Column::from_value(&json!("Name")), Column::default());
}

#[test]
fn test_blob_skips_absent_optional_attributes() {
    let blob = DataBlob {
        columns: vec![Column::new("Name")],
        rows: vec![vec!["x".to_string()]],
    };
    assert_eq!(
        blob.to_json().unwrap(),
        r#"{"columns":[{"heading":"Name"}],"rows":[["x"]]}"#
    );
}

#[test]
fn test_blob_without_rows_or_columns_is_empty() {
    assert_eq!(DataBlob::from_value(&json!({})), DataBlob::default());
    assert_eq!(
        DataBlob::from_value(&json!({"columns": null, "rows": "nope"})),
        DataBlob::default()
    );
}

#[test]
fn test_cell_values_render_as_display_strings() {
    assert_eq!(data_model::display_value(&json!(null)), "");
    assert_eq!(data_model::display_value(&json!(1.5)), "1.5");
    assert_eq!(data_model::display_value(&json!(false)), "false");
    assert_eq!(data_model::display_value(&json!("txt")), "txt");
}

#[test]
fn test_flags_accept_checkbox_spellings() {
    for value in [json!(true), json!(1), json!("1"), json!("on"), json!("TRUE")] {
        assert!(data_model::flag_value(&value), "{value} should be set");
    }
    for value in [json!(false), json!(0), json!(""), json!("0"), json!(null)] {
        assert!(!data_model::flag_value(&value), "{value} should be unset");
    }
}

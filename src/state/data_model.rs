use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Cell values of one row, keyed by column id.
pub type RowCells = BTreeMap<String, String>;

/// One entry of the column schema as it is stored in the carrier blob.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Column {
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayheading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metaheading: Option<String>,
    #[serde(rename = "columnWidth", skip_serializing_if = "Option::is_none")]
    pub column_width: Option<String>,
}

impl Column {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Self::default()
        }
    }

    /// Reads a column from stored or posted JSON. Unknown keys are ignored and
    /// a missing heading becomes an empty string.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        Self {
            heading: map.get("heading").map(display_value).unwrap_or_default(),
            show: map.get("show").map(flag_value),
            displayheading: map.get("displayheading").map(display_value),
            metaheading: map.get("metaheading").map(display_value),
            column_width: map.get("columnWidth").map(display_value),
        }
    }
}

/// The normalized `{columns, rows}` structure written to the carrier field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DataBlob {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl DataBlob {
    /// Accepts both the stripped array form and the keyed object form.
    pub fn from_value(value: &Value) -> Self {
        let columns = value
            .get("columns")
            .map(ordered_entries)
            .unwrap_or_default()
            .into_iter()
            .map(Column::from_value)
            .collect();

        let rows = value
            .get("rows")
            .map(ordered_entries)
            .unwrap_or_default()
            .into_iter()
            .map(|row| {
                ordered_entries(row)
                    .into_iter()
                    .map(display_value)
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Values of an array, or of an object in insertion order.
pub fn ordered_entries(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    }
}

/// Values of an object as strings, keyed the same way.
pub fn string_cells(map: &Map<String, Value>) -> RowCells {
    map.iter()
        .map(|(key, value)| (key.clone(), display_value(value)))
        .collect()
}

/// Formats a JSON value for display in a table cell.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Interprets checkbox-ish values: `"1"`, `"true"`, `"on"` and `true` are set.
pub fn flag_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(s) => is_truthy(s),
        _ => false,
    }
}

pub fn is_truthy(input: &str) -> bool {
    matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

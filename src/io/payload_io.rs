use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::state::data_model::DataBlob;

#[derive(Debug)]
pub enum PayloadIoError {
    Io(io::Error),
    Parse(serde_json::Error),
    NotAnObject,
}

impl std::fmt::Display for PayloadIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadIoError::Io(e) => write!(f, "IO error: {e}"),
            PayloadIoError::Parse(e) => write!(f, "JSON parse error: {e}"),
            PayloadIoError::NotAnObject => write!(f, "Table data is not a JSON object"),
        }
    }
}

impl std::error::Error for PayloadIoError {}

impl From<io::Error> for PayloadIoError {
    fn from(e: io::Error) -> Self {
        PayloadIoError::Io(e)
    }
}

impl From<serde_json::Error> for PayloadIoError {
    fn from(e: serde_json::Error) -> Self {
        PayloadIoError::Parse(e)
    }
}

/// Reads a stored `{columns, rows}` blob. An empty file or `null` is an empty
/// table.
pub fn load_blob(path: &Path) -> Result<DataBlob, PayloadIoError> {
    let content = fs::read_to_string(path)?;
    parse_blob(&content)
}

pub fn parse_blob(content: &str) -> Result<DataBlob, PayloadIoError> {
    if content.trim().is_empty() {
        return Ok(DataBlob::default());
    }

    match serde_json::from_str::<Value>(content)? {
        Value::Null => Ok(DataBlob::default()),
        value @ Value::Object(_) => Ok(DataBlob::from_value(&value)),
        _ => Err(PayloadIoError::NotAnObject),
    }
}

/// Writes a carrier value to `path`, pretty-printed.
pub fn save_blob(path: &Path, carrier: &str) -> Result<(), PayloadIoError> {
    let value: Value = serde_json::from_str(carrier)?;
    if !value.is_object() {
        return Err(PayloadIoError::NotAnObject);
    }
    let json = serde_json::to_string_pretty(&value)?;
    super::atomic_write_string(path, &json)?;
    Ok(())
}

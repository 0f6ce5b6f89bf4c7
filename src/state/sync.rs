use serde_json::Value;

use crate::state::data_model::{self, Column};
use crate::state::grid::{CellKind, ColumnSpec, EditableGrid};
use crate::state::serializer;

const EMPTY_HEADING: &str = "\u{a0}";

/// Header label of a data column: the heading (or a non-breaking space so the
/// header keeps its height) followed by ` (metaheading)` when one is set.
pub fn heading_label(column: &Column) -> String {
    let mut label = if column.heading.is_empty() {
        EMPTY_HEADING.to_string()
    } else {
        column.heading.clone()
    };
    if let Some(meta) = column.metaheading.as_deref().filter(|meta| !meta.is_empty()) {
        label.push_str(" (");
        label.push_str(meta);
        label.push(')');
    }
    label
}

/// Data-grid columns for the current schema. Every column is single-line,
/// whatever editor the schema itself uses.
pub fn data_columns(raw_columns: &serde_json::Map<String, Value>) -> Vec<ColumnSpec> {
    raw_columns
        .iter()
        .map(|(key, value)| {
            let column = Column::from_value(value);
            ColumnSpec::new(key.clone(), heading_label(&column), CellKind::Singleline)
        })
        .collect()
}

/// Builds a replacement rows grid shaped by the columns grid. Existing values
/// are carried over by row id and column id; cells of removed columns are
/// dropped and new columns start empty.
pub fn rebuild_rows_grid(columns_grid: &EditableGrid, rows_grid: &EditableGrid) -> EditableGrid {
    let raw = serializer::extract_raw(columns_grid, rows_grid);
    let columns = data_columns(&raw.columns);

    // Rows without any posted cell (no columns left) still keep their slot.
    let rows = rows_grid
        .rows()
        .iter()
        .map(|row| {
            let cells = raw
                .rows
                .get(&row.id)
                .and_then(Value::as_object)
                .map(data_model::string_cells)
                .unwrap_or_default();
            (row.id.clone(), cells)
        })
        .collect::<Vec<_>>();

    log::debug!(
        "rebuilding {} with {} columns and {} rows",
        rows_grid.dom_id(),
        columns.len(),
        rows.len()
    );

    EditableGrid::create(
        rows_grid.dom_id(),
        rows_grid.name_prefix(),
        columns,
        rows,
        rows_grid.options().clone(),
    )
    .with_generation(rows_grid.generation() + 1)
}

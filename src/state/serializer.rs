use serde_json::{Map, Value};

use crate::state::data_model::{self, Column, DataBlob};
use crate::state::grid::EditableGrid;
use crate::state::post_data;

/// Keyed, unstringified state of both grids as the user currently sees it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTables {
    pub columns: Map<String, Value>,
    pub rows: Map<String, Value>,
}

pub fn extract_grid(grid: &EditableGrid) -> Map<String, Value> {
    let tree = post_data::expand_post_array(&post_data::post_data(grid));
    post_data::extract_subtree(&tree, grid.input_path())
}

pub fn extract_raw(columns_grid: &EditableGrid, rows_grid: &EditableGrid) -> RawTables {
    RawTables {
        columns: extract_grid(columns_grid),
        rows: extract_grid(rows_grid),
    }
}

impl DataBlob {
    /// Drops the `col<N>`/`row<N>` keys, keeping on-screen order.
    pub fn from_raw(raw: &RawTables) -> Self {
        let columns = raw.columns.values().map(Column::from_value).collect();
        let rows = raw
            .rows
            .values()
            .map(|row| {
                data_model::ordered_entries(row)
                    .into_iter()
                    .map(data_model::display_value)
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }
}

pub fn serialize(
    columns_grid: &EditableGrid,
    rows_grid: &EditableGrid,
) -> Result<String, serde_json::Error> {
    let raw = extract_raw(columns_grid, rows_grid);
    DataBlob::from_raw(&raw).to_json()
}

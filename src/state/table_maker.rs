use crate::state::clipboard::{self, ClipboardError, PasteOutcome};
use crate::state::data_model::{Column, DataBlob, RowCells};
use crate::state::grid::{CellKind, ColumnSpec, EditableGrid, GridError, GridEvent, GridOptions};
use crate::state::i18n::Language;
use crate::state::selection::{CellRef, GridKind, SelectionState};
use crate::state::serializer;
use crate::state::settings::FieldSettings;
use crate::state::sync;

pub const COLUMN_ID_PREFIX: &str = "col";
pub const ROW_ID_PREFIX: &str = "row";

/// Everything a field instance is created from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInit {
    pub field_id: String,
    pub columns_table_id: String,
    pub rows_table_id: String,
    pub columns_table_name: String,
    pub rows_table_name: String,
    pub columns: Vec<(String, Column)>,
    pub rows: Vec<(String, RowCells)>,
    pub settings: FieldSettings,
    pub language: Language,
}

impl FieldInit {
    /// Ids and posted names for field `handle` inside form `namespace`, e.g.
    /// `fields-prices-rows` and `fields[prices][rows]`.
    pub fn new(
        namespace: &str,
        handle: &str,
        settings: FieldSettings,
        blob: Option<&DataBlob>,
    ) -> Self {
        let (id_base, name_base) = if namespace.is_empty() {
            (handle.to_string(), handle.to_string())
        } else {
            (format!("{namespace}-{handle}"), format!("{namespace}[{handle}]"))
        };

        Self {
            field_id: id_base.clone(),
            columns_table_id: format!("{id_base}-columns"),
            rows_table_id: format!("{id_base}-rows"),
            columns_table_name: format!("{name_base}[columns]"),
            rows_table_name: format!("{name_base}[rows]"),
            columns: keyed_columns(blob, &settings),
            rows: keyed_rows(blob),
            settings,
            language: Language::default(),
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// Stored columns keyed `col<N>`; a single blank column when there are none.
pub fn keyed_columns(blob: Option<&DataBlob>, settings: &FieldSettings) -> Vec<(String, Column)> {
    match blob.filter(|blob| !blob.columns.is_empty()) {
        Some(blob) => blob
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                (
                    format!("{COLUMN_ID_PREFIX}{idx}"),
                    settings.restrict(column.clone()),
                )
            })
            .collect(),
        None => vec![(format!("{COLUMN_ID_PREFIX}0"), Column::default())],
    }
}

/// Stored rows keyed `row<N>` with cells keyed `col<N>`; a single empty row
/// when there are none.
pub fn keyed_rows(blob: Option<&DataBlob>) -> Vec<(String, RowCells)> {
    match blob.filter(|blob| !blob.rows.is_empty()) {
        Some(blob) => blob
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let cells = row
                    .iter()
                    .enumerate()
                    .map(|(col, value)| (format!("{COLUMN_ID_PREFIX}{col}"), value.clone()))
                    .collect();
                (format!("{ROW_ID_PREFIX}{idx}"), cells)
            })
            .collect(),
        None => vec![(format!("{ROW_ID_PREFIX}0"), RowCells::new())],
    }
}

/// One table field: the columns grid, the rows grid shaped by it, the range
/// selection over both, and the carrier value kept in sync with them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableMaker {
    field_id: String,
    settings: FieldSettings,
    language: Language,
    columns_grid: EditableGrid,
    rows_grid: EditableGrid,
    selection: SelectionState,
    carrier: String,
    strict_clipboard: bool,
}

impl TableMaker {
    pub fn new(init: FieldInit) -> Self {
        let column_rows = init
            .columns
            .iter()
            .map(|(id, column)| (id.clone(), column_cells(&init.settings, column)))
            .collect();
        let columns_grid = EditableGrid::create(
            init.columns_table_id,
            init.columns_table_name,
            init.settings.column_settings(init.language),
            column_rows,
            grid_options(&init.settings, GridKind::Columns),
        );

        let data_columns = init
            .columns
            .iter()
            .map(|(id, column)| {
                ColumnSpec::new(id.clone(), sync::heading_label(column), CellKind::Singleline)
            })
            .collect();
        let rows_grid = EditableGrid::create(
            init.rows_table_id,
            init.rows_table_name,
            data_columns,
            init.rows,
            grid_options(&init.settings, GridKind::Rows),
        );

        let mut maker = Self {
            field_id: init.field_id,
            settings: init.settings,
            language: init.language,
            columns_grid,
            rows_grid,
            selection: SelectionState::default(),
            carrier: String::new(),
            strict_clipboard: false,
        };
        maker.make_data_blob();
        maker
    }

    /// Re-raise clipboard parse failures instead of dropping the paste.
    pub fn with_strict_clipboard(mut self, strict: bool) -> Self {
        self.strict_clipboard = strict;
        self
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn columns_grid(&self) -> &EditableGrid {
        &self.columns_grid
    }

    pub fn rows_grid(&self) -> &EditableGrid {
        &self.rows_grid
    }

    pub fn grid(&self, kind: GridKind) -> &EditableGrid {
        match kind {
            GridKind::Columns => &self.columns_grid,
            GridKind::Rows => &self.rows_grid,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current `{columns, rows}` JSON for the hidden carrier input.
    pub fn carrier_value(&self) -> &str {
        &self.carrier
    }

    pub fn data_blob(&self) -> DataBlob {
        DataBlob::from_raw(&serializer::extract_raw(
            &self.columns_grid,
            &self.rows_grid,
        ))
    }

    /// Starts over from a stored blob, keeping ids, names and settings.
    pub fn reload(&mut self, blob: Option<&DataBlob>) {
        let init = FieldInit {
            field_id: self.field_id.clone(),
            columns_table_id: self.columns_grid.dom_id().to_string(),
            rows_table_id: self.rows_grid.dom_id().to_string(),
            columns_table_name: self.columns_grid.name_prefix().to_string(),
            rows_table_name: self.rows_grid.name_prefix().to_string(),
            columns: keyed_columns(blob, &self.settings),
            rows: keyed_rows(blob),
            settings: self.settings.clone(),
            language: self.language,
        };
        let generation = self.rows_grid.generation().max(self.columns_grid.generation()) + 1;
        let mut next = Self::new(init).with_strict_clipboard(self.strict_clipboard);
        next.columns_grid = next.columns_grid.with_generation(generation);
        next.rows_grid = next.rows_grid.with_generation(generation);
        *self = next;
    }

    /// Relabels the columns grid headings, keeping its rows.
    pub fn set_language(&mut self, language: Language) {
        if self.language == language {
            return;
        }
        self.language = language;
        let rows = self
            .columns_grid
            .rows()
            .iter()
            .map(|row| (row.id.clone(), row.cells.clone()))
            .collect();
        self.columns_grid = EditableGrid::create(
            self.columns_grid.dom_id(),
            self.columns_grid.name_prefix(),
            self.settings.column_settings(language),
            rows,
            self.columns_grid.options().clone(),
        )
        .with_generation(self.columns_grid.generation() + 1);
    }

    pub fn add_row(&mut self, kind: GridKind) -> Result<String, GridError> {
        let event = self.grid_mut(kind).add_row()?;
        let row_id = match &event {
            GridEvent::RowAdded { row_id } => row_id.clone(),
            _ => String::new(),
        };
        self.handle_event(kind, &event);
        Ok(row_id)
    }

    pub fn delete_row(&mut self, kind: GridKind, row_id: &str) -> Result<(), GridError> {
        let event = self.grid_mut(kind).delete_row(row_id)?;
        self.drop_selection_in(kind);
        self.handle_event(kind, &event);
        Ok(())
    }

    pub fn move_row(&mut self, kind: GridKind, from: usize, to: usize) -> Result<(), GridError> {
        let event = self.grid_mut(kind).move_row(from, to)?;
        self.drop_selection_in(kind);
        self.handle_event(kind, &event);
        Ok(())
    }

    pub fn set_cell(
        &mut self,
        kind: GridKind,
        row_id: &str,
        column: &str,
        value: &str,
    ) -> Result<(), GridError> {
        let event = self
            .grid_mut(kind)
            .set_cell(row_id, column, value)
            .inspect_err(|err| log::warn!("rejected edit in {}: {err}", kind.code()))?;
        self.handle_event(kind, &event);
        Ok(())
    }

    pub fn set_cell_at(
        &mut self,
        kind: GridKind,
        row: usize,
        col: usize,
        value: &str,
    ) -> Result<(), GridError> {
        let event = self
            .grid_mut(kind)
            .set_cell_at(row, col, value)
            .inspect_err(|err| log::warn!("rejected edit in {}: {err}", kind.code()))?;
        self.handle_event(kind, &event);
        Ok(())
    }

    pub fn add_column(&mut self) -> Result<String, GridError> {
        self.add_row(GridKind::Columns)
    }

    pub fn delete_column(&mut self, column_id: &str) -> Result<(), GridError> {
        self.delete_row(GridKind::Columns, column_id)
    }

    pub fn move_column(&mut self, from: usize, to: usize) -> Result<(), GridError> {
        self.move_row(GridKind::Columns, from, to)
    }

    /// Any change to the schema reshapes the rows grid; changes to the rows
    /// grid only need a fresh blob.
    fn handle_event(&mut self, kind: GridKind, event: &GridEvent) {
        log::trace!("{} grid event: {event:?}", kind.code());
        self.refresh(kind);
    }

    fn refresh(&mut self, kind: GridKind) {
        match kind {
            GridKind::Columns => self.reconstruct_rows_table(),
            GridKind::Rows => self.make_data_blob(),
        }
    }

    /// Replaces the rows grid with one shaped by the current schema and
    /// re-serializes.
    pub fn reconstruct_rows_table(&mut self) {
        self.rows_grid = sync::rebuild_rows_grid(&self.columns_grid, &self.rows_grid);
        self.drop_selection_in(GridKind::Rows);
        self.make_data_blob();
    }

    pub fn make_data_blob(&mut self) {
        match serializer::serialize(&self.columns_grid, &self.rows_grid) {
            Ok(json) => self.carrier = json,
            Err(err) => log::error!("failed to serialize {}: {err}", self.field_id),
        }
    }

    pub fn mouse_down(&mut self, cell: CellRef) {
        self.selection.mouse_down(cell);
    }

    pub fn mouse_over(&mut self, cell: CellRef) -> bool {
        self.selection.mouse_over(cell)
    }

    /// Returns true when the release was claimed by a cell and the selection
    /// stays; the host must then not deliver `body_mouse_up`.
    pub fn mouse_up(&mut self, cell: Option<CellRef>) -> bool {
        self.selection.mouse_up(cell)
    }

    pub fn body_mouse_up(&mut self) {
        self.selection.body_mouse_up();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Highlighted text cells of `kind`, as `(row, col)` indices.
    pub fn highlighted_cells(&self, kind: GridKind) -> Vec<(usize, usize)> {
        match self.selection.range() {
            Some(range) if range.grid == kind => range.text_cells(self.grid(kind)),
            _ => Vec::new(),
        }
    }

    pub fn is_highlighted(&self, cell: CellRef) -> bool {
        self.selection
            .range()
            .filter(|range| range.grid == cell.grid)
            .map(|range| {
                range.row.contains(cell.row)
                    && range.col.contains(cell.col)
                    && self.grid(cell.grid).is_text_cell(cell.col)
            })
            .unwrap_or(false)
    }

    /// Clipboard HTML for the current selection, if any cell is highlighted.
    pub fn copy_selection(&self) -> Option<String> {
        let range = self.selection.range()?;
        clipboard::copy_html(&range, self.grid(range.grid))
    }

    /// Pastes a clipboard HTML payload at `target`. Parse failures are dropped
    /// unless strict mode is on; the host suppresses the default paste either
    /// way.
    pub fn paste(&mut self, target: CellRef, html: &str) -> Result<PasteOutcome, ClipboardError> {
        let result = clipboard::parse_html_table(html).and_then(|source| {
            clipboard::paste_into(self.grid_mut(target.grid), target.row, target.col, &source)
        });

        // A paste that fails part-way may already have added rows or written cells.
        if matches!(result, Ok(_) | Err(ClipboardError::Grid(_))) {
            self.refresh(target.grid);
        }

        match result {
            Ok(outcome) => Ok(outcome),
            Err(err) if self.strict_clipboard => Err(err),
            Err(err) => {
                log::debug!("ignoring paste into {}: {err}", target.grid.code());
                Ok(PasteOutcome::default())
            }
        }
    }

    fn grid_mut(&mut self, kind: GridKind) -> &mut EditableGrid {
        match kind {
            GridKind::Columns => &mut self.columns_grid,
            GridKind::Rows => &mut self.rows_grid,
        }
    }

    fn drop_selection_in(&mut self, kind: GridKind) {
        if self.selection.grid() == Some(kind) {
            self.selection.clear();
        }
    }
}

/// Id prefix and row-count limits of one grid of the field.
fn grid_options(settings: &FieldSettings, kind: GridKind) -> GridOptions {
    let (prefix, min_rows, max_rows) = match kind {
        GridKind::Columns => (
            COLUMN_ID_PREFIX,
            settings.columns_min_rows,
            settings.columns_max_rows,
        ),
        GridKind::Rows => (ROW_ID_PREFIX, settings.rows_min_rows, settings.rows_max_rows),
    };
    GridOptions {
        min_rows,
        max_rows,
        ..GridOptions::with_prefix(prefix)
    }
}

fn column_cells(settings: &FieldSettings, column: &Column) -> RowCells {
    settings
        .attributes()
        .into_iter()
        .filter_map(|attribute| {
            attribute
                .cell_value(column)
                .map(|value| (attribute.key().to_string(), value))
        })
        .collect()
}

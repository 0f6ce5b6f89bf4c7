use crate::state::data_model::{self, RowCells};
use crate::state::post_data;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Editor rendered for each cell of a column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CellKind {
    #[default]
    Singleline,
    Checkbox,
    Number,
    Select(Vec<SelectOption>),
}

impl CellKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Singleline => "singleline",
            Self::Checkbox => "checkbox",
            Self::Number => "number",
            Self::Select(_) => "select",
        }
    }

    /// Only single-line cells take part in range selection and clipboard.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Singleline)
    }

    fn default_value(&self) -> String {
        match self {
            Self::Select(options) => options
                .first()
                .map(|option| option.value.clone())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn normalize(&self, input: &str) -> Option<String> {
        match self {
            Self::Singleline => Some(input.to_string()),
            Self::Checkbox => {
                let trimmed = input.trim();
                if data_model::is_truthy(trimmed) {
                    Some("1".to_string())
                } else if matches!(
                    trimmed.to_ascii_lowercase().as_str(),
                    "" | "0" | "false" | "off" | "no"
                ) {
                    Some(String::new())
                } else {
                    None
                }
            }
            Self::Number => {
                let trimmed = input.trim();
                if trimmed.is_empty() || trimmed.parse::<f64>().is_ok() {
                    Some(trimmed.to_string())
                } else {
                    None
                }
            }
            Self::Select(options) => options
                .iter()
                .any(|option| option.value == input)
                .then(|| input.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: String,
    pub heading: String,
    pub kind: CellKind,
    pub width: Option<String>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, heading: impl Into<String>, kind: CellKind) -> Self {
        Self {
            key: key.into(),
            heading: heading.into(),
            kind,
            width: None,
        }
    }

    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridRow {
    pub id: String,
    pub cells: RowCells,
}

impl GridRow {
    pub fn value(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridOptions {
    pub row_id_prefix: String,
    pub min_rows: Option<usize>,
    pub max_rows: Option<usize>,
}

impl GridOptions {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            row_id_prefix: prefix.into(),
            min_rows: None,
            max_rows: None,
        }
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        Self::with_prefix("row")
    }
}

/// Hook fired by a grid mutation. The owner decides whether it leads to a
/// rebuild or just a re-serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridEvent {
    RowAdded { row_id: String },
    RowDeleted { row_id: String },
    SortChanged,
    CellChanged { row_id: String, column: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    UnknownRow(String),
    UnknownColumn(String),
    InvalidValue {
        column: String,
        kind: &'static str,
        value: String,
    },
    RowLimit(usize),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::UnknownRow(id) => write!(f, "Unknown row '{id}'"),
            GridError::UnknownColumn(key) => write!(f, "Unknown column '{key}'"),
            GridError::InvalidValue {
                column,
                kind,
                value,
            } => write!(f, "'{value}' is not a valid {kind} value for column '{column}'"),
            GridError::RowLimit(limit) => write!(f, "Row limit of {limit} reached"),
        }
    }
}

impl std::error::Error for GridError {}

/// A single editable table: an ordered column spec plus ordered rows, bound to
/// a DOM id and a posted-name prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditableGrid {
    dom_id: String,
    name_prefix: String,
    input_path: Vec<String>,
    columns: Vec<ColumnSpec>,
    rows: Vec<GridRow>,
    options: GridOptions,
    next_row_number: usize,
    generation: u64,
}

impl EditableGrid {
    pub fn create(
        dom_id: impl Into<String>,
        name_prefix: impl Into<String>,
        columns: Vec<ColumnSpec>,
        rows: Vec<(String, RowCells)>,
        options: GridOptions,
    ) -> Self {
        let dom_id = dom_id.into();
        let input_path = post_data::input_path(&dom_id);
        let mut grid = Self {
            dom_id,
            name_prefix: name_prefix.into(),
            input_path,
            columns,
            rows: Vec::with_capacity(rows.len()),
            options,
            next_row_number: 0,
            generation: 0,
        };

        for (id, cells) in rows {
            let row = grid.shape_row(id, cells);
            grid.track_row_id(&row.id);
            grid.rows.push(row);
        }

        grid
    }

    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn dom_id(&self) -> &str {
        &self.dom_id
    }

    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    /// Logical key path of this grid inside expanded posted data.
    pub fn input_path(&self) -> &[String] {
        &self.input_path
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_index(&self, row_id: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.id == row_id)
    }

    pub fn row_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.id.as_str()).collect()
    }

    pub fn cell(&self, row_index: usize, col_index: usize) -> Option<&str> {
        let column = self.columns.get(col_index)?;
        self.rows
            .get(row_index)
            .map(|row| row.value(&column.key))
    }

    pub fn is_text_cell(&self, col_index: usize) -> bool {
        self.columns
            .get(col_index)
            .map(|column| column.kind.is_text())
            .unwrap_or(false)
    }

    /// Indices of text columns from `col_index` rightward, inclusive.
    pub fn text_columns_from(&self, col_index: usize) -> Vec<usize> {
        (col_index..self.columns.len())
            .filter(|idx| self.is_text_cell(*idx))
            .collect()
    }

    pub fn add_row(&mut self) -> Result<GridEvent, GridError> {
        if let Some(max) = self.options.max_rows {
            if self.rows.len() >= max {
                return Err(GridError::RowLimit(max));
            }
        }

        let id = format!("{}{}", self.options.row_id_prefix, self.next_row_number);
        let row = self.shape_row(id, RowCells::new());
        self.track_row_id(&row.id);
        let row_id = row.id.clone();
        self.rows.push(row);
        Ok(GridEvent::RowAdded { row_id })
    }

    pub fn delete_row(&mut self, row_id: &str) -> Result<GridEvent, GridError> {
        let index = self
            .row_index(row_id)
            .ok_or_else(|| GridError::UnknownRow(row_id.to_string()))?;

        if let Some(min) = self.options.min_rows {
            if self.rows.len() <= min {
                return Err(GridError::RowLimit(min));
            }
        }

        let removed = self.rows.remove(index);
        Ok(GridEvent::RowDeleted { row_id: removed.id })
    }

    /// Moves the row at `from` so it ends up at index `to`.
    pub fn move_row(&mut self, from: usize, to: usize) -> Result<GridEvent, GridError> {
        if from >= self.rows.len() {
            return Err(GridError::UnknownRow(format!("#{from}")));
        }
        let to = to.min(self.rows.len() - 1);
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        Ok(GridEvent::SortChanged)
    }

    pub fn set_cell(
        &mut self,
        row_id: &str,
        column: &str,
        input: &str,
    ) -> Result<GridEvent, GridError> {
        let kind = self
            .columns
            .iter()
            .find(|spec| spec.key == column)
            .map(|spec| spec.kind.clone())
            .ok_or_else(|| GridError::UnknownColumn(column.to_string()))?;

        let value = kind.normalize(input).ok_or_else(|| GridError::InvalidValue {
            column: column.to_string(),
            kind: kind.type_name(),
            value: input.to_string(),
        })?;

        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == row_id)
            .ok_or_else(|| GridError::UnknownRow(row_id.to_string()))?;
        row.cells.insert(column.to_string(), value);

        Ok(GridEvent::CellChanged {
            row_id: row_id.to_string(),
            column: column.to_string(),
        })
    }

    pub fn set_cell_at(
        &mut self,
        row_index: usize,
        col_index: usize,
        input: &str,
    ) -> Result<GridEvent, GridError> {
        let row_id = self
            .rows
            .get(row_index)
            .map(|row| row.id.clone())
            .ok_or_else(|| GridError::UnknownRow(format!("#{row_index}")))?;
        let column = self
            .columns
            .get(col_index)
            .map(|spec| spec.key.clone())
            .ok_or_else(|| GridError::UnknownColumn(format!("#{col_index}")))?;
        self.set_cell(&row_id, &column, input)
    }

    fn shape_row(&self, id: String, mut cells: RowCells) -> GridRow {
        let shaped = self
            .columns
            .iter()
            .map(|spec| {
                let value = cells
                    .remove(&spec.key)
                    .and_then(|value| spec.kind.normalize(&value))
                    .unwrap_or_else(|| spec.kind.default_value());
                (spec.key.clone(), value)
            })
            .collect();
        GridRow { id, cells: shaped }
    }

    fn track_row_id(&mut self, id: &str) {
        let number = id
            .strip_prefix(self.options.row_id_prefix.as_str())
            .and_then(|suffix| suffix.parse::<usize>().ok());
        if let Some(number) = number {
            self.next_row_number = self.next_row_number.max(number + 1);
        } else {
            self.next_row_number = self.next_row_number.max(self.rows.len() + 1);
        }
    }
}

use crate::state::grid::EditableGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridKind {
    Columns,
    Rows,
}

impl GridKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::Columns => "columns",
            Self::Rows => "rows",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "columns" => Some(Self::Columns),
            "rows" => Some(Self::Rows),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub grid: GridKind,
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(grid: GridKind, row: usize, col: usize) -> Self {
        Self { grid, row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub start: usize,
    pub end: usize,
}

impl Bounds {
    fn spanning(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub grid: GridKind,
    pub row: Bounds,
    pub col: Bounds,
}

impl SelectionRange {
    pub fn between(anchor: CellRef, cursor: CellRef) -> Self {
        Self {
            grid: anchor.grid,
            row: Bounds::spanning(anchor.row, cursor.row),
            col: Bounds::spanning(anchor.col, cursor.col),
        }
    }

    /// Text cells of `grid` inside this range, row by row.
    pub fn text_cells(&self, grid: &EditableGrid) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for row in self.row.start..=self.row.end {
            if row >= grid.row_count() {
                break;
            }
            for col in self.col.start..=self.col.end {
                if grid.is_text_cell(col) {
                    cells.push((row, col));
                }
            }
        }
        cells
    }
}

/// Mouse-driven rectangular selection, scoped to the grid the drag started in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting {
        anchor: CellRef,
        cursor: Option<CellRef>,
    },
    Selected {
        anchor: CellRef,
        cursor: CellRef,
    },
}

impl SelectionState {
    pub fn mouse_down(&mut self, cell: CellRef) {
        *self = Self::Selecting {
            anchor: cell,
            cursor: None,
        };
    }

    /// Returns true when the highlighted range changed.
    pub fn mouse_over(&mut self, cell: CellRef) -> bool {
        let Self::Selecting { anchor, cursor } = self else {
            return false;
        };
        if cell == *anchor || cell.grid != anchor.grid || *cursor == Some(cell) {
            return false;
        }
        *cursor = Some(cell);
        true
    }

    /// Ends a drag. A release on another cell of the anchor's grid keeps the
    /// selection and returns true; anything else drops back to idle.
    pub fn mouse_up(&mut self, cell: Option<CellRef>) -> bool {
        let Self::Selecting { anchor, .. } = *self else {
            return matches!(self, Self::Selected { .. });
        };

        match cell {
            Some(cell) if cell != anchor && cell.grid == anchor.grid => {
                *self = Self::Selected {
                    anchor,
                    cursor: cell,
                };
                true
            }
            _ => {
                *self = Self::Idle;
                false
            }
        }
    }

    /// A mouse release that no cell claimed.
    pub fn body_mouse_up(&mut self) {
        self.clear();
    }

    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn grid(&self) -> Option<GridKind> {
        match self {
            Self::Idle => None,
            Self::Selecting { anchor, .. } | Self::Selected { anchor, .. } => Some(anchor.grid),
        }
    }

    pub fn range(&self) -> Option<SelectionRange> {
        match *self {
            Self::Selecting {
                anchor,
                cursor: Some(cursor),
            }
            | Self::Selected { anchor, cursor } => Some(SelectionRange::between(anchor, cursor)),
            _ => None,
        }
    }
}

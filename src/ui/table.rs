use dioxus::prelude::*;

use crate::state::grid::{CellKind, ColumnSpec, GridRow};
use crate::state::i18n;
use crate::state::selection::{CellRef, GridKind, SelectionState};
use crate::state::table_maker::TableMaker;

/// One labelled table of the field: heading, instructions, the grid itself and
/// its add button.
#[component]
pub fn TableField(
    maker: Signal<TableMaker>,
    kind: GridKind,
    error_message: Signal<Option<String>>,
) -> Element {
    let (label, instructions, add_label) = {
        let state = maker.read();
        let settings = state.settings();
        let language = state.language();
        match kind {
            GridKind::Columns => (
                settings.columns_label(language),
                settings.columns_instructions(language),
                settings.columns_add_row_label(language),
            ),
            GridKind::Rows => (
                settings.rows_label(language),
                settings.rows_instructions(language),
                settings.rows_add_row_label(language),
            ),
        }
    };

    rsx! {
        div { class: "field tablemaker-{kind.code()}",
            div { class: "heading",
                label { "{label}" }
                div { class: "instructions", "{instructions}" }
            }
            GridTable { maker, kind, error_message }
            button {
                class: "btn add",
                id: "btn-add-{kind.code()}",
                onclick: move |_| {
                    let mut maker = maker;
                    let mut error_message = error_message;
                    if let Err(err) = maker.with_mut(|state| state.add_row(kind)) {
                        error_message.set(Some(err.to_string()));
                    }
                },
                "\u{2795} {add_label}"
            }
        }
    }
}

#[component]
fn GridTable(
    maker: Signal<TableMaker>,
    kind: GridKind,
    error_message: Signal<Option<String>>,
) -> Element {
    let dragging = use_signal::<Option<usize>>(|| None);
    let (grid, language, highlights) = {
        let state = maker.read();
        let grid = state.grid(kind).clone();
        let highlights: Vec<Vec<bool>> = (0..grid.row_count())
            .map(|row| {
                (0..grid.columns().len())
                    .map(|col| state.is_highlighted(CellRef::new(kind, row, col)))
                    .collect()
            })
            .collect();
        (grid, state.language(), highlights)
    };
    let columns = grid.columns().to_vec();

    rsx! {
        table {
            "data-generation": "{grid.generation()}",
            id: "{grid.dom_id()}",
            class: "editable",
            thead {
                tr {
                    for column in &columns {
                        th {
                            scope: "col",
                            class: "header",
                            width: column.width.clone().unwrap_or_default(),
                            "{column.heading}"
                        }
                    }
                    th { class: "header", colspan: "2" }
                }
            }
            tbody {
                for (row_index, row) in grid.rows().iter().enumerate() {
                    GridRowView {
                        key: "{row.id}",
                        maker,
                        kind,
                        row_index,
                        row: row.clone(),
                        columns: columns.clone(),
                        highlighted: highlights[row_index].clone(),
                        dragging,
                        error_message,
                        delete_label: i18n::tr(language, "grid.delete_row").to_string(),
                        reorder_label: i18n::tr(language, "grid.reorder").to_string(),
                    }
                }
            }
        }
    }
}

#[component]
fn GridRowView(
    maker: Signal<TableMaker>,
    kind: GridKind,
    row_index: usize,
    row: GridRow,
    columns: Vec<ColumnSpec>,
    highlighted: Vec<bool>,
    dragging: Signal<Option<usize>>,
    error_message: Signal<Option<String>>,
    delete_label: String,
    reorder_label: String,
) -> Element {
    let row_id = row.id.clone();

    rsx! {
        tr {
            "data-id": "{row.id}",
            ondragover: move |evt| evt.prevent_default(),
            ondrop: move |evt| {
                evt.prevent_default();
                let mut maker = maker;
                let mut dragging = dragging;
                let mut error_message = error_message;
                let from = dragging.write().take();
                if let Some(from) = from {
                    if from != row_index {
                        if let Err(err) = maker.with_mut(|state| state.move_row(kind, from, row_index)) {
                            error_message.set(Some(err.to_string()));
                        }
                    }
                }
            },
            for (col_index, column) in columns.iter().enumerate() {
                td {
                    class: cell_class(column, highlighted.get(col_index).copied().unwrap_or(false)),
                    CellEditor {
                        maker,
                        kind,
                        row_id: row.id.clone(),
                        cell: CellRef::new(kind, row_index, col_index),
                        column: column.clone(),
                        value: row.value(&column.key).to_string(),
                        error_message,
                    }
                }
            }
            td { class: "thin action",
                span {
                    class: "move icon",
                    title: "{reorder_label}",
                    draggable: "true",
                    ondragstart: move |_| {
                        let mut dragging = dragging;
                        dragging.set(Some(row_index));
                    },
                    "\u{2630}"
                }
            }
            td { class: "thin action",
                button {
                    class: "delete icon",
                    title: "{delete_label}",
                    onclick: move |_| {
                        let mut maker = maker;
                        let mut error_message = error_message;
                        if let Err(err) = maker.with_mut(|state| state.delete_row(kind, &row_id)) {
                            error_message.set(Some(err.to_string()));
                        }
                    },
                    "\u{1F5D1}"
                }
            }
        }
    }
}

#[component]
fn CellEditor(
    maker: Signal<TableMaker>,
    kind: GridKind,
    row_id: String,
    cell: CellRef,
    column: ColumnSpec,
    value: String,
    error_message: Signal<Option<String>>,
) -> Element {
    let commit = {
        let row_id = row_id.clone();
        let key = column.key.clone();
        move |input: String| {
            let mut maker = maker;
            let mut error_message = error_message;
            match maker.with_mut(|state| state.set_cell(kind, &row_id, &key, &input)) {
                Ok(()) => error_message.set(None),
                Err(err) => error_message.set(Some(err.to_string())),
            }
        }
    };

    match &column.kind {
        CellKind::Singleline => rsx! {
            textarea {
                class: "cell-input",
                rows: "1",
                value: "{value}",
                "data-grid": "{kind.code()}",
                "data-row": "{cell.row}",
                "data-col": "{cell.col}",
                oninput: move |evt| commit.clone()(evt.value()),
                onmousedown: move |_| {
                    let mut maker = maker;
                    maker.with_mut(|state| state.mouse_down(cell));
                },
                onmouseover: move |_| {
                    let mut maker = maker;
                    let tracking = matches!(
                        maker.peek().selection(),
                        SelectionState::Selecting { .. }
                    );
                    if tracking {
                        maker.with_mut(|state| state.mouse_over(cell));
                    }
                },
                onmouseup: move |evt| {
                    let mut maker = maker;
                    if maker.with_mut(|state| state.mouse_up(Some(cell))) {
                        evt.stop_propagation();
                    }
                },
            }
        },
        CellKind::Checkbox => rsx! {
            input {
                r#type: "checkbox",
                class: "checkbox",
                checked: value == "1",
                onchange: move |evt| commit.clone()(if evt.checked() { "1" } else { "" }.to_string()),
            }
        },
        CellKind::Number => rsx! {
            input {
                r#type: "number",
                class: "cell-input number",
                value: "{value}",
                oninput: move |evt| commit.clone()(evt.value()),
            }
        },
        CellKind::Select(options) => rsx! {
            select {
                class: "cell-select",
                value: "{value}",
                onchange: move |evt| commit.clone()(evt.value()),
                for choice in options.iter() {
                    option { value: "{choice.value}", "{choice.label}" }
                }
            }
        },
    }
}

fn cell_class(column: &ColumnSpec, highlighted: bool) -> String {
    let base = match column.kind {
        CellKind::Singleline => "textual",
        CellKind::Checkbox => "checkbox-cell",
        CellKind::Number => "number-cell",
        CellKind::Select(_) => "select-cell",
    };
    if highlighted {
        format!("{base} selected")
    } else {
        base.to_string()
    }
}

//! Routes webview copy/paste events to the field.
//!
//! The copy payload is pushed into the page whenever the selection changes, so
//! the `copy` listener can fill the clipboard synchronously. Paste events are
//! sent back with the target cell's `data-grid`/`data-row`/`data-col`.

use dioxus::prelude::*;
use serde::Deserialize;

use crate::state::selection::{CellRef, GridKind};
use crate::state::table_maker::TableMaker;

const BRIDGE_SCRIPT: &str = r#"
if (!window.__tablemakerCopyBound) {
    window.__tablemakerCopyBound = true;
    document.addEventListener('copy', (e) => {
        const html = window.__tablemakerCopy;
        if (html) {
            e.clipboardData.setData('text/html', html);
            e.preventDefault();
        }
    });
}
document.addEventListener('paste', (e) => {
    const target = e.target;
    if (!target || !target.dataset || target.dataset.grid === undefined) {
        return;
    }
    e.preventDefault();
    const html = e.clipboardData ? e.clipboardData.getData('text/html') : '';
    dioxus.send({
        grid: target.dataset.grid,
        row: Number(target.dataset.row),
        col: Number(target.dataset.col),
        html: html || '',
    });
});
"#;

#[derive(Debug, Deserialize)]
struct PasteMessage {
    grid: String,
    row: usize,
    col: usize,
    html: String,
}

/// A paste event from the page that could not be routed to a cell.
#[derive(Debug)]
pub enum PasteRequestError {
    Decode(serde_json::Error),
    UnknownGrid(String),
}

impl std::fmt::Display for PasteRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasteRequestError::Decode(e) => write!(f, "Malformed paste message: {e}"),
            PasteRequestError::UnknownGrid(code) => write!(f, "Unknown grid '{code}'"),
        }
    }
}

impl std::error::Error for PasteRequestError {}

impl From<serde_json::Error> for PasteRequestError {
    fn from(e: serde_json::Error) -> Self {
        PasteRequestError::Decode(e)
    }
}

/// Target cell and clipboard HTML of a paste event sent by the page.
pub fn paste_request(value: serde_json::Value) -> Result<(CellRef, String), PasteRequestError> {
    let message: PasteMessage = serde_json::from_value(value)?;
    let grid = GridKind::from_code(&message.grid)
        .ok_or_else(|| PasteRequestError::UnknownGrid(message.grid.clone()))?;
    Ok((CellRef::new(grid, message.row, message.col), message.html))
}

/// Publishes the copy payload for the current selection.
pub fn publish_copy_payload(html: Option<String>) {
    let payload = serde_json::to_string(&html).unwrap_or_else(|_| "null".to_string());
    document::eval(&format!("window.__tablemakerCopy = {payload};"));
}

pub async fn listen_for_paste(
    mut maker: Signal<TableMaker>,
    mut error_message: Signal<Option<String>>,
) {
    let mut eval = document::eval(BRIDGE_SCRIPT);
    loop {
        let value = match eval.recv::<serde_json::Value>().await {
            Ok(value) => value,
            Err(err) => {
                log::warn!("clipboard bridge closed: {err:?}");
                return;
            }
        };

        let (target, html) = match paste_request(value) {
            Ok(request) => request,
            Err(err) => {
                log::warn!("skipping paste event: {err}");
                continue;
            }
        };
        match maker.with_mut(|state| state.paste(target, &html)) {
            Ok(outcome) => {
                log::debug!(
                    "pasted {} cells, {} new rows",
                    outcome.cells_written,
                    outcome.rows_added
                );
            }
            Err(err) => error_message.set(Some(err.to_string())),
        }
    }
}

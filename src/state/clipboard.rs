use quick_xml::escape::{escape, unescape_with};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::state::grid::{EditableGrid, GridError};
use crate::state::selection::SelectionRange;

#[derive(Debug)]
pub enum ClipboardError {
    Markup(quick_xml::Error),
    NoTable,
    TargetOutOfRange { row: usize, rows: usize },
    Grid(GridError),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Markup(e) => write!(f, "Clipboard markup error: {e}"),
            ClipboardError::NoTable => write!(f, "Clipboard holds no table rows"),
            ClipboardError::TargetOutOfRange { row, rows } => {
                write!(f, "Paste target row {row} is outside a table of {rows} rows")
            }
            ClipboardError::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<quick_xml::Error> for ClipboardError {
    fn from(e: quick_xml::Error) -> Self {
        ClipboardError::Markup(e)
    }
}

impl From<GridError> for ClipboardError {
    fn from(e: GridError) -> Self {
        ClipboardError::Grid(e)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasteOutcome {
    pub rows_added: usize,
    pub cells_written: usize,
}

/// HTML table holding the text cells of `range`, one `<tr>` per selected row.
/// Returns `None` when the range covers no text cell.
pub fn copy_html(range: &SelectionRange, grid: &EditableGrid) -> Option<String> {
    if range.text_cells(grid).is_empty() {
        return None;
    }

    let last_row = range.row.end.min(grid.row_count() - 1);
    let mut html = String::from("<table>");
    for row in range.row.start..=last_row {
        html.push_str("<tr>");
        for col in range.col.start..=range.col.end {
            if !grid.is_text_cell(col) {
                continue;
            }
            html.push_str("<td>");
            html.push_str(&escape(grid.cell(row, col).unwrap_or("")));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    Some(html)
}

/// Reads the rows and cells of a clipboard HTML table. Markup is read
/// leniently, since browsers put unclosed tags such as `<meta>` around the
/// fragment; only the text of each cell is kept. Markup the reader cannot
/// follow ends the parse, keeping the rows read up to that point.
pub fn parse_html_table(html: &str) -> Result<Vec<Vec<String>>, ClipboardError> {
    let html = sanitize_markup(html);
    let mut reader = Reader::from_str(&html);
    {
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
    }

    let mut rows = Vec::new();
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<String> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                flush_row(&mut rows, &mut row, &mut cell);
                if rows.is_empty() {
                    return Err(err.into());
                }
                log::debug!("clipboard markup cut short after {} rows: {err}", rows.len());
                return Ok(rows);
            }
        };
        match event {
            Event::Start(e) => match tag_name(e.name().as_ref()).as_str() {
                "tr" => {
                    flush_row(&mut rows, &mut row, &mut cell);
                    row = Some(Vec::new());
                }
                "td" | "th" => {
                    flush_cell(&mut row, &mut cell);
                    if row.is_some() {
                        cell = Some(String::new());
                    }
                }
                "br" => push_line_break(&mut cell),
                _ => {}
            },
            Event::Empty(e) => match tag_name(e.name().as_ref()).as_str() {
                "tr" => {
                    flush_row(&mut rows, &mut row, &mut cell);
                    rows.push(Vec::new());
                }
                "td" | "th" => {
                    flush_cell(&mut row, &mut cell);
                    if let Some(row) = row.as_mut() {
                        row.push(String::new());
                    }
                }
                "br" => push_line_break(&mut cell),
                _ => {}
            },
            Event::End(e) => match tag_name(e.name().as_ref()).as_str() {
                "td" | "th" => flush_cell(&mut row, &mut cell),
                "tr" | "table" => flush_row(&mut rows, &mut row, &mut cell),
                _ => {}
            },
            Event::Text(text) => {
                if let Some(cell) = cell.as_mut() {
                    cell.push_str(&decode_text(&String::from_utf8_lossy(&text)));
                }
            }
            Event::CData(data) => {
                if let Some(cell) = cell.as_mut() {
                    cell.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    flush_row(&mut rows, &mut row, &mut cell);

    if rows.is_empty() {
        return Err(ClipboardError::NoTable);
    }
    Ok(rows)
}

/// Writes `source` into `grid` starting at the given cell. Rows missing below
/// the target are appended first. Each row receives as many cells as the
/// first source row has, capped by the text cells available from the target
/// column rightward.
pub fn paste_into(
    grid: &mut EditableGrid,
    target_row: usize,
    target_col: usize,
    source: &[Vec<String>],
) -> Result<PasteOutcome, ClipboardError> {
    if target_row >= grid.row_count() {
        return Err(ClipboardError::TargetOutOfRange {
            row: target_row,
            rows: grid.row_count(),
        });
    }

    let mut outcome = PasteOutcome::default();
    let available = grid.row_count() - target_row;
    if source.len() > available {
        let needed = source.len() - available;
        for _ in 0..needed {
            grid.add_row()?;
        }
        outcome.rows_added = needed;
        log::debug!("paste grew {} by {needed} rows", grid.dom_id());
    }

    let text_columns = grid.text_columns_from(target_col);
    let source_columns = source.first().map(Vec::len).unwrap_or(0);
    let columns_to_copy = source_columns.min(text_columns.len());

    for (offset, source_row) in source.iter().enumerate() {
        for (idx, col) in text_columns.iter().take(columns_to_copy).enumerate() {
            let value = source_row.get(idx).map(|v| v.trim()).unwrap_or("");
            grid.set_cell_at(target_row + offset, *col, value)?;
            outcome.cells_written += 1;
        }
    }

    Ok(outcome)
}

/// Drops Office conditional markers (`<![if ...]>`, `<![endif]>`) and escapes
/// a `<` that cannot open a tag, as in `a < b`.
fn sanitize_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(len) = conditional_marker_len(tail) {
            rest = &tail[len..];
            continue;
        }
        match tail[1..].chars().next() {
            Some(next) if next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?') => {
                out.push('<')
            }
            _ => out.push_str("&lt;"),
        }
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}

fn conditional_marker_len(tail: &str) -> Option<usize> {
    let body = tail.strip_prefix("<![")?;
    let keyword: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if !keyword.eq_ignore_ascii_case("if") && !keyword.eq_ignore_ascii_case("endif") {
        return None;
    }
    body.find("]>").map(|end| "<![".len() + end + "]>".len())
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn flush_cell(row: &mut Option<Vec<String>>, cell: &mut Option<String>) {
    if let (Some(row), Some(cell)) = (row.as_mut(), cell.take()) {
        row.push(cell);
    }
}

fn flush_row(
    rows: &mut Vec<Vec<String>>,
    row: &mut Option<Vec<String>>,
    cell: &mut Option<String>,
) {
    flush_cell(row, cell);
    if let Some(row) = row.take() {
        rows.push(row);
    }
}

fn push_line_break(cell: &mut Option<String>) {
    if let Some(cell) = cell.as_mut() {
        cell.push('\n');
    }
}

fn decode_text(raw: &str) -> String {
    unescape_with(raw, |entity| match entity {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        "nbsp" => Some("\u{a0}"),
        _ => None,
    })
    .map(|text| text.into_owned())
    .unwrap_or_else(|_| raw.to_string())
}

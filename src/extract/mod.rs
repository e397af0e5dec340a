//! Locate a table by its position in an HTML page and pull it out as header-keyed rows.

mod html;

use serde::Serialize;

use crate::core::IcError;
use html::{Token, decode_entities, normalize_ws, tokens};

/// Zero-based position of the transactions table on a listing page (the third table).
pub const LISTING_TABLE_ORDINAL: usize = 2;

/// One extracted row: cells paired with the header of their column, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawRow {
    pub cells: Vec<(String, String)>,
}

impl RawRow {
    /// Cell text under `header`, if the row has that column.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Cell texts in column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A table as it appeared on the page, before any renaming or coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawTable {
    /// Header texts from the first header row, or `"0"`, `"1"`, ... when the table has none.
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Count the `<table>` elements in a document, nested ones included.
pub fn count_tables(html: &str) -> usize {
    tokens(html)
        .filter(|t| matches!(t, Token::Open(n) if n.eq_ignore_ascii_case("table")))
        .count()
}

/// Extract the table at `ordinal` (zero-based, document order, nested tables counted).
///
/// `page` is only used to label errors.
///
/// # Errors
///
/// Returns [`IcError::PageFormat`] when the page has fewer tables than `ordinal + 1`;
/// that means the listing's layout changed and must not be papered over.
pub fn extract_table(page: u32, html: &str, ordinal: usize) -> Result<RawTable, IcError> {
    let mut seen = 0usize;
    let mut toks = tokens(html);

    // Advance to just past the opening tag of the wanted table.
    loop {
        match toks.next() {
            Some(Token::Open(n)) if n.eq_ignore_ascii_case("table") => {
                if seen == ordinal {
                    break;
                }
                seen += 1;
            }
            Some(_) => {}
            None => {
                return Err(IcError::page_format(
                    page,
                    format!("expected at least {} tables, found {seen}", ordinal + 1),
                ));
            }
        }
    }

    let parsed = parse_rows(&mut toks);
    Ok(assemble(parsed))
}

#[derive(Debug, Default)]
struct ParsedCell {
    header: bool,
    raw: String,
}

#[derive(Debug, Default)]
struct ParsedRow {
    cells: Vec<ParsedCell>,
}

#[derive(Debug, Default)]
struct RowBuilder {
    rows: Vec<ParsedRow>,
    row: Option<ParsedRow>,
    cell: Option<ParsedCell>,
}

impl RowBuilder {
    fn finish_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            self.row.get_or_insert_with(ParsedRow::default).cells.push(cell);
        }
    }

    fn finish_row(&mut self) {
        self.finish_cell();
        if let Some(row) = self.row.take()
            && !row.cells.is_empty()
        {
            self.rows.push(row);
        }
    }

    fn start_cell(&mut self, header: bool) {
        self.finish_cell();
        self.cell = Some(ParsedCell {
            header,
            raw: String::new(),
        });
    }

    fn push_text(&mut self, text: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.raw.push_str(text);
        }
    }
}

/// Walk tokens until the current table closes, collecting its own rows.
/// Rows of tables nested inside a cell contribute their text to that cell only.
/// Every cell inside `<thead>` is a header cell, `<td>` included.
fn parse_rows(toks: &mut html::Tokens<'_>) -> Vec<ParsedRow> {
    let mut b = RowBuilder::default();
    let mut nested = 0usize;
    let mut in_head = false;

    for tok in toks.by_ref() {
        match tok {
            Token::Text(t) => b.push_text(t),
            Token::Open(n) if n.eq_ignore_ascii_case("table") => {
                nested += 1;
                b.push_text(" ");
            }
            Token::Close(n) if n.eq_ignore_ascii_case("table") => {
                if nested == 0 {
                    break;
                }
                nested -= 1;
                b.push_text(" ");
            }
            _ if nested > 0 => b.push_text(" "),
            Token::Open(n) if n.eq_ignore_ascii_case("thead") => {
                b.finish_row();
                in_head = true;
            }
            Token::Close(n) if n.eq_ignore_ascii_case("thead") => {
                b.finish_row();
                in_head = false;
            }
            Token::Open(n)
                if n.eq_ignore_ascii_case("tbody") || n.eq_ignore_ascii_case("tfoot") =>
            {
                b.finish_row();
                in_head = false;
            }
            Token::Open(n) if n.eq_ignore_ascii_case("tr") => {
                b.finish_row();
                b.row = Some(ParsedRow::default());
            }
            Token::Close(n) if n.eq_ignore_ascii_case("tr") => b.finish_row(),
            Token::Open(n) if n.eq_ignore_ascii_case("td") => b.start_cell(in_head),
            Token::Open(n) if n.eq_ignore_ascii_case("th") => b.start_cell(true),
            Token::Close(n) if n.eq_ignore_ascii_case("td") || n.eq_ignore_ascii_case("th") => {
                b.finish_cell();
            }
            Token::Open(n) if n.eq_ignore_ascii_case("br") => b.push_text(" "),
            _ => {}
        }
    }

    b.finish_row();
    b.rows
}

fn cell_text(raw: &str) -> String {
    normalize_ws(&decode_entities(raw))
}

fn assemble(parsed: Vec<ParsedRow>) -> RawTable {
    let header_idx = parsed
        .iter()
        .position(|r| r.cells.iter().any(|c| c.header));

    let headers: Vec<String> = match header_idx {
        Some(i) => parsed[i].cells.iter().map(|c| cell_text(&c.raw)).collect(),
        None => {
            let width = parsed.iter().map(|r| r.cells.len()).max().unwrap_or(0);
            (0..width).map(|i| i.to_string()).collect()
        }
    };

    let rows = parsed
        .iter()
        .enumerate()
        .filter(|(i, r)| Some(*i) != header_idx && r.cells.iter().any(|c| !c.header))
        .map(|(_, r)| RawRow {
            cells: r
                .cells
                .iter()
                .enumerate()
                .map(|(col, c)| {
                    let header = headers
                        .get(col)
                        .cloned()
                        .unwrap_or_else(|| col.to_string());
                    (header, cell_text(&c.raw))
                })
                .collect(),
        })
        .collect();

    RawTable { headers, rows }
}

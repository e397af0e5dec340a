//! Turn extracted listing tables into typed [`Transaction`] rows.

mod role;

pub use role::{ROLE_RULES, classify};

use crate::core::conversions::{parse_date, parse_number};
use crate::core::{Dataset, IcError, Transaction};
use crate::extract::{RawRow, RawTable};

/// Semantic column names, assigned by position to the listing's columns.
pub const COLUMNS: [&str; 11] = [
    "Filing",
    "Symbol",
    "Security",
    "Insider name",
    "Relationship",
    "Transaction date",
    "Type",
    "Shares",
    "Price",
    "Amount",
    "D/I",
];

/// Concatenate per-page tables in the given order and normalize every row.
///
/// `pages` pairs each table with its one-based page index, which only labels errors.
///
/// # Errors
///
/// Returns [`IcError::PageFormat`] if a row does not have exactly the expected number
/// of columns or its filing date cannot be read.
pub fn normalize<I>(pages: I) -> Result<Dataset, IcError>
where
    I: IntoIterator<Item = (u32, RawTable)>,
{
    let mut rows = Vec::new();
    for (page, table) in pages {
        rows.reserve(table.rows.len());
        for (i, raw) in table.rows.iter().enumerate() {
            rows.push(normalize_row(page, i, raw)?);
        }
    }
    Ok(Dataset::new(rows))
}

/// Rename one row positionally and coerce its typed fields.
///
/// # Errors
///
/// See [`normalize`].
pub fn normalize_row(page: u32, index: usize, raw: &RawRow) -> Result<Transaction, IcError> {
    let cells: Vec<&str> = raw.values().collect();
    let [
        filing,
        symbol,
        security,
        insider,
        relationship,
        transaction_date,
        kind,
        shares,
        price,
        amount,
        ownership,
    ] = cells[..]
    else {
        return Err(IcError::page_format(
            page,
            format!(
                "row {index}: expected {} columns, found {}",
                COLUMNS.len(),
                cells.len()
            ),
        ));
    };

    let filing = parse_date(filing).ok_or_else(|| {
        IcError::page_format(page, format!("row {index}: unreadable filing date {filing:?}"))
    })?;

    Ok(Transaction {
        filing,
        symbol: symbol.to_string(),
        security: security.to_string(),
        insider: insider.to_string(),
        relationship: relationship.to_string(),
        transaction_date: parse_date(transaction_date),
        kind: kind.to_string(),
        shares: parse_number(shares),
        price: parse_number(price),
        amount: parse_number(amount),
        ownership: ownership.to_string(),
        role: classify(relationship),
    })
}

//! Summary statistics and grouped/top-N breakdowns over a (filtered) dataset.
//!
//! Everything here is a pure function of its input rows and is recomputed in full
//! on every filter change. Missing amounts are left out of sums and medians but
//! still count as rows.

mod render;

pub use render::render_text;

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::core::{Dataset, Role, Transaction};

/// How many symbols the top-N breakdowns keep.
pub const TOP_N: usize = 20;

/// Headline statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of all present amounts; 0 when there are none.
    pub total_volume: f64,
    /// Median of the present amounts; `None` when there are none.
    pub median_amount: Option<f64>,
    /// Number of distinct symbols.
    pub companies: usize,
    /// Number of rows, including rows without an amount.
    pub rows: usize,
    /// Number of rows that have an amount.
    pub priced_rows: usize,
}

/// Summed amount for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolVolume {
    pub symbol: String,
    pub amount: f64,
}

/// Summed amount for one (symbol, role) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleVolume {
    pub symbol: String,
    pub role: Role,
    pub amount: f64,
}

/// Distinct insiders and summed amount for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolInsiders {
    pub symbol: String,
    pub insiders: usize,
    pub total_amount: f64,
}

/// Distinct insiders for one (symbol, role) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleInsiders {
    pub symbol: String,
    pub role: Role,
    pub insiders: usize,
}

/// Everything the report page shows, computed from one filtered dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub top_by_volume: Vec<SymbolVolume>,
    pub volume_by_role: Vec<RoleVolume>,
    pub transactions: Vec<Transaction>,
    pub top_by_insiders: Vec<SymbolInsiders>,
    pub insiders_by_role: Vec<RoleInsiders>,
    pub insider_table: Vec<SymbolInsiders>,
}

impl Report {
    /// Compute every breakdown for `dataset`, keeping `top_n` symbols in the top lists.
    pub fn build(dataset: &Dataset, top_n: usize) -> Self {
        let rows = &dataset.rows;
        let top_by_volume = top_by_volume(rows, top_n);
        let volume_by_role = volume_by_role(rows, &top_by_volume);
        let insider_table = insider_counts(rows);
        let top_by_insiders: Vec<SymbolInsiders> =
            insider_table.iter().take(top_n).cloned().collect();
        let insiders_by_role = insiders_by_role(rows, &top_by_insiders);

        Self {
            summary: summarize(rows),
            top_by_volume,
            volume_by_role,
            transactions: rows.clone(),
            top_by_insiders,
            insiders_by_role,
            insider_table,
        }
    }
}

/// Headline statistics for `rows`.
pub fn summarize(rows: &[Transaction]) -> Summary {
    let mut amounts: Vec<f64> = rows.iter().filter_map(|t| t.amount).collect();
    let companies = rows
        .iter()
        .map(|t| t.symbol.as_str())
        .collect::<HashSet<_>>()
        .len();

    Summary {
        total_volume: amounts.iter().sum(),
        median_amount: median(&mut amounts),
        companies,
        rows: rows.len(),
        priced_rows: amounts.len(),
    }
}

/// Median of `values`; the mean of the two middle values for an even count.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some(f64::midpoint(values[mid - 1], values[mid]))
    } else {
        Some(values[mid])
    }
}

/// Sum amounts per symbol, keyed in first-appearance order.
fn volume_per_symbol(rows: &[Transaction]) -> Vec<SymbolVolume> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<SymbolVolume> = Vec::new();
    for t in rows {
        let i = *index.entry(t.symbol.as_str()).or_insert_with(|| {
            out.push(SymbolVolume {
                symbol: t.symbol.clone(),
                amount: 0.0,
            });
            out.len() - 1
        });
        out[i].amount += t.amount.unwrap_or(0.0);
    }
    out
}

/// The `n` symbols with the largest summed amount, largest first.
///
/// Ties keep first-appearance order.
pub fn top_by_volume(rows: &[Transaction], n: usize) -> Vec<SymbolVolume> {
    let mut per_symbol = volume_per_symbol(rows);
    // `sort_by` is stable, so equal sums stay in first-appearance order.
    per_symbol.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    per_symbol.truncate(n);
    per_symbol
}

/// Summed amount per (symbol, role), restricted to the symbols in `top`.
///
/// Ordered by `top`, then by role display order. Roles with no rows for a symbol
/// are omitted. Per symbol, the amounts add up to that symbol's total in `top`.
pub fn volume_by_role(rows: &[Transaction], top: &[SymbolVolume]) -> Vec<RoleVolume> {
    let mut sums: HashMap<(&str, Role), f64> = HashMap::new();
    for t in rows {
        *sums.entry((t.symbol.as_str(), t.role)).or_insert(0.0) += t.amount.unwrap_or(0.0);
    }

    top.iter()
        .flat_map(|sv| {
            let sums = &sums;
            Role::ALL.into_iter().filter_map(move |role| {
                sums.get(&(sv.symbol.as_str(), role)).map(|&amount| RoleVolume {
                    symbol: sv.symbol.clone(),
                    role,
                    amount,
                })
            })
        })
        .collect()
}

/// Distinct insiders and summed amount per symbol, most insiders first.
///
/// Ties keep first-appearance order.
pub fn insider_counts(rows: &[Transaction]) -> Vec<SymbolInsiders> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut names: Vec<HashSet<&str>> = Vec::new();
    let mut out: Vec<SymbolInsiders> = Vec::new();

    for t in rows {
        let i = *index.entry(t.symbol.as_str()).or_insert_with(|| {
            out.push(SymbolInsiders {
                symbol: t.symbol.clone(),
                insiders: 0,
                total_amount: 0.0,
            });
            names.push(HashSet::new());
            out.len() - 1
        });
        names[i].insert(t.insider.as_str());
        out[i].total_amount += t.amount.unwrap_or(0.0);
    }
    for (entry, set) in out.iter_mut().zip(&names) {
        entry.insiders = set.len();
    }

    out.sort_by(|a, b| b.insiders.cmp(&a.insiders));
    out
}

/// The `n` symbols with the most distinct insiders.
pub fn top_by_insiders(rows: &[Transaction], n: usize) -> Vec<SymbolInsiders> {
    let mut all = insider_counts(rows);
    all.truncate(n);
    all
}

/// Distinct insiders per (symbol, role), restricted to the symbols in `top`.
///
/// Ordered by `top`, then by role display order; roles with nobody are omitted.
pub fn insiders_by_role(rows: &[Transaction], top: &[SymbolInsiders]) -> Vec<RoleInsiders> {
    let mut names: HashMap<(&str, Role), HashSet<&str>> = HashMap::new();
    for t in rows {
        names
            .entry((t.symbol.as_str(), t.role))
            .or_default()
            .insert(t.insider.as_str());
    }

    top.iter()
        .flat_map(|si| {
            let names = &names;
            Role::ALL.into_iter().filter_map(move |role| {
                names
                    .get(&(si.symbol.as_str(), role))
                    .map(|set| RoleInsiders {
                        symbol: si.symbol.clone(),
                        role,
                        insiders: set.len(),
                    })
            })
        })
        .collect()
}

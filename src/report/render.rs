use std::fmt::Write as _;

use super::Report;
use crate::core::Role;
use crate::core::conversions::format_usd;

const BAR_WIDTH: usize = 40;
const MAX_TRANSACTION_ROWS: usize = 200;

/// Render `report` as a plain-text page for a terminal.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let s = &report.summary;

    let _ = writeln!(out, "Insider Collective");
    let _ = writeln!(out, "==================");
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<24}{}", "Total purchase volume", format_usd(s.total_volume));
    let _ = writeln!(
        out,
        "{:<24}{}",
        "Median transaction",
        s.median_amount.map_or_else(|| "n/a".to_string(), format_usd)
    );
    let _ = writeln!(out, "{:<24}{}", "Number of companies", s.companies);
    let _ = writeln!(out);

    section(&mut out, "Top symbols by purchase volume");
    let max = report
        .top_by_volume
        .iter()
        .map(|v| v.amount)
        .fold(0.0_f64, f64::max);
    for v in &report.top_by_volume {
        let _ = writeln!(
            out,
            "{:<8}{:>22}  {}",
            v.symbol,
            format_usd(v.amount),
            bar(v.amount, max)
        );
    }
    empty_note(&mut out, report.top_by_volume.is_empty());

    section(&mut out, "Purchase volume by role");
    for (symbol, slices) in group_by_symbol(&report.volume_by_role, |r| &r.symbol) {
        let parts: Vec<String> = slices
            .iter()
            .map(|r| format!("{}: {}", r.role, format_usd(r.amount)))
            .collect();
        let _ = writeln!(out, "{:<8}{}", symbol, parts.join(" | "));
    }
    empty_note(&mut out, report.volume_by_role.is_empty());

    section(&mut out, "Detailed transactions");
    let _ = writeln!(
        out,
        "{:<11}{:<8}{:<26}{:<24}{:<20}{:>18}",
        "Filing", "Symbol", "Insider name", "Relationship", "Role", "Amount"
    );
    for t in report.transactions.iter().take(MAX_TRANSACTION_ROWS) {
        let _ = writeln!(
            out,
            "{:<11}{:<8}{:<26}{:<24}{:<20}{:>18}",
            t.filing.to_string(),
            clip(&t.symbol, 7),
            clip(&t.insider, 25),
            clip(&t.relationship, 23),
            t.role.label(),
            t.amount.map_or_else(|| "n/a".to_string(), format_usd)
        );
    }
    if report.transactions.len() > MAX_TRANSACTION_ROWS {
        let _ = writeln!(
            out,
            "... {} more rows",
            report.transactions.len() - MAX_TRANSACTION_ROWS
        );
    }
    empty_note(&mut out, report.transactions.is_empty());

    section(&mut out, "Insiders by role (top symbols by number of insiders)");
    for (symbol, slices) in group_by_symbol(&report.insiders_by_role, |r| &r.symbol) {
        let parts: Vec<String> = slices
            .iter()
            .map(|r| format!("{}: {}", r.role, r.insiders))
            .collect();
        let _ = writeln!(out, "{:<8}{}", symbol, parts.join(" | "));
    }
    empty_note(&mut out, report.insiders_by_role.is_empty());

    section(&mut out, "Number of insiders per symbol");
    let _ = writeln!(
        out,
        "{:<14}{:>20}{:>22}",
        "Ticker symbol", "Number of insiders", "Total purchases"
    );
    for row in &report.insider_table {
        let _ = writeln!(
            out,
            "{:<14}{:>20}{:>22}",
            row.symbol,
            row.insiders,
            format_usd(row.total_amount)
        );
    }
    empty_note(&mut out, report.insider_table.is_empty());

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Roles: {}",
        Role::ALL.map(Role::label).join(", ")
    );
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
}

fn empty_note(out: &mut String, empty: bool) {
    if empty {
        let _ = writeln!(out, "(no matching transactions)");
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.max(1))
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut c: String = s.chars().take(max.saturating_sub(1)).collect();
        c.push('~');
        c
    }
}

/// Split an already symbol-ordered series into consecutive runs per symbol.
fn group_by_symbol<'a, T, F>(items: &'a [T], key: F) -> Vec<(&'a str, Vec<&'a T>)>
where
    F: Fn(&'a T) -> &'a String,
{
    let mut out: Vec<(&'a str, Vec<&'a T>)> = Vec::new();
    for item in items {
        let k = key(item).as_str();
        match out.last_mut() {
            Some((last, group)) if *last == k => group.push(item),
            _ => out.push((k, vec![item])),
        }
    }
    out
}

//! Lenient text-to-value coercions used when normalizing scraped cells.

use chrono::{NaiveDate, NaiveDateTime};

/// Date-time layouts the listing has been seen to use; the date part is kept.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Date-only layouts, tried after the date-time ones.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %b %Y", "%b %d, %Y", "%b %d %Y", "%m/%d/%Y"];

/// Parse a cell into a date, accepting the listing's date and date-time layouts.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(t, f).ok().map(|dt| dt.date()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(t, f).ok())
        })
}

/// Coerce a numeric-looking cell to `f64`.
///
/// Currency signs, thousands separators and surrounding whitespace are ignored.
/// Anything else that does not parse, including empty cells, maps to `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a dollar amount the way the report shows it: `US $1,234,567`.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let neg = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if neg {
        format!("US -${grouped}")
    } else {
        format!("US ${grouped}")
    }
}

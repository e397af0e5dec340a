use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::core::IcError;

/// Reporting window the listing aggregates over (the `t=` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Timeframe {
    /// Last day.
    Day,
    /// Last week.
    Week,
    /// Last month.
    Month,
    /// Last quarter.
    #[default]
    Quarter,
}

impl Timeframe {
    /// The single-character code the listing expects.
    pub const fn code(self) -> &'static str {
        match self {
            Timeframe::Day => "d",
            Timeframe::Week => "w",
            Timeframe::Month => "m",
            Timeframe::Quarter => "q",
        }
    }
}

impl FromStr for Timeframe {
    type Err = IcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "day" => Ok(Timeframe::Day),
            "w" | "week" => Ok(Timeframe::Week),
            "m" | "month" => Ok(Timeframe::Month),
            "q" | "quarter" => Ok(Timeframe::Quarter),
            other => Err(IcError::InvalidParams(format!("unknown timeframe: {other}"))),
        }
    }
}

/// Fixed query parameters shared by every page request of one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Reporting window.
    pub timeframe: Timeframe,
    /// Minimum transaction amount in whole dollars.
    pub min_amount: u64,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::Quarter,
            min_amount: 25_000,
        }
    }
}

/// Categorical summary of an insider's relationship to the company.
///
/// Variants are declared in display order, so `Ord` and [`Role::ALL`] follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Role {
    #[serde(rename = "CEO")]
    Ceo,
    #[serde(rename = "CFO")]
    Cfo,
    #[serde(rename = "Other C-level")]
    OtherCLevel,
    #[serde(rename = "Director")]
    Director,
    #[serde(rename = "President")]
    President,
    #[serde(rename = "Executive/Senior VP")]
    ExecutiveVp,
    #[serde(rename = "Shareholder (10%+)")]
    TenPercentOwner,
    #[serde(rename = "Other")]
    Other,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 8] = [
        Role::Ceo,
        Role::Cfo,
        Role::OtherCLevel,
        Role::Director,
        Role::President,
        Role::ExecutiveVp,
        Role::TenPercentOwner,
        Role::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Role::Ceo => "CEO",
            Role::Cfo => "CFO",
            Role::OtherCLevel => "Other C-level",
            Role::Director => "Director",
            Role::President => "President",
            Role::ExecutiveVp => "Executive/Senior VP",
            Role::TenPercentOwner => "Shareholder (10%+)",
            Role::Other => "Other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One normalized row of the insider listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Date the disclosure was filed.
    pub filing: NaiveDate,
    /// Ticker symbol.
    pub symbol: String,
    /// Company or security name.
    pub security: String,
    /// Name of the reporting insider.
    pub insider: String,
    /// Free-text relationship to the company (e.g. "CEO, Director").
    pub relationship: String,
    /// Date the trade happened, when it could be parsed.
    pub transaction_date: Option<NaiveDate>,
    /// Transaction type as listed (e.g. "Purchase").
    #[serde(rename = "type")]
    pub kind: String,
    pub shares: Option<f64>,
    pub price: Option<f64>,
    /// Dollar amount; `None` when the listed value was not numeric.
    pub amount: Option<f64>,
    /// Direct/indirect ownership flag.
    pub ownership: String,
    /// Derived from `relationship`.
    pub role: Role,
}

/// A page that was skipped during a best-effort load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPage {
    pub page: u32,
    pub reason: String,
}

/// The full normalized listing, in page-then-row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub rows: Vec<Transaction>,
    /// When the pipeline produced this dataset.
    pub fetched_at: DateTime<Utc>,
    /// Pages left out under [`FailurePolicy::BestEffort`](crate::FailurePolicy::BestEffort).
    pub skipped_pages: Vec<SkippedPage>,
}

impl Dataset {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self {
            rows,
            fetched_at: Utc::now(),
            skipped_pages: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct symbols in first-appearance order; the choices for a ticker selector.
    pub fn symbols(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|t| t.symbol.as_str())
            .filter(|s| seen.insert(*s))
            .collect()
    }
}

//! Date range, role-interest and ticker predicates over a [`Dataset`].
//!
//! Comparison modes:
//! - Filing date: inclusive range on both ends.
//! - Role interests: case-sensitive substring match against the free-text relationship,
//!   since the selectable vocabulary ("10%", "SVP", ...) is not the derived [`Role`](crate::Role).
//! - Tickers: exact equality against the symbol; the selectable tickers come from
//!   [`Dataset::symbols`], so membership is the natural test.

use chrono::{Days, NaiveDate, Utc};
use chrono_tz::America::New_York;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::core::{Dataset, IcError, Transaction};

/// Days before today the default window starts.
pub const DEFAULT_WINDOW_DAYS: u64 = 10;

/// The role vocabulary offered for selection, matched against relationship text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoleInterest {
    Ceo,
    Cfo,
    Director,
    TenPercent,
    President,
    Svp,
}

impl RoleInterest {
    /// Every selectable role interest, in menu order.
    pub const ALL: [RoleInterest; 6] = [
        RoleInterest::Ceo,
        RoleInterest::Cfo,
        RoleInterest::Director,
        RoleInterest::TenPercent,
        RoleInterest::President,
        RoleInterest::Svp,
    ];

    /// The exact substring looked for in the relationship text.
    pub const fn needle(self) -> &'static str {
        match self {
            RoleInterest::Ceo => "CEO",
            RoleInterest::Cfo => "CFO",
            RoleInterest::Director => "Director",
            RoleInterest::TenPercent => "10%",
            RoleInterest::President => "President",
            RoleInterest::Svp => "SVP",
        }
    }
}

impl fmt::Display for RoleInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.needle())
    }
}

impl FromStr for RoleInterest {
    type Err = IcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        RoleInterest::ALL
            .into_iter()
            .find(|r| r.needle().eq_ignore_ascii_case(t))
            .ok_or_else(|| {
                IcError::InvalidParams(format!(
                    "unknown role {t:?}; expected one of CEO, CFO, Director, 10%, President, SVP"
                ))
            })
    }
}

/// What an empty role or ticker selection means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EmptySelection {
    /// No constraint: every row passes. (Default)
    #[default]
    MatchAll,
    /// Nothing passes.
    MatchNone,
}

impl EmptySelection {
    const fn passes(self) -> bool {
        matches!(self, EmptySelection::MatchAll)
    }
}

/// The user's current filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    start: NaiveDate,
    end: NaiveDate,
    roles: Vec<RoleInterest>,
    tickers: HashSet<String>,
    empty_selection: EmptySelection,
}

/// Today's date on the US East coast, where filings are dated.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&New_York).date_naive()
}

impl FilterCriteria {
    /// A filter over `[start, end]` (both inclusive) with no role or ticker selection.
    ///
    /// # Errors
    ///
    /// Returns [`IcError::InvalidDates`] if `start` is after `end`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, IcError> {
        if start > end {
            return Err(IcError::InvalidDates);
        }
        Ok(Self {
            start,
            end,
            roles: Vec::new(),
            tickers: HashSet::new(),
            empty_selection: EmptySelection::default(),
        })
    }

    /// The default window ending at `today`: the previous ten days plus today.
    pub fn default_window(today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(DEFAULT_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start,
            end: today,
            roles: Vec::new(),
            tickers: HashSet::new(),
            empty_selection: EmptySelection::default(),
        }
    }

    /// Replace the role-interest selection.
    #[must_use]
    pub fn roles<I>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = RoleInterest>,
    {
        self.roles = roles.into_iter().collect();
        self
    }

    /// Replace the ticker selection.
    #[must_use]
    pub fn tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = tickers.into_iter().map(Into::into).collect();
        self
    }

    /// Choose what an empty role or ticker selection means. Default: [`EmptySelection::MatchAll`].
    #[must_use]
    pub const fn empty_selection(mut self, policy: EmptySelection) -> Self {
        self.empty_selection = policy;
        self
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// True if `t` satisfies the date, role and ticker predicates.
    pub fn matches(&self, t: &Transaction) -> bool {
        self.date_matches(t) && self.role_matches(t) && self.ticker_matches(t)
    }

    fn date_matches(&self, t: &Transaction) -> bool {
        (self.start..=self.end).contains(&t.filing)
    }

    fn role_matches(&self, t: &Transaction) -> bool {
        if self.roles.is_empty() {
            return self.empty_selection.passes();
        }
        self.roles.iter().any(|r| t.relationship.contains(r.needle()))
    }

    fn ticker_matches(&self, t: &Transaction) -> bool {
        if self.tickers.is_empty() {
            return self.empty_selection.passes();
        }
        self.tickers.contains(&t.symbol)
    }

    /// The rows of `dataset` that match, in their original order.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        Dataset {
            rows: dataset
                .rows
                .iter()
                .filter(|t| self.matches(t))
                .cloned()
                .collect(),
            fetched_at: dataset.fetched_at,
            skipped_pages: dataset.skipped_pages.clone(),
        }
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::default_window(today())
    }
}

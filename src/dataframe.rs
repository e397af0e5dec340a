//! Polars export of a [`Dataset`], using the listing's semantic column names.

use polars::prelude::*;

use crate::core::Dataset;
use crate::normalize::COLUMNS;

impl Dataset {
    /// Convert the rows into a polars `DataFrame`.
    ///
    /// Dates are written as ISO `YYYY-MM-DD` strings and the derived role is appended
    /// as a `Role` column after the eleven listing columns.
    ///
    /// # Errors
    ///
    /// Returns the polars error if the frame cannot be assembled.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let rows = &self.rows;
        let text = |f: fn(&crate::Transaction) -> String| -> Vec<String> {
            rows.iter().map(f).collect()
        };
        let num = |f: fn(&crate::Transaction) -> Option<f64>| -> Vec<Option<f64>> {
            rows.iter().map(f).collect()
        };

        let columns = vec![
            Column::new(COLUMNS[0].into(), text(|t| t.filing.to_string())),
            Column::new(COLUMNS[1].into(), text(|t| t.symbol.clone())),
            Column::new(COLUMNS[2].into(), text(|t| t.security.clone())),
            Column::new(COLUMNS[3].into(), text(|t| t.insider.clone())),
            Column::new(COLUMNS[4].into(), text(|t| t.relationship.clone())),
            Column::new(
                COLUMNS[5].into(),
                rows.iter()
                    .map(|t| t.transaction_date.map(|d| d.to_string()))
                    .collect::<Vec<Option<String>>>(),
            ),
            Column::new(COLUMNS[6].into(), text(|t| t.kind.clone())),
            Column::new(COLUMNS[7].into(), num(|t| t.shares)),
            Column::new(COLUMNS[8].into(), num(|t| t.price)),
            Column::new(COLUMNS[9].into(), num(|t| t.amount)),
            Column::new(COLUMNS[10].into(), text(|t| t.ownership.clone())),
            Column::new("Role".into(), text(|t| t.role.label().to_string())),
        ];

        DataFrame::new(columns)
    }
}

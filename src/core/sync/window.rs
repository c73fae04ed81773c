//! Run date window resolution

use crate::domain::{LedgerError, Result};
use chrono::{Duration, NaiveDate};
use std::fmt;

/// Inclusive date range a sync run covers
///
/// Resolved once per run from explicit bounds or a days-back default,
/// then passed read-only into every upstream fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Resolves the effective window
    ///
    /// Missing `date_to` defaults to `today`; missing `date_from`
    /// defaults to `days_back` days before the effective end.
    pub fn resolve(
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        days_back: u32,
        today: NaiveDate,
    ) -> Result<Self> {
        let to = date_to.unwrap_or(today);
        let from = date_from.unwrap_or(to - Duration::days(days_back as i64));

        if from > to {
            return Err(LedgerError::Validation(format!(
                "Invalid date window: {} is after {}",
                from, to
            )));
        }

        Ok(Self { from, to })
    }

    /// Lower bound formatted for upstream query parameters
    pub fn from_param(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    /// Upper bound formatted for upstream query parameters
    pub fn to_param(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }

    /// Window length in whole days
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from_param(), self.to_param())
    }
}

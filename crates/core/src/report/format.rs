//! Date and amount formatting for report cells.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::ReportError;

/// Default short date pattern (`10/17/2026`).
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// How dates are displayed in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFormat {
    timezone: Tz,
    date_format: String,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ReportFormat {
    /// Creates a format from an IANA timezone name and a `strftime` pattern.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::UnknownTimezone` or `ReportError::InvalidDateFormat`.
    pub fn new(timezone: &str, date_format: &str) -> Result<Self, ReportError> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| ReportError::UnknownTimezone(timezone.to_string()))?;

        if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ReportError::InvalidDateFormat(date_format.to_string()));
        }

        Ok(Self {
            timezone,
            date_format: date_format.to_string(),
        })
    }

    /// Formats `date` as a short date in the display timezone.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::DateFormatting` if the pattern cannot be applied.
    pub fn format_date(&self, date: DateTime<Utc>) -> Result<String, ReportError> {
        let local = date.with_timezone(&self.timezone);
        let mut out = String::new();
        write!(out, "{}", local.format(&self.date_format))
            .map_err(|_| ReportError::DateFormatting(date))?;
        Ok(out)
    }
}

/// Formats an amount with exactly two decimals and no currency symbol.
///
/// Midpoints round away from zero.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

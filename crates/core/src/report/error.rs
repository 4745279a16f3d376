//! Report error types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while rendering a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Timezone name is not in the IANA database.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Date pattern contains an unsupported specifier.
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// Date could not be written with the configured pattern.
    #[error("Could not format date {0}")]
    DateFormatting(DateTime<Utc>),

    /// A record carries a negative amount.
    #[error("Negative amount {amount} in expense \"{category}\"")]
    NegativeAmount {
        /// Category of the offending record.
        category: String,
        /// The negative amount.
        amount: Decimal,
    },

    /// The output rejected document bytes.
    #[error("Could not write report: {0}")]
    Output(String),

    /// The document has more pages than the output format can index.
    #[error("Report has too many pages: {0}")]
    TooManyPages(usize),
}

//! Expense error types.

use thiserror::Error;

/// Errors raised while validating expense input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    /// Category, amount or date is missing or blank.
    #[error("All fields are required")]
    MissingFields,

    /// Category does not fit the stored column.
    #[error("Category must be at most {max} characters")]
    CategoryTooLong {
        /// Longest accepted category, in characters.
        max: usize,
    },

    /// Amount is zero or negative.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Amount has fractional digits beyond cents.
    #[error("Amount must have at most two decimal places")]
    TooManyDecimals,

    /// Date is neither an RFC 3339 timestamp nor a `YYYY-MM-DD` date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

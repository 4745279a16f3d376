//! Expense data types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ExpenseError;

/// Longest category accepted, in characters. Matches the `expenses.category` column.
pub const MAX_CATEGORY_LEN: usize = 100;

/// Fractional digits stored for an amount.
pub const AMOUNT_SCALE: u32 = 2;

/// A single spending entry as read by the report renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// When the money was spent.
    pub date: DateTime<Utc>,
    /// Short label, e.g. "Food".
    pub category: String,
    /// Amount spent, non-negative.
    pub amount: Decimal,
}

impl ExpenseRecord {
    /// Creates a new expense record.
    #[must_use]
    pub fn new(date: DateTime<Utc>, category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
        }
    }
}

/// Request payload for adding or updating an expense.
///
/// Every field is optional on the wire so that missing fields surface as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseInput {
    /// Expense category.
    pub category: Option<String>,
    /// Expense amount, as a JSON number or string.
    pub amount: Option<Decimal>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` date.
    pub date: Option<String>,
}

/// A validated expense ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Expense category.
    pub category: String,
    /// Strictly positive amount.
    pub amount: Decimal,
    /// Expense date in UTC.
    pub date: DateTime<Utc>,
}

impl ExpenseInput {
    /// Validates the payload.
    ///
    /// # Errors
    ///
    /// - `ExpenseError::MissingFields` if a field is absent or blank
    /// - `ExpenseError::CategoryTooLong` if the category exceeds [`MAX_CATEGORY_LEN`]
    /// - `ExpenseError::NonPositiveAmount` if the amount is not above zero
    /// - `ExpenseError::TooManyDecimals` if the amount has sub-cent digits
    /// - `ExpenseError::InvalidDate` if the date cannot be parsed
    pub fn validate(self) -> Result<NewExpense, ExpenseError> {
        let (Some(category), Some(amount), Some(date)) = (self.category, self.amount, self.date)
        else {
            return Err(ExpenseError::MissingFields);
        };

        if category.trim().is_empty() || date.trim().is_empty() {
            return Err(ExpenseError::MissingFields);
        }

        if category.chars().count() > MAX_CATEGORY_LEN {
            return Err(ExpenseError::CategoryTooLong {
                max: MAX_CATEGORY_LEN,
            });
        }

        if amount <= Decimal::ZERO {
            return Err(ExpenseError::NonPositiveAmount);
        }

        // 10.50 is fine, 10.005 would be rounded by the NUMERIC(19,2) column
        if amount.normalize().scale() > AMOUNT_SCALE {
            return Err(ExpenseError::TooManyDecimals);
        }

        Ok(NewExpense {
            category,
            amount,
            date: parse_expense_date(&date)?,
        })
    }
}

/// Parses an expense date.
///
/// Accepts full RFC 3339 timestamps and plain `YYYY-MM-DD` dates, the
/// latter taken as midnight UTC.
///
/// # Errors
///
/// Returns `ExpenseError::InvalidDate` for any other input.
pub fn parse_expense_date(input: &str) -> Result<DateTime<Utc>, ExpenseError> {
    let input = input.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| ExpenseError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn input(category: Option<&str>, amount: Option<Decimal>, date: Option<&str>) -> ExpenseInput {
        ExpenseInput {
            category: category.map(String::from),
            amount,
            date: date.map(String::from),
        }
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        let expense = input(Some("Food"), Some(dec!(1250.50)), Some("2026-10-01"))
            .validate()
            .unwrap();

        assert_eq!(expense.category, "Food");
        assert_eq!(expense.amount, dec!(1250.50));
        assert_eq!(
            expense.date,
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_validate_missing_fields() {
        let cases = [
            input(None, Some(dec!(10)), Some("2026-10-01")),
            input(Some("Food"), None, Some("2026-10-01")),
            input(Some("Food"), Some(dec!(10)), None),
            input(Some("   "), Some(dec!(10)), Some("2026-10-01")),
            input(Some("Food"), Some(dec!(10)), Some("")),
        ];

        for case in cases {
            assert_eq!(case.validate(), Err(ExpenseError::MissingFields));
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        assert_eq!(
            input(Some("Food"), Some(dec!(0)), Some("2026-10-01")).validate(),
            Err(ExpenseError::NonPositiveAmount)
        );
        assert_eq!(
            input(Some("Food"), Some(dec!(-5)), Some("2026-10-01")).validate(),
            Err(ExpenseError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_validate_category_length_limit() {
        let longest = "x".repeat(MAX_CATEGORY_LEN);
        let too_long = "x".repeat(150);
        // Counted in characters, not bytes
        let sinhala = "කෑ".repeat(MAX_CATEGORY_LEN / 2);

        assert!(
            input(Some(&longest), Some(dec!(10)), Some("2026-10-01"))
                .validate()
                .is_ok()
        );
        assert!(
            input(Some(&sinhala), Some(dec!(10)), Some("2026-10-01"))
                .validate()
                .is_ok()
        );
        assert_eq!(
            input(Some(&too_long), Some(dec!(10)), Some("2026-10-01")).validate(),
            Err(ExpenseError::CategoryTooLong { max: 100 })
        );
        assert_eq!(
            ExpenseError::CategoryTooLong { max: 100 }.to_string(),
            "Category must be at most 100 characters"
        );
    }

    #[test]
    fn test_validate_rejects_sub_cent_amounts() {
        assert_eq!(
            input(Some("Food"), Some(dec!(10.005)), Some("2026-10-01")).validate(),
            Err(ExpenseError::TooManyDecimals)
        );
        // Trailing zeros are not extra precision
        let expense = input(Some("Food"), Some(dec!(10.500)), Some("2026-10-01"))
            .validate()
            .unwrap();
        assert_eq!(expense.amount, dec!(10.5));
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        assert_eq!(
            input(Some("Food"), Some(dec!(10)), Some("01/10/2026")).validate(),
            Err(ExpenseError::InvalidDate("01/10/2026".to_string()))
        );
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let date = parse_expense_date("2026-10-01T08:30:00+05:30").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2026, 10, 1, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_deserialize_amount_from_number_or_string() {
        let from_number: ExpenseInput =
            serde_json::from_str(r#"{"category":"Bus","amount":1234.5,"date":"2026-10-01"}"#)
                .unwrap();
        let from_string: ExpenseInput =
            serde_json::from_str(r#"{"category":"Bus","amount":"1234.5","date":"2026-10-01"}"#)
                .unwrap();

        assert_eq!(from_number.amount, Some(dec!(1234.5)));
        assert_eq!(from_string.amount, Some(dec!(1234.5)));
    }

    #[test]
    fn test_deserialize_missing_fields_as_none() {
        let parsed: ExpenseInput = serde_json::from_str(r#"{"category":"Bus"}"#).unwrap();
        assert!(parsed.amount.is_none());
        assert!(parsed.date.is_none());
    }
}

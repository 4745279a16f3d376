//! Expense records and the validation of user input.

pub mod error;
pub mod types;

pub use error::ExpenseError;
pub use types::{
    AMOUNT_SCALE, ExpenseInput, ExpenseRecord, MAX_CATEGORY_LEN, NewExpense, parse_expense_date,
};

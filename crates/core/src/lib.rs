//! Core business logic for EconoMe.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `expense` - Expense records and input validation
//! - `report` - Paginated PDF expense report rendering

pub mod expense;
pub mod report;

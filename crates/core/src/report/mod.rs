//! Expense report rendering.
//!
//! The renderer lays out a fixed, paginated table of expenses and hands
//! every completed page to a [`PageSink`]. [`PdfSink`] turns those pages
//! into a PDF document; tests collect them into a `Vec<Page>` instead.
//!
//! Coordinates use a top-left origin with y growing downward. The PDF
//! sink converts them into PDF user space.

pub mod error;
pub mod format;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod renderer;
pub mod sink;
pub mod types;


pub use error::ReportError;
pub use format::{ReportFormat, format_amount};
pub use layout::ReportLayout;
pub use metrics::Font;
pub use pdf::PdfSink;
pub use renderer::{PageCursor, ReportRenderer};
pub use sink::PageSink;
pub use types::{Alignment, DrawOp, Page};

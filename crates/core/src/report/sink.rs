//! Destinations for rendered pages.

use super::error::ReportError;
use super::types::Page;

/// Receives pages as soon as the renderer completes them.
///
/// `finish` consumes the sink, so a sink cannot be written to after the
/// document is closed. A sink dropped without `finish` (e.g. when rendering
/// fails) discards whatever it buffered.
pub trait PageSink {
    /// What the finished document turns into.
    type Output;

    /// Accepts one completed page.
    fn emit_page(&mut self, page: Page) -> Result<(), ReportError>;

    /// Closes the document.
    fn finish(self) -> Result<Self::Output, ReportError>;
}

impl PageSink for Vec<Page> {
    type Output = Self;

    fn emit_page(&mut self, page: Page) -> Result<(), ReportError> {
        self.push(page);
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, ReportError> {
        Ok(self)
    }
}

//! Paginated layout of the expense report.

use std::io::Write;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::error::ReportError;
use super::format::{ReportFormat, format_amount};
use super::layout::ReportLayout;
use super::metrics::Font;
use super::pdf::PdfSink;
use super::sink::PageSink;
use super::types::{Alignment, Page};
use crate::expense::ExpenseRecord;

/// Document title.
pub const REPORT_TITLE: &str = "EconoMe";
/// Document subtitle.
pub const REPORT_SUBTITLE: &str = "Expense Report";
/// Currency prefix of the total.
pub const CURRENCY_PREFIX: &str = "Rs.";

const DATE_HEADING: &str = "Date";
const CATEGORY_HEADING: &str = "Category";
const AMOUNT_HEADING: &str = "Amount (Rs.)";
const TOTAL_LABEL: &str = "Total:";

/// Write position and running total of one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    /// Next writable vertical offset on the current page.
    pub y: f32,
    /// Sum of the amounts drawn so far, in input order.
    pub total: Decimal,
}

impl PageCursor {
    /// Creates a cursor on the first page.
    #[must_use]
    pub fn new(y: f32) -> Self {
        Self {
            y,
            total: Decimal::ZERO,
        }
    }

    /// Moves the cursor to the top of the next page.
    pub fn next_page(&mut self, y: f32) {
        self.y = y;
    }
}

/// Renders expense records into the fixed report layout.
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    layout: ReportLayout,
    format: ReportFormat,
}

impl ReportRenderer {
    /// Creates a renderer.
    #[must_use]
    pub const fn new(layout: ReportLayout, format: ReportFormat) -> Self {
        Self { layout, format }
    }

    /// Creates a renderer with the default layout.
    #[must_use]
    pub fn with_format(format: ReportFormat) -> Self {
        Self::new(ReportLayout::default(), format)
    }

    /// Checks everything that could make [`ReportRenderer::render`] fail
    /// before any output is produced.
    ///
    /// Once this passes, rendering the same records at the same instant can
    /// only fail in the sink.
    ///
    /// # Errors
    ///
    /// Returns the error `render` would return for the first bad record.
    pub fn validate(
        &self,
        records: &[ExpenseRecord],
        generated_at: DateTime<Utc>,
    ) -> Result<(), ReportError> {
        self.format.format_date(generated_at)?;
        for record in records {
            self.row_date(record)?;
        }
        Ok(())
    }

    /// Renders `records` into an in-memory PDF document.
    ///
    /// # Errors
    ///
    /// See [`ReportRenderer::render`].
    pub fn render_pdf(
        &self,
        records: &[ExpenseRecord],
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, ReportError> {
        self.render_pdf_to(records, generated_at, Vec::new())
    }

    /// Renders `records` as a PDF document written page by page into `out`.
    ///
    /// # Errors
    ///
    /// See [`ReportRenderer::render`]; write failures surface as
    /// `ReportError::Output`.
    pub fn render_pdf_to<W: Write>(
        &self,
        records: &[ExpenseRecord],
        generated_at: DateTime<Utc>,
        out: W,
    ) -> Result<W, ReportError> {
        self.render(records, generated_at, PdfSink::new(&self.layout, out))
    }

    /// Renders `records` in the order given, handing each finished page to `sink`.
    ///
    /// The records are expected newest first; they are not re-sorted. An
    /// empty slice still produces the title block, the table header and a
    /// zero total.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NegativeAmount` for a record with a negative
    /// amount, a formatting error for an unprintable date, or whatever the
    /// sink reports.
    pub fn render<S: PageSink>(
        &self,
        records: &[ExpenseRecord],
        generated_at: DateTime<Utc>,
        mut sink: S,
    ) -> Result<S::Output, ReportError> {
        let mut page = Page::default();
        self.draw_title_block(&mut page, generated_at)?;
        self.draw_table_header(&mut page);

        let mut cursor = PageCursor::new(self.layout.first_row_y());
        for record in records {
            if cursor.y > self.layout.page_bottom_margin {
                sink.emit_page(std::mem::take(&mut page))?;
                cursor.next_page(self.layout.continuation_top);
            }
            self.draw_row(&mut page, &mut cursor, record)?;
        }

        self.draw_total(&mut page, &mut cursor);
        sink.emit_page(page)?;
        sink.finish()
    }

    fn draw_title_block(
        &self,
        page: &mut Page,
        generated_at: DateTime<Utc>,
    ) -> Result<(), ReportError> {
        let sizes = self.layout.fonts;
        let mut y = self.layout.margin;

        self.flow_text(page, y, Alignment::Center, Font::Bold, sizes.title, REPORT_TITLE);
        y += 1.5 * self.layout.line_height(sizes.title);

        self.flow_text(page, y, Alignment::Center, Font::Bold, sizes.subtitle, REPORT_SUBTITLE);
        y += 2.0 * self.layout.line_height(sizes.subtitle);

        let generated_on = format!("Generated on: {}", self.format.format_date(generated_at)?);
        self.flow_text(page, y, Alignment::Right, Font::Regular, sizes.timestamp, &generated_on);

        Ok(())
    }

    fn draw_table_header(&self, page: &mut Page) {
        let layout = &self.layout;
        let size = layout.fonts.table;
        let y = layout.table_top;

        page.text(layout.date_x, y, Font::Bold, size, DATE_HEADING);
        page.text(layout.category_x, y, Font::Bold, size, CATEGORY_HEADING);
        page.text(layout.amount_x, y, Font::Bold, size, AMOUNT_HEADING);
        page.rule(layout.rule_start_x, layout.rule_end_x, y + layout.header_rule_offset);
    }

    fn draw_row(
        &self,
        page: &mut Page,
        cursor: &mut PageCursor,
        record: &ExpenseRecord,
    ) -> Result<(), ReportError> {
        let date = self.row_date(record)?;
        let layout = &self.layout;
        let size = layout.fonts.table;

        page.text(layout.date_x, cursor.y, Font::Regular, size, date);
        page.text(layout.category_x, cursor.y, Font::Regular, size, record.category.as_str());
        page.text(layout.amount_x, cursor.y, Font::Regular, size, format_amount(record.amount));

        cursor.total += record.amount;
        cursor.y += layout.row_height;
        Ok(())
    }

    /// Rejects a negative amount and formats the row's date cell.
    fn row_date(&self, record: &ExpenseRecord) -> Result<String, ReportError> {
        if record.amount < Decimal::ZERO {
            return Err(ReportError::NegativeAmount {
                category: record.category.clone(),
                amount: record.amount,
            });
        }
        self.format.format_date(record.date)
    }

    fn draw_total(&self, page: &mut Page, cursor: &mut PageCursor) {
        let layout = &self.layout;
        let size = layout.fonts.total;

        page.rule(layout.rule_start_x, layout.rule_end_x, cursor.y);
        cursor.y += layout.total_offset;

        page.text(layout.total_label_x, cursor.y, Font::Bold, size, TOTAL_LABEL);
        page.text(
            layout.amount_x,
            cursor.y,
            Font::Regular,
            size,
            format!("{CURRENCY_PREFIX} {}", format_amount(cursor.total)),
        );
    }

    fn flow_text(
        &self,
        page: &mut Page,
        y: f32,
        alignment: Alignment,
        font: Font,
        size: f32,
        text: &str,
    ) {
        let free = self.layout.content_width() - font.text_width(text, size);
        let x = match alignment {
            Alignment::Center => self.layout.margin + free / 2.0,
            Alignment::Right => self.layout.margin + free,
        };
        page.text(x, y, font, size, text);
    }
}

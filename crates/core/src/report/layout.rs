//! Fixed geometry of the expense report.
//!
//! All values are in points on a US Letter page, measured from the top-left
//! corner.

/// Page width.
pub const PAGE_WIDTH: f32 = 612.0;
/// Page height.
pub const PAGE_HEIGHT: f32 = 792.0;
/// Side and top margin used by the title block.
pub const PAGE_MARGIN: f32 = 72.0;

/// Vertical offset of the table header row.
pub const TABLE_TOP: f32 = 150.0;
/// Distance from the table header to the rule beneath it.
pub const HEADER_RULE_OFFSET: f32 = 20.0;
/// Distance from the table header to the first row.
pub const FIRST_ROW_OFFSET: f32 = 40.0;
/// Vertical advance per row.
pub const ROW_HEIGHT: f32 = 30.0;
/// A row whose cursor lies below this offset starts a new page.
pub const PAGE_BOTTOM_MARGIN: f32 = 700.0;
/// Cursor position of the first row on a continuation page.
pub const CONTINUATION_TOP: f32 = 50.0;
/// Distance from the closing rule to the total line.
pub const TOTAL_OFFSET: f32 = 20.0;

/// Left end of horizontal rules.
pub const RULE_START_X: f32 = 50.0;
/// Right end of horizontal rules.
pub const RULE_END_X: f32 = 550.0;
/// Date column.
pub const DATE_X: f32 = 50.0;
/// Category column.
pub const CATEGORY_X: f32 = 150.0;
/// Amount column.
pub const AMOUNT_X: f32 = 400.0;
/// "Total:" label.
pub const TOTAL_LABEL_X: f32 = 300.0;

/// Line height as a multiple of the font size (Helvetica ascender + descender + gap).
pub const LINE_HEIGHT_FACTOR: f32 = 1.156;

/// Font sizes used by the report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    /// "EconoMe" title.
    pub title: f32,
    /// "Expense Report" subtitle.
    pub subtitle: f32,
    /// "Generated on" line.
    pub timestamp: f32,
    /// Table header and rows.
    pub table: f32,
    /// Total line.
    pub total: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 22.0,
            subtitle: 18.0,
            timestamp: 10.0,
            table: 12.0,
            total: 14.0,
        }
    }
}

/// Report geometry.
///
/// `Default` yields the constants of this module.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    /// Page width.
    pub page_width: f32,
    /// Page height.
    pub page_height: f32,
    /// Side and top margin.
    pub margin: f32,
    /// Table header offset.
    pub table_top: f32,
    /// Table header to rule.
    pub header_rule_offset: f32,
    /// Table header to first row.
    pub first_row_offset: f32,
    /// Row advance.
    pub row_height: f32,
    /// Pagination threshold.
    pub page_bottom_margin: f32,
    /// First row on continuation pages.
    pub continuation_top: f32,
    /// Closing rule to total line.
    pub total_offset: f32,
    /// Left end of rules.
    pub rule_start_x: f32,
    /// Right end of rules.
    pub rule_end_x: f32,
    /// Date column.
    pub date_x: f32,
    /// Category column.
    pub category_x: f32,
    /// Amount column.
    pub amount_x: f32,
    /// Total label.
    pub total_label_x: f32,
    /// Line height factor for flowing text.
    pub line_height_factor: f32,
    /// Font sizes.
    pub fonts: FontSizes,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,
            margin: PAGE_MARGIN,
            table_top: TABLE_TOP,
            header_rule_offset: HEADER_RULE_OFFSET,
            first_row_offset: FIRST_ROW_OFFSET,
            row_height: ROW_HEIGHT,
            page_bottom_margin: PAGE_BOTTOM_MARGIN,
            continuation_top: CONTINUATION_TOP,
            total_offset: TOTAL_OFFSET,
            rule_start_x: RULE_START_X,
            rule_end_x: RULE_END_X,
            date_x: DATE_X,
            category_x: CATEGORY_X,
            amount_x: AMOUNT_X,
            total_label_x: TOTAL_LABEL_X,
            line_height_factor: LINE_HEIGHT_FACTOR,
            fonts: FontSizes::default(),
        }
    }
}

impl ReportLayout {
    /// Height of one line of flowing text at `size`.
    #[must_use]
    pub fn line_height(&self, size: f32) -> f32 {
        size * self.line_height_factor
    }

    /// Cursor position of the first row on the first page.
    #[must_use]
    pub fn first_row_y(&self) -> f32 {
        self.table_top + self.first_row_offset
    }

    /// Width available between the side margins.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }
}

//! Drawing primitives produced by the renderer.

use super::metrics::Font;

/// Horizontal alignment of the title block lines within the page margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Centered between the margins.
    Center,
    /// Flush with the right margin.
    Right,
}

/// A single drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A line of text whose top edge sits at `y`.
    Text {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Typeface.
        font: Font,
        /// Size in points.
        size: f32,
        /// Text, kept verbatim.
        text: String,
    },
    /// A horizontal rule.
    Rule {
        /// Left end.
        from_x: f32,
        /// Right end.
        to_x: f32,
        /// Vertical offset.
        y: f32,
    },
}

/// One page of the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    ops: Vec<DrawOp>,
}

impl Page {
    /// Returns the drawing operations in paint order.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Draws text with its top-left corner at `(x, y)`.
    pub fn text(&mut self, x: f32, y: f32, font: Font, size: f32, text: impl Into<String>) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            font,
            size,
            text: text.into(),
        });
    }

    /// Draws a horizontal rule.
    pub fn rule(&mut self, from_x: f32, to_x: f32, y: f32) {
        self.ops.push(DrawOp::Rule { from_x, to_x, y });
    }
}

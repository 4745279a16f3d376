//! PDF encoding of rendered pages.
//!
//! Every emitted page is written to the output right away. The page tree,
//! fonts, catalog and cross-reference table follow when the sink finishes.

use std::io::Write;

use pdf_writer::writers::{Catalog, DocumentInfo};
use pdf_writer::{Chunk, Content, Finish, Name, Rect, Ref, Str, TextStr};

use super::error::ReportError;
use super::layout::ReportLayout;
use super::metrics::{ASCENDER, Font, win_ansi_code};
use super::renderer::{REPORT_SUBTITLE, REPORT_TITLE};
use super::sink::PageSink;
use super::types::{DrawOp, Page};

const PDF_HEADER: &[u8] = b"%PDF-1.7\n%\x80\x80\x80\x80\n\n";

const CATALOG_ID: Ref = Ref::new(1);
const PAGE_TREE_ID: Ref = Ref::new(2);
const INFO_ID: Ref = Ref::new(3);
const REGULAR_FONT_ID: Ref = Ref::new(4);
const BOLD_FONT_ID: Ref = Ref::new(5);
const FIRST_PAGE_OBJECT_ID: i32 = 6;

const FONTS: [Font; 2] = [Font::Regular, Font::Bold];

const fn font_id(font: Font) -> Ref {
    match font {
        Font::Regular => REGULAR_FONT_ID,
        Font::Bold => BOLD_FONT_ID,
    }
}

/// Streams pages into a PDF document using the Standard 14 Helvetica faces.
///
/// Each indirect object is written to `out` as soon as it is complete, so
/// a page reaches the output before the next one is laid out. `finish`
/// returns the writer.
pub struct PdfSink<W> {
    out: W,
    written: usize,
    offsets: Vec<(Ref, usize)>,
    next_id: i32,
    page_ids: Vec<Ref>,
    page_width: f32,
    page_height: f32,
}

impl<W> std::fmt::Debug for PdfSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfSink")
            .field("pages", &self.page_ids.len())
            .field("written", &self.written)
            .field("page_width", &self.page_width)
            .field("page_height", &self.page_height)
            .finish_non_exhaustive()
    }
}

impl<W: Write> PdfSink<W> {
    /// Creates a sink writing a document sized for `layout` into `out`.
    #[must_use]
    pub fn new(layout: &ReportLayout, out: W) -> Self {
        Self {
            out,
            written: 0,
            offsets: Vec::new(),
            next_id: FIRST_PAGE_OBJECT_ID,
            page_ids: Vec::new(),
            page_width: layout.page_width,
            page_height: layout.page_height,
        }
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ReportError> {
        self.out
            .write_all(bytes)
            .map_err(|e| ReportError::Output(e.to_string()))?;
        self.written += bytes.len();
        Ok(())
    }

    /// Writes a chunk that holds the single object `id`.
    fn write_object(&mut self, id: Ref, chunk: &Chunk) -> Result<(), ReportError> {
        if self.written == 0 {
            self.write_bytes(PDF_HEADER)?;
        }
        self.offsets.push((id, self.written));
        self.write_bytes(chunk.as_bytes())
    }

    /// Object ids are dense from 1, so entry 0 is the only free one.
    fn write_trailer(&mut self) -> Result<(), ReportError> {
        self.offsets.sort_by_key(|(id, _)| id.get());

        let xref_offset = self.written;
        let size = self.offsets.len() + 1;

        let mut trailer = format!("xref\n0 {size}\n0000000000 65535 f\r\n");
        for (_, offset) in &self.offsets {
            trailer.push_str(&format!("{offset:010} 00000 n\r\n"));
        }
        trailer.push_str(&format!(
            "trailer\n<<\n  /Size {size}\n  /Root {} 0 R\n  /Info {} 0 R\n>>\n",
            CATALOG_ID.get(),
            INFO_ID.get(),
        ));
        trailer.push_str(&format!("startxref\n{xref_offset}\n%%EOF"));

        self.write_bytes(trailer.as_bytes())
    }

    fn encode_content(&self, page: &Page) -> Content {
        let mut content = Content::new();

        for op in page.ops() {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    font,
                    size,
                    text,
                } => {
                    let baseline = self.page_height - y - ASCENDER * size;
                    content.begin_text();
                    content.set_font(Name(font.resource_name()), *size);
                    content.next_line(*x, baseline);
                    content.show(Str(&encode_win_ansi(text)));
                    content.end_text();
                }
                DrawOp::Rule { from_x, to_x, y } => {
                    let y = self.page_height - y;
                    content.move_to(*from_x, y);
                    content.line_to(*to_x, y);
                    content.stroke();
                }
            }
        }

        content
    }
}

impl<W: Write> PageSink for PdfSink<W> {
    type Output = W;

    fn emit_page(&mut self, page: Page) -> Result<(), ReportError> {
        let page_id = self.alloc();
        let content_id = self.alloc();
        let data = self.encode_content(&page).finish();

        let mut chunk = Chunk::new();
        let mut writer = chunk.page(page_id);
        writer.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height));
        writer.parent(PAGE_TREE_ID);
        writer.contents(content_id);
        writer
            .resources()
            .fonts()
            .pair(Name(Font::Regular.resource_name()), REGULAR_FONT_ID)
            .pair(Name(Font::Bold.resource_name()), BOLD_FONT_ID);
        writer.finish();
        self.write_object(page_id, &chunk)?;

        let mut chunk = Chunk::new();
        chunk.stream(content_id, &data);
        self.write_object(content_id, &chunk)?;

        self.page_ids.push(page_id);
        Ok(())
    }

    fn finish(mut self) -> Result<Self::Output, ReportError> {
        let count = i32::try_from(self.page_ids.len())
            .map_err(|_| ReportError::TooManyPages(self.page_ids.len()))?;

        let mut chunk = Chunk::new();
        chunk
            .pages(PAGE_TREE_ID)
            .kids(self.page_ids.iter().copied())
            .count(count);
        self.write_object(PAGE_TREE_ID, &chunk)?;

        for font in FONTS {
            let id = font_id(font);
            let mut chunk = Chunk::new();
            chunk
                .type1_font(id)
                .base_font(Name(font.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            self.write_object(id, &chunk)?;
        }

        let mut chunk = Chunk::new();
        chunk
            .indirect(CATALOG_ID)
            .start::<Catalog>()
            .pages(PAGE_TREE_ID);
        self.write_object(CATALOG_ID, &chunk)?;

        let title = format!("{REPORT_TITLE} {REPORT_SUBTITLE}");
        let mut chunk = Chunk::new();
        chunk
            .indirect(INFO_ID)
            .start::<DocumentInfo>()
            .title(TextStr(&title))
            .producer(TextStr(REPORT_TITLE));
        self.write_object(INFO_ID, &chunk)?;

        self.write_trailer()?;
        self.out
            .flush()
            .map_err(|e| ReportError::Output(e.to_string()))?;
        Ok(self.out)
    }
}

/// Encodes text for a font using `WinAnsiEncoding`.
///
/// Characters the encoding lacks become `?`.
#[must_use]
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| win_ansi_code(ch).unwrap_or(b'?'))
        .collect()
}

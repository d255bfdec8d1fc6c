//! PDF 导出：分页报告（标题页 + 每条用例一节，节间分页）。
//!
//! 说明：
//! - 使用内置 Helvetica 字体，不依赖外部字体文件。
//! - 值列按估算字宽做折行；超出页底时续页，不截断内容。
//! - 页面为 US Letter，坐标单位 Mm，原点在左下角。

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use chrono::Local;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};
use thiserror::Error;

use super::model::{RawTestCase, DOCUMENT_TITLE};
use super::normalize::normalize_batch;

const PAGE_WIDTH_MM: f64 = 215.9;
const PAGE_HEIGHT_MM: f64 = 279.4;
const MARGIN_MM: f64 = 12.7;
const VALUE_COL_X_MM: f64 = 55.9;

const TITLE_PT: f64 = 24.0;
const HEADING_PT: f64 = 14.0;
const BODY_PT: f64 = 10.0;

/// 正文行距与值列可容纳的估算字符数（Helvetica 平均字宽 ≈ 0.5em）。
const LINE_STEP_MM: f64 = 4.8;
const VALUE_WRAP_CHARS: usize = 80;

const PT_TO_MM: f64 = 0.352_778;

#[derive(Debug, Error)]
pub enum ExportPdfError {
    #[error("pdf error: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportPdfOutcome {
    pub sections: u32,
    pub pages: u32,
    pub duration_ms: u32,
}

struct PageCursor {
    layer: PdfLayerReference,
    y: f64,
    pages: u32,
}

impl PageCursor {
    fn new(doc: &PdfDocumentReference, page: printpdf::PdfPageIndex, layer: printpdf::PdfLayerIndex) -> Self {
        Self {
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT_MM - MARGIN_MM,
            pages: 1,
        }
    }

    fn break_page(&mut self, doc: &PdfDocumentReference) {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");
        self.layer = doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        self.pages += 1;
    }

    fn ensure_room(&mut self, doc: &PdfDocumentReference, needed_mm: f64) {
        if self.y - needed_mm < MARGIN_MM {
            self.break_page(doc);
        }
    }

    fn text(&self, text: &str, size_pt: f64, x: f64, font: &IndirectFontRef) {
        self.layer.use_text(text, size_pt as f32, Mm(x as f32), Mm(self.y as f32), font);
    }

    fn advance(&mut self, step_mm: f64) {
        self.y -= step_mm;
    }
}

/// 估算居中起点（内置字体拿不到精确测宽，报告排版用估算足够）。
fn centered_x(text: &str, size_pt: f64) -> f64 {
    let est_width = text.chars().count() as f64 * size_pt * 0.5 * PT_TO_MM;
    ((PAGE_WIDTH_MM - est_width) / 2.0).max(MARGIN_MM)
}

/// 按空白贪心折行；保留已有换行，超长不可分词硬切。
fn wrap_value(value: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for source_line in value.split('\n') {
        let mut current = String::new();
        for word in source_line.split_whitespace() {
            let mut word = word;
            while word.chars().count() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let split_at = word
                    .char_indices()
                    .nth(max_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                lines.push(word[..split_at].to_string());
                word = &word[split_at..];
            }
            let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
            if !current.is_empty() && needed > max_chars {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

fn heading_color() -> Color {
    Color::Rgb(Rgb::new(0.122, 0.278, 0.533, None))
}

fn body_color() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

pub fn export_test_cases_pdf(
    out_path: &Path,
    records: &[RawTestCase],
) -> Result<ExportPdfOutcome, ExportPdfError> {
    let started = Instant::now();
    let cases = normalize_batch(records);

    let (doc, page, layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "Layer 1",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut cursor = PageCursor::new(&doc, page, layer);

    cursor.advance(TITLE_PT * PT_TO_MM);
    cursor.layer.set_fill_color(heading_color());
    cursor.text(DOCUMENT_TITLE, TITLE_PT, centered_x(DOCUMENT_TITLE, TITLE_PT), &font_bold);
    cursor.advance(10.0);

    cursor.layer.set_fill_color(body_color());
    let metadata = format!(
        "Generated on: {} | Total Test Cases: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        cases.len()
    );
    cursor.text(&metadata, BODY_PT, centered_x(&metadata, BODY_PT), &font);
    cursor.advance(12.0);

    for (idx, case) in cases.iter().enumerate() {
        if idx > 0 {
            cursor.break_page(&doc);
        }

        let heading = format!("Test Case #{}: {}", idx + 1, case.name);
        cursor.ensure_room(&doc, 14.0);
        cursor.layer.set_fill_color(heading_color());
        cursor.text(&heading, HEADING_PT, MARGIN_MM, &font_bold);
        cursor.layer.set_fill_color(body_color());
        cursor.advance(9.0);

        for (label, value) in case.detail_rows() {
            let lines = wrap_value(value, VALUE_WRAP_CHARS);
            cursor.ensure_room(&doc, LINE_STEP_MM);
            cursor.text(label, BODY_PT, MARGIN_MM, &font_bold);
            for line in &lines {
                cursor.ensure_room(&doc, LINE_STEP_MM);
                cursor.text(line, BODY_PT, VALUE_COL_X_MM, &font);
                cursor.advance(LINE_STEP_MM);
            }
            if lines.is_empty() {
                cursor.advance(LINE_STEP_MM);
            }
            cursor.advance(1.5);
        }
    }

    let pages = cursor.pages;
    let file = File::create(out_path)?;
    doc.save(&mut BufWriter::new(file))?;

    let duration_ms = started.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    Ok(ExportPdfOutcome {
        sections: cases.len().min(u32::MAX as usize) as u32,
        pages,
        duration_ms,
    })
}

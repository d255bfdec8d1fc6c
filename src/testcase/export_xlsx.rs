//! XLSX 导出：单表（标题 + 元数据 + 冻结表头 + 每条用例一行）。
//!
//! 硬约束：
//! - 10 列表头列名与顺序逐字冻结（见 `model::TABLE_HEADERS`）。
//! - Status 列按 pass/fail（大小写不敏感）着色，其余值不加样式。
//! - 空批次仍然产出结构合法的文件（仅标题/元数据/表头）。

use std::path::Path;
use std::time::Instant;

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use thiserror::Error;

use super::model::{RawTestCase, StatusKind, DOCUMENT_TITLE, TABLE_HEADERS};
use super::normalize::normalize_batch;

pub const SHEET_NAME: &str = "Test Cases";

const TITLE_ROW: u32 = 0;
const METADATA_ROW: u32 = 1;
const HEADER_ROW: u32 = 2;
const STATUS_COL: u16 = 7;
const LAST_COL: u16 = 9;

/// 每列宽度（字符单位），与表头逐列对应。
pub const COLUMN_WIDTHS: [f64; 10] = [15.0, 30.0, 35.0, 25.0, 40.0, 35.0, 35.0, 15.0, 12.0, 15.0];

#[derive(Debug, Error)]
pub enum ExportXlsxError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportXlsxOutcome {
    pub headers: Vec<String>,
    pub rows: u32,
    pub duration_ms: u32,
}

pub fn export_test_cases_xlsx(
    out_path: &Path,
    records: &[RawTestCase],
) -> Result<ExportXlsxOutcome, ExportXlsxError> {
    let started = Instant::now();
    let cases = normalize_batch(records);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let title_format = Format::new()
        .set_bold()
        .set_font_size(16)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x366092))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    sheet.merge_range(TITLE_ROW, 0, TITLE_ROW, LAST_COL, DOCUMENT_TITLE, &title_format)?;
    sheet.set_row_height(TITLE_ROW, 30)?;

    let metadata_format = Format::new()
        .set_italic()
        .set_font_size(10)
        .set_align(FormatAlign::Center);
    let metadata = format!(
        "Generated on: {} | Total Test Cases: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        cases.len()
    );
    sheet.merge_range(METADATA_ROW, 0, METADATA_ROW, LAST_COL, &metadata, &metadata_format)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_size(11)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x4472C4))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin);
    for (col, header) in TABLE_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(HEADER_ROW, col as u16, *header, &header_format)?;
    }
    sheet.set_row_height(HEADER_ROW, 35)?;

    let cell_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Thin);
    let pass_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Thin)
        .set_background_color(Color::RGB(0xC6EFCE))
        .set_font_color(Color::RGB(0x006100));
    let fail_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Thin)
        .set_background_color(Color::RGB(0xFFC7CE))
        .set_font_color(Color::RGB(0x9C0006));

    let mut row = HEADER_ROW + 1;
    for case in &cases {
        let status_format = match case.status_kind() {
            StatusKind::Pass => &pass_format,
            StatusKind::Fail => &fail_format,
            StatusKind::Other => &cell_format,
        };

        for (col, value) in case.table_row().iter().enumerate() {
            let col = col as u16;
            let format = if col == STATUS_COL {
                status_format
            } else {
                &cell_format
            };
            sheet.write_string_with_format(row, col, *value, format)?;
        }
        sheet.set_row_height(row, 60)?;
        row += 1;
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    workbook.save(out_path)?;

    let duration_ms = started.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    Ok(ExportXlsxOutcome {
        headers: TABLE_HEADERS.iter().map(|s| (*s).to_string()).collect(),
        rows: cases.len().min(u32::MAX as usize) as u32,
        duration_ms,
    })
}

//! DOCX 导出：标题 + 元数据 + 每条用例（标题行 + 两列字段表）。
//!
//! 字段默认值一律来自共享归一化，本模块只负责排版。

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use chrono::Local;
use docx_rs::{AlignmentType, Docx, DocxError, Paragraph, Run, Table, TableCell, TableRow};
use thiserror::Error;

use super::model::{RawTestCase, DOCUMENT_TITLE};
use super::normalize::normalize_batch;

/// 字号（half-point）：标题 20pt / 用例标题 14pt / 正文 11pt。
const TITLE_SIZE: usize = 40;
const HEADING_SIZE: usize = 28;
const BODY_SIZE: usize = 22;

/// 两列表格的列宽（dxa）。
const GRID_LABEL: usize = 2310;
const GRID_VALUE: usize = 7050;

#[derive(Debug, Error)]
pub enum ExportDocxError {
    #[error("docx error: {0}")]
    Docx(#[from] DocxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportDocxOutcome {
    pub sections: u32,
    pub duration_ms: u32,
}

fn text_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).size(BODY_SIZE))
}

fn label_cell(label: &str) -> TableCell {
    TableCell::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(label).size(BODY_SIZE).bold()))
}

/// 值里允许出现换行（例如 steps），逐行拆成 run。
fn value_cell(value: &str) -> TableCell {
    let mut paragraph = Paragraph::new();
    for (i, line) in value.split('\n').enumerate() {
        let mut run = Run::new();
        if i > 0 {
            run = run.add_break(docx_rs::BreakType::TextWrapping);
        }
        run = run.add_text(line).size(BODY_SIZE);
        paragraph = paragraph.add_run(run);
    }
    TableCell::new().add_paragraph(paragraph)
}

pub fn export_test_cases_docx(
    out_path: &Path,
    records: &[RawTestCase],
) -> Result<ExportDocxOutcome, ExportDocxError> {
    let started = Instant::now();
    let cases = normalize_batch(records);

    let mut docx = Docx::new().add_paragraph(
        Paragraph::new()
            .add_run(Run::new().add_text(DOCUMENT_TITLE).size(TITLE_SIZE).bold())
            .align(AlignmentType::Center),
    );

    docx = docx
        .add_paragraph(text_paragraph(&format!(
            "Generated on: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )))
        .add_paragraph(text_paragraph(&format!(
            "Total Test Cases: {}",
            cases.len()
        )))
        .add_paragraph(Paragraph::new());

    for (idx, case) in cases.iter().enumerate() {
        let heading = format!("Test Case #{}: {}", idx + 1, case.name);
        docx = docx.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(heading).size(HEADING_SIZE).bold()),
        );

        let rows: Vec<TableRow> = case
            .detail_rows()
            .iter()
            .map(|(label, value)| TableRow::new(vec![label_cell(label), value_cell(value)]))
            .collect();
        docx = docx
            .add_table(Table::new(rows).set_grid(vec![GRID_LABEL, GRID_VALUE]))
            .add_paragraph(Paragraph::new());
    }

    let file = File::create(out_path)?;
    docx.build().pack(file).map_err(DocxError::from)?;

    let duration_ms = started.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    Ok(ExportDocxOutcome {
        sections: cases.len().min(u32::MAX as usize) as u32,
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Read;

    use serde_json::json;
    use uuid::Uuid;

    fn raw(value: serde_json::Value) -> RawTestCase {
        serde_json::from_value(value).unwrap()
    }

    fn temp_out() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("tc-export-{}.docx", Uuid::new_v4()))
    }

    fn document_xml(path: &Path) -> String {
        let file = File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name("word/document.xml").unwrap();
        let mut xml = String::new();
        entry.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn export_renders_fields_with_shared_defaults() {
        let records = vec![raw(json!({"id": "TC_099", "name": "X"}))];
        let out_path = temp_out();

        let outcome = export_test_cases_docx(&out_path, &records).unwrap();
        println!("outPath={}", out_path.display());
        println!("outcome={outcome:?}");
        assert_eq!(outcome.sections, 1);
        assert!(std::fs::metadata(&out_path).unwrap().len() > 0);

        let xml = document_xml(&out_path);
        assert!(xml.contains("Test Cases Documentation"));
        assert!(xml.contains("Test Case #1: X"));
        assert!(xml.contains("TC_099"));
        assert!(xml.contains("N/A"));
        assert!(xml.contains("Not Executed"));
        assert!(xml.contains("Medium"));
        assert!(xml.contains("Functional"));

        std::fs::remove_file(&out_path).ok();
    }

    #[test]
    fn empty_batch_still_produces_a_valid_document() {
        let out_path = temp_out();
        let outcome = export_test_cases_docx(&out_path, &[]).unwrap();
        assert_eq!(outcome.sections, 0);

        let xml = document_xml(&out_path);
        assert!(xml.contains("Test Cases Documentation"));
        assert!(xml.contains("Total Test Cases: 0"));
        assert!(!xml.contains("Test Case #1"));

        std::fs::remove_file(&out_path).ok();
    }

    #[test]
    fn multiline_steps_survive_as_separate_lines() {
        let records = vec![raw(json!({
            "id": "TC_001",
            "name": "Login",
            "steps": "1. open page\n2. submit form",
        }))];
        let out_path = temp_out();
        export_test_cases_docx(&out_path, &records).unwrap();

        let xml = document_xml(&out_path);
        assert!(xml.contains("1. open page"));
        assert!(xml.contains("2. submit form"));

        std::fs::remove_file(&out_path).ok();
    }
}

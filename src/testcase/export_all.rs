//! 导出编排：对同一批记录依次调用 Word / Excel / PDF 三个 sink。
//!
//! 约束：
//! - 单个 sink 失败只记录该格式的错误，不中断其余 sink；
//! - 三个 sink 各自对同一批原始记录做归一化（规则共享，结果一致）；
//! - 无重试：所有操作本地、确定性，失败一次即定论。

use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use super::export_docx::{export_test_cases_docx, ExportDocxError};
use super::export_pdf::{export_test_cases_pdf, ExportPdfError};
use super::export_xlsx::{export_test_cases_xlsx, ExportXlsxError};
use super::model::RawTestCase;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Word,
    Excel,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Word, ExportFormat::Excel, ExportFormat::Pdf];

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Word => "WORD",
            ExportFormat::Excel => "EXCEL",
            ExportFormat::Pdf => "PDF",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Word => "docx",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("word export failed: {0}")]
    Word(#[from] ExportDocxError),

    #[error("excel export failed: {0}")]
    Excel(#[from] ExportXlsxError),

    #[error("pdf export failed: {0}")]
    Pdf(#[from] ExportPdfError),
}

#[derive(Debug)]
pub struct SinkReport {
    pub format: ExportFormat,
    pub result: Result<PathBuf, SinkError>,
}

#[derive(Debug)]
pub struct ExportAllOutcome {
    pub reports: Vec<SinkReport>,
}

impl ExportAllOutcome {
    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.result.is_ok()).count()
    }

    pub fn attempted(&self) -> usize {
        self.reports.len()
    }
}

fn run_sink(
    format: ExportFormat,
    records: &[RawTestCase],
    out_path: PathBuf,
) -> Result<PathBuf, SinkError> {
    match format {
        ExportFormat::Word => {
            export_test_cases_docx(&out_path, records)?;
        }
        ExportFormat::Excel => {
            export_test_cases_xlsx(&out_path, records)?;
        }
        ExportFormat::Pdf => {
            export_test_cases_pdf(&out_path, records)?;
        }
    }
    Ok(out_path)
}

/// 对一批记录执行全部导出；`base_name` 不带扩展名。
pub fn export_all(records: &[RawTestCase], out_dir: &Path, base_name: &str) -> ExportAllOutcome {
    let reports = ExportFormat::ALL
        .iter()
        .map(|&format| {
            let out_path = out_dir.join(format!("{base_name}.{}", format.extension()));
            let result = run_sink(format, records, out_path);
            if let Err(err) = &result {
                warn!("{} sink failed: {err}", format.label());
            }
            SinkReport { format, result }
        })
        .collect();

    ExportAllOutcome { reports }
}

//! 输入分发：按扩展名选择提取方式并读取测试用例。
//!
//! - `.json` → 整体反序列化（期望形状：mapping 数组，不做 schema 校验）
//! - `.cs`   → 属性注解提取（策略 A，回退 B）
//! - `.py`   → 行注释提取（策略 C）
//!
//! 扩展名匹配大小写不敏感；读取失败与解析失败是终止性错误，
//! 由调用方整体放弃本次导出。

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::extract::{extract, SourceKind};
use super::model::RawTestCase;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found or unreadable: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported input format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
}

/// 读取一个输入文件并返回原始记录序列。
pub fn load_test_cases(path: &Path) -> Result<Vec<RawTestCase>, LoadError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let kind = match extension.as_str() {
        "json" => None,
        "cs" => Some(SourceKind::AttributeAnnotated),
        "py" => Some(SourceKind::CommentAnnotated),
        _ => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            })
        }
    };

    let content = fs::read_to_string(path).map_err(|source| LoadError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    match kind {
        None => {
            serde_json::from_str::<Vec<RawTestCase>>(&content).map_err(|source| {
                LoadError::MalformedInput {
                    path: path.to_path_buf(),
                    source,
                }
            })
        }
        Some(kind) => Ok(extract(&content, kind)),
    }
}

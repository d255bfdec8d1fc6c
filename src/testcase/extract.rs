//! 注释源码的启发式用例提取（策略 A / B / C）。
//!
//! 说明：
//! - 这是对自由文本的 best-effort 正则扫描，不是语法解析器；
//!   任何输入都不会失败，无匹配返回空列表即为合法结果。
//! - 三条策略均单趟扫描、保持源码出现顺序；合成 id 计数器
//!   只在一次扫描内有效。
//! - 属性注解源（如测试框架源码）先走策略 A，仅当 A 无产出时回退策略 B；
//!   纯注释源只走策略 C。

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{RawTestCase, DEFAULT_NAME};
use super::normalize::synthesized_id;

/// 注释源码的两种输入类别（由 loader 按扩展名选定）。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// 属性注解的测试方法源（策略 A，回退 B）。
    AttributeAnnotated,
    /// 行注释标记的脚本源（策略 C）。
    CommentAnnotated,
}

/// 策略 A：可选的 `///` 摘要行 + 测试标记属性 + 可选可见性修饰 + async 方法声明。
static ATTRIBUTE_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:\s*///\s*(?P<summary>.*))?\s*\[\s*(?:Fact|Test|TestCase)[^\]]*\]\s*(?:public|private|protected)?\s*async\s*Task\s+(?P<method>\w+)",
    )
    .unwrap()
});

/// 策略 B：带参标记与行注释标记合并为一条 alternation，
/// 产出顺序即两种子模式按匹配起点合并后的从左到右顺序。
static MARKER_FALLBACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[TestCase\s*\(([^)]*)\)\]|//\s*TestCase:\s*(.*)").unwrap());

/// 策略 C：`# TestCase: <id>, <name>` 行注释。
static COMMENT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\s*TestCase:\s*(.*)").unwrap());

pub fn extract(text: &str, kind: SourceKind) -> Vec<RawTestCase> {
    match kind {
        SourceKind::AttributeAnnotated => {
            let records = strategy_attribute_methods(text);
            if records.is_empty() {
                strategy_marker_fallback(text)
            } else {
                records
            }
        }
        SourceKind::CommentAnnotated => strategy_comment_marker(text),
    }
}

fn strategy_attribute_methods(text: &str) -> Vec<RawTestCase> {
    let mut records: Vec<RawTestCase> = Vec::new();
    for caps in ATTRIBUTE_METHOD.captures_iter(text) {
        let method = &caps["method"];
        let summary = caps
            .name("summary")
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty());

        let name = match summary {
            Some(s) => s.to_string(),
            None => method.replace('_', " "),
        };
        let id = synthesized_id(records.len() as u32 + 1);
        records.push(RawTestCase::from_id_name(id, name));
    }
    records
}

fn strip_marker_arg(arg: &str) -> &str {
    arg.trim_matches(|c| c == ' ' || c == '"')
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}

fn strategy_marker_fallback(text: &str) -> Vec<RawTestCase> {
    let mut records: Vec<RawTestCase> = Vec::new();
    for caps in MARKER_FALLBACK.captures_iter(text) {
        let (id, name) = if let Some(args) = caps.get(1) {
            let parts: Vec<&str> = args.as_str().split(',').map(strip_marker_arg).collect();
            (
                non_empty(parts.first().copied()).map(str::to_string),
                non_empty(parts.get(1).copied()).map(str::to_string),
            )
        } else {
            let rest = caps.get(2).map(|m| m.as_str().trim());
            (None, non_empty(rest).map(str::to_string))
        };

        let id = id.unwrap_or_else(|| synthesized_id(records.len() as u32 + 1));
        let name = name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        records.push(RawTestCase::from_id_name(id, name));
    }
    records
}

fn strategy_comment_marker(text: &str) -> Vec<RawTestCase> {
    let mut records: Vec<RawTestCase> = Vec::new();
    for caps in COMMENT_MARKER.captures_iter(text) {
        let rest = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let parts: Vec<&str> = rest.split(',').map(str::trim).collect();

        let id = non_empty(parts.first().copied())
            .map(str::to_string)
            .unwrap_or_else(|| synthesized_id(records.len() as u32 + 1));
        let name = non_empty(parts.get(1).copied())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        records.push(RawTestCase::from_id_name(id, name));
    }
    records
}

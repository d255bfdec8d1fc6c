//! 测试用例导出：稳定数据模型。
//!
//! 约束：
//! - 原始记录是一张 JSON mapping，加载阶段不做 schema 校验；
//!   缺字段/类型不符在归一化阶段以默认值兜底，不报错。
//! - 展示用的 10 个字段（含默认值规则）由 `normalize` 统一产出，
//!   三个导出 sink 与 CLI 摘要必须共用同一套规则，禁止各自兜底。
//! - 表头列名与顺序冻结，不允许改动。

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_PRECONDITIONS: &str = "preconditions";
pub const FIELD_STEPS: &str = "steps";
pub const FIELD_EXPECTED_RESULT: &str = "expected_result";
pub const FIELD_ACTUAL_RESULT: &str = "actual_result";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_PRIORITY: &str = "priority";
pub const FIELD_TEST_TYPE: &str = "test_type";

pub const DEFAULT_NAME: &str = "Unnamed Test";
pub const DEFAULT_TEXT: &str = "N/A";
pub const DEFAULT_ACTUAL_RESULT: &str = "";
pub const DEFAULT_STATUS: &str = "Not Executed";
pub const DEFAULT_PRIORITY: &str = "Medium";
pub const DEFAULT_TEST_TYPE: &str = "Functional";

/// 表格型文档（Excel）的 10 列表头（冻结）。
pub const TABLE_HEADERS: [&str; 10] = [
    "Test Case ID",
    "Test Case Name",
    "Description",
    "Preconditions",
    "Test Steps",
    "Expected Result",
    "Actual Result",
    "Status",
    "Priority",
    "Test Type",
];

/// 字段/值型文档（Word / PDF）的 9 行字段标签（冻结；name 出现在用例标题里）。
pub const DETAIL_LABELS: [&str; 9] = [
    "ID",
    "Description",
    "Preconditions",
    "Test Steps",
    "Expected Result",
    "Actual Result",
    "Status",
    "Priority",
    "Test Type",
];

pub const DOCUMENT_TITLE: &str = "Test Cases Documentation";

/// 一条原始测试用例记录：未经校验的 JSON mapping。
///
/// 结构化输入（JSON 文件）整体反序列化为 `Vec<RawTestCase>`；
/// 注释源码提取器也用它承载 id/name 两个字段。
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RawTestCase(pub JsonMap<String, JsonValue>);

impl RawTestCase {
    pub fn new() -> Self {
        Self(JsonMap::new())
    }

    /// 提取器产物：只有 id / name 的记录。
    pub fn from_id_name(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut map = JsonMap::new();
        map.insert(FIELD_ID.to_string(), JsonValue::String(id.into()));
        map.insert(FIELD_NAME.to_string(), JsonValue::String(name.into()));
        Self(map)
    }

    /// 读取一个字段的字符串视图。
    ///
    /// - 字符串值原样返回；
    /// - `null` 视为缺失（交给默认值）；
    /// - 其余标量（数字/布尔）按 JSON 文本渲染，不视为错误。
    pub fn field(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// 状态列的展示分类（大小写不敏感），仅影响高亮，不改写原值。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Pass,
    Fail,
    Other,
}

/// 归一化后的 10 个展示字段。构造入口见 `normalize`。
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseFields {
    pub id: String,
    pub name: String,
    pub description: String,
    pub preconditions: String,
    pub steps: String,
    pub expected_result: String,
    pub actual_result: String,
    pub status: String,
    pub priority: String,
    pub test_type: String,
}

impl TestCaseFields {
    /// 与 `TABLE_HEADERS` 逐列对应的一行取值。
    pub fn table_row(&self) -> [&str; 10] {
        [
            &self.id,
            &self.name,
            &self.description,
            &self.preconditions,
            &self.steps,
            &self.expected_result,
            &self.actual_result,
            &self.status,
            &self.priority,
            &self.test_type,
        ]
    }

    /// 与 `DETAIL_LABELS` 逐行对应的字段/值对。
    pub fn detail_rows(&self) -> [(&'static str, &str); 9] {
        [
            (DETAIL_LABELS[0], &self.id),
            (DETAIL_LABELS[1], &self.description),
            (DETAIL_LABELS[2], &self.preconditions),
            (DETAIL_LABELS[3], &self.steps),
            (DETAIL_LABELS[4], &self.expected_result),
            (DETAIL_LABELS[5], &self.actual_result),
            (DETAIL_LABELS[6], &self.status),
            (DETAIL_LABELS[7], &self.priority),
            (DETAIL_LABELS[8], &self.test_type),
        ]
    }

    pub fn status_kind(&self) -> StatusKind {
        if self.status.eq_ignore_ascii_case("pass") {
            StatusKind::Pass
        } else if self.status.eq_ignore_ascii_case("fail") {
            StatusKind::Fail
        } else {
            StatusKind::Other
        }
    }
}

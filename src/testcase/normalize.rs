//! 共享归一化：原始记录 → 展示字段。
//!
//! 约束：
//! - 默认值规则只允许在这里出现一份；sink / CLI 不得各自兜底。
//! - 合成 id 序号只对"无 id 记录"递增（TC_001、TC_002…，批内不重复），
//!   计数器仅在一次 `normalize_batch` 调用内有效，不是进程级状态。
//! - `id` 为空白串时按缺失处理，保证渲染期 id 非空。

use super::model::{
    RawTestCase, TestCaseFields, DEFAULT_ACTUAL_RESULT, DEFAULT_NAME, DEFAULT_PRIORITY,
    DEFAULT_STATUS, DEFAULT_TEST_TYPE, DEFAULT_TEXT, FIELD_ACTUAL_RESULT, FIELD_DESCRIPTION,
    FIELD_EXPECTED_RESULT, FIELD_ID, FIELD_NAME, FIELD_PRECONDITIONS, FIELD_PRIORITY,
    FIELD_STATUS, FIELD_STEPS, FIELD_TEST_TYPE,
};

/// 合成 id 的唯一定义，提取器与归一化共用。
pub fn synthesized_id(seq: u32) -> String {
    format!("TC_{seq:03}")
}

fn explicit_id(raw: &RawTestCase) -> Option<String> {
    raw.field(FIELD_ID).filter(|s| !s.trim().is_empty())
}

fn field_or(raw: &RawTestCase, key: &str, default: &str) -> String {
    raw.field(key).unwrap_or_else(|| default.to_string())
}

/// 归一化一条记录；`fallback_seq` 在记录无 id 时提供合成序号。
pub fn normalize_record(raw: &RawTestCase, fallback_seq: u32) -> TestCaseFields {
    TestCaseFields {
        id: explicit_id(raw).unwrap_or_else(|| synthesized_id(fallback_seq)),
        name: field_or(raw, FIELD_NAME, DEFAULT_NAME),
        description: field_or(raw, FIELD_DESCRIPTION, DEFAULT_TEXT),
        preconditions: field_or(raw, FIELD_PRECONDITIONS, DEFAULT_TEXT),
        steps: field_or(raw, FIELD_STEPS, DEFAULT_TEXT),
        expected_result: field_or(raw, FIELD_EXPECTED_RESULT, DEFAULT_TEXT),
        actual_result: field_or(raw, FIELD_ACTUAL_RESULT, DEFAULT_ACTUAL_RESULT),
        status: field_or(raw, FIELD_STATUS, DEFAULT_STATUS),
        priority: field_or(raw, FIELD_PRIORITY, DEFAULT_PRIORITY),
        test_type: field_or(raw, FIELD_TEST_TYPE, DEFAULT_TEST_TYPE),
    }
}

/// 按批归一化，保持输入顺序。
pub fn normalize_batch(records: &[RawTestCase]) -> Vec<TestCaseFields> {
    let mut idless_seen: u32 = 0;
    records
        .iter()
        .map(|raw| {
            if explicit_id(raw).is_none() {
                idless_seen += 1;
            }
            normalize_record(raw, idless_seen)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawTestCase {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_fields_get_documented_defaults() {
        let batch = vec![raw(json!({"id": "TC_099", "name": "X"}))];
        let fields = normalize_batch(&batch);

        assert_eq!(fields.len(), 1);
        let f = &fields[0];
        assert_eq!(f.id, "TC_099");
        assert_eq!(f.name, "X");
        assert_eq!(f.description, "N/A");
        assert_eq!(f.preconditions, "N/A");
        assert_eq!(f.steps, "N/A");
        assert_eq!(f.expected_result, "N/A");
        assert_eq!(f.actual_result, "");
        assert_eq!(f.status, "Not Executed");
        assert_eq!(f.priority, "Medium");
        assert_eq!(f.test_type, "Functional");
    }

    #[test]
    fn empty_record_is_fully_defaulted() {
        let fields = normalize_batch(&[RawTestCase::new()]);
        assert_eq!(fields[0].id, "TC_001");
        assert_eq!(fields[0].name, "Unnamed Test");
    }

    #[test]
    fn synthesized_ids_count_only_idless_records() {
        let batch = vec![
            raw(json!({"name": "a"})),
            raw(json!({"id": "TC_500", "name": "b"})),
            raw(json!({"name": "c"})),
            raw(json!({"name": "d"})),
        ];
        let ids: Vec<String> = normalize_batch(&batch).into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["TC_001", "TC_500", "TC_002", "TC_003"]);
    }

    #[test]
    fn blank_id_counts_as_missing() {
        let batch = vec![raw(json!({"id": "  "})), raw(json!({"id": ""}))];
        let ids: Vec<String> = normalize_batch(&batch).into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["TC_001", "TC_002"]);
    }

    #[test]
    fn null_field_behaves_like_missing() {
        let fields = normalize_batch(&[raw(json!({"id": null, "status": null}))]);
        assert_eq!(fields[0].id, "TC_001");
        assert_eq!(fields[0].status, "Not Executed");
    }

    #[test]
    fn present_fields_pass_through_untouched() {
        let batch = vec![raw(json!({
            "id": "TC_010",
            "name": "Login",
            "description": "d",
            "preconditions": "p",
            "steps": "1. x\n2. y",
            "expected_result": "ok",
            "actual_result": "ok",
            "status": "Pass",
            "priority": "High",
            "test_type": "Negative Testing",
        }))];
        let f = &normalize_batch(&batch)[0];
        assert_eq!(f.steps, "1. x\n2. y");
        assert_eq!(f.status, "Pass");
        assert_eq!(f.test_type, "Negative Testing");
    }

    #[test]
    fn synthesized_id_is_zero_padded() {
        assert_eq!(synthesized_id(1), "TC_001");
        assert_eq!(synthesized_id(12), "TC_012");
        assert_eq!(synthesized_id(123), "TC_123");
        assert_eq!(synthesized_id(1234), "TC_1234");
    }
}

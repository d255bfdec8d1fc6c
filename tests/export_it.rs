//! 端到端：输入文件 → loader → 三个导出 sink。

use std::fs;
use std::path::PathBuf;

use tc_export::testcase::export_all::{export_all, ExportFormat};
use tc_export::testcase::loader::{load_test_cases, LoadError};
use tc_export::testcase::normalize::normalize_batch;
use uuid::Uuid;

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tc-export-it-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn json_file_exports_to_all_three_formats() {
    let dir = temp_dir();
    let input = dir.join("cases.json");
    fs::write(
        &input,
        r#"[
            {"id": "TC_099", "name": "X"},
            {"name": "needs an id", "status": "Fail"}
        ]"#,
    )
    .unwrap();

    let records = load_test_cases(&input).unwrap();
    assert_eq!(records.len(), 2);

    let cases = normalize_batch(&records);
    assert_eq!(cases[0].id, "TC_099");
    assert_eq!(cases[1].id, "TC_001");

    let outcome = export_all(&records, &dir, "cases_output");
    for report in &outcome.reports {
        println!("{}: {:?}", report.format.label(), report.result);
    }
    assert_eq!(outcome.succeeded(), 3);

    for format in ExportFormat::ALL {
        let path = dir.join(format!("cases_output.{}", format.extension()));
        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn annotated_source_file_exports_end_to_end() {
    let dir = temp_dir();
    let input = dir.join("login_tests.cs");
    fs::write(
        &input,
        r#"
public class LoginTests
{
    /// Valid credentials reach the dashboard
    [Fact]
    public async Task Login_Succeeds() { }

    [Test]
    public async Task Login_Rejects_Bad_Password() { }
}
"#,
    )
    .unwrap();

    let records = load_test_cases(&input).unwrap();
    let cases = normalize_batch(&records);
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].id, "TC_001");
    assert_eq!(cases[0].name, "Valid credentials reach the dashboard");
    assert_eq!(cases[1].id, "TC_002");
    assert_eq!(cases[1].name, "Login Rejects Bad Password");

    let outcome = export_all(&records, &dir, "login_tests_output");
    assert_eq!(outcome.succeeded(), 3);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn empty_extraction_still_exports_header_only_documents() {
    let dir = temp_dir();
    let input = dir.join("plain.py");
    fs::write(&input, "print('no test markers')\n").unwrap();

    let records = load_test_cases(&input).unwrap();
    assert!(records.is_empty());

    let outcome = export_all(&records, &dir, "plain_output");
    assert_eq!(outcome.succeeded(), 3);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn load_failure_aborts_before_any_sink_runs() {
    let dir = temp_dir();
    let missing = dir.join("nope.json");

    let err = load_test_cases(&missing).unwrap_err();
    println!("load error: {err}");
    assert!(matches!(err, LoadError::NotFound { .. }));

    // 加载失败即放弃：目录里不应出现任何导出产物。
    let leftovers: Vec<_> = fs::read_dir(&dir).unwrap().collect();
    assert_eq!(leftovers.len(), 0);

    fs::remove_dir_all(&dir).ok();
}

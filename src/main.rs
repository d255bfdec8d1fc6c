use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use tc_export::testcase::export_all::export_all;
use tc_export::testcase::loader::load_test_cases;
use tc_export::testcase::normalize::normalize_batch;

const DEFAULT_INPUT_FILE: &str = "test_cases.json";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let input = args.get(1).map(String::as_str).unwrap_or(DEFAULT_INPUT_FILE);
    let input = Path::new(input);

    println!("{}", "=".repeat(60));
    println!("Test Case Export Tool");
    println!("{}", "=".repeat(60));
    println!("input: {}", input.display());

    let records = load_test_cases(input)
        .with_context(|| format!("cannot load test cases from {}", input.display()))?;
    println!("loaded {} test case(s)", records.len());

    for (idx, case) in normalize_batch(&records).iter().enumerate() {
        println!("  {}. [{}] {}", idx + 1, case.id, case.name);
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "test_cases".to_string());
    let base_name = format!("{stem}_output");
    let out_dir = input.parent().filter(|p| !p.as_os_str().is_empty());
    let out_dir = out_dir.unwrap_or_else(|| Path::new("."));

    let outcome = export_all(&records, out_dir, &base_name);
    println!();
    for report in &outcome.reports {
        match &report.result {
            Ok(path) => println!("[ok] {}: {}", report.format.label(), path.display()),
            Err(err) => println!("[fail] {}: {err}", report.format.label()),
        }
    }

    println!();
    if outcome.succeeded() == 0 {
        println!("no files were generated, see errors above");
    } else {
        println!(
            "generated {} of {} file(s)",
            outcome.succeeded(),
            outcome.attempted()
        );
    }

    Ok(())
}

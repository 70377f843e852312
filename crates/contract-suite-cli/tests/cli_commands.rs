// crates/contract-suite-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests for report, list, and filter commands.
// Purpose: Run the binary against manifest class paths and check output.
// Dependencies: contract-suite-cli binary, serde_json, tempfile
// ============================================================================
//! ## Overview
//! Each test writes a small manifest tree and config file into a temporary
//! directory, then runs `contract-suite` against it and checks stdout and
//! the exit code.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const SHAPE: &str = "name = \"org.example.Shape\"\nkind = \"interface\"\n";
const CIRCLE: &str = "name = \"org.example.Circle\"\ninterfaces = [\"org.example.Shape\"]\n";
const SQUARE: &str = "name = \"org.example.Square\"\ninterfaces = [\"org.example.Shape\"]\n";
const SHAPE_TEST: &str = r#"name = "org.example.ShapeTest"
markers = [{ type = "contract", target = "org.example.Shape" }]

[[methods]]
name = "set_producer"
parameters = 1
markers = [{ type = "inject" }]

[[methods]]
name = "area_is_positive"
markers = [{ type = "test" }]
"#;
const CIRCLE_SUITE: &str = r#"name = "org.example.CircleSuite"
markers = [
    { type = "contract_suite" },
    { type = "contract_impl", class_under_test = "org.example.Circle" },
]

[[methods]]
name = "get_producer"
returns = "value"
markers = [{ type = "inject" }]
"#;

fn contract_suite_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_contract-suite"))
}

/// Writes manifests under `classes/` and a config pointing at them.
fn workspace(manifests: &[(&str, &str)], extra_config: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let classes = dir.path().join("classes");
    for (relative, text) in manifests {
        let path = classes.join(relative);
        fs::create_dir_all(path.parent().expect("manifest parent")).expect("create dirs");
        fs::write(path, text).expect("write manifest");
    }
    let config_path = dir.path().join("contract-suite.toml");
    let config = format!(
        "[discovery]\nclasspath = ['{}']\n{extra_config}",
        classes.to_string_lossy()
    );
    fs::write(&config_path, config).expect("write config");
    (dir, config_path)
}

fn shapes() -> Vec<(&'static str, &'static str)> {
    vec![
        ("org/example/Shape.ctype", SHAPE),
        ("org/example/Circle.ctype", CIRCLE),
        ("org/example/Square.ctype", SQUARE),
        ("org/example/ShapeTest.ctype", SHAPE_TEST),
        ("org/example/CircleSuite.ctype", CIRCLE_SUITE),
    ]
}

fn run(args: &[&str], config: Option<&Path>) -> Output {
    let mut command = Command::new(contract_suite_bin());
    command.args(args);
    if let Some(config) = config {
        command.arg("--config").arg(config);
    }
    command.output().expect("run contract-suite")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies the text report lists classes no suite targets.
#[test]
fn report_lists_unimplemented_classes() {
    let (_dir, config) = workspace(&shapes(), "");
    let output = run(&["report"], Some(&config));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let text = stdout(&output);
    assert!(text.contains("untested interfaces (0):"), "{text}");
    assert!(text.contains("unimplemented contracts (1):"), "{text}");
    assert!(text.contains("  org.example.Square: org.example.Shape"), "{text}");
    assert!(text.contains("configuration errors (0):"), "{text}");
}

/// Verifies section flags and JSON output select the document keys.
#[test]
fn report_json_honours_section_flags() {
    let (_dir, config) = workspace(&shapes(), "");
    let output = run(&["report", "--format", "json", "--unimplemented"], Some(&config));
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(
        value,
        serde_json::json!({
            "unimplemented": [
                { "class": "org.example.Square", "interfaces": ["org.example.Shape"] }
            ]
        })
    );
}

/// Verifies the configured format applies when no flag overrides it.
#[test]
fn report_uses_configured_format() {
    let (_dir, config) = workspace(&shapes(), "[report]\nformat = \"json\"\nerrors = false\n");
    let output = run(&["report"], Some(&config));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    let object = value.as_object().expect("report object");
    assert!(object.contains_key("untested"));
    assert!(object.contains_key("unimplemented"));
    assert!(!object.contains_key("errors"));
}

/// Verifies configuration errors produce exit code 2.
#[test]
fn report_with_configuration_errors_exits_two() {
    let mut manifests = shapes();
    manifests.retain(|(path, _)| !path.ends_with("ShapeTest.ctype"));
    let abstract_test = format!("abstract = true\n{SHAPE_TEST}");
    manifests.push(("org/example/ShapeTest.ctype", abstract_test.as_str()));
    let (_dir, config) = workspace(&manifests, "");
    let output = run(&["report", "--errors"], Some(&config));
    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("configuration errors (1):"), "{text}");
    assert!(text.contains("org.example.ShapeTest"), "{text}");
}

/// Verifies a missing config file fails with exit code 1.
#[test]
fn report_without_config_fails() {
    let dir = TempDir::new().expect("temp dir");
    let output = run(&["report"], Some(&dir.path().join("missing.toml")));
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load config"), "{stderr}");
}

/// Verifies `list` prints interface to test pairs.
#[test]
fn list_prints_live_contract_tests() {
    let (_dir, config) = workspace(&shapes(), "");
    let output = run(&["list"], Some(&config));
    assert!(output.status.success());
    assert_eq!(stdout(&output), "org.example.Shape -> org.example.ShapeTest\n");
}

/// Verifies skip entries remove contract tests from the listing.
#[test]
fn list_honours_skip_configuration() {
    let (_dir, config) = workspace(&shapes(), "skip = [\"org.example.Shape\"]\n");
    let output = run(&["list"], Some(&config));
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

/// Verifies `filter check` prints the canonical form.
#[test]
fn filter_check_prints_canonical_form() {
    let output = run(&["filter", "check", "Not(Suffix(insensitive,Test))"], None);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "Not( Suffix( Insensitive, Test ) )\n");
}

/// Verifies `filter check` rejects malformed expressions.
#[test]
fn filter_check_rejects_malformed_expression() {
    let output = run(&["filter", "check", "Or( True(), "], None);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid filter expression"), "{stderr}");
}

/// Verifies `filter test` reports a verdict per name.
#[test]
fn filter_test_reports_verdicts() {
    let args = [
        "filter",
        "test",
        "Wildcard( Sensitive, org.*Test )",
        "org.example.ShapeTest",
        "org.Shape",
    ];
    let output = run(&args, None);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "accept org.example.ShapeTest\nreject org.Shape\n");
}

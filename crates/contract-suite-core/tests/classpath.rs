// crates/contract-suite-core/tests/classpath.rs
// ============================================================================
// Test Module: Class Path Universe
// Coverage: Directory and archive manifests, nested names, scan fallback.
// ============================================================================
//! ## Overview
//! Tests for discovering and loading `.ctype` manifests from directories and
//! zip archives, and for running discovery and coverage over them.

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

mod support;

use std::fs;
use std::io::Write;
use std::path::Path;

use class_filter::ClassFilter;
use contract_suite_core::ClassPath;
use contract_suite_core::ContractRegistry;
use contract_suite_core::CoverageReport;
use contract_suite_core::DiscoverySettings;
use contract_suite_core::MarkerKind;
use contract_suite_core::TypeLoader;
use contract_suite_core::TypeSource;
use contract_suite_core::universe::LoadError;
use contract_suite_core::universe::TypeScanner;
use support::TestResult;
use support::ensure;
use support::fixtures::name;
use tempfile::TempDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

/// Manifests of a small shape hierarchy, keyed by relative path.
const SHAPES: &[(&str, &str)] = &[
    ("org/example/Shape.ctype", "name = \"org.example.Shape\"\nkind = \"interface\"\n"),
    (
        "org/example/Shape$Inner.ctype",
        "name = \"org.example.Shape$Inner\"\nkind = \"interface\"\n",
    ),
    (
        "org/example/ShapeTest.ctype",
        r#"name = "org.example.ShapeTest"
markers = [{ type = "contract", target = "org.example.Shape" }]

[[methods]]
name = "set_producer"
parameters = 1
markers = [{ type = "inject" }]

[[methods]]
name = "area_is_positive"
markers = [{ type = "test" }]
"#,
    ),
    (
        "org/example/Circle.ctype",
        "name = \"org.example.Circle\"\ninterfaces = [\"org.example.Shape\"]\n",
    ),
    (
        "org/example/Square.ctype",
        "name = \"org.example.Square\"\ninterfaces = [\"org.example.Shape\"]\n",
    ),
    (
        "org/example/CircleSuite.ctype",
        r#"name = "org.example.CircleSuite"
markers = [
    { type = "contract_suite" },
    { type = "contract_impl", class_under_test = "org.example.Circle" },
]

[[methods]]
name = "get_producer"
returns = "value"
markers = [{ type = "inject" }]
"#,
    ),
    ("META-INF/org/example/Hidden.ctype", "name = \"org.example.Hidden\"\n"),
    ("org/example/notes.txt", "not a manifest"),
];

/// Writes `files` below `root`.
fn write_tree(root: &Path, files: &[(&str, &str)]) -> TestResult {
    for (relative, text) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, text)?;
    }
    Ok(())
}

/// Writes `files` into a deflated zip archive at `path`.
fn write_archive(path: &Path, files: &[(&str, &str)]) -> TestResult {
    let mut writer = ZipWriter::new(fs::File::create(path)?);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for (relative, text) in files {
        writer.start_file(*relative, options)?;
        writer.write_all(text.as_bytes())?;
    }
    writer.finish()?;
    Ok(())
}

/// Returns candidate names under `root` as strings.
fn candidates(class_path: &ClassPath, root: &str) -> Vec<String> {
    class_path.candidates(root).iter().map(ToString::to_string).collect()
}

/// The top-level shape names, in file-name order.
const TOP_LEVEL: [&str; 5] = [
    "org.example.Circle",
    "org.example.CircleSuite",
    "org.example.Shape",
    "org.example.ShapeTest",
    "org.example.Square",
];

/// Tests directory enumeration skips metadata and nested names.
#[test]
fn directory_manifests_are_enumerated_and_loaded() -> TestResult {
    let dir = TempDir::new()?;
    write_tree(dir.path(), SHAPES)?;
    let class_path = ClassPath::new([dir.path()]);
    let names = candidates(&class_path, "org.example");
    ensure(names == TOP_LEVEL, format!("names: {names:?}"))?;
    ensure(candidates(&class_path, "org.other").is_empty(), "other roots are empty")?;
    let shape = class_path.load(&name("org.example.Shape"))?;
    ensure(shape.is_interface(), "kind is read from the manifest")?;
    let test = class_path.load(&name("org.example.ShapeTest"))?;
    ensure(test.contract() == Some(&name("org.example.Shape")), "contract marker is read")?;
    ensure(!test.is_constructible(), "manifest types cannot be instantiated")?;
    Ok(())
}

/// Tests archive enumeration matches directory enumeration.
#[test]
fn archive_manifests_are_enumerated_and_loaded() -> TestResult {
    let dir = TempDir::new()?;
    let archive = dir.path().join("shapes.jar");
    write_archive(&archive, SHAPES)?;
    let class_path = ClassPath::new([archive]);
    let mut names = candidates(&class_path, "org.example");
    names.sort();
    ensure(names == TOP_LEVEL, format!("names: {names:?}"))?;
    let suite = class_path.load(&name("org.example.CircleSuite"))?;
    ensure(suite.has_marker(MarkerKind::ContractSuite), "suite marker is read")?;
    ensure(
        matches!(class_path.load(&name("org.example.Hexagon")), Err(LoadError::NotFound(_))),
        "absent manifests are not found",
    )?;
    Ok(())
}

/// Tests unreadable locations listed first neither hide candidates nor
/// stop later locations from loading them.
#[test]
fn unreadable_location_is_skipped() -> TestResult {
    let dir = TempDir::new()?;
    let classes = dir.path().join("classes");
    write_tree(&classes, SHAPES)?;
    let broken = dir.path().join("broken.jar");
    fs::write(&broken, "not an archive")?;
    let class_path = ClassPath::new([dir.path().join("missing.jar"), broken, classes]);
    ensure(candidates(&class_path, "org.example") == TOP_LEVEL, "readable entry still lists")?;
    let circle = class_path.load(&name("org.example.Circle"))?;
    ensure(circle.interfaces() == [name("org.example.Shape")], "Circle loads past bad entries")?;
    let scanned: Vec<String> = TypeScanner::new(&class_path)
        .scan("org.example", &ClassFilter::True)
        .iter()
        .map(|descriptor| descriptor.name().to_string())
        .collect();
    ensure(scanned == TOP_LEVEL, format!("scanned: {scanned:?}"))?;
    Ok(())
}

/// Tests an archive stays usable for loads after its first open.
#[test]
fn archive_is_opened_once_for_repeated_loads() -> TestResult {
    let dir = TempDir::new()?;
    let archive = dir.path().join("shapes.jar");
    write_archive(&archive, SHAPES)?;
    let class_path = ClassPath::new([archive.clone()]);
    class_path.load(&name("org.example.Circle"))?;
    fs::remove_file(&archive)?;
    let square = class_path.load(&name("org.example.Square"))?;
    ensure(square.name() == &name("org.example.Square"), "cached archive serves later loads")?;
    let copy = class_path.clone();
    ensure(copy.load(&name("org.example.Shape")).is_ok(), "clones share opened archives")?;
    Ok(())
}

/// Tests a scan of a nested name resolves it directly.
#[test]
fn scanning_a_type_name_falls_back_to_that_type() -> TestResult {
    let dir = TempDir::new()?;
    write_tree(dir.path(), SHAPES)?;
    let class_path = ClassPath::new([dir.path()]);
    let found = TypeScanner::new(&class_path).scan("org.example.Shape$Inner", &ClassFilter::True);
    let names: Vec<String> = found.iter().map(|descriptor| descriptor.name().to_string()).collect();
    ensure(names == vec!["org.example.Shape$Inner"], format!("names: {names:?}"))?;
    Ok(())
}

/// Tests a manifest stored under the wrong name is rejected and dropped.
#[test]
fn mismatched_manifest_name_is_dropped() -> TestResult {
    let dir = TempDir::new()?;
    write_tree(dir.path(), &[
        ("org/example/Shape.ctype", "name = \"org.example.Shape\"\nkind = \"interface\"\n"),
        ("org/example/Wrong.ctype", "name = \"org.example.Other\"\n"),
    ])?;
    let class_path = ClassPath::new([dir.path()]);
    ensure(
        matches!(class_path.load(&name("org.example.Wrong")), Err(LoadError::Manifest { .. })),
        "mismatch is a manifest error",
    )?;
    let found = TypeScanner::new(&class_path).scan("org.example", &ClassFilter::True);
    ensure(found.len() == 1, "mismatched manifest is dropped from scans")?;
    Ok(())
}

/// Tests discovery and coverage run over manifests alone.
#[test]
fn coverage_over_manifests() -> TestResult {
    let dir = TempDir::new()?;
    write_tree(dir.path(), SHAPES)?;
    let class_path = ClassPath::new([dir.path()]);
    let registry = ContractRegistry::populate(&class_path, &DiscoverySettings::new());
    ensure(registry.errors().is_empty(), format!("errors: {:?}", registry.errors()))?;
    let report = CoverageReport::build(&registry, &class_path);
    ensure(report.untested_interfaces().is_empty(), "Shape has a contract test")?;
    let classes: Vec<String> =
        report.unimplemented_contracts().iter().map(|entry| entry.class.to_string()).collect();
    ensure(classes == vec!["org.example.Square"], format!("classes: {classes:?}"))?;
    Ok(())
}

// crates/contract-suite-core/tests/report.rs
// ============================================================================
// Test Module: Coverage Report
// Coverage: Untested interfaces, exemptions, unimplemented contracts.
// ============================================================================
//! ## Overview
//! Tests for the coverage report computed from a populated registry.

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

use contract_suite_core::ContractRegistry;
use contract_suite_core::CoverageReport;
use contract_suite_core::DiscoverySettings;
use contract_suite_core::Marker;
use contract_suite_core::TypeCatalog;
use contract_suite_core::TypeDescriptor;
use contract_suite_core::UnimplementedContract;
use serde_json::json;
use support::TestResult;
use support::ensure;
use support::fixtures::A;
use support::fixtures::B;
use support::fixtures::C;
use support::fixtures::IMPL;
use support::fixtures::Logs;
use support::fixtures::a_test;
use support::fixtures::abc_world;
use support::fixtures::b_test;
use support::fixtures::catalog_with;
use support::fixtures::name;

/// Builds the report for `catalog` with default settings.
fn report(catalog: &TypeCatalog) -> CoverageReport {
    let registry = ContractRegistry::populate(catalog, &DiscoverySettings::new());
    CoverageReport::build(&registry, catalog)
}

/// Tests a fully covered world reports nothing.
#[test]
fn covered_world_is_clean() -> TestResult {
    let logs = Logs::default();
    let report = report(&abc_world(&logs));
    ensure(report.untested_interfaces().is_empty(), "every interface has a test")?;
    ensure(report.unimplemented_contracts().is_empty(), "Impl is targeted by its suite")?;
    ensure(report.errors().is_empty(), "no configuration errors")?;
    Ok(())
}

/// Tests interfaces without tests and classes without suites are listed.
#[test]
fn lists_untested_interfaces_and_orphan_classes() -> TestResult {
    let logs = Logs::default();
    let catalog = catalog_with(vec![a_test(&logs).build(), b_test(&logs).build()]);
    let report = report(&catalog);
    ensure(report.untested_interfaces() == [name(C)], "C has no contract test")?;
    ensure(
        report.unimplemented_contracts()
            == [UnimplementedContract {
                class: name(IMPL),
                interfaces: vec![name(B), name(A)],
            }],
        format!("unimplemented: {:?}", report.unimplemented_contracts()),
    )?;
    Ok(())
}

/// Tests exempt interfaces and annotation types are never untested.
#[test]
fn exemptions_are_not_untested() -> TestResult {
    let logs = Logs::default();
    let catalog = catalog_with(vec![
        a_test(&logs).build(),
        TypeDescriptor::interface("org.example.Tagging").marker(Marker::NoContractTest).build(),
        TypeDescriptor::annotation("org.example.Slow").build(),
    ]);
    let report = report(&catalog);
    let untested: Vec<String> =
        report.untested_interfaces().iter().map(ToString::to_string).collect();
    ensure(untested == vec![B, C], format!("untested: {untested:?}"))?;
    Ok(())
}

/// Tests classes outside any tested closure are not reported.
#[test]
fn unrelated_classes_are_not_reported() -> TestResult {
    let logs = Logs::default();
    let catalog = catalog_with(vec![
        a_test(&logs).build(),
        TypeDescriptor::class("org.example.Standalone").build(),
        TypeDescriptor::class("org.example.AbstractShape").implements(A).abstract_type().build(),
    ]);
    let report = report(&catalog);
    let classes: Vec<String> =
        report.unimplemented_contracts().iter().map(|entry| entry.class.to_string()).collect();
    ensure(classes == vec![IMPL], format!("classes: {classes:?}"))?;
    Ok(())
}

/// Tests the report carries registry errors and serializes its entries.
#[test]
fn report_carries_errors_and_serializes() -> TestResult {
    let logs = Logs::default();
    let catalog = catalog_with(vec![a_test(&logs).abstract_type().build()]);
    let report = report(&catalog);
    ensure(report.errors().len() == 1, format!("errors: {:?}", report.errors()))?;
    let entry = report.unimplemented_contracts().first().ok_or("Impl should be listed")?;
    let value = serde_json::to_value(entry)?;
    ensure(
        value == json!({ "class": IMPL, "interfaces": [A] }),
        format!("serialized: {value}"),
    )?;
    Ok(())
}

// crates/contract-suite-cli/src/report.rs
// ============================================================================
// Module: Report Rendering
// Description: Text and JSON renderings of coverage reports.
// Purpose: Turn a `CoverageReport` into the lines or document the CLI prints.
// Dependencies: contract-suite-config, contract-suite-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Each report section is rendered only when selected. Text output prints a
//! header with the entry count followed by one indented line per entry. JSON
//! output is one object whose keys are the selected sections; configuration
//! errors are rendered through their display form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use contract_suite_config::ReportConfig;
use contract_suite_core::CoverageReport;
use contract_suite_core::TypeName;
use contract_suite_core::UnimplementedContract;
use serde::Serialize;

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Report sections selected for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSections {
    /// Interfaces without a contract test.
    pub untested: bool,
    /// Classes no suite targets.
    pub unimplemented: bool,
    /// Configuration errors.
    pub errors: bool,
}

impl From<&ReportConfig> for ReportSections {
    fn from(config: &ReportConfig) -> Self {
        Self {
            untested: config.untested,
            unimplemented: config.unimplemented,
            errors: config.errors,
        }
    }
}

// ============================================================================
// SECTION: Text
// ============================================================================

/// Renders the selected sections as output lines.
pub fn render_text(report: &CoverageReport, sections: ReportSections) -> Vec<String> {
    let mut lines = Vec::new();
    if sections.untested {
        let untested = report.untested_interfaces();
        lines.push(format!("untested interfaces ({}):", untested.len()));
        lines.extend(untested.iter().map(|name| format!("  {name}")));
    }
    if sections.unimplemented {
        let unimplemented = report.unimplemented_contracts();
        lines.push(format!("unimplemented contracts ({}):", unimplemented.len()));
        lines.extend(unimplemented.iter().map(|entry| {
            let interfaces: Vec<&str> = entry.interfaces.iter().map(TypeName::as_str).collect();
            format!("  {}: {}", entry.class, interfaces.join(", "))
        }));
    }
    if sections.errors {
        let errors = report.errors();
        lines.push(format!("configuration errors ({}):", errors.len()));
        lines.extend(errors.iter().map(|error| format!("  {error}")));
    }
    lines
}

// ============================================================================
// SECTION: JSON
// ============================================================================

/// Serialized report document.
#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    /// Interfaces without a contract test.
    #[serde(skip_serializing_if = "Option::is_none")]
    untested: Option<&'a [TypeName]>,
    /// Classes no suite targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    unimplemented: Option<&'a [UnimplementedContract]>,
    /// Configuration error messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

/// Renders the selected sections as one JSON document.
///
/// # Errors
/// Returns [`serde_json::Error`] when serialization fails.
pub fn render_json(
    report: &CoverageReport,
    sections: ReportSections,
) -> Result<String, serde_json::Error> {
    let document = ReportDocument {
        untested: sections.untested.then(|| report.untested_interfaces()),
        unimplemented: sections.unimplemented.then(|| report.unimplemented_contracts()),
        errors: sections
            .errors
            .then(|| report.errors().iter().map(ToString::to_string).collect()),
    };
    serde_json::to_string_pretty(&document)
}

// crates/contract-suite-core/src/model/marker.rs
// ============================================================================
// Module: Declarative Markers
// Description: Annotation-equivalent markers carried by types and methods.
// Purpose: Encode contract, suite, injection, and exclusion declarations.
// Dependencies: crate::model::identifiers, serde
// ============================================================================

//! ## Overview
//! Markers are the declarative surface the registry and composer read. Each
//! marker has a stable marker type name (for example `contract.Contract`)
//! which filters match with `HasAnnotation(...)`.
//!
//! Cardinality follows the usual annotation rules: `ContractExclude` and
//! `Custom` markers may repeat on one type; every other marker may appear at
//! most once per type or method.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::model::identifiers::TypeName;

// ============================================================================
// SECTION: Marker Payloads
// ============================================================================

/// Declares a composed suite's class under test and its exclusions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractImpl {
    /// Type whose transitive interface closure drives composition.
    pub class_under_test: TypeName,
    /// Interfaces whose contract tests are not composed in.
    #[serde(default)]
    pub skip: Vec<TypeName>,
    /// Contract test classes that are not composed in.
    #[serde(default)]
    pub ignore: Vec<TypeName>,
}

impl ContractImpl {
    /// Creates a declaration for the class under test with no exclusions.
    #[must_use]
    pub fn new(class_under_test: impl Into<TypeName>) -> Self {
        Self {
            class_under_test: class_under_test.into(),
            skip: Vec::new(),
            ignore: Vec::new(),
        }
    }

    /// Adds an interface to the skip list.
    #[must_use]
    pub fn skip(mut self, interface: impl Into<TypeName>) -> Self {
        self.skip.push(interface.into());
        self
    }

    /// Adds a contract test class to the ignore list.
    #[must_use]
    pub fn ignore(mut self, test: impl Into<TypeName>) -> Self {
        self.ignore.push(test.into());
        self
    }
}

/// Excludes named test methods of one contract test from a suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractExclude {
    /// Contract test class the exclusion applies to.
    pub test: TypeName,
    /// Method names removed from the composed child.
    pub methods: Vec<String>,
}

impl ContractExclude {
    /// Creates a method exclusion.
    #[must_use]
    pub fn new<I, S>(test: impl Into<TypeName>, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            test: test.into(),
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// SECTION: Markers
// ============================================================================

/// Declarative marker attached to a type or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// The type is the contract test for the named interface.
    Contract(TypeName),
    /// The type is a composed suite for a class under test.
    ContractImpl(ContractImpl),
    /// Removes methods of one contract test from the suite (repeatable).
    ContractExclude(ContractExclude),
    /// The type runs as a composed contract suite.
    ContractSuite,
    /// Disables a test type or test method.
    Ignore,
    /// The interface needs no contract test.
    NoContractTest,
    /// Marks the injection accessor or mutator.
    Inject,
    /// Marks the dynamic suite's base producer accessor.
    DynamicInject,
    /// Marks a test method.
    Test,
    /// Marks a method run before every test.
    Before,
    /// Marks a method run after every test.
    After,
    /// Any other annotation, by type name (repeatable).
    Custom(TypeName),
}

/// Marker discriminant used for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// [`Marker::Contract`].
    Contract,
    /// [`Marker::ContractImpl`].
    ContractImpl,
    /// [`Marker::ContractExclude`].
    ContractExclude,
    /// [`Marker::ContractSuite`].
    ContractSuite,
    /// [`Marker::Ignore`].
    Ignore,
    /// [`Marker::NoContractTest`].
    NoContractTest,
    /// [`Marker::Inject`].
    Inject,
    /// [`Marker::DynamicInject`].
    DynamicInject,
    /// [`Marker::Test`].
    Test,
    /// [`Marker::Before`].
    Before,
    /// [`Marker::After`].
    After,
    /// [`Marker::Custom`].
    Custom,
}

impl MarkerKind {
    /// Returns the marker type name for built-in markers.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Contract => "contract.Contract",
            Self::ContractImpl => "contract.ContractImpl",
            Self::ContractExclude => "contract.ContractExclude",
            Self::ContractSuite => "contract.ContractSuite",
            Self::Ignore => "contract.Ignore",
            Self::NoContractTest => "contract.NoContractTest",
            Self::Inject => "contract.Inject",
            Self::DynamicInject => "contract.DynamicInject",
            Self::Test => "test.Test",
            Self::Before => "test.Before",
            Self::After => "test.After",
            Self::Custom => "custom",
        }
    }

    /// Returns `true` when the marker may appear more than once per element.
    #[must_use]
    pub const fn is_repeatable(self) -> bool {
        matches!(self, Self::ContractExclude | Self::Custom)
    }
}

impl Marker {
    /// Returns the marker discriminant.
    #[must_use]
    pub const fn kind(&self) -> MarkerKind {
        match self {
            Self::Contract(_) => MarkerKind::Contract,
            Self::ContractImpl(_) => MarkerKind::ContractImpl,
            Self::ContractExclude(_) => MarkerKind::ContractExclude,
            Self::ContractSuite => MarkerKind::ContractSuite,
            Self::Ignore => MarkerKind::Ignore,
            Self::NoContractTest => MarkerKind::NoContractTest,
            Self::Inject => MarkerKind::Inject,
            Self::DynamicInject => MarkerKind::DynamicInject,
            Self::Test => MarkerKind::Test,
            Self::Before => MarkerKind::Before,
            Self::After => MarkerKind::After,
            Self::Custom(_) => MarkerKind::Custom,
        }
    }

    /// Returns the marker type name matched by annotation filters.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Custom(name) => name.as_str(),
            other => other.kind().type_name(),
        }
    }
}

/// Returns the type names of single-valued markers that appear more than once.
#[must_use]
pub fn repeated_markers(markers: &[Marker]) -> Vec<&'static str> {
    let mut seen: Vec<MarkerKind> = Vec::new();
    let mut repeated = Vec::new();
    for marker in markers {
        let kind = marker.kind();
        if kind.is_repeatable() {
            continue;
        }
        if seen.contains(&kind) {
            if !repeated.contains(&kind.type_name()) {
                repeated.push(kind.type_name());
            }
        } else {
            seen.push(kind);
        }
    }
    repeated
}

#[cfg(test)]
mod tests {
    use super::ContractExclude;
    use super::Marker;
    use super::repeated_markers;

    #[test]
    fn custom_markers_report_their_own_name() {
        assert_eq!(Marker::Custom("org.example.Slow".into()).type_name(), "org.example.Slow");
        assert_eq!(Marker::Contract("org.example.A".into()).type_name(), "contract.Contract");
    }

    #[test]
    fn repeated_single_valued_markers_are_detected() {
        let markers = vec![
            Marker::ContractSuite,
            Marker::ContractExclude(ContractExclude::new("a.T", ["m"])),
            Marker::ContractExclude(ContractExclude::new("a.U", ["n"])),
            Marker::ContractSuite,
            Marker::ContractSuite,
        ];
        assert_eq!(repeated_markers(&markers), vec!["contract.ContractSuite"]);
    }
}

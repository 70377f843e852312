// crates/contract-suite-core/src/registry/errors.rs
// ============================================================================
// Module: Configuration Errors
// Description: Collected configuration violations for tests and suites.
// Purpose: Record invalid declarations as values instead of aborting discovery.
// Dependencies: crate::model, thiserror
// ============================================================================

//! ## Overview
//! A [`ConfigurationError`] describes one invalid declaration found while
//! populating the registry or composing a suite. Errors are accumulated on
//! test metadata and replayed later by the error-reporting runner, so one
//! malformed test never hides the others.

use thiserror::Error;

use crate::model::TypeName;

/// Configuration violation discovered during population or composition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A contract test type is abstract and cannot be instantiated.
    #[error("contract test {test} is abstract")]
    AbstractContractTest {
        /// Offending test type.
        test: TypeName,
    },

    /// A suite names an abstract class as its class under test.
    #[error("class under test {class_under_test} of suite {suite} is abstract")]
    AbstractClassUnderTest {
        /// Declaring suite.
        suite: TypeName,
        /// Abstract class named by the declaration.
        class_under_test: TypeName,
    },

    /// A contract test declares no injection mutator.
    #[error("{type_name} must declare a public, concrete, single-argument Inject setter")]
    MissingInjectionMutator {
        /// Offending type.
        type_name: TypeName,
    },

    /// A composed suite declares no injection accessor.
    #[error("suite {suite} must declare a public, concrete, zero-argument Inject getter")]
    MissingInjectionAccessor {
        /// Offending suite.
        suite: TypeName,
    },

    /// A dynamic suite declares no dynamic injection accessor.
    #[error(
        "dynamic suite {suite} must declare a public, concrete, zero-argument DynamicInject getter"
    )]
    MissingDynamicAccessor {
        /// Offending suite.
        suite: TypeName,
    },

    /// More than one method qualifies as the injection accessor or mutator.
    #[error("{type_name} declares more than one {marker} method: {}", .methods.join(", "))]
    AmbiguousInjection {
        /// Offending type.
        type_name: TypeName,
        /// Marker type name shared by the candidates.
        marker: &'static str,
        /// Names of every qualifying method.
        methods: Vec<String>,
    },

    /// A composed suite lacks its `ContractImpl` declaration.
    #[error("suite {suite} must declare its class under test with ContractImpl")]
    MissingClassUnderTest {
        /// Offending suite.
        suite: TypeName,
    },

    /// A referenced type could not be resolved.
    #[error("{referrer} refers to {name}, which cannot be resolved: {reason}")]
    UnresolvedType {
        /// Type holding the reference.
        referrer: TypeName,
        /// Unresolvable name.
        name: TypeName,
        /// Loader failure message.
        reason: String,
    },

    /// A single-valued marker appears more than once.
    #[error("{type_name} carries marker {marker} more than once")]
    RepeatedMarker {
        /// Offending type.
        type_name: TypeName,
        /// Marker type name.
        marker: &'static str,
    },

    /// A dynamic suite supplied no child types.
    #[error("dynamic suite {suite} supplied no suite classes")]
    EmptyDynamicSuite {
        /// Offending suite.
        suite: TypeName,
    },

    /// A dynamic suite could not be instantiated or asked for its children.
    #[error("dynamic suite {suite} failed: {reason}")]
    DynamicSuiteFailed {
        /// Offending suite.
        suite: TypeName,
        /// Failure message.
        reason: String,
    },

    /// A composed suite resolved to no runnable children.
    #[error("suite {suite} resolved to no tests")]
    NoTestsResolved {
        /// Offending suite.
        suite: TypeName,
    },

    /// A filter expression failed to parse.
    #[error("malformed {field} filter: {message}")]
    MalformedFilter {
        /// Settings field holding the expression.
        field: &'static str,
        /// Parser error message.
        message: String,
    },
}

impl ConfigurationError {
    /// Returns the type the error is attributed to, when there is one.
    #[must_use]
    pub const fn subject(&self) -> Option<&TypeName> {
        match self {
            Self::AbstractContractTest {
                test,
            } => Some(test),
            Self::MissingInjectionMutator {
                type_name,
            }
            | Self::AmbiguousInjection {
                type_name,
                ..
            }
            | Self::RepeatedMarker {
                type_name,
                ..
            } => Some(type_name),
            Self::AbstractClassUnderTest {
                suite,
                ..
            }
            | Self::MissingInjectionAccessor {
                suite,
            }
            | Self::MissingDynamicAccessor {
                suite,
            }
            | Self::MissingClassUnderTest {
                suite,
            }
            | Self::EmptyDynamicSuite {
                suite,
            }
            | Self::DynamicSuiteFailed {
                suite,
                ..
            }
            | Self::NoTestsResolved {
                suite,
            } => Some(suite),
            Self::UnresolvedType {
                referrer,
                ..
            } => Some(referrer),
            Self::MalformedFilter {
                ..
            } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigurationError;
    use crate::model::TypeName;

    #[test]
    fn ambiguous_injection_lists_every_method() {
        let error = ConfigurationError::AmbiguousInjection {
            type_name: TypeName::new("org.example.ATest"),
            marker: "contract.Inject",
            methods: vec!["set_one".to_string(), "set_two".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "org.example.ATest declares more than one contract.Inject method: set_one, set_two"
        );
        assert_eq!(error.subject().map(TypeName::as_str), Some("org.example.ATest"));
    }

    #[test]
    fn malformed_filter_has_no_subject() {
        let error = ConfigurationError::MalformedFilter {
            field: "include",
            message: "unknown function".to_string(),
        };
        assert!(error.subject().is_none());
    }
}

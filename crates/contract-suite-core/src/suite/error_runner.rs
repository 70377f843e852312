// crates/contract-suite-core/src/suite/error_runner.rs
// ============================================================================
// Module: Error-Reporting Runner
// Description: Replays configuration errors as synthetic test failures.
// Purpose: Keep invalid suites describable and runnable by the host.
// Dependencies: crate::{host, model, registry}
// ============================================================================

//! ## Overview
//! An [`ErrorRunner`] stands in for a unit whose construction failed
//! validation. Each collected error becomes one synthetic test named
//! `initializationError`, `initializationError1`, ... on the offending
//! class, reported as a started/failed/finished triple.

use crate::host::Description;
use crate::host::Failure;
use crate::host::RunNotifier;
use crate::host::Runner;
use crate::model::TypeName;
use crate::registry::ConfigurationError;

/// Name of the synthetic test reporting the first error.
pub const INITIALIZATION_ERROR: &str = "initializationError";

/// Runner that reports configuration errors as failures.
#[derive(Debug, Clone)]
pub struct ErrorRunner {
    /// Class the errors are attributed to.
    class: TypeName,
    /// Errors to replay, in order.
    errors: Vec<ConfigurationError>,
}

impl ErrorRunner {
    /// Creates a runner replaying `errors` against `class`.
    #[must_use]
    pub const fn new(class: TypeName, errors: Vec<ConfigurationError>) -> Self {
        Self {
            class,
            errors,
        }
    }

    /// Returns the class the errors are attributed to.
    #[must_use]
    pub const fn class(&self) -> &TypeName {
        &self.class
    }

    /// Returns the replayed errors.
    #[must_use]
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.errors
    }

    /// Returns the synthetic test description for the error at `index`.
    fn error_description(&self, index: usize) -> Description {
        if index == 0 {
            Description::test(&self.class, INITIALIZATION_ERROR)
        } else {
            Description::test(&self.class, format!("{INITIALIZATION_ERROR}{index}"))
        }
    }
}

impl Runner for ErrorRunner {
    fn description(&self) -> Description {
        let mut description = Description::for_class(&self.class);
        for index in 0 .. self.errors.len() {
            description.add_child(self.error_description(index));
        }
        description
    }

    fn run(&self, notifier: &mut dyn RunNotifier) {
        for (index, error) in self.errors.iter().enumerate() {
            let description = self.error_description(index);
            notifier.test_started(&description);
            notifier.test_failure(Failure::new(description.clone(), error.to_string()));
            notifier.test_finished(&description);
        }
    }

    fn test_count(&self) -> usize {
        self.errors.len()
    }
}

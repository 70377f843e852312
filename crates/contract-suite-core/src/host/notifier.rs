// crates/contract-suite-core/src/host/notifier.rs
// ============================================================================
// Module: Run Notification
// Description: Listener protocol for test lifecycle events.
// Purpose: Report started, failed, ignored, and finished tests to the host.
// Dependencies: crate::host::description
// ============================================================================

//! ## Overview
//! Runners report through [`RunNotifier`]. Each executed test produces
//! `test_started`, zero or more `test_failure` calls, then `test_finished`;
//! an ignored test produces only `test_ignored`. [`RecordingNotifier`]
//! keeps every event for inspection.

use crate::host::description::Description;

/// A failed test and its cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Failed test.
    description: Description,
    /// Failure message.
    message: String,
}

impl Failure {
    /// Creates a failure.
    #[must_use]
    pub fn new(description: Description, message: impl Into<String>) -> Self {
        Self {
            description,
            message: message.into(),
        }
    }

    /// Returns the failed test.
    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Listener for test lifecycle events.
pub trait RunNotifier {
    /// A test is about to run.
    fn test_started(&mut self, description: &Description);

    /// A test failed.
    fn test_failure(&mut self, failure: Failure);

    /// A test was skipped.
    fn test_ignored(&mut self, description: &Description);

    /// A test finished, whether or not it failed.
    fn test_finished(&mut self, description: &Description);
}

/// Event captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Test started.
    Started(String),
    /// Test failed.
    Failed {
        /// Test display name.
        test: String,
        /// Failure message.
        message: String,
    },
    /// Test ignored.
    Ignored(String),
    /// Test finished.
    Finished(String),
}

/// Notifier that records every event in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    /// Events in arrival order.
    events: Vec<RunEvent>,
    /// Failures in arrival order.
    failures: Vec<Failure>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// Returns the recorded failures.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Returns the number of finished tests.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.events.iter().filter(|event| matches!(event, RunEvent::Finished(_))).count()
    }

    /// Returns the number of failures.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Returns the number of ignored tests.
    #[must_use]
    pub fn ignored_count(&self) -> usize {
        self.events.iter().filter(|event| matches!(event, RunEvent::Ignored(_))).count()
    }

    /// Returns `true` when no test failed.
    #[must_use]
    pub fn was_successful(&self) -> bool {
        self.failures.is_empty()
    }
}

impl RunNotifier for RecordingNotifier {
    fn test_started(&mut self, description: &Description) {
        self.events.push(RunEvent::Started(description.display_name().to_string()));
    }

    fn test_failure(&mut self, failure: Failure) {
        self.events.push(RunEvent::Failed {
            test: failure.description().display_name().to_string(),
            message: failure.message().to_string(),
        });
        self.failures.push(failure);
    }

    fn test_ignored(&mut self, description: &Description) {
        self.events.push(RunEvent::Ignored(description.display_name().to_string()));
    }

    fn test_finished(&mut self, description: &Description) {
        self.events.push(RunEvent::Finished(description.display_name().to_string()));
    }
}

// crates/contract-suite-core/src/host/runner.rs
// ============================================================================
// Module: Class Runner
// Description: Runner trait and the generic per-class test runner.
// Purpose: Execute test methods with lifecycle hooks on fresh instances.
// Dependencies: crate::{host, model}, std::panic
// ============================================================================

//! ## Overview
//! A [`Runner`] exposes a description tree and runs against a notifier.
//! [`ClassRunner`] runs the `Test` methods of one type. Every test gets its
//! own instance from an [`InstanceFactory`]; `Before` methods run first,
//! then the test, then every `After` method, even when an earlier step
//! failed. Instance creation failures, returned failures, invocation errors
//! and panics each fail only the test they occurred in.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::collections::BTreeSet;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::host::description::Description;
use crate::host::notifier::Failure;
use crate::host::notifier::RunNotifier;
use crate::model::InvocationError;
use crate::model::MarkerKind;
use crate::model::MethodDescriptor;
use crate::model::TypeDescriptor;

// ============================================================================
// SECTION: Traits
// ============================================================================

/// A describable, runnable unit.
pub trait Runner {
    /// Returns the description tree.
    fn description(&self) -> Description;

    /// Runs every test, reporting through `notifier`.
    fn run(&self, notifier: &mut dyn RunNotifier);

    /// Returns the number of tests the runner describes.
    fn test_count(&self) -> usize {
        self.description().test_count()
    }
}

/// Source of fresh test instances.
pub trait InstanceFactory {
    /// Creates a ready-to-run instance.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when construction or wiring fails.
    fn create(&self) -> Result<Box<dyn Any>, InvocationError>;
}

/// Factory that calls the type's zero-argument constructor.
#[derive(Debug, Clone)]
pub struct ConstructorFactory {
    /// Instantiated type.
    descriptor: Arc<TypeDescriptor>,
}

impl ConstructorFactory {
    /// Creates a factory for `descriptor`.
    #[must_use]
    pub const fn new(descriptor: Arc<TypeDescriptor>) -> Self {
        Self {
            descriptor,
        }
    }
}

impl InstanceFactory for ConstructorFactory {
    fn create(&self) -> Result<Box<dyn Any>, InvocationError> {
        self.descriptor.instantiate()
    }
}

// ============================================================================
// SECTION: Class Runner
// ============================================================================

/// Runs the test methods declared on one type.
pub struct ClassRunner {
    /// Type whose tests run.
    descriptor: Arc<TypeDescriptor>,
    /// Instance source.
    factory: Box<dyn InstanceFactory>,
    /// Test method names, excluded methods removed.
    tests: Vec<String>,
}

impl ClassRunner {
    /// Creates a runner for every test method of `descriptor`.
    #[must_use]
    pub fn new(descriptor: Arc<TypeDescriptor>, factory: Box<dyn InstanceFactory>) -> Self {
        Self::with_exclusions(descriptor, factory, &BTreeSet::new())
    }

    /// Creates a runner that leaves out the named test methods.
    #[must_use]
    pub fn with_exclusions(
        descriptor: Arc<TypeDescriptor>,
        factory: Box<dyn InstanceFactory>,
        excluded: &BTreeSet<String>,
    ) -> Self {
        let tests = descriptor
            .methods()
            .iter()
            .filter(|method| is_runnable(method, MarkerKind::Test))
            .filter(|method| !excluded.contains(method.name()))
            .map(|method| method.name().to_string())
            .collect();
        Self {
            descriptor,
            factory,
            tests,
        }
    }

    /// Returns the names of the tests this runner executes.
    #[must_use]
    pub fn test_names(&self) -> &[String] {
        &self.tests
    }

    /// Runs one test on a fresh instance.
    fn run_test(&self, test: &MethodDescriptor) -> Result<(), InvocationError> {
        let mut instance = guarded(|| self.factory.create())?;
        let target: &mut dyn Any = &mut *instance;
        let mut outcome = Ok(());
        for before in self.hooks(MarkerKind::Before) {
            outcome = invoke_guarded(before, target);
            if outcome.is_err() {
                break;
            }
        }
        if outcome.is_ok() {
            outcome = invoke_guarded(test, target);
        }
        for after in self.hooks(MarkerKind::After) {
            let result = invoke_guarded(after, target);
            if outcome.is_ok() {
                outcome = result;
            }
        }
        outcome
    }

    /// Returns the lifecycle methods carrying `marker`.
    fn hooks(&self, marker: MarkerKind) -> impl Iterator<Item = &MethodDescriptor> {
        self.descriptor.methods().iter().filter(move |method| is_runnable(method, marker))
    }
}

impl Runner for ClassRunner {
    fn description(&self) -> Description {
        let class = self.descriptor.name();
        let mut description = Description::for_class(class);
        for test in &self.tests {
            description.add_child(Description::test(class, test.as_str()));
        }
        description
    }

    fn run(&self, notifier: &mut dyn RunNotifier) {
        for name in &self.tests {
            let description = Description::test(self.descriptor.name(), name.as_str());
            let Some(test) = self.descriptor.method(name) else {
                continue;
            };
            if test.has_marker(MarkerKind::Ignore) {
                notifier.test_ignored(&description);
                continue;
            }
            notifier.test_started(&description);
            if let Err(err) = self.run_test(test) {
                notifier.test_failure(Failure::new(description.clone(), err.to_string()));
            }
            notifier.test_finished(&description);
        }
    }

    fn test_count(&self) -> usize {
        self.tests.len()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns `true` for public, concrete methods carrying `marker`.
fn is_runnable(method: &MethodDescriptor, marker: MarkerKind) -> bool {
    method.is_public() && !method.is_abstract() && method.has_marker(marker)
}

/// Invokes a zero-argument method, converting panics into errors.
fn invoke_guarded(method: &MethodDescriptor, target: &mut dyn Any) -> Result<(), InvocationError> {
    guarded(|| method.invoke(&mut *target, Vec::new()).map(|_| ()))
}

/// Runs `call`, converting a panic into [`InvocationError::Panicked`].
fn guarded<R>(call: impl FnOnce() -> Result<R, InvocationError>) -> Result<R, InvocationError> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => Err(InvocationError::Panicked(panic_message(payload.as_ref()))),
    }
}

/// Extracts the message carried by a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "test panicked".to_string()
    }
}

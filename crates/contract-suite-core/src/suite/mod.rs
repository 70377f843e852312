// crates/contract-suite-core/src/suite/mod.rs
// ============================================================================
// Module: Suite Composition
// Description: Composer, injection protocols, and error-reporting runner.
// Purpose: Turn a root suite declaration into a runnable suite.
// Dependencies: crate::{host, model, registry, universe}
// ============================================================================

//! ## Overview
//! [`SuiteComposer`] expands a root suite into a [`ContractSuite`] whose
//! children are the contract tests applicable to its class under test.
//! Producers reach each child through [`ProducerInjector`] or, for dynamic
//! suites, [`DynamicInjector`]. Invalid declarations become an
//! [`ErrorRunner`] that reports them as failures.

pub mod composer;
pub mod error_runner;
pub mod injection;

pub use composer::ChildKind;
pub use composer::ContractSuite;
pub use composer::SuiteChild;
pub use composer::SuiteComposer;
pub use composer::SuiteState;
pub use error_runner::ErrorRunner;
pub use error_runner::INITIALIZATION_ERROR;
pub use injection::AdaptingSuite;
pub use injection::DynamicInjector;
pub use injection::ProducerInjector;
pub use injection::SharedInstance;

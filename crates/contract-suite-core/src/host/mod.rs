// crates/contract-suite-core/src/host/mod.rs
// ============================================================================
// Module: Host Protocol
// Description: Descriptions, notifiers, and runners for composed suites.
// Purpose: Provide the describable/runnable surface consumed by a test host.
// Dependencies: crate::model
// ============================================================================

//! ## Overview
//! The host protocol is deliberately small: a [`Description`] tree, a
//! [`RunNotifier`] listener, and the [`Runner`] trait. [`ClassRunner`] is
//! the generic runner for one type; composed suites build on it through
//! [`InstanceFactory`].

pub mod description;
pub mod notifier;
pub mod runner;

pub use description::Description;
pub use notifier::Failure;
pub use notifier::RecordingNotifier;
pub use notifier::RunEvent;
pub use notifier::RunNotifier;
pub use runner::ClassRunner;
pub use runner::ConstructorFactory;
pub use runner::InstanceFactory;
pub use runner::Runner;

// crates/contract-suite-core/src/lib.rs
// ============================================================================
// Module: Contract Suite Core
// Description: Contract-test discovery, registry, and suite composition.
// Purpose: Compose every applicable contract test for a class under test.
// Dependencies: class-filter, serde, thiserror, toml, tracing, walkdir, zip
// ============================================================================

//! ## Overview
//! A contract test is written once per interface. A composed suite names a
//! class under test; composition walks that class's interface closure,
//! looks up the live contract test of every interface in a
//! [`ContractRegistry`], and wires the suite's producer into each test.
//!
//! Types are described explicitly through [`TypeDescriptor`] records held in
//! a [`TypeCatalog`] or read from `.ctype` manifests on a [`ClassPath`].
//! Invalid declarations are collected as [`ConfigurationError`] values and
//! replayed by the error-reporting runner instead of aborting discovery.
//!
//! ```
//! use contract_suite_core::ContractRegistry;
//! use contract_suite_core::DiscoverySettings;
//! use contract_suite_core::Marker;
//! use contract_suite_core::TypeCatalog;
//! use contract_suite_core::TypeDescriptor;
//!
//! let catalog = TypeCatalog::new()
//!     .with(TypeDescriptor::interface("org.example.Shape").build())
//!     .with(
//!         TypeDescriptor::class("org.example.ShapeTest")
//!             .marker(Marker::Contract("org.example.Shape".into()))
//!             .build(),
//!     );
//! let registry = ContractRegistry::populate(&catalog, &DiscoverySettings::new());
//! let live = registry.live_test(&"org.example.Shape".into());
//! let test = live.map(|info| info.test_type().as_str());
//! assert_eq!(test, Some("org.example.ShapeTest"));
//! // The test declares no Inject setter, which is collected, not raised.
//! assert_eq!(registry.errors().len(), 1);
//! ```

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod host;
pub mod introspect;
pub mod model;
pub mod registry;
pub mod report;
pub mod settings;
pub mod suite;
pub mod universe;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use host::ClassRunner;
pub use host::Description;
pub use host::Failure;
pub use host::RecordingNotifier;
pub use host::RunEvent;
pub use host::RunNotifier;
pub use host::Runner;
pub use model::ContractExclude;
pub use model::ContractImpl;
pub use model::FnProducer;
pub use model::InvocationError;
pub use model::MappedProducer;
pub use model::Marker;
pub use model::MarkerKind;
pub use model::MethodDescriptor;
pub use model::Producer;
pub use model::ProducerError;
pub use model::ProducerHandle;
pub use model::TestFailure;
pub use model::TypeDescriptor;
pub use model::TypeKind;
pub use model::TypeName;
pub use registry::ConfigurationError;
pub use registry::ContractRegistry;
pub use registry::TestInfo;
pub use report::CoverageReport;
pub use report::UnimplementedContract;
pub use settings::DiscoverySettings;
pub use suite::ContractSuite;
pub use suite::SuiteComposer;
pub use suite::SuiteState;
pub use universe::ClassPath;
pub use universe::TypeCatalog;
pub use universe::TypeLoader;
pub use universe::TypeSource;
pub use universe::TypeUniverse;

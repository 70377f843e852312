// crates/contract-suite-core/src/model/mod.rs
// ============================================================================
// Module: Type Model
// Description: Registered type metadata, markers, methods, and producers.
// Purpose: Provide the explicit metadata table that replaces reflection.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The type model is what the rest of the crate reads instead of runtime
//! reflection. Types, their methods and their markers are registered as
//! plain data; constructors and method bodies are closures over concrete
//! Rust types, invoked through `dyn Any`.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod descriptor;
pub mod identifiers;
pub mod marker;
pub mod method;
pub mod producer;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use descriptor::Constructor;
pub use descriptor::SuiteClassesFn;
pub use descriptor::TypeBuilder;
pub use descriptor::TypeDescriptor;
pub use descriptor::TypeKind;
pub use identifiers::TypeName;
pub use marker::ContractExclude;
pub use marker::ContractImpl;
pub use marker::Marker;
pub use marker::MarkerKind;
pub use method::InvocationError;
pub use method::MethodBody;
pub use method::MethodDescriptor;
pub use method::ReturnKind;
pub use method::TestFailure;
pub use method::method_body;
pub use producer::FnProducer;
pub use producer::MappedProducer;
pub use producer::Producer;
pub use producer::ProducerError;
pub use producer::ProducerHandle;

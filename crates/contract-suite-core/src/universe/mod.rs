// crates/contract-suite-core/src/universe/mod.rs
// ============================================================================
// Module: Type Universe
// Description: Type loading, enumeration, manifests, and scanning.
// Purpose: Provide the discoverable set of types the registry is built from.
// Dependencies: class-filter, toml, tracing, walkdir, zip
// ============================================================================

//! ## Overview
//! A type universe is anything implementing both [`TypeLoader`] and
//! [`TypeSource`]. Two are provided: [`TypeCatalog`] for types registered
//! from code and [`ClassPath`] for `.ctype` manifests on disk.
//! [`TypeScanner`] walks either one with a class filter.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catalog;
pub mod classpath;
pub mod loader;
pub mod manifest;
pub mod scanner;
pub mod subject;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::TypeCatalog;
pub use classpath::ClassPath;
pub use classpath::ClassPathEntry;
pub use loader::LoadError;
pub use loader::ScanError;
pub use loader::TypeLoader;
pub use loader::TypeSource;
pub use loader::TypeUniverse;
pub use manifest::MANIFEST_EXTENSION;
pub use manifest::MarkerManifest;
pub use manifest::MethodManifest;
pub use manifest::TypeManifest;
pub use scanner::TypeScanner;
pub use subject::SubjectView;

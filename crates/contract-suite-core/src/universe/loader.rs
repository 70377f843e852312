// crates/contract-suite-core/src/universe/loader.rs
// ============================================================================
// Module: Type Loading
// Description: Resolution of type names and enumeration of candidate names.
// Purpose: Define the seams between the registry and any type universe.
// Dependencies: crate::model, thiserror, zip
// ============================================================================

//! ## Overview
//! A type universe answers two questions: which names exist under a root
//! ([`TypeSource`]) and what a given name describes ([`TypeLoader`]). The
//! in-memory [`TypeCatalog`](crate::TypeCatalog) and the manifest-backed
//! [`ClassPath`](crate::ClassPath) both implement the pair.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::model::TypeDescriptor;
use crate::model::TypeName;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while resolving a single type name.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No type with this name exists in the universe.
    #[error("type `{0}` is not registered")]
    NotFound(TypeName),
    /// A manifest file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An archive could not be opened or read.
    #[error("failed to read archive `{path}`: {source}")]
    Archive {
        /// Archive path.
        path: String,
        /// Underlying archive error.
        #[source]
        source: zip::result::ZipError,
    },
    /// A manifest was not valid.
    #[error("invalid type manifest `{path}`: {message}")]
    Manifest {
        /// Manifest location.
        path: String,
        /// Validation or parse message.
        message: String,
    },
}

/// Errors raised while enumerating candidate names.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A directory walk failed.
    #[error("failed to walk `{path}`: {message}")]
    Walk {
        /// Directory or entry path.
        path: String,
        /// Walk error message.
        message: String,
    },
    /// An archive could not be opened.
    #[error("failed to open archive `{path}`: {source}")]
    Open {
        /// Archive path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An archive entry could not be read.
    #[error("failed to read archive `{path}`: {source}")]
    Archive {
        /// Archive path.
        path: String,
        /// Underlying archive error.
        #[source]
        source: zip::result::ZipError,
    },
}

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Resolves type names to descriptors.
pub trait TypeLoader {
    /// Loads the descriptor for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the name is unknown or its metadata cannot
    /// be read.
    fn load(&self, name: &TypeName) -> Result<Arc<TypeDescriptor>, LoadError>;
}

/// Enumerates candidate type names.
pub trait TypeSource {
    /// Returns top-level type names under `root` in a deterministic order.
    ///
    /// Enumeration problems are logged and skipped; an unreadable location
    /// contributes no names.
    fn candidates(&self, root: &str) -> Vec<TypeName>;
}

/// A loader that can also enumerate its names.
pub trait TypeUniverse: TypeLoader + TypeSource {}

impl<T: TypeLoader + TypeSource + ?Sized> TypeUniverse for T {}

// crates/contract-suite-core/src/universe/catalog.rs
// ============================================================================
// Module: Type Catalog
// Description: In-memory registration table of type descriptors.
// Purpose: Provide the universe used when types are registered from code.
// Dependencies: crate::{model, universe::loader}
// ============================================================================

//! ## Overview
//! [`TypeCatalog`] is the explicit registration table: every type the
//! framework may discover is registered once, and the catalog serves both
//! name enumeration and resolution. Names are kept in sorted order so scans
//! are reproducible.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::TypeDescriptor;
use crate::model::TypeName;
use crate::universe::loader::LoadError;
use crate::universe::loader::TypeLoader;
use crate::universe::loader::TypeSource;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// In-memory type universe.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    /// Registered descriptors keyed by name.
    types: BTreeMap<TypeName, Arc<TypeDescriptor>>,
}

impl TypeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor, returning any descriptor it replaced.
    pub fn register(
        &mut self,
        descriptor: impl Into<Arc<TypeDescriptor>>,
    ) -> Option<Arc<TypeDescriptor>> {
        let descriptor = descriptor.into();
        self.types.insert(descriptor.name().clone(), descriptor)
    }

    /// Registers a descriptor and returns the catalog.
    #[must_use]
    pub fn with(mut self, descriptor: impl Into<Arc<TypeDescriptor>>) -> Self {
        self.register(descriptor);
        self
    }

    /// Returns the descriptor registered under `name`.
    #[must_use]
    pub fn get(&self, name: &TypeName) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(name)
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeLoader for TypeCatalog {
    fn load(&self, name: &TypeName) -> Result<Arc<TypeDescriptor>, LoadError> {
        self.types.get(name).cloned().ok_or_else(|| LoadError::NotFound(name.clone()))
    }
}

impl TypeSource for TypeCatalog {
    fn candidates(&self, root: &str) -> Vec<TypeName> {
        self.types.keys().filter(|name| !name.is_nested() && name.is_under(root)).cloned().collect()
    }
}

// crates/contract-suite-core/src/universe/scanner.rs
// ============================================================================
// Module: Type-Universe Scanner
// Description: Filtered enumeration of resolvable types under a root.
// Purpose: Feed registry population with every accepted, loadable type.
// Dependencies: class-filter, crate::{model, universe}, tracing
// ============================================================================

//! ## Overview
//! The scanner asks the universe for candidate names under a root, resolves
//! each one and keeps those the filter accepts. Resolution failures are
//! logged and the candidate is dropped; they never fail the scan. When the
//! root yields no candidates at all it is tried as a single type name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use class_filter::ClassFilter;
use tracing::debug;
use tracing::warn;

use crate::model::TypeDescriptor;
use crate::model::TypeName;
use crate::universe::loader::TypeUniverse;
use crate::universe::subject::SubjectView;

// ============================================================================
// SECTION: Scanner
// ============================================================================

/// Filtered scanner over a type universe.
pub struct TypeScanner<'a, U: ?Sized> {
    /// Universe being scanned.
    universe: &'a U,
}

impl<'a, U: TypeUniverse + ?Sized> TypeScanner<'a, U> {
    /// Creates a scanner.
    #[must_use]
    pub const fn new(universe: &'a U) -> Self {
        Self {
            universe,
        }
    }

    /// Returns every resolvable type under `root` that `filter` accepts, in
    /// candidate order.
    #[must_use]
    pub fn scan(&self, root: &str, filter: &ClassFilter) -> Vec<Arc<TypeDescriptor>> {
        let mut candidates = self.universe.candidates(root);
        if candidates.is_empty() && TypeName::is_valid(root) {
            debug!(root, "no candidates under root; resolving it as a type name");
            candidates.push(TypeName::new(root));
        }
        let mut found = Vec::new();
        for name in candidates {
            let descriptor = match self.universe.load(&name) {
                Ok(descriptor) => descriptor,
                Err(err) => {
                    warn!(candidate = %name, error = %err, "dropping unresolvable scan candidate");
                    continue;
                }
            };
            if filter.accepts(&SubjectView::new(&descriptor, self.universe)) {
                found.push(descriptor);
            } else {
                debug!(candidate = %name, "scan filter rejected candidate");
            }
        }
        found
    }
}

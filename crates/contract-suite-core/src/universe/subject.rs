// crates/contract-suite-core/src/universe/subject.rs
// ============================================================================
// Module: Filter Subject View
// Description: Adapts type descriptors to the class filter subject contract.
// Purpose: Let class filters inspect registered types, supertypes included.
// Dependencies: class-filter, crate::{introspect, model, universe}
// ============================================================================

//! ## Overview
//! [`SubjectView`] pairs a descriptor with the loader needed to resolve its
//! supertypes, so `Assignable(...)` filters see the full ancestry.

use class_filter::FilterSubject;

use crate::introspect::supertypes;
use crate::model::TypeDescriptor;
use crate::universe::loader::TypeLoader;

/// A descriptor viewed as a filter subject.
pub struct SubjectView<'a, L: ?Sized> {
    /// Described type.
    descriptor: &'a TypeDescriptor,
    /// Loader for supertypes.
    loader: &'a L,
}

impl<'a, L: TypeLoader + ?Sized> SubjectView<'a, L> {
    /// Creates a view.
    #[must_use]
    pub const fn new(descriptor: &'a TypeDescriptor, loader: &'a L) -> Self {
        Self {
            descriptor,
            loader,
        }
    }
}

impl<L: TypeLoader + ?Sized> FilterSubject for SubjectView<'_, L> {
    fn type_name(&self) -> &str {
        self.descriptor.name().as_str()
    }

    fn is_interface(&self) -> bool {
        self.descriptor.is_interface()
    }

    fn is_abstract(&self) -> bool {
        self.descriptor.is_abstract()
    }

    fn is_annotation(&self) -> bool {
        self.descriptor.is_annotation()
    }

    fn has_annotation(&self, matches: &dyn Fn(&str) -> bool) -> bool {
        self.descriptor.markers().iter().any(|marker| matches(marker.type_name()))
    }

    fn is_assignable_to(&self, matches: &dyn Fn(&str) -> bool) -> bool {
        matches(self.descriptor.name().as_str())
            || supertypes(self.descriptor, self.loader).iter().any(|name| matches(name.as_str()))
    }
}

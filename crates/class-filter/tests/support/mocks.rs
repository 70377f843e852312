// crates/class-filter/tests/support/mocks.rs
// ============================================================================
// Module: Mock Filter Subjects
// Description: Hand-built type facts for exercising filters.
// ============================================================================
//! ## Overview
//! `MockType` answers the `FilterSubject` questions from plain fields so each
//! test can describe exactly the type it needs.

use class_filter::FilterSubject;

/// Plain-data filter subject.
#[derive(Debug, Clone, Default)]
pub struct MockType {
    /// Fully-qualified name.
    pub name: String,
    /// Whether the type is an interface.
    pub interface: bool,
    /// Whether the type is abstract.
    pub abstract_type: bool,
    /// Whether the type is an annotation type.
    pub annotation: bool,
    /// Annotations carried by the type.
    pub annotations: Vec<String>,
    /// Names the type is assignable to (itself excluded).
    pub supertypes: Vec<String>,
}

impl MockType {
    /// A concrete class.
    pub fn class(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// An interface.
    pub fn interface(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interface: true,
            abstract_type: true,
            ..Self::default()
        }
    }

    /// An abstract class.
    pub fn abstract_class(name: &str) -> Self {
        Self {
            name: name.to_string(),
            abstract_type: true,
            ..Self::default()
        }
    }

    /// An annotation type.
    pub fn annotation(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interface: true,
            abstract_type: true,
            annotation: true,
            ..Self::default()
        }
    }

    /// Adds a carried annotation.
    pub fn annotated(mut self, annotation: &str) -> Self {
        self.annotations.push(annotation.to_string());
        self
    }

    /// Adds a supertype.
    pub fn extends(mut self, supertype: &str) -> Self {
        self.supertypes.push(supertype.to_string());
        self
    }

    /// The four representative subjects used by round-trip checks.
    pub fn representatives() -> Vec<Self> {
        vec![
            Self::interface("org.example.Shape").annotated("contract.NoContractTest"),
            Self::class("org.example.SquareImpl")
                .extends("org.example.Shape")
                .annotated("contract.ContractImpl"),
            Self::abstract_class("org.example.AbstractShapeTest")
                .annotated("contract.Contract"),
            Self::annotation("org.example.Marker"),
        ]
    }
}

impl FilterSubject for MockType {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn is_interface(&self) -> bool {
        self.interface
    }

    fn is_abstract(&self) -> bool {
        self.abstract_type
    }

    fn is_annotation(&self) -> bool {
        self.annotation
    }

    fn has_annotation(&self, matches: &dyn Fn(&str) -> bool) -> bool {
        self.annotations.iter().any(|name| matches(name))
    }

    fn is_assignable_to(&self, matches: &dyn Fn(&str) -> bool) -> bool {
        matches(&self.name) || self.supertypes.iter().any(|name| matches(name))
    }
}

// crates/class-filter/src/subject.rs
// ============================================================================
// Module: Filter Subjects
// Description: Metadata contract consumed by class filters.
// Purpose: Keep the filter algebra independent from any concrete type model.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Filters never inspect a type model directly. Anything that can answer the
//! handful of structural questions below can be filtered, which keeps the
//! algebra reusable for registered descriptors, manifest records, and test
//! doubles alike.

// ============================================================================
// SECTION: Subject Trait
// ============================================================================

/// Structural facts a filter may ask about a candidate type.
///
/// Name-based filters only need [`FilterSubject::type_name`]; structural
/// filters use the remaining queries. Implementations must be deterministic:
/// asking the same question twice yields the same answer.
pub trait FilterSubject {
    /// Fully-qualified dotted name of the type (e.g. `org.example.Impl`).
    fn type_name(&self) -> &str;

    /// Returns `true` when the type is an interface.
    fn is_interface(&self) -> bool;

    /// Returns `true` when the type is abstract.
    ///
    /// Interfaces count as abstract, matching the usual reflective view.
    fn is_abstract(&self) -> bool;

    /// Returns `true` when the type is itself an annotation (marker) type.
    fn is_annotation(&self) -> bool;

    /// Returns `true` when the type carries the named annotation.
    ///
    /// `matches` decides whether a carried annotation name is the one being
    /// asked about, so case handling stays with the filter.
    fn has_annotation(&self, matches: &dyn Fn(&str) -> bool) -> bool;

    /// Returns `true` when the type is, extends, or implements a supertype
    /// whose name satisfies `matches`.
    fn is_assignable_to(&self, matches: &dyn Fn(&str) -> bool) -> bool;
}

// crates/contract-suite-core/src/introspect.rs
// ============================================================================
// Module: Capability Introspector
// Description: Injection method lookup and transitive interface closure.
// Purpose: Answer the structural questions the registry and composer ask.
// Dependencies: crate::{model, universe}, tracing
// ============================================================================

//! ## Overview
//! Two kinds of question are answered here:
//! - Which directly declared method is a type's injection accessor (public,
//!   concrete, zero parameters, returns a value) or mutator (public,
//!   concrete, one parameter, returns nothing) for a given marker.
//! - Which interfaces a type reaches through nested declarations, direct
//!   implementation, interface inheritance and the superclass chain.
//!
//! Nothing here fails: absence is reported as [`Lookup::Missing`] or as an
//! empty result and callers decide whether it is fatal. Unresolvable
//! supertypes are logged and their own ancestry is not followed.
//!
//! # Invariants
//! - Closure order is depth-first discovery order and is reproducible for a
//!   given universe.
//! - Every interface appears at most once, whatever the shape of the graph.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::MarkerKind;
use crate::model::MethodDescriptor;
use crate::model::ReturnKind;
use crate::model::TypeDescriptor;
use crate::model::TypeName;
use crate::universe::TypeLoader;

// ============================================================================
// SECTION: Method Lookup
// ============================================================================

/// Result of an injection method lookup.
#[derive(Debug, Clone)]
pub enum Lookup<'a> {
    /// Exactly one qualifying method.
    Found(&'a MethodDescriptor),
    /// No qualifying method.
    Missing,
    /// More than one qualifying method.
    Ambiguous(Vec<&'a MethodDescriptor>),
}

impl<'a> Lookup<'a> {
    /// Returns the method when exactly one qualifies.
    #[must_use]
    pub fn found(self) -> Option<&'a MethodDescriptor> {
        match self {
            Self::Found(method) => Some(method),
            Self::Missing | Self::Ambiguous(_) => None,
        }
    }

    /// Builds a lookup from every qualifying method.
    fn from_candidates(mut candidates: Vec<&'a MethodDescriptor>) -> Self {
        match candidates.len() {
            0 => Self::Missing,
            1 => candidates.pop().map_or(Self::Missing, Self::Found),
            _ => Self::Ambiguous(candidates),
        }
    }
}

/// Returns `true` for public, concrete methods carrying `marker`.
fn is_candidate(method: &MethodDescriptor, marker: MarkerKind) -> bool {
    method.is_public() && !method.is_abstract() && method.has_marker(marker)
}

/// Returns every declared accessor carrying `marker`.
#[must_use]
pub fn annotated_getters(ty: &TypeDescriptor, marker: MarkerKind) -> Vec<&MethodDescriptor> {
    ty.methods()
        .iter()
        .filter(|method| {
            is_candidate(method, marker)
                && method.returns() == ReturnKind::Value
                && method.parameter_count() == 0
        })
        .collect()
}

/// Returns every declared mutator carrying `marker`.
#[must_use]
pub fn annotated_setters(ty: &TypeDescriptor, marker: MarkerKind) -> Vec<&MethodDescriptor> {
    ty.methods()
        .iter()
        .filter(|method| {
            is_candidate(method, marker)
                && method.returns() == ReturnKind::Void
                && method.parameter_count() == 1
        })
        .collect()
}

/// Finds the accessor carrying `marker`.
#[must_use]
pub fn find_annotated_getter(ty: &TypeDescriptor, marker: MarkerKind) -> Lookup<'_> {
    Lookup::from_candidates(annotated_getters(ty, marker))
}

/// Finds the mutator carrying `marker`.
#[must_use]
pub fn find_annotated_setter(ty: &TypeDescriptor, marker: MarkerKind) -> Lookup<'_> {
    Lookup::from_candidates(annotated_setters(ty, marker))
}

/// Returns `true` for public, non-abstract classes.
#[must_use]
pub const fn is_concrete_class(ty: &TypeDescriptor) -> bool {
    !ty.is_interface() && !ty.is_abstract() && ty.is_public()
}

// ============================================================================
// SECTION: Interface Closure
// ============================================================================

/// Returns every interface reachable from `ty`.
///
/// An interface's closure starts with the interface itself. For every type
/// on the superclass chain the walk visits nested interfaces first, then
/// directly implemented interfaces (each followed by its own ancestry), then
/// moves to the superclass.
pub fn transitive_interfaces<L>(ty: &TypeDescriptor, loader: &L) -> Vec<TypeName>
where
    L: TypeLoader + ?Sized,
{
    let mut walk = ClosureWalk {
        loader,
        seen: BTreeSet::new(),
        order: Vec::new(),
    };
    if ty.is_interface() {
        walk.seen.insert(ty.name().clone());
        walk.order.push(ty.name().clone());
    }
    walk.visit_class_chain(ty);
    walk.order
}

/// Returns every supertype of `ty`: its superclass chain, then its
/// interface closure.
pub fn supertypes<L>(ty: &TypeDescriptor, loader: &L) -> Vec<TypeName>
where
    L: TypeLoader + ?Sized,
{
    let mut names = Vec::new();
    let mut next = ty.superclass().cloned();
    while let Some(name) = next.take() {
        if names.contains(&name) || &name == ty.name() {
            break;
        }
        next = loader.load(&name).ok().and_then(|parent| parent.superclass().cloned());
        names.push(name);
    }
    for interface in transitive_interfaces(ty, loader) {
        if &interface != ty.name() {
            names.push(interface);
        }
    }
    names
}

/// Traversal state for the interface closure.
struct ClosureWalk<'a, L: ?Sized> {
    /// Loader used to resolve supertypes.
    loader: &'a L,
    /// Interfaces already collected.
    seen: BTreeSet<TypeName>,
    /// Interfaces in discovery order.
    order: Vec<TypeName>,
}

impl<L: TypeLoader + ?Sized> ClosureWalk<'_, L> {
    /// Walks `ty` and its superclass chain.
    fn visit_class_chain(&mut self, ty: &TypeDescriptor) {
        self.visit_level(ty);
        let mut classes = BTreeSet::from([ty.name().clone()]);
        let mut next = ty.superclass().cloned();
        while let Some(name) = next.take() {
            if !classes.insert(name.clone()) {
                break;
            }
            match self.loader.load(&name) {
                Ok(parent) => {
                    self.visit_level(&parent);
                    next = parent.superclass().cloned();
                }
                Err(err) => debug!(superclass = %name, error = %err, "superclass not resolvable"),
            }
        }
    }

    /// Collects nested and directly implemented interfaces of one type.
    fn visit_level(&mut self, ty: &TypeDescriptor) {
        for nested in ty.nested() {
            if self.seen.contains(nested) {
                continue;
            }
            match self.loader.load(nested) {
                Ok(descriptor) if descriptor.is_interface() => self.visit_interface(nested),
                Ok(_) => {}
                Err(err) => debug!(nested = %nested, error = %err, "nested type not resolvable"),
            }
        }
        for interface in ty.interfaces() {
            self.visit_interface(interface);
        }
    }

    /// Collects an interface and its ancestry.
    fn visit_interface(&mut self, name: &TypeName) {
        if !self.seen.insert(name.clone()) {
            return;
        }
        self.order.push(name.clone());
        match self.loader.load(name) {
            Ok(descriptor) => self.visit_level(&descriptor),
            Err(err) => debug!(interface = %name, error = %err, "interface not resolvable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Lookup;
    use super::find_annotated_getter;
    use super::find_annotated_setter;
    use super::supertypes;
    use super::transitive_interfaces;
    use crate::model::Marker;
    use crate::model::MarkerKind;
    use crate::model::MethodDescriptor;
    use crate::model::ReturnKind;
    use crate::model::TypeDescriptor;
    use crate::universe::TypeCatalog;

    fn setter(name: &str) -> MethodDescriptor {
        MethodDescriptor::new(name, ReturnKind::Void, 1).marker(Marker::Inject)
    }

    fn names(list: &[crate::model::TypeName]) -> Vec<&str> {
        list.iter().map(crate::model::TypeName::as_str).collect()
    }

    fn diamond() -> TypeCatalog {
        TypeCatalog::new()
            .with(TypeDescriptor::interface("org.x.A").build())
            .with(TypeDescriptor::interface("org.x.B").implements("org.x.A").build())
            .with(TypeDescriptor::interface("org.x.C").implements("org.x.B").build())
            .with(TypeDescriptor::interface("org.x.Base$Listener").build())
            .with(
                TypeDescriptor::class("org.x.Base")
                    .implements("org.x.C")
                    .nested("org.x.Base$Listener")
                    .build(),
            )
    }

    #[test]
    fn closure_follows_nested_direct_and_superclass_interfaces_once() {
        let catalog = diamond();
        let leaf =
            TypeDescriptor::class("org.x.Impl").extends("org.x.Base").implements("org.x.A").build();
        let closure = transitive_interfaces(&leaf, &catalog);
        assert_eq!(names(&closure), vec!["org.x.A", "org.x.Base$Listener", "org.x.C", "org.x.B"]);
    }

    #[test]
    fn interface_closure_starts_with_itself() {
        let catalog = diamond();
        let c = TypeDescriptor::interface("org.x.C").implements("org.x.B").build();
        let closure = transitive_interfaces(&c, &catalog);
        assert_eq!(names(&closure), vec!["org.x.C", "org.x.B", "org.x.A"]);
    }

    #[test]
    fn unresolvable_superclass_ends_the_chain() {
        let catalog = diamond();
        let orphan = TypeDescriptor::class("org.x.Orphan").extends("org.x.Missing").build();
        assert!(transitive_interfaces(&orphan, &catalog).is_empty());
        assert_eq!(names(&supertypes(&orphan, &catalog)), vec!["org.x.Missing"]);
    }

    #[test]
    fn setter_lookup_reports_missing_found_and_ambiguous() {
        let none = TypeDescriptor::class("org.x.T").method(setter("hidden").non_public()).build();
        assert!(matches!(find_annotated_setter(&none, MarkerKind::Inject), Lookup::Missing));

        let one = TypeDescriptor::class("org.x.T").method(setter("set_producer")).build();
        let found = find_annotated_setter(&one, MarkerKind::Inject).found();
        assert_eq!(found.map(MethodDescriptor::name), Some("set_producer"));

        let two = TypeDescriptor::class("org.x.T")
            .method(setter("set_a"))
            .method(setter("set_b"))
            .build();
        assert!(matches!(
            find_annotated_setter(&two, MarkerKind::Inject),
            Lookup::Ambiguous(methods) if methods.len() == 2
        ));
    }

    #[test]
    fn getter_lookup_requires_value_return_and_no_parameters() {
        let ty = TypeDescriptor::class("org.x.T")
            .method(MethodDescriptor::new("get_one", ReturnKind::Value, 1).marker(Marker::Inject))
            .method(setter("set_producer"))
            .build();
        assert!(matches!(find_annotated_getter(&ty, MarkerKind::Inject), Lookup::Missing));
    }
}

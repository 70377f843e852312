// crates/contract-suite-core/src/model/descriptor.rs
// ============================================================================
// Module: Type Descriptors
// Description: Explicit registration records for classes, interfaces, annotations.
// Purpose: Describe the reflective facts the registry and composer depend on.
// Dependencies: crate::model::{identifiers, marker, method}
// ============================================================================

//! ## Overview
//! A [`TypeDescriptor`] is the registered stand-in for a reflected type:
//! kind and modifiers, supertypes, nested types, markers, declared methods
//! and, for types registered from code, a zero-argument constructor. A suite
//! type that computes its children at runtime also carries a suite-classes
//! closure, which is the dynamic-suite capability.
//!
//! Descriptors are built with [`TypeBuilder`]:
//!
//! ```
//! use contract_suite_core::Marker;
//! use contract_suite_core::TypeDescriptor;
//!
//! let shape = TypeDescriptor::interface("org.example.Shape").build();
//! let square = TypeDescriptor::class("org.example.Square")
//!     .implements("org.example.Shape")
//!     .marker(Marker::Custom("org.example.Fast".into()))
//!     .build();
//! assert!(shape.is_abstract());
//! assert_eq!(square.interfaces()[0].as_str(), "org.example.Shape");
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::model::identifiers::TypeName;
use crate::model::marker::ContractExclude;
use crate::model::marker::ContractImpl;
use crate::model::marker::Marker;
use crate::model::marker::MarkerKind;
use crate::model::method::InvocationError;
use crate::model::method::MethodDescriptor;

// ============================================================================
// SECTION: Kinds and Closures
// ============================================================================

/// Kind of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A class, abstract or concrete.
    Class,
    /// An interface.
    Interface,
    /// An annotation (marker) type.
    Annotation,
}

/// Zero-argument constructor.
pub type Constructor = Arc<dyn Fn() -> Result<Box<dyn Any>, InvocationError> + Send + Sync>;

/// Runtime supplier of a dynamic suite's child types.
pub type SuiteClassesFn =
    Arc<dyn Fn(&dyn Any) -> Result<Vec<TypeName>, InvocationError> + Send + Sync>;

// ============================================================================
// SECTION: Type Descriptor
// ============================================================================

/// Registered description of one type.
///
/// # Invariants
/// - Interfaces and annotation types are always abstract.
/// - `methods` lists only methods declared directly on the type.
#[derive(Clone)]
pub struct TypeDescriptor {
    /// Fully-qualified name.
    name: TypeName,
    /// Class, interface, or annotation.
    kind: TypeKind,
    /// Whether the type is public.
    public: bool,
    /// Whether a class is abstract.
    is_abstract: bool,
    /// Direct superclass.
    superclass: Option<TypeName>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    interfaces: Vec<TypeName>,
    /// Types declared inside this type.
    nested: Vec<TypeName>,
    /// Markers carried by the type.
    markers: Vec<Marker>,
    /// Declared methods.
    methods: Vec<MethodDescriptor>,
    /// Zero-argument constructor.
    constructor: Option<Constructor>,
    /// Dynamic-suite capability.
    suite_classes: Option<SuiteClassesFn>,
}

impl TypeDescriptor {
    /// Starts a class descriptor.
    #[must_use]
    pub fn class(name: impl Into<TypeName>) -> TypeBuilder {
        TypeBuilder::new(name.into(), TypeKind::Class)
    }

    /// Starts an interface descriptor.
    #[must_use]
    pub fn interface(name: impl Into<TypeName>) -> TypeBuilder {
        TypeBuilder::new(name.into(), TypeKind::Interface)
    }

    /// Starts an annotation type descriptor.
    #[must_use]
    pub fn annotation(name: impl Into<TypeName>) -> TypeBuilder {
        TypeBuilder::new(name.into(), TypeKind::Annotation)
    }

    /// Returns the type name.
    #[must_use]
    pub const fn name(&self) -> &TypeName {
        &self.name
    }

    /// Returns the type kind.
    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns `true` for interfaces and annotation types.
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    /// Returns `true` for annotation types.
    #[must_use]
    pub const fn is_annotation(&self) -> bool {
        matches!(self.kind, TypeKind::Annotation)
    }

    /// Returns `true` for abstract classes, interfaces, and annotation types.
    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.is_abstract || self.is_interface()
    }

    /// Returns `true` when the type is public.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.public
    }

    /// Returns the direct superclass.
    #[must_use]
    pub const fn superclass(&self) -> Option<&TypeName> {
        self.superclass.as_ref()
    }

    /// Returns directly implemented or extended interfaces.
    #[must_use]
    pub fn interfaces(&self) -> &[TypeName] {
        &self.interfaces
    }

    /// Returns nested type names.
    #[must_use]
    pub fn nested(&self) -> &[TypeName] {
        &self.nested
    }

    /// Returns the markers carried by the type.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Returns declared methods in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Returns the declared method called `name`.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|method| method.name() == name)
    }

    /// Returns `true` when the type carries a marker of `kind`.
    #[must_use]
    pub fn has_marker(&self, kind: MarkerKind) -> bool {
        self.markers.iter().any(|marker| marker.kind() == kind)
    }

    /// Returns the interface named by the `Contract` marker.
    #[must_use]
    pub fn contract(&self) -> Option<&TypeName> {
        self.markers.iter().find_map(|marker| match marker {
            Marker::Contract(target) => Some(target),
            _ => None,
        })
    }

    /// Returns the `ContractImpl` declaration.
    #[must_use]
    pub fn contract_impl(&self) -> Option<&ContractImpl> {
        self.markers.iter().find_map(|marker| match marker {
            Marker::ContractImpl(declaration) => Some(declaration),
            _ => None,
        })
    }

    /// Returns every `ContractExclude` declaration.
    pub fn exclusions(&self) -> impl Iterator<Item = &ContractExclude> {
        self.markers.iter().filter_map(|marker| match marker {
            Marker::ContractExclude(exclude) => Some(exclude),
            _ => None,
        })
    }

    /// Returns `true` when the type can be instantiated.
    #[must_use]
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// Returns `true` when the type supplies its suite classes at runtime.
    #[must_use]
    pub fn is_dynamic_suite(&self) -> bool {
        self.suite_classes.is_some()
    }

    /// Creates a new instance through the zero-argument constructor.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError::NoConstructor`] when none is registered, or
    /// the constructor's own failure.
    pub fn instantiate(&self) -> Result<Box<dyn Any>, InvocationError> {
        let Some(constructor) = &self.constructor else {
            return Err(InvocationError::NoConstructor {
                type_name: self.name.clone(),
            });
        };
        constructor()
    }

    /// Asks a dynamic suite instance for its child types.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError::NotDynamic`] when the type has no
    /// suite-classes capability, or the supplier's own failure.
    pub fn suite_classes(&self, instance: &dyn Any) -> Result<Vec<TypeName>, InvocationError> {
        let Some(supplier) = &self.suite_classes else {
            return Err(InvocationError::NotDynamic {
                type_name: self.name.clone(),
            });
        };
        supplier(instance)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("public", &self.public)
            .field("is_abstract", &self.is_abstract)
            .field("superclass", &self.superclass)
            .field("interfaces", &self.interfaces)
            .field("nested", &self.nested)
            .field("markers", &self.markers)
            .field("methods", &self.methods)
            .field("constructible", &self.constructor.is_some())
            .field("dynamic_suite", &self.suite_classes.is_some())
            .finish()
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`TypeDescriptor`].
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    /// Descriptor under construction.
    descriptor: TypeDescriptor,
}

impl TypeBuilder {
    /// Creates a builder for a public, concrete type.
    fn new(name: TypeName, kind: TypeKind) -> Self {
        Self {
            descriptor: TypeDescriptor {
                name,
                kind,
                public: true,
                is_abstract: false,
                superclass: None,
                interfaces: Vec::new(),
                nested: Vec::new(),
                markers: Vec::new(),
                methods: Vec::new(),
                constructor: None,
                suite_classes: None,
            },
        }
    }

    /// Marks the type abstract.
    #[must_use]
    pub const fn abstract_type(mut self) -> Self {
        self.descriptor.is_abstract = true;
        self
    }

    /// Sets the abstract flag.
    #[must_use]
    pub const fn set_abstract(mut self, is_abstract: bool) -> Self {
        self.descriptor.is_abstract = is_abstract;
        self
    }

    /// Sets the public flag.
    #[must_use]
    pub const fn set_public(mut self, public: bool) -> Self {
        self.descriptor.public = public;
        self
    }

    /// Sets the superclass.
    #[must_use]
    pub fn extends(mut self, superclass: impl Into<TypeName>) -> Self {
        self.descriptor.superclass = Some(superclass.into());
        self
    }

    /// Adds a directly implemented (or extended) interface.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<TypeName>) -> Self {
        self.descriptor.interfaces.push(interface.into());
        self
    }

    /// Adds a nested type.
    #[must_use]
    pub fn nested(mut self, nested: impl Into<TypeName>) -> Self {
        self.descriptor.nested.push(nested.into());
        self
    }

    /// Adds a marker.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.descriptor.markers.push(marker);
        self
    }

    /// Adds a declared method.
    #[must_use]
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.descriptor.methods.push(method);
        self
    }

    /// Registers an infallible zero-argument constructor.
    #[must_use]
    pub fn constructor<S: 'static>(self, create: impl Fn() -> S + Send + Sync + 'static) -> Self {
        self.try_constructor(move || Ok(create()))
    }

    /// Registers a fallible zero-argument constructor.
    #[must_use]
    pub fn try_constructor<S: 'static>(
        mut self,
        create: impl Fn() -> Result<S, InvocationError> + Send + Sync + 'static,
    ) -> Self {
        self.descriptor.constructor =
            Some(Arc::new(move || create().map(|instance| Box::new(instance) as Box<dyn Any>)));
        self
    }

    /// Registers the dynamic-suite capability.
    ///
    /// The closure receives the suite instance created by the constructor.
    #[must_use]
    pub fn suite_classes<S: 'static>(
        mut self,
        supply: impl Fn(&S) -> Vec<TypeName> + Send + Sync + 'static,
    ) -> Self {
        let name = self.descriptor.name.clone();
        self.descriptor.suite_classes = Some(Arc::new(move |instance: &dyn Any| {
            instance.downcast_ref::<S>().map(&supply).ok_or_else(|| InvocationError::Receiver {
                method: format!("{name}::suite_classes"),
                expected: type_name::<S>(),
            })
        }));
        self
    }

    /// Finishes the descriptor.
    #[must_use]
    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }

    /// Finishes the descriptor as a shared handle.
    #[must_use]
    pub fn shared(self) -> Arc<TypeDescriptor> {
        Arc::new(self.descriptor)
    }
}

// crates/contract-suite-core/src/model/method.rs
// ============================================================================
// Module: Method Descriptors
// Description: Declared methods with signature shape, markers, and bodies.
// Purpose: Replace reflective method lookup and invocation with explicit records.
// Dependencies: crate::model::{marker, producer}, serde, thiserror, std::any
// ============================================================================

//! ## Overview
//! A [`MethodDescriptor`] records what reflection would report about a
//! declared method: name, return shape, parameter count, modifiers and
//! markers. Methods registered from code also carry a body; invocation is
//! uniform over `&mut dyn Any` receivers and boxed arguments so the
//! composer can call accessors and mutators without knowing concrete types.
//!
//! The typed constructors ([`MethodDescriptor::test`],
//! [`MethodDescriptor::getter`], [`MethodDescriptor::inject_setter`], ...)
//! build correctly shaped, correctly marked descriptors from ordinary
//! closures over the receiver type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::model::identifiers::TypeName;
use crate::model::marker::Marker;
use crate::model::marker::MarkerKind;
use crate::model::producer::Producer;
use crate::model::producer::ProducerError;
use crate::model::producer::ProducerHandle;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Assertion failure reported by a test body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TestFailure {
    /// Failure message.
    message: String,
}

impl TestFailure {
    /// Creates a failure with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns a failure when `condition` is false.
    ///
    /// # Errors
    ///
    /// Returns [`TestFailure`] carrying `message` when the condition fails.
    pub fn ensure(condition: bool, message: impl Into<String>) -> Result<(), Self> {
        if condition { Ok(()) } else { Err(Self::new(message)) }
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ProducerError> for TestFailure {
    fn from(err: ProducerError) -> Self {
        Self::new(err.to_string())
    }
}

/// Errors raised while invoking constructors and methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    /// The type declares no zero-argument constructor.
    #[error("`{type_name}` has no zero-argument constructor")]
    NoConstructor {
        /// Type that could not be constructed.
        type_name: TypeName,
    },
    /// The method was declared without a body.
    #[error("method `{method}` has no invocable body")]
    NoBody {
        /// Method name.
        method: String,
    },
    /// The receiver is not of the method's declaring type.
    #[error("method `{method}` cannot be invoked on this receiver; expected `{expected}`")]
    Receiver {
        /// Method name.
        method: String,
        /// Expected receiver type.
        expected: &'static str,
    },
    /// The wrong number of arguments was supplied.
    #[error("method `{method}` takes {expected} argument(s), got {found}")]
    ArgumentCount {
        /// Method name.
        method: String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found: usize,
    },
    /// An argument or result had an unexpected type.
    #[error("method `{method}` expected a value of type `{expected}`")]
    ValueType {
        /// Method name.
        method: String,
        /// Expected value type.
        expected: &'static str,
    },
    /// The type does not supply suite classes at runtime.
    #[error("`{type_name}` does not supply suite classes")]
    NotDynamic {
        /// Type name.
        type_name: TypeName,
    },
    /// A producer failed or lacked the requested view.
    #[error(transparent)]
    Producer(#[from] ProducerError),
    /// The body reported an assertion failure.
    #[error(transparent)]
    Failed(#[from] TestFailure),
    /// The body panicked.
    #[error("panicked: {0}")]
    Panicked(String),
}

// ============================================================================
// SECTION: Signatures
// ============================================================================

/// Return shape of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    /// The method returns nothing.
    #[default]
    Void,
    /// The method returns a value.
    Value,
}

/// Uniform method body.
pub type MethodBody = Arc<
    dyn Fn(&mut dyn Any, Vec<Box<dyn Any>>) -> Result<Option<Box<dyn Any>>, InvocationError>
        + Send
        + Sync,
>;

// ============================================================================
// SECTION: Method Descriptor
// ============================================================================

/// A method declared directly on a type.
#[derive(Clone)]
pub struct MethodDescriptor {
    /// Method name.
    name: String,
    /// Return shape.
    returns: ReturnKind,
    /// Parameter count.
    parameters: usize,
    /// Whether the method is public.
    public: bool,
    /// Whether the method is abstract.
    is_abstract: bool,
    /// Markers carried by the method.
    markers: Vec<Marker>,
    /// Invocable body, absent for metadata-only descriptors.
    body: Option<MethodBody>,
}

impl MethodDescriptor {
    /// Creates a public, concrete method without markers or body.
    #[must_use]
    pub fn new(name: impl Into<String>, returns: ReturnKind, parameters: usize) -> Self {
        Self {
            name: name.into(),
            returns,
            parameters,
            public: true,
            is_abstract: false,
            markers: Vec::new(),
            body: None,
        }
    }

    /// Creates a `Test` method.
    #[must_use]
    pub fn test<S: 'static>(
        name: impl Into<String>,
        body: impl Fn(&mut S) -> Result<(), TestFailure> + Send + Sync + 'static,
    ) -> Self {
        Self::hook(name, Marker::Test, body)
    }

    /// Creates a `Before` lifecycle method.
    #[must_use]
    pub fn before<S: 'static>(
        name: impl Into<String>,
        body: impl Fn(&mut S) -> Result<(), TestFailure> + Send + Sync + 'static,
    ) -> Self {
        Self::hook(name, Marker::Before, body)
    }

    /// Creates an `After` lifecycle method.
    #[must_use]
    pub fn after<S: 'static>(
        name: impl Into<String>,
        body: impl Fn(&mut S) -> Result<(), TestFailure> + Send + Sync + 'static,
    ) -> Self {
        Self::hook(name, Marker::After, body)
    }

    /// Creates an `Inject` accessor returning a producer handle.
    #[must_use]
    pub fn getter<S: 'static>(
        name: impl Into<String>,
        body: impl Fn(&mut S) -> Result<ProducerHandle, ProducerError> + Send + Sync + 'static,
    ) -> Self {
        Self::accessor(name, Marker::Inject, body)
    }

    /// Creates a `DynamicInject` accessor returning the base producer handle.
    #[must_use]
    pub fn dynamic_getter<S: 'static>(
        name: impl Into<String>,
        body: impl Fn(&mut S) -> Result<ProducerHandle, ProducerError> + Send + Sync + 'static,
    ) -> Self {
        Self::accessor(name, Marker::DynamicInject, body)
    }

    /// Creates an `Inject` mutator receiving the raw producer handle.
    #[must_use]
    pub fn setter<S: 'static>(
        name: impl Into<String>,
        body: impl Fn(&mut S, ProducerHandle) + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        let method = name.clone();
        Self::new(name, ReturnKind::Void, 1).marker(Marker::Inject).with_body(method_body(
            move |target, args| {
                let receiver = receiver::<S>(&method, target)?;
                let handle = handle_argument(&method, args)?;
                body(receiver, handle);
                Ok(None)
            },
        ))
    }

    /// Creates an `Inject` mutator receiving a typed producer.
    ///
    /// The producer is resolved from the injected handle, so the suite must
    /// offer `T` as its base element type or as a view.
    #[must_use]
    pub fn inject_setter<S: 'static, T: 'static>(
        name: impl Into<String>,
        body: impl Fn(&mut S, Arc<dyn Producer<T>>) + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        let method = name.clone();
        Self::new(name, ReturnKind::Void, 1).marker(Marker::Inject).with_body(method_body(
            move |target, args| {
                let receiver = receiver::<S>(&method, target)?;
                let producer = handle_argument(&method, args)?.require::<T>()?;
                body(receiver, producer);
                Ok(None)
            },
        ))
    }

    /// Builds a zero-argument void method carrying `marker`.
    fn hook<S: 'static>(
        name: impl Into<String>,
        marker: Marker,
        body: impl Fn(&mut S) -> Result<(), TestFailure> + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        let method = name.clone();
        Self::new(name, ReturnKind::Void, 0).marker(marker).with_body(method_body(
            move |target, _args| {
                body(receiver::<S>(&method, target)?)?;
                Ok(None)
            },
        ))
    }

    /// Builds a zero-argument accessor carrying `marker`.
    fn accessor<S: 'static>(
        name: impl Into<String>,
        marker: Marker,
        body: impl Fn(&mut S) -> Result<ProducerHandle, ProducerError> + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        let method = name.clone();
        Self::new(name, ReturnKind::Value, 0).marker(marker).with_body(method_body(
            move |target, _args| {
                let handle = body(receiver::<S>(&method, target)?)?;
                Ok(Some(Box::new(handle) as Box<dyn Any>))
            },
        ))
    }

    /// Adds a marker.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Marks the method non-public.
    #[must_use]
    pub const fn non_public(mut self) -> Self {
        self.public = false;
        self
    }

    /// Marks the method abstract.
    #[must_use]
    pub const fn abstract_method(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Installs an invocable body.
    #[must_use]
    pub fn with_body(mut self, body: MethodBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the return shape.
    #[must_use]
    pub const fn returns(&self) -> ReturnKind {
        self.returns
    }

    /// Returns the parameter count.
    #[must_use]
    pub const fn parameter_count(&self) -> usize {
        self.parameters
    }

    /// Returns `true` when the method is public.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.public
    }

    /// Returns `true` when the method is abstract.
    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Returns the markers carried by the method.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Returns `true` when the method carries a marker of `kind`.
    #[must_use]
    pub fn has_marker(&self, kind: MarkerKind) -> bool {
        self.markers.iter().any(|marker| marker.kind() == kind)
    }

    /// Returns `true` when the method can be invoked.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Invokes the method on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when the method has no body, the argument
    /// count is wrong, or the body itself fails.
    pub fn invoke(
        &self,
        target: &mut dyn Any,
        args: Vec<Box<dyn Any>>,
    ) -> Result<Option<Box<dyn Any>>, InvocationError> {
        let Some(body) = &self.body else {
            return Err(InvocationError::NoBody {
                method: self.name.clone(),
            });
        };
        if args.len() != self.parameters {
            return Err(InvocationError::ArgumentCount {
                method: self.name.clone(),
                expected: self.parameters,
                found: args.len(),
            });
        }
        body(target, args)
    }

    /// Invokes an accessor and returns the producer handle it yields.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when invocation fails or the result is not
    /// a [`ProducerHandle`].
    pub fn call_getter(&self, target: &mut dyn Any) -> Result<ProducerHandle, InvocationError> {
        let value = self.invoke(target, Vec::new())?;
        value
            .and_then(|value| value.downcast::<ProducerHandle>().ok())
            .map(|handle| *handle)
            .ok_or_else(|| InvocationError::ValueType {
                method: self.name.clone(),
                expected: type_name::<ProducerHandle>(),
            })
    }

    /// Invokes a mutator with a producer handle.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when invocation fails.
    pub fn call_setter(
        &self,
        target: &mut dyn Any,
        handle: ProducerHandle,
    ) -> Result<(), InvocationError> {
        self.invoke(target, vec![Box::new(handle)]).map(|_| ())
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("returns", &self.returns)
            .field("parameters", &self.parameters)
            .field("public", &self.public)
            .field("is_abstract", &self.is_abstract)
            .field("markers", &self.markers)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Wraps a closure as a [`MethodBody`].
#[must_use]
pub fn method_body<F>(body: F) -> MethodBody
where
    F: Fn(&mut dyn Any, Vec<Box<dyn Any>>) -> Result<Option<Box<dyn Any>>, InvocationError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(body)
}

/// Downcasts a receiver to the declaring type.
fn receiver<'a, S: 'static>(
    method: &str,
    target: &'a mut dyn Any,
) -> Result<&'a mut S, InvocationError> {
    target.downcast_mut::<S>().ok_or_else(|| InvocationError::Receiver {
        method: method.to_string(),
        expected: type_name::<S>(),
    })
}

/// Extracts the single producer handle argument.
fn handle_argument(
    method: &str,
    args: Vec<Box<dyn Any>>,
) -> Result<ProducerHandle, InvocationError> {
    args.into_iter()
        .next()
        .and_then(|arg| arg.downcast::<ProducerHandle>().ok())
        .map(|handle| *handle)
        .ok_or_else(|| InvocationError::ValueType {
            method: method.to_string(),
            expected: type_name::<ProducerHandle>(),
        })
}

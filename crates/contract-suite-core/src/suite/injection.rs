// crates/contract-suite-core/src/suite/injection.rs
// ============================================================================
// Module: Producer Injection
// Description: Instance factories that wire producers into contract tests.
// Purpose: Implement the direct and two-hop dynamic injection protocols.
// Dependencies: crate::{host, model}
// ============================================================================

//! ## Overview
//! Both injectors run their whole protocol inside
//! [`InstanceFactory::create`], so wiring completes before any test method
//! of the instance runs and happens again for every test.
//!
//! - [`ProducerInjector`]: instantiate the contract test, call the root
//!   suite's accessor, pass the producer to the test's mutator.
//! - [`DynamicInjector`]: instantiate the contract test, call the root's
//!   dynamic accessor for the base producer, instantiate the intermediate
//!   child suite, hand it the base producer, call its accessor for the
//!   adapted producer, pass that to the test's mutator.
//!
//! The root suite instance is created once and shared by every injector of
//! one composition through [`SharedInstance`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::host::InstanceFactory;
use crate::model::InvocationError;
use crate::model::MethodDescriptor;
use crate::model::ProducerHandle;
use crate::model::TypeDescriptor;

// ============================================================================
// SECTION: Shared Root Instance
// ============================================================================

/// Lazily created root suite instance shared by a composition.
pub struct SharedInstance {
    /// Root suite type.
    descriptor: Arc<TypeDescriptor>,
    /// Instance, once created.
    slot: RefCell<Option<Box<dyn Any>>>,
}

impl SharedInstance {
    /// Creates an empty slot for `descriptor`.
    #[must_use]
    pub const fn new(descriptor: Arc<TypeDescriptor>) -> Self {
        Self {
            descriptor,
            slot: RefCell::new(None),
        }
    }

    /// Runs `call` against the root instance, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when instantiation or `call` fails.
    pub fn with_instance<R>(
        &self,
        call: impl FnOnce(&mut dyn Any) -> Result<R, InvocationError>,
    ) -> Result<R, InvocationError> {
        let mut slot = self.slot.borrow_mut();
        let instance = match slot.take() {
            Some(instance) => instance,
            None => self.descriptor.instantiate()?,
        };
        let instance = slot.insert(instance);
        call(&mut **instance)
    }

    /// Calls an accessor on the root instance.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when the root cannot be created or the
    /// accessor fails.
    pub fn call_getter(
        &self,
        accessor: &MethodDescriptor,
    ) -> Result<ProducerHandle, InvocationError> {
        self.with_instance(|instance| accessor.call_getter(instance))
    }
}

// ============================================================================
// SECTION: Injectors
// ============================================================================

/// Direct injection of the root suite's producer.
pub struct ProducerInjector {
    /// Contract test type.
    test: Arc<TypeDescriptor>,
    /// Contract test mutator.
    mutator: MethodDescriptor,
    /// Root suite instance.
    root: Rc<SharedInstance>,
    /// Root suite accessor.
    accessor: MethodDescriptor,
}

impl ProducerInjector {
    /// Creates an injector for one contract test.
    #[must_use]
    pub const fn new(
        test: Arc<TypeDescriptor>,
        mutator: MethodDescriptor,
        root: Rc<SharedInstance>,
        accessor: MethodDescriptor,
    ) -> Self {
        Self {
            test,
            mutator,
            root,
            accessor,
        }
    }
}

impl InstanceFactory for ProducerInjector {
    fn create(&self) -> Result<Box<dyn Any>, InvocationError> {
        let mut instance = self.test.instantiate()?;
        let producer = self.root.call_getter(&self.accessor)?;
        self.mutator.call_setter(&mut *instance, producer)?;
        Ok(instance)
    }
}

/// Intermediate child suite of a dynamic composition.
#[derive(Debug, Clone)]
pub struct AdaptingSuite {
    /// Child suite type.
    pub descriptor: Arc<TypeDescriptor>,
    /// Mutator receiving the base producer.
    pub mutator: MethodDescriptor,
    /// Accessor yielding the adapted producer.
    pub accessor: MethodDescriptor,
}

/// Two-hop injection through an adapting child suite.
pub struct DynamicInjector {
    /// Contract test type.
    test: Arc<TypeDescriptor>,
    /// Contract test mutator.
    mutator: MethodDescriptor,
    /// Root suite instance.
    root: Rc<SharedInstance>,
    /// Root dynamic accessor.
    accessor: MethodDescriptor,
    /// Child suite adapting the base producer.
    adapter: AdaptingSuite,
}

impl DynamicInjector {
    /// Creates an injector for one contract test beneath `adapter`.
    #[must_use]
    pub const fn new(
        test: Arc<TypeDescriptor>,
        mutator: MethodDescriptor,
        root: Rc<SharedInstance>,
        accessor: MethodDescriptor,
        adapter: AdaptingSuite,
    ) -> Self {
        Self {
            test,
            mutator,
            root,
            accessor,
            adapter,
        }
    }
}

impl InstanceFactory for DynamicInjector {
    fn create(&self) -> Result<Box<dyn Any>, InvocationError> {
        let mut instance = self.test.instantiate()?;
        let base = self.root.call_getter(&self.accessor)?;
        let mut child = self.adapter.descriptor.instantiate()?;
        self.adapter.mutator.call_setter(&mut *child, base)?;
        let adapted = self.adapter.accessor.call_getter(&mut *child)?;
        self.mutator.call_setter(&mut *instance, adapted)?;
        Ok(instance)
    }
}

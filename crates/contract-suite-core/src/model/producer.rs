// crates/contract-suite-core/src/model/producer.rs
// ============================================================================
// Module: Producers
// Description: Factories for instances under test and their type-erased handle.
// Purpose: Carry one producer from a suite's accessor into every contract test.
// Dependencies: thiserror, std::any, std::sync
// ============================================================================

//! ## Overview
//! A [`Producer`] creates and disposes of instances of the type under test.
//! Accessors and mutators exchange producers as a [`ProducerHandle`], which
//! erases the element type so one handle can travel through uniform method
//! invocation.
//!
//! A handle answers [`ProducerHandle::producer`] for its own element type
//! and for any registered *view*: a contract test for `A` can ask a handle
//! built around a producer of `Impl` for a producer of `Box<dyn A>` once the
//! suite has registered that view. [`ProducerHandle::adapt`] builds a new
//! handle for a different element type, which is how dynamic suites turn a
//! producer of a composite into a producer of one of its parts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

// ============================================================================
// SECTION: Producer Contract
// ============================================================================

/// Producer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProducerError {
    /// No instance could be created.
    #[error("producer could not create an instance: {0}")]
    Creation(String),
    /// The handle cannot supply the requested element type.
    #[error("producer of `{available}` offers no view of `{requested}`")]
    MissingView {
        /// Requested element type.
        requested: &'static str,
        /// Element type of the handle's base producer.
        available: &'static str,
    },
}

/// Factory for instances of the type under test.
pub trait Producer<T>: Send + Sync {
    /// Creates a fresh instance.
    ///
    /// # Errors
    ///
    /// Returns [`ProducerError`] when no instance can be produced.
    fn new_instance(&self) -> Result<T, ProducerError>;

    /// Releases whatever the producer created. Best effort; called once per
    /// [`Producer::new_instance`] by the test lifecycle.
    fn clean_up(&self);
}

// ============================================================================
// SECTION: Closure Producer
// ============================================================================

/// Creation closure for [`FnProducer`].
type CreateFn<T> = Box<dyn Fn() -> Result<T, ProducerError> + Send + Sync>;

/// Producer built from closures.
pub struct FnProducer<T> {
    /// Creates an instance.
    create: CreateFn<T>,
    /// Cleans up after an instance.
    clean: Box<dyn Fn() + Send + Sync>,
}

impl<T> FnProducer<T> {
    /// Creates a producer from an infallible closure.
    #[must_use]
    pub fn new(create: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self::fallible(move || Ok(create()))
    }

    /// Creates a producer from a fallible closure.
    #[must_use]
    pub fn fallible(create: impl Fn() -> Result<T, ProducerError> + Send + Sync + 'static) -> Self {
        Self {
            create: Box::new(create),
            clean: Box::new(|| {}),
        }
    }

    /// Installs the clean-up closure.
    #[must_use]
    pub fn on_clean_up(mut self, clean: impl Fn() + Send + Sync + 'static) -> Self {
        self.clean = Box::new(clean);
        self
    }
}

impl<T> Producer<T> for FnProducer<T> {
    fn new_instance(&self) -> Result<T, ProducerError> {
        (self.create)()
    }

    fn clean_up(&self) {
        (self.clean)();
    }
}

// ============================================================================
// SECTION: Mapped Producer
// ============================================================================

/// Producer that maps every instance of a source producer.
///
/// Clean-up is forwarded to the source.
pub struct MappedProducer<T, U> {
    /// Producer of source instances.
    source: Arc<dyn Producer<T>>,
    /// Conversion applied to each instance.
    map: Arc<dyn Fn(T) -> U + Send + Sync>,
}

impl<T, U> MappedProducer<T, U> {
    /// Creates a mapped producer.
    #[must_use]
    pub fn new(source: Arc<dyn Producer<T>>, map: impl Fn(T) -> U + Send + Sync + 'static) -> Self {
        Self {
            source,
            map: Arc::new(map),
        }
    }
}

impl<T, U> Producer<U> for MappedProducer<T, U> {
    fn new_instance(&self) -> Result<U, ProducerError> {
        self.source.new_instance().map(|instance| (self.map)(instance))
    }

    fn clean_up(&self) {
        self.source.clean_up();
    }
}

// ============================================================================
// SECTION: Producer Handle
// ============================================================================

/// Type-erased producer passed through injection accessors and mutators.
///
/// # Invariants
/// - `base` holds an `Arc<dyn Producer<T>>` where `T` is named by `element`.
/// - Each entry in `views` holds an `Arc<dyn Producer<U>>` for a distinct `U`.
#[derive(Clone)]
pub struct ProducerHandle {
    /// Shared handle state.
    inner: Arc<HandleInner>,
}

/// Shared state behind a [`ProducerHandle`].
struct HandleInner {
    /// Element type name of the base producer.
    element: &'static str,
    /// Base producer, boxed as `Arc<dyn Producer<T>>`.
    base: Arc<dyn Any + Send + Sync>,
    /// Element-type views over the base producer.
    views: Vec<Arc<dyn Any + Send + Sync>>,
}

impl ProducerHandle {
    /// Wraps a shared producer.
    #[must_use]
    pub fn new<T: 'static>(producer: Arc<dyn Producer<T>>) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                element: type_name::<T>(),
                base: Arc::new(producer),
                views: Vec::new(),
            }),
        }
    }

    /// Wraps an owned producer.
    #[must_use]
    pub fn of<T: 'static, P: Producer<T> + 'static>(producer: P) -> Self {
        Self::new(Arc::new(producer) as Arc<dyn Producer<T>>)
    }

    /// Returns the element type name of the base producer.
    #[must_use]
    pub fn element_type(&self) -> &'static str {
        self.inner.element
    }

    /// Returns a producer of `U`, from the base producer or a view.
    #[must_use]
    pub fn producer<U: 'static>(&self) -> Option<Arc<dyn Producer<U>>> {
        std::iter::once(&self.inner.base)
            .chain(self.inner.views.iter())
            .find_map(|entry| entry.downcast_ref::<Arc<dyn Producer<U>>>())
            .cloned()
    }

    /// Returns a producer of `U` or a [`ProducerError::MissingView`].
    ///
    /// # Errors
    ///
    /// Returns [`ProducerError::MissingView`] when neither the base producer
    /// nor any view yields `U`.
    pub fn require<U: 'static>(&self) -> Result<Arc<dyn Producer<U>>, ProducerError> {
        self.producer::<U>().ok_or(ProducerError::MissingView {
            requested: type_name::<U>(),
            available: self.inner.element,
        })
    }

    /// Adds a view producing `U` by mapping instances of `T`.
    ///
    /// `T` may be the base element type or the type of an earlier view.
    ///
    /// # Errors
    ///
    /// Returns [`ProducerError::MissingView`] when no producer of `T` exists.
    pub fn with_view<T: 'static, U: 'static>(
        self,
        map: impl Fn(T) -> U + Send + Sync + 'static,
    ) -> Result<Self, ProducerError> {
        let source = self.require::<T>()?;
        let view: Arc<dyn Producer<U>> = Arc::new(MappedProducer::new(source, map));
        let mut views = self.inner.views.clone();
        views.push(Arc::new(view));
        Ok(Self {
            inner: Arc::new(HandleInner {
                element: self.inner.element,
                base: Arc::clone(&self.inner.base),
                views,
            }),
        })
    }

    /// Builds a new handle whose base producer maps instances of `T` to `U`.
    ///
    /// # Errors
    ///
    /// Returns [`ProducerError::MissingView`] when no producer of `T` exists.
    pub fn adapt<T: 'static, U: 'static>(
        &self,
        map: impl Fn(T) -> U + Send + Sync + 'static,
    ) -> Result<Self, ProducerError> {
        let source = self.require::<T>()?;
        Ok(Self::new(Arc::new(MappedProducer::new(source, map)) as Arc<dyn Producer<U>>))
    }

    /// Returns `true` when both handles share the same base producer.
    #[must_use]
    pub fn same_base(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner.base, &other.inner.base)
    }
}

impl fmt::Debug for ProducerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProducerHandle")
            .field("element", &self.inner.element)
            .field("views", &self.inner.views.len())
            .finish()
    }
}

// crates/contract-suite-core/tests/support/fixtures.rs
// ============================================================================
// Module: Fixture World
// Description: In-memory types, producers, and suites for composition tests.
// ============================================================================
//! ## Overview
//! The fixture world models `C extends B extends A`, a concrete `Impl`
//! implementing `C`, one contract test per interface, a composed suite for
//! `Impl`, and a dynamic suite over `D` whose children adapt `D`'s producer.

use std::sync::Arc;
use std::sync::Mutex;

use contract_suite_core::ContractImpl;
use contract_suite_core::FnProducer;
use contract_suite_core::Marker;
use contract_suite_core::MethodDescriptor;
use contract_suite_core::Producer;
use contract_suite_core::ProducerError;
use contract_suite_core::ProducerHandle;
use contract_suite_core::TestFailure;
use contract_suite_core::TypeCatalog;
use contract_suite_core::TypeDescriptor;
use contract_suite_core::TypeName;
use contract_suite_core::model::TypeBuilder;

// ========================================================================
// Names
// ========================================================================

/// Root interface.
pub const A: &str = "org.example.A";
/// Interface extending `A`.
pub const B: &str = "org.example.B";
/// Interface extending `B`.
pub const C: &str = "org.example.C";
/// Concrete class implementing `C`.
pub const IMPL: &str = "org.example.Impl";
/// Contract test for `A`.
pub const A_TEST: &str = "org.example.ATest";
/// Contract test for `B`.
pub const B_TEST: &str = "org.example.BTest";
/// Contract test for `C`.
pub const C_TEST: &str = "org.example.CTest";
/// Composed suite for `Impl`.
pub const IMPL_SUITE: &str = "org.example.ImplSuite";
/// Composite class offering an `A` and a `B`.
pub const D: &str = "org.example.D";
/// Dynamic suite for `D`.
pub const D_SUITE: &str = "org.example.DSuite";
/// Child suite adapting `D` to `A`.
pub const FOR_A: &str = "org.example.ForA";
/// Child suite adapting `D` to `B`.
pub const FOR_B: &str = "org.example.ForB";

/// Returns `name` as a type name.
pub fn name(name: &str) -> TypeName {
    TypeName::new(name)
}

// ========================================================================
// Logs
// ========================================================================

/// Shared, ordered string log.
#[derive(Debug, Clone, Default)]
pub struct Log(Arc<Mutex<Vec<String>>>);

impl Log {
    /// Appends an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    /// Returns a copy of every entry.
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Logs written by fixture producers and tests.
#[derive(Debug, Clone, Default)]
pub struct Logs {
    /// Producer lifecycle events and test outputs.
    pub events: Log,
    /// Element type of every producer handle a contract test received.
    pub injections: Log,
}

// ========================================================================
// Types Under Test
// ========================================================================

/// Root interface.
pub trait A {
    /// Returns the `A` name.
    fn a_name(&self) -> String;
}

/// Interface extending `A`.
pub trait B: A {
    /// Returns the `B` name.
    fn b_name(&self) -> String;
}

/// Interface extending `B`.
pub trait C: B {
    /// Returns the `C` name.
    fn c_name(&self) -> String;
}

/// Concrete class implementing `C`.
#[derive(Debug, Clone, Copy)]
pub struct Impl;

impl A for Impl {
    fn a_name(&self) -> String {
        "aname".to_string()
    }
}

impl B for Impl {
    fn b_name(&self) -> String {
        "bname".to_string()
    }
}

impl C for Impl {
    fn c_name(&self) -> String {
        "cname".to_string()
    }
}

/// Class implementing only `A`.
#[derive(Debug, Clone, Copy)]
pub struct OnlyA;

impl A for OnlyA {
    fn a_name(&self) -> String {
        "only-a".to_string()
    }
}

/// Composite whose parts are produced independently.
#[derive(Debug, Clone, Copy)]
pub struct Composite;

impl Composite {
    /// Returns the `A` part.
    pub fn get_a(&self) -> Box<dyn A> {
        Box::new(OnlyA)
    }

    /// Returns the `B` part.
    pub fn get_b(&self) -> Box<dyn B> {
        Box::new(Impl)
    }
}

// ========================================================================
// Contract Tests
// ========================================================================

/// Contract test state for an interface `T`.
pub struct Probe<T: ?Sized + 'static> {
    /// Shared logs.
    pub logs: Logs,
    /// Injected producer.
    pub producer: Option<Arc<dyn Producer<Box<T>>>>,
    /// Instance created by `set_up`.
    pub instance: Option<Box<T>>,
}

impl<T: ?Sized + 'static> Probe<T> {
    /// Creates an un-injected probe.
    pub fn new(logs: Logs) -> Self {
        Self {
            logs,
            producer: None,
            instance: None,
        }
    }
}

/// Starts a contract test for `contract` whose single test method logs
/// `call(instance)`.
pub fn contract_test<T: ?Sized + 'static>(
    test: &str,
    contract: &str,
    method: &str,
    call: fn(&T) -> String,
    logs: &Logs,
) -> TypeBuilder {
    let logs = logs.clone();
    TypeDescriptor::class(test)
        .marker(Marker::Contract(name(contract)))
        .constructor(move || Probe::<T>::new(logs.clone()))
        .method(MethodDescriptor::setter::<Probe<T>>("set_producer", |probe, handle| {
            probe.logs.injections.push(handle.element_type());
            probe.producer = handle.producer::<Box<T>>();
        }))
        .method(MethodDescriptor::before::<Probe<T>>("set_up", |probe| {
            let producer =
                probe.producer.clone().ok_or_else(|| TestFailure::new("producer not injected"))?;
            probe.instance = Some(producer.new_instance()?);
            Ok(())
        }))
        .method(MethodDescriptor::test::<Probe<T>>(method, move |probe| {
            let instance =
                probe.instance.as_deref().ok_or_else(|| TestFailure::new("no instance"))?;
            probe.logs.events.push(call(instance));
            Ok(())
        }))
        .method(MethodDescriptor::after::<Probe<T>>("tear_down", |probe| {
            if let Some(producer) = &probe.producer {
                producer.clean_up();
            }
            Ok(())
        }))
}

/// Contract test for `A`.
pub fn a_test(logs: &Logs) -> TypeBuilder {
    contract_test::<dyn A>(A_TEST, A, "a_name_is_reported", |a| a.a_name(), logs)
}

/// Contract test for `B`.
pub fn b_test(logs: &Logs) -> TypeBuilder {
    contract_test::<dyn B>(B_TEST, B, "b_name_is_reported", |b| b.b_name(), logs)
}

/// Contract test for `C`.
pub fn c_test(logs: &Logs) -> TypeBuilder {
    contract_test::<dyn C>(C_TEST, C, "c_name_is_reported", |c| c.c_name(), logs)
}

// ========================================================================
// Suites
// ========================================================================

/// Root suite state.
pub struct SuiteRoot {
    /// Shared logs.
    pub logs: Logs,
}

/// Returns an `Impl` producer with views for `A`, `B` and `C`.
pub fn impl_producer(logs: &Logs) -> Result<ProducerHandle, ProducerError> {
    let created = logs.events.clone();
    let cleaned = logs.events.clone();
    let producer = FnProducer::new(move || {
        created.push("newInstance");
        Impl
    })
    .on_clean_up(move || cleaned.push("cleanUp"));
    ProducerHandle::of::<Impl, _>(producer)
        .with_view::<Impl, Box<dyn A>>(|instance| Box::new(instance))?
        .with_view::<Impl, Box<dyn B>>(|instance| Box::new(instance))?
        .with_view::<Impl, Box<dyn C>>(|instance| Box::new(instance))
}

/// Starts a composed suite for `class_under_test` whose accessor returns
/// [`impl_producer`].
pub fn suite(suite: &str, declaration: ContractImpl, logs: &Logs) -> TypeBuilder {
    let logs = logs.clone();
    TypeDescriptor::class(suite)
        .marker(Marker::ContractSuite)
        .marker(Marker::ContractImpl(declaration))
        .constructor(move || SuiteRoot {
            logs: logs.clone(),
        })
        .method(MethodDescriptor::getter::<SuiteRoot>("get_producer", |root| {
            impl_producer(&root.logs)
        }))
}

/// Interface and class declarations for `A`, `B`, `C` and `Impl`.
pub fn abc_types() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::interface(A).build(),
        TypeDescriptor::interface(B).implements(A).build(),
        TypeDescriptor::interface(C).implements(B).build(),
        TypeDescriptor::class(IMPL).implements(C).build(),
    ]
}

/// Catalog holding the interfaces, `Impl`, and the given extra types.
pub fn catalog_with(extra: Vec<TypeDescriptor>) -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    for descriptor in abc_types().into_iter().chain(extra) {
        catalog.register(descriptor);
    }
    catalog
}

/// The complete `A`/`B`/`C` world with its composed suite.
pub fn abc_world(logs: &Logs) -> TypeCatalog {
    catalog_with(vec![
        a_test(logs).build(),
        b_test(logs).build(),
        c_test(logs).build(),
        suite(IMPL_SUITE, ContractImpl::new(IMPL), logs).build(),
    ])
}

// ========================================================================
// Dynamic Suites
// ========================================================================

/// Child suite state holding the base producer.
#[derive(Default)]
pub struct Adapter {
    /// Base producer received from the dynamic root.
    pub base: Option<ProducerHandle>,
}

/// Adapts a base handle into the producer a child's tests expect.
pub type Adapt = fn(&ProducerHandle) -> Result<ProducerHandle, ProducerError>;

/// Starts a child suite that adapts the dynamic root's producer.
pub fn adapting_suite(suite: &str, declaration: ContractImpl, adapt: Adapt) -> TypeBuilder {
    TypeDescriptor::class(suite)
        .marker(Marker::ContractSuite)
        .marker(Marker::ContractImpl(declaration))
        .constructor(Adapter::default)
        .method(MethodDescriptor::setter::<Adapter>("set_base", |adapter, handle| {
            adapter.base = Some(handle);
        }))
        .method(MethodDescriptor::getter::<Adapter>("get_producer", move |adapter| {
            let base = adapter
                .base
                .as_ref()
                .ok_or_else(|| ProducerError::Creation("base producer not injected".to_string()))?;
            adapt(base)
        }))
}

/// Dynamic root state.
pub struct DynamicRoot {
    /// Shared logs.
    pub logs: Logs,
    /// Child types supplied at runtime.
    pub children: Vec<TypeName>,
}

/// Starts a dynamic suite for `Composite` supplying `children`.
pub fn dynamic_suite(children: &[&str], logs: &Logs) -> TypeBuilder {
    let logs = logs.clone();
    let children: Vec<TypeName> = children.iter().copied().map(name).collect();
    TypeDescriptor::class(D_SUITE)
        .marker(Marker::ContractImpl(ContractImpl::new(D)))
        .constructor(move || DynamicRoot {
            logs: logs.clone(),
            children: children.clone(),
        })
        .suite_classes::<DynamicRoot>(|root| root.children.clone())
        .method(MethodDescriptor::dynamic_getter::<DynamicRoot>("get_base", |root| {
            let created = root.logs.events.clone();
            let cleaned = root.logs.events.clone();
            let producer = FnProducer::new(move || {
                created.push("newInstance");
                Composite
            })
            .on_clean_up(move || cleaned.push("cleanUp"));
            Ok(ProducerHandle::of::<Composite, _>(producer))
        }))
}

/// The dynamic world: `Composite`, its dynamic suite, and two adapting
/// children. `ForB` skips `A`, so it composes only the `B` test.
pub fn dynamic_world(logs: &Logs) -> TypeCatalog {
    catalog_with(vec![
        TypeDescriptor::class(D).build(),
        a_test(logs).build(),
        b_test(logs).build(),
        dynamic_suite(&[FOR_A, FOR_B], logs).build(),
        adapting_suite(FOR_A, ContractImpl::new(A), |base| {
            base.adapt::<Composite, Box<dyn A>>(|composite| composite.get_a())
        })
        .build(),
        adapting_suite(FOR_B, ContractImpl::new(B).skip(A), |base| {
            base.adapt::<Composite, Box<dyn B>>(|composite| composite.get_b())
        })
        .build(),
    ])
}

// crates/contract-suite-core/src/suite/composer.rs
// ============================================================================
// Module: Suite Composer
// Description: Expands a composed suite into runnable contract-test children.
// Purpose: Resolve, validate, and wire every applicable contract test.
// Dependencies: crate::{host, model, registry, suite, universe}, tracing
// ============================================================================

//! ## Overview
//! Composition walks `Constructing -> {ErrorTerminal | Dynamic | Annotated}
//! -> Composed`:
//! - Settings or root-metadata errors end in `ErrorTerminal`.
//! - A root with the dynamic-suite capability asks its instance for child
//!   types. Children marked `ContractSuite` become nested suites whose tests
//!   receive producers adapted by that child; other children run as plain
//!   classes.
//! - Otherwise the registry resolves the live tests for the interface
//!   closure of the class under test. The root's own test methods form one
//!   extra child, placed first.
//! - A composition that yields no children is converted to `ErrorTerminal`.
//!
//! A contract test with collected errors becomes an error-reporting child;
//! its siblings still compose.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use crate::host::ClassRunner;
use crate::host::ConstructorFactory;
use crate::host::Description;
use crate::host::InstanceFactory;
use crate::host::RunNotifier;
use crate::host::Runner;
use crate::model::MarkerKind;
use crate::model::MethodDescriptor;
use crate::model::TypeDescriptor;
use crate::model::TypeName;
use crate::registry::ConfigurationError;
use crate::registry::ContractRegistry;
use crate::registry::TestInfo;
use crate::registry::TestRole;
use crate::suite::error_runner::ErrorRunner;
use crate::suite::injection::AdaptingSuite;
use crate::suite::injection::DynamicInjector;
use crate::suite::injection::ProducerInjector;
use crate::suite::injection::SharedInstance;
use crate::universe::TypeUniverse;

// ============================================================================
// SECTION: Composed Suite
// ============================================================================

/// Final state of a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteState {
    /// Children were resolved.
    Composed,
    /// The suite reports configuration errors instead of running tests.
    ErrorTerminal,
}

/// What a composed child runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildKind {
    /// The root suite's own test methods.
    BaseTests,
    /// A contract test wired with the suite's producer.
    ContractTest {
        /// Contract interface.
        contract: TypeName,
        /// Contract test type.
        test: TypeName,
    },
    /// A nested suite of a dynamic composition.
    DynamicSuite {
        /// Child suite type.
        suite: TypeName,
    },
    /// A plain class supplied by a dynamic suite.
    Class {
        /// Class type.
        class: TypeName,
    },
    /// A child whose configuration is invalid.
    Errors {
        /// Offending type.
        class: TypeName,
    },
}

/// One runnable child of a composed suite.
pub struct SuiteChild {
    /// Child kind.
    kind: ChildKind,
    /// Child runner.
    runner: Box<dyn Runner>,
}

impl SuiteChild {
    /// Returns the child kind.
    #[must_use]
    pub const fn kind(&self) -> &ChildKind {
        &self.kind
    }

    /// Returns the child runner.
    #[must_use]
    pub fn runner(&self) -> &dyn Runner {
        self.runner.as_ref()
    }
}

/// Body of a composed suite.
enum SuiteBody {
    /// Resolved children, in run order.
    Composed(Vec<SuiteChild>),
    /// Replayed configuration errors.
    ErrorTerminal(ErrorRunner),
}

/// A composed contract suite.
pub struct ContractSuite {
    /// Root suite type.
    name: TypeName,
    /// Children or terminal errors.
    body: SuiteBody,
}

impl ContractSuite {
    /// Creates a suite in the error terminal state.
    fn terminal(name: TypeName, errors: Vec<ConfigurationError>) -> Self {
        debug!(suite = %name, errors = errors.len(), "suite composed to error terminal");
        Self {
            body: SuiteBody::ErrorTerminal(ErrorRunner::new(name.clone(), errors)),
            name,
        }
    }

    /// Returns the root suite type.
    #[must_use]
    pub const fn name(&self) -> &TypeName {
        &self.name
    }

    /// Returns the final composition state.
    #[must_use]
    pub const fn state(&self) -> SuiteState {
        match self.body {
            SuiteBody::Composed(_) => SuiteState::Composed,
            SuiteBody::ErrorTerminal(_) => SuiteState::ErrorTerminal,
        }
    }

    /// Returns the composed children; empty in the error terminal state.
    #[must_use]
    pub fn children(&self) -> &[SuiteChild] {
        match &self.body {
            SuiteBody::Composed(children) => children,
            SuiteBody::ErrorTerminal(_) => &[],
        }
    }

    /// Returns the terminal errors; empty when composed.
    #[must_use]
    pub fn errors(&self) -> &[ConfigurationError] {
        match &self.body {
            SuiteBody::Composed(_) => &[],
            SuiteBody::ErrorTerminal(runner) => runner.errors(),
        }
    }
}

impl Runner for ContractSuite {
    fn description(&self) -> Description {
        match &self.body {
            SuiteBody::Composed(children) => {
                let mut description = Description::for_class(&self.name);
                for child in children {
                    description.add_child(child.runner.description());
                }
                description
            }
            SuiteBody::ErrorTerminal(runner) => runner.description(),
        }
    }

    fn run(&self, notifier: &mut dyn RunNotifier) {
        match &self.body {
            SuiteBody::Composed(children) => {
                for child in children {
                    child.runner.run(notifier);
                }
            }
            SuiteBody::ErrorTerminal(runner) => runner.run(notifier),
        }
    }

    fn test_count(&self) -> usize {
        match &self.body {
            SuiteBody::Composed(children) => {
                children.iter().map(|child| child.runner.test_count()).sum()
            }
            SuiteBody::ErrorTerminal(runner) => runner.test_count(),
        }
    }
}

// ============================================================================
// SECTION: Composer
// ============================================================================

/// Builds [`ContractSuite`]s from a universe and a populated registry.
pub struct SuiteComposer<'a, U: ?Sized> {
    /// Universe resolving suite, test, and class-under-test types.
    universe: &'a U,
    /// Registry of discovered tests.
    registry: &'a ContractRegistry,
}

impl<'a, U: TypeUniverse + ?Sized> SuiteComposer<'a, U> {
    /// Creates a composer.
    #[must_use]
    pub const fn new(universe: &'a U, registry: &'a ContractRegistry) -> Self {
        Self {
            universe,
            registry,
        }
    }

    /// Composes the suite rooted at the named type.
    #[must_use]
    pub fn compose(&self, root: &TypeName) -> ContractSuite {
        match self.universe.load(root) {
            Ok(descriptor) => self.compose_descriptor(descriptor),
            Err(err) => ContractSuite::terminal(
                root.clone(),
                vec![ConfigurationError::UnresolvedType {
                    referrer: root.clone(),
                    name: root.clone(),
                    reason: err.to_string(),
                }],
            ),
        }
    }

    /// Composes the suite rooted at `root`.
    #[must_use]
    pub fn compose_descriptor(&self, root: Arc<TypeDescriptor>) -> ContractSuite {
        let name = root.name().clone();
        if !self.registry.settings_errors().is_empty() {
            return ContractSuite::terminal(name, self.registry.settings_errors().to_vec());
        }
        let info = self.suite_info(root);
        if info.has_errors() {
            return ContractSuite::terminal(name, info.errors().to_vec());
        }
        let Some(accessor) = info.accessor().cloned() else {
            return ContractSuite::terminal(
                name.clone(),
                vec![ConfigurationError::MissingInjectionAccessor {
                    suite: name,
                }],
            );
        };
        let shared = Rc::new(SharedInstance::new(Arc::clone(info.descriptor())));
        let children = if info.descriptor().is_dynamic_suite() {
            debug!(suite = %name, "composing dynamic suite");
            match self.dynamic_children(&info, &shared, &accessor) {
                Ok(children) => children,
                Err(err) => return ContractSuite::terminal(name, vec![err]),
            }
        } else {
            debug!(suite = %name, "composing annotated suite");
            self.annotated_children(&info, &shared, &accessor)
        };
        if children.is_empty() {
            return ContractSuite::terminal(
                name.clone(),
                vec![ConfigurationError::NoTestsResolved {
                    suite: name,
                }],
            );
        }
        ContractSuite {
            name,
            body: SuiteBody::Composed(children),
        }
    }

    /// Returns registered suite metadata, synthesizing it when absent.
    fn suite_info(&self, descriptor: Arc<TypeDescriptor>) -> TestInfo {
        self.registry
            .info(descriptor.name())
            .filter(|info| info.role() == TestRole::Suite)
            .cloned()
            .unwrap_or_else(|| TestInfo::for_suite(descriptor, self.universe))
    }

    /// Resolves the children of a statically annotated suite.
    fn annotated_children(
        &self,
        info: &TestInfo,
        shared: &Rc<SharedInstance>,
        accessor: &MethodDescriptor,
    ) -> Vec<SuiteChild> {
        let root = info.descriptor();
        let mut children = Vec::new();
        let base =
            ClassRunner::new(Arc::clone(root), Box::new(ConstructorFactory::new(Arc::clone(root))));
        if !base.test_names().is_empty() {
            children.push(SuiteChild {
                kind: ChildKind::BaseTests,
                runner: Box::new(base),
            });
        }
        children.extend(self.contract_children(info, |test, mutator| {
            Box::new(ProducerInjector::new(
                Arc::clone(test.descriptor()),
                mutator,
                Rc::clone(shared),
                accessor.clone(),
            ))
        }));
        children
    }

    /// Resolves the children of a dynamic suite.
    fn dynamic_children(
        &self,
        info: &TestInfo,
        shared: &Rc<SharedInstance>,
        accessor: &MethodDescriptor,
    ) -> Result<Vec<SuiteChild>, ConfigurationError> {
        let suite = info.test_type();
        let root = info.descriptor();
        let names = shared.with_instance(|instance| root.suite_classes(instance)).map_err(|err| {
            ConfigurationError::DynamicSuiteFailed {
                suite: suite.clone(),
                reason: err.to_string(),
            }
        })?;
        if names.is_empty() {
            return Err(ConfigurationError::EmptyDynamicSuite {
                suite: suite.clone(),
            });
        }
        let mut children = Vec::with_capacity(names.len());
        for name in names {
            let child = match self.universe.load(&name) {
                Ok(descriptor) if descriptor.has_marker(MarkerKind::ContractSuite) => {
                    self.adapting_child(descriptor, shared, accessor)
                }
                Ok(descriptor) => SuiteChild {
                    kind: ChildKind::Class {
                        class: name,
                    },
                    runner: Box::new(ClassRunner::new(
                        Arc::clone(&descriptor),
                        Box::new(ConstructorFactory::new(descriptor)),
                    )),
                },
                Err(err) => error_child(name.clone(), vec![ConfigurationError::UnresolvedType {
                    referrer: suite.clone(),
                    name,
                    reason: err.to_string(),
                }]),
            };
            children.push(child);
        }
        Ok(children)
    }

    /// Composes a nested suite whose tests receive producers it adapts.
    fn adapting_child(
        &self,
        descriptor: Arc<TypeDescriptor>,
        shared: &Rc<SharedInstance>,
        accessor: &MethodDescriptor,
    ) -> SuiteChild {
        let name = descriptor.name().clone();
        let mut info = self.suite_info(Arc::clone(&descriptor));
        if info.injection_method().is_none() {
            info.add_error(ConfigurationError::MissingInjectionMutator {
                type_name: name.clone(),
            });
        }
        let adapter = match (info.injection_method(), info.accessor()) {
            (Some(mutator), Some(child_accessor)) if !info.has_errors() => AdaptingSuite {
                descriptor,
                mutator: mutator.clone(),
                accessor: child_accessor.clone(),
            },
            _ => return error_child(name, info.errors().to_vec()),
        };
        let children = self.contract_children(&info, |test, mutator| {
            Box::new(DynamicInjector::new(
                Arc::clone(test.descriptor()),
                mutator,
                Rc::clone(shared),
                accessor.clone(),
                adapter.clone(),
            ))
        });
        let suite = if children.is_empty() {
            ContractSuite::terminal(name.clone(), vec![ConfigurationError::NoTestsResolved {
                suite: name.clone(),
            }])
        } else {
            ContractSuite {
                name: name.clone(),
                body: SuiteBody::Composed(children),
            }
        };
        SuiteChild {
            kind: ChildKind::DynamicSuite {
                suite: name,
            },
            runner: Box::new(suite),
        }
    }

    /// Builds one child per contract test resolved for `info`.
    ///
    /// Abstract tests are left out; tests with collected errors become
    /// error-reporting children.
    fn contract_children<F>(&self, info: &TestInfo, mut injector: F) -> Vec<SuiteChild>
    where
        F: FnMut(&TestInfo, MethodDescriptor) -> Box<dyn InstanceFactory>,
    {
        let mut children = Vec::new();
        for test in self.registry.annotated_tests_for(info, self.universe) {
            if test.is_abstract() {
                debug!(
                    suite = %info.test_type(),
                    test = %test.test_type(),
                    "abstract contract test left out"
                );
                continue;
            }
            let mutator = match test.injection_method() {
                Some(mutator) if !test.has_errors() => mutator.clone(),
                _ => {
                    children.push(error_child(test.test_type().clone(), test.errors().to_vec()));
                    continue;
                }
            };
            let excluded = info.excluded_methods(test.test_type()).cloned().unwrap_or_default();
            let runner = ClassRunner::with_exclusions(
                Arc::clone(test.descriptor()),
                injector(test, mutator),
                &excluded,
            );
            children.push(SuiteChild {
                kind: ChildKind::ContractTest {
                    contract: test
                        .contract_type()
                        .cloned()
                        .unwrap_or_else(|| test.test_type().clone()),
                    test: test.test_type().clone(),
                },
                runner: Box::new(runner),
            });
        }
        children
    }
}

/// Wraps errors for one type as an error-reporting child.
fn error_child(class: TypeName, errors: Vec<ConfigurationError>) -> SuiteChild {
    SuiteChild {
        kind: ChildKind::Errors {
            class: class.clone(),
        },
        runner: Box::new(ErrorRunner::new(class, errors)),
    }
}

// crates/contract-suite-core/src/registry/test_info.rs
// ============================================================================
// Module: Test Metadata
// Description: Validated metadata for contract tests and composed suites.
// Purpose: Capture injection methods, exclusions, and collected errors per type.
// Dependencies: crate::{introspect, model, registry, universe}
// ============================================================================

//! ## Overview
//! [`TestInfo`] is built once per discovered contract test or composed suite.
//! Construction never fails: every violation found while validating the
//! declaration is appended to the metadata's error list.
//!
//! For a contract test the contract type is the interface named by its
//! `Contract` marker and the injection method is its `Inject` mutator. For a
//! composed suite the contract type is the class under test named by its
//! `ContractImpl` marker; the suite also carries an injection accessor and
//! its skip, ignore and method-exclusion lists.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::introspect::Lookup;
use crate::introspect::find_annotated_getter;
use crate::introspect::find_annotated_setter;
use crate::model::MarkerKind;
use crate::model::MethodDescriptor;
use crate::model::TypeDescriptor;
use crate::model::TypeName;
use crate::model::marker::repeated_markers;
use crate::registry::errors::ConfigurationError;
use crate::universe::TypeLoader;

// ============================================================================
// SECTION: Test Metadata
// ============================================================================

/// Role of a discovered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestRole {
    /// A contract test for one interface.
    ContractTest,
    /// A composed contract suite.
    Suite,
}

/// Metadata for one contract test or composed suite.
///
/// # Invariants
/// - `accessor` and `mutator`, when set, name methods declared on
///   `descriptor` with the matching injection shape.
/// - Only the error list changes after construction.
#[derive(Debug, Clone)]
pub struct TestInfo {
    /// Test or suite type.
    test_type: TypeName,
    /// Contract interface, or the class under test for a suite.
    contract_type: Option<TypeName>,
    /// Contract test or suite.
    role: TestRole,
    /// Name of the injection accessor.
    accessor: Option<String>,
    /// Name of the injection mutator.
    mutator: Option<String>,
    /// Interfaces whose tests are not composed in.
    skip: BTreeSet<TypeName>,
    /// Contract test types that are not composed in.
    ignore: BTreeSet<TypeName>,
    /// Excluded method names keyed by contract test type.
    excluded_methods: BTreeMap<TypeName, BTreeSet<String>>,
    /// Collected configuration errors.
    errors: Vec<ConfigurationError>,
    /// Registered descriptor.
    descriptor: Arc<TypeDescriptor>,
}

impl TestInfo {
    /// Builds metadata for a type carrying a `Contract` marker.
    #[must_use]
    pub fn for_contract_test(descriptor: Arc<TypeDescriptor>) -> Self {
        let mut info = Self::empty(descriptor, TestRole::ContractTest);
        info.contract_type = info.descriptor.contract().cloned();
        if info.descriptor.is_abstract() {
            info.errors.push(ConfigurationError::AbstractContractTest {
                test: info.test_type.clone(),
            });
        }
        let descriptor = Arc::clone(&info.descriptor);
        match find_annotated_setter(&descriptor, MarkerKind::Inject) {
            Lookup::Found(method) => info.mutator = Some(method.name().to_string()),
            Lookup::Missing => info.errors.push(ConfigurationError::MissingInjectionMutator {
                type_name: info.test_type.clone(),
            }),
            Lookup::Ambiguous(methods) => info.record_ambiguous(MarkerKind::Inject, &methods),
        }
        info
    }

    /// Builds metadata for a composed suite, resolving its class under test
    /// through `loader`.
    #[must_use]
    pub fn for_suite<L>(descriptor: Arc<TypeDescriptor>, loader: &L) -> Self
    where
        L: TypeLoader + ?Sized,
    {
        let mut info = Self::empty(descriptor, TestRole::Suite);
        let descriptor = Arc::clone(&info.descriptor);
        match descriptor.contract_impl() {
            None => info.errors.push(ConfigurationError::MissingClassUnderTest {
                suite: info.test_type.clone(),
            }),
            Some(declaration) => {
                info.contract_type = Some(declaration.class_under_test.clone());
                info.skip = declaration.skip.iter().cloned().collect();
                info.ignore = declaration.ignore.iter().cloned().collect();
                match loader.load(&declaration.class_under_test) {
                    Ok(class_under_test) => {
                        if class_under_test.is_abstract() && !class_under_test.is_interface() {
                            info.errors.push(ConfigurationError::AbstractClassUnderTest {
                                suite: info.test_type.clone(),
                                class_under_test: declaration.class_under_test.clone(),
                            });
                        }
                    }
                    Err(err) => info.errors.push(ConfigurationError::UnresolvedType {
                        referrer: info.test_type.clone(),
                        name: declaration.class_under_test.clone(),
                        reason: err.to_string(),
                    }),
                }
            }
        }
        for exclude in descriptor.exclusions() {
            info.excluded_methods
                .entry(exclude.test.clone())
                .or_default()
                .extend(exclude.methods.iter().cloned());
        }

        let accessor_kind = if descriptor.is_dynamic_suite() {
            MarkerKind::DynamicInject
        } else {
            MarkerKind::Inject
        };
        match find_annotated_getter(&descriptor, accessor_kind) {
            Lookup::Found(method) => info.accessor = Some(method.name().to_string()),
            Lookup::Missing if accessor_kind == MarkerKind::DynamicInject => {
                info.errors.push(ConfigurationError::MissingDynamicAccessor {
                    suite: info.test_type.clone(),
                });
            }
            Lookup::Missing => info.errors.push(ConfigurationError::MissingInjectionAccessor {
                suite: info.test_type.clone(),
            }),
            Lookup::Ambiguous(methods) => info.record_ambiguous(accessor_kind, &methods),
        }
        match find_annotated_setter(&descriptor, MarkerKind::Inject) {
            Lookup::Found(method) => info.mutator = Some(method.name().to_string()),
            Lookup::Missing => {}
            Lookup::Ambiguous(methods) => info.record_ambiguous(MarkerKind::Inject, &methods),
        }
        info
    }

    /// Builds metadata according to the type's markers: contract tests when
    /// a `Contract` marker is present, composed suites otherwise.
    #[must_use]
    pub fn from_descriptor<L>(descriptor: Arc<TypeDescriptor>, loader: &L) -> Self
    where
        L: TypeLoader + ?Sized,
    {
        if descriptor.contract().is_some() {
            Self::for_contract_test(descriptor)
        } else {
            Self::for_suite(descriptor, loader)
        }
    }

    /// Creates metadata with no declarations resolved yet.
    fn empty(descriptor: Arc<TypeDescriptor>, role: TestRole) -> Self {
        let test_type = descriptor.name().clone();
        let errors = repeated_markers(descriptor.markers())
            .into_iter()
            .map(|marker| ConfigurationError::RepeatedMarker {
                type_name: test_type.clone(),
                marker,
            })
            .collect();
        Self {
            test_type,
            contract_type: None,
            role,
            accessor: None,
            mutator: None,
            skip: BTreeSet::new(),
            ignore: BTreeSet::new(),
            excluded_methods: BTreeMap::new(),
            errors,
            descriptor,
        }
    }

    /// Records an ambiguous injection lookup.
    fn record_ambiguous(&mut self, marker: MarkerKind, methods: &[&MethodDescriptor]) {
        self.errors.push(ConfigurationError::AmbiguousInjection {
            type_name: self.test_type.clone(),
            marker: marker.type_name(),
            methods: methods.iter().map(|method| method.name().to_string()).collect(),
        });
    }

    /// Returns the test or suite type.
    #[must_use]
    pub const fn test_type(&self) -> &TypeName {
        &self.test_type
    }

    /// Returns the contract interface, or a suite's class under test.
    #[must_use]
    pub const fn contract_type(&self) -> Option<&TypeName> {
        self.contract_type.as_ref()
    }

    /// Returns the role of the type.
    #[must_use]
    pub const fn role(&self) -> TestRole {
        self.role
    }

    /// Returns the registered descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// Returns the injection mutator.
    #[must_use]
    pub fn injection_method(&self) -> Option<&MethodDescriptor> {
        self.mutator.as_deref().and_then(|name| self.descriptor.method(name))
    }

    /// Returns the injection accessor of a suite.
    #[must_use]
    pub fn accessor(&self) -> Option<&MethodDescriptor> {
        self.accessor.as_deref().and_then(|name| self.descriptor.method(name))
    }

    /// Returns the interfaces skipped by a suite.
    #[must_use]
    pub const fn skip_list(&self) -> &BTreeSet<TypeName> {
        &self.skip
    }

    /// Returns the contract test types ignored by a suite.
    #[must_use]
    pub const fn ignored_tests(&self) -> &BTreeSet<TypeName> {
        &self.ignore
    }

    /// Returns the methods of `test` excluded by a suite.
    #[must_use]
    pub fn excluded_methods(&self, test: &TypeName) -> Option<&BTreeSet<String>> {
        self.excluded_methods.get(test)
    }

    /// Returns the collected configuration errors.
    #[must_use]
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.errors
    }

    /// Returns `true` when any configuration error was collected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` when the type cannot be instantiated directly.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.descriptor.is_abstract()
    }

    /// Appends a configuration error.
    pub(crate) fn add_error(&mut self, error: ConfigurationError) {
        self.errors.push(error);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only unwraps are permitted.")]

    use std::sync::Arc;

    use super::TestInfo;
    use super::TestRole;
    use crate::model::ContractExclude;
    use crate::model::ContractImpl;
    use crate::model::Marker;
    use crate::model::MethodDescriptor;
    use crate::model::ProducerHandle;
    use crate::model::ProducerError;
    use crate::model::TypeDescriptor;
    use crate::registry::errors::ConfigurationError;
    use crate::universe::TypeCatalog;

    struct Probe;

    fn handle(_: &mut Probe) -> Result<ProducerHandle, ProducerError> {
        Err(ProducerError::Creation("unused".to_string()))
    }

    #[test]
    fn contract_test_records_contract_and_mutator() {
        let descriptor = TypeDescriptor::class("org.example.ATest")
            .marker(Marker::Contract("org.example.A".into()))
            .method(MethodDescriptor::setter::<Probe>("set_producer", |_, _| {}))
            .shared();
        let info = TestInfo::for_contract_test(descriptor);
        assert_eq!(info.role(), TestRole::ContractTest);
        assert_eq!(info.contract_type().map(|name| name.as_str()), Some("org.example.A"));
        assert_eq!(info.injection_method().map(MethodDescriptor::name), Some("set_producer"));
        assert!(!info.has_errors());
    }

    #[test]
    fn abstract_contract_test_without_mutator_collects_both_errors() {
        let descriptor = TypeDescriptor::class("org.example.ATest")
            .abstract_type()
            .marker(Marker::Contract("org.example.A".into()))
            .shared();
        let info = TestInfo::for_contract_test(descriptor);
        assert_eq!(info.errors().len(), 2);
        assert!(matches!(info.errors()[0], ConfigurationError::AbstractContractTest { .. }));
        assert!(matches!(info.errors()[1], ConfigurationError::MissingInjectionMutator { .. }));
    }

    #[test]
    fn suite_collects_exclusions_and_accessor() {
        let catalog = TypeCatalog::new().with(TypeDescriptor::class("org.example.Impl").build());
        let descriptor = TypeDescriptor::class("org.example.ImplSuite")
            .marker(Marker::ContractSuite)
            .marker(Marker::ContractImpl(
                ContractImpl::new("org.example.Impl").skip("org.example.B"),
            ))
            .marker(Marker::ContractExclude(ContractExclude::new("org.example.ATest", ["one"])))
            .marker(Marker::ContractExclude(ContractExclude::new("org.example.ATest", ["two"])))
            .method(MethodDescriptor::getter::<Probe>("producer", handle))
            .shared();
        let info = TestInfo::for_suite(descriptor, &catalog);
        assert!(!info.has_errors());
        assert_eq!(info.accessor().map(MethodDescriptor::name), Some("producer"));
        assert!(info.skip_list().contains(&"org.example.B".into()));
        let excluded = info.excluded_methods(&"org.example.ATest".into()).unwrap();
        assert_eq!(excluded.len(), 2);
    }

    #[test]
    fn suite_rejects_abstract_class_but_accepts_interface() {
        let catalog = TypeCatalog::new()
            .with(TypeDescriptor::class("org.example.Base").abstract_type().build())
            .with(TypeDescriptor::interface("org.example.A").build());
        let suite = |target: &str| {
            TypeDescriptor::class("org.example.Suite")
                .marker(Marker::ContractImpl(ContractImpl::new(target)))
                .method(MethodDescriptor::getter::<Probe>("producer", handle))
                .shared()
        };
        let abstract_info = TestInfo::for_suite(suite("org.example.Base"), &catalog);
        assert!(matches!(
            abstract_info.errors(),
            [ConfigurationError::AbstractClassUnderTest { .. }]
        ));
        let interface_info = TestInfo::for_suite(suite("org.example.A"), &catalog);
        assert!(!interface_info.has_errors());
    }

    #[test]
    fn duplicate_accessors_are_ambiguous() {
        let catalog = TypeCatalog::new().with(TypeDescriptor::class("org.example.Impl").build());
        let descriptor = TypeDescriptor::class("org.example.Suite")
            .marker(Marker::ContractImpl(ContractImpl::new("org.example.Impl")))
            .method(MethodDescriptor::getter::<Probe>("first", handle))
            .method(MethodDescriptor::getter::<Probe>("second", handle))
            .shared();
        let info = TestInfo::for_suite(Arc::clone(&descriptor), &catalog);
        assert!(info.accessor().is_none());
        assert!(matches!(
            info.errors(),
            [ConfigurationError::AmbiguousInjection { methods, .. }] if methods.len() == 2
        ));
    }

    #[test]
    fn missing_contract_impl_is_reported() {
        let catalog = TypeCatalog::new();
        let descriptor =
            TypeDescriptor::class("org.example.Suite").marker(Marker::ContractSuite).shared();
        let info = TestInfo::from_descriptor(descriptor, &catalog);
        assert_eq!(info.role(), TestRole::Suite);
        assert!(info.errors().iter().any(|error| matches!(
            error,
            ConfigurationError::MissingClassUnderTest { .. }
        )));
    }
}

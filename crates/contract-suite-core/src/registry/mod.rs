// crates/contract-suite-core/src/registry/mod.rs
// ============================================================================
// Module: Contract Registry
// Description: Two-way index between contract interfaces and their tests.
// Purpose: Discover contract tests and suites and resolve tests for a suite.
// Dependencies: crate::{introspect, model, settings, universe}, tracing
// ============================================================================

//! ## Overview
//! The registry is populated once per composition from a type universe. It
//! keeps every discovered test and suite keyed by type, and for each
//! contract interface the one live test. Registering a second test for an
//! interface replaces the first; the replacement is logged and recorded but
//! both tests stay reachable by type.
//!
//! Errors are never raised out of population. They live on the
//! [`TestInfo`] of the offending type and are exposed through
//! [`ContractRegistry::errors`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod errors;
pub mod test_info;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;

pub use self::errors::ConfigurationError;
pub use self::test_info::TestInfo;
pub use self::test_info::TestRole;
use crate::introspect::transitive_interfaces;
use crate::model::MarkerKind;
use crate::model::TypeDescriptor;
use crate::model::TypeName;
use crate::settings::DiscoverySettings;
use crate::universe::SubjectView;
use crate::universe::TypeLoader;
use crate::universe::TypeScanner;
use crate::universe::TypeUniverse;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// A live contract test displaced by a later registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Contract interface.
    pub contract: TypeName,
    /// Test that was live before.
    pub replaced: TypeName,
    /// Test that is live now.
    pub by: TypeName,
}

/// Index of discovered contract tests and composed suites.
///
/// # Invariants
/// - Every test reachable through `live` is present in `by_test`.
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    /// Metadata keyed by test or suite type.
    by_test: BTreeMap<TypeName, TestInfo>,
    /// Live test type keyed by contract interface.
    live: BTreeMap<TypeName, TypeName>,
    /// Replacement history, in registration order.
    replacements: Vec<Replacement>,
    /// Every scanned type that passed the exclude filter, in scan order.
    scanned: Vec<Arc<TypeDescriptor>>,
    /// Errors carried in from discovery settings.
    settings_errors: Vec<ConfigurationError>,
}

impl ContractRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `universe` under the configured roots and registers every
    /// contract test and composed suite found.
    ///
    /// Types matched by the exclude filter, types carrying `Ignore`, and
    /// types (or contract interfaces) on the skip list are left out without
    /// recording an error.
    #[must_use]
    pub fn populate<U>(universe: &U, settings: &DiscoverySettings) -> Self
    where
        U: TypeUniverse + ?Sized,
    {
        let mut registry = Self {
            settings_errors: settings.errors().to_vec(),
            ..Self::default()
        };
        let scanner = TypeScanner::new(universe);
        let mut seen = BTreeSet::new();
        for root in settings.effective_roots() {
            for descriptor in scanner.scan(root, settings.include()) {
                if !seen.insert(descriptor.name().clone()) {
                    continue;
                }
                if settings.exclude().accepts(&SubjectView::new(&descriptor, universe)) {
                    debug!(type_name = %descriptor.name(), "exclude filter skipped type");
                    continue;
                }
                registry.scanned.push(Arc::clone(&descriptor));
                if descriptor.has_marker(MarkerKind::Ignore) {
                    debug!(type_name = %descriptor.name(), "ignored type skipped");
                    continue;
                }
                let skipped = settings.is_skipped(descriptor.name())
                    || descriptor.contract().is_some_and(|contract| settings.is_skipped(contract));
                if skipped {
                    debug!(type_name = %descriptor.name(), "skip list excluded type");
                    continue;
                }
                if descriptor.contract().is_some() {
                    registry.add(TestInfo::for_contract_test(descriptor));
                } else if descriptor.has_marker(MarkerKind::ContractImpl)
                    || descriptor.has_marker(MarkerKind::ContractSuite)
                {
                    registry.add(TestInfo::for_suite(descriptor, universe));
                }
            }
        }
        registry
    }

    /// Inserts metadata, replacing the live test of its contract interface.
    pub fn add(&mut self, info: TestInfo) {
        if info.role() == TestRole::ContractTest
            && let Some(contract) = info.contract_type()
        {
            let previous = self.live.insert(contract.clone(), info.test_type().clone());
            if let Some(previous) = previous.filter(|previous| previous != info.test_type()) {
                warn!(
                    contract = %contract,
                    replaced = %previous,
                    by = %info.test_type(),
                    "contract test replaced"
                );
                self.replacements.push(Replacement {
                    contract: contract.clone(),
                    replaced: previous,
                    by: info.test_type().clone(),
                });
            }
        }
        self.by_test.insert(info.test_type().clone(), info);
    }

    /// Returns metadata for a test or suite type.
    #[must_use]
    pub fn info(&self, test_type: &TypeName) -> Option<&TestInfo> {
        self.by_test.get(test_type)
    }

    /// Returns the live contract test for an interface.
    #[must_use]
    pub fn live_test(&self, contract: &TypeName) -> Option<&TestInfo> {
        self.live.get(contract).and_then(|test| self.by_test.get(test))
    }

    /// Returns every registered contract test declared for `contract`,
    /// the live one last.
    #[must_use]
    pub fn tests_for(&self, contract: &TypeName) -> Vec<&TestInfo> {
        let live = self.live.get(contract);
        let mut tests: Vec<&TestInfo> = self
            .by_test
            .values()
            .filter(|info| info.role() == TestRole::ContractTest)
            .filter(|info| info.contract_type() == Some(contract))
            .filter(|info| Some(info.test_type()) != live)
            .collect();
        if let Some(info) = self.live_test(contract) {
            tests.push(info);
        }
        tests
    }

    /// Iterates the live `(interface, test)` pairs in interface order.
    pub fn live_entries(&self) -> impl Iterator<Item = (&TypeName, &TestInfo)> {
        self.live
            .iter()
            .filter_map(|(contract, test)| self.by_test.get(test).map(|info| (contract, info)))
    }

    /// Iterates every registered test and suite in type order.
    pub fn entries(&self) -> impl Iterator<Item = &TestInfo> {
        self.by_test.values()
    }

    /// Returns the types seen by population, in scan order.
    #[must_use]
    pub fn scanned(&self) -> &[Arc<TypeDescriptor>] {
        &self.scanned
    }

    /// Returns the replacement history.
    #[must_use]
    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    /// Returns errors from the discovery settings.
    #[must_use]
    pub fn settings_errors(&self) -> &[ConfigurationError] {
        &self.settings_errors
    }

    /// Returns every configuration error: settings errors first, then the
    /// errors of each registered type in type order.
    #[must_use]
    pub fn errors(&self) -> Vec<&ConfigurationError> {
        self.settings_errors
            .iter()
            .chain(self.by_test.values().flat_map(TestInfo::errors))
            .collect()
    }

    /// Resolves the contract tests a suite composes.
    ///
    /// Walks the interface closure of the suite's class under test, drops
    /// interfaces on the suite's skip list, and collects the live test of
    /// every remaining interface unless the suite ignores that test.
    /// Interfaces without a live test contribute nothing.
    #[must_use]
    pub fn annotated_tests_for<'a, L>(&'a self, root: &TestInfo, loader: &L) -> Vec<&'a TestInfo>
    where
        L: TypeLoader + ?Sized,
    {
        let Some(class_under_test) = root.contract_type() else {
            return Vec::new();
        };
        let descriptor = match loader.load(class_under_test) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                debug!(
                    suite = %root.test_type(),
                    class_under_test = %class_under_test,
                    error = %err,
                    "class under test unresolvable"
                );
                return Vec::new();
            }
        };
        let mut tests: Vec<&TestInfo> = Vec::new();
        for interface in transitive_interfaces(&descriptor, loader) {
            if root.skip_list().contains(&interface) {
                debug!(suite = %root.test_type(), interface = %interface, "interface skipped");
                continue;
            }
            let Some(info) = self.live_test(&interface) else {
                continue;
            };
            if root.ignored_tests().contains(info.test_type()) {
                debug!(
                    suite = %root.test_type(),
                    test = %info.test_type(),
                    "contract test ignored"
                );
                continue;
            }
            if !tests.iter().any(|known| known.test_type() == info.test_type()) {
                tests.push(info);
            }
        }
        tests
    }
}

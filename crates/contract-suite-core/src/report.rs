// crates/contract-suite-core/src/report.rs
// ============================================================================
// Module: Coverage Report
// Description: Read-only coverage queries over a populated registry.
// Purpose: Back the reporting CLI with untested/unimplemented/error listings.
// Dependencies: crate::{introspect, model, registry, universe}, serde
// ============================================================================

//! ## Overview
//! [`CoverageReport`] answers three questions about a populated registry:
//! which scanned interfaces have no live contract test, which concrete
//! classes implement tested interfaces without any suite targeting them,
//! and which configuration errors were collected.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::introspect::is_concrete_class;
use crate::introspect::transitive_interfaces;
use crate::model::MarkerKind;
use crate::model::TypeDescriptor;
use crate::model::TypeName;
use crate::registry::ConfigurationError;
use crate::registry::ContractRegistry;
use crate::registry::TestRole;
use crate::universe::TypeLoader;

/// A concrete class with tested interfaces but no suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnimplementedContract {
    /// Concrete class.
    pub class: TypeName,
    /// Tested interfaces in its closure, in closure order.
    pub interfaces: Vec<TypeName>,
}

/// Coverage findings for one registry.
#[derive(Debug, Clone, Default)]
pub struct CoverageReport {
    /// Interfaces without a live contract test.
    untested: Vec<TypeName>,
    /// Concrete classes no suite targets.
    unimplemented: Vec<UnimplementedContract>,
    /// Collected configuration errors.
    errors: Vec<ConfigurationError>,
}

impl CoverageReport {
    /// Computes the report from a populated registry.
    #[must_use]
    pub fn build<L>(registry: &ContractRegistry, loader: &L) -> Self
    where
        L: TypeLoader + ?Sized,
    {
        let targeted: BTreeSet<&TypeName> = registry
            .entries()
            .filter(|info| info.role() == TestRole::Suite)
            .filter_map(|info| info.contract_type())
            .collect();
        let mut report = Self {
            errors: registry.errors().into_iter().cloned().collect(),
            ..Self::default()
        };
        for descriptor in registry.scanned() {
            if is_untested_interface(registry, descriptor) {
                report.untested.push(descriptor.name().clone());
                continue;
            }
            if !is_concrete_class(descriptor)
                || is_test_type(descriptor)
                || targeted.contains(descriptor.name())
            {
                continue;
            }
            let interfaces: Vec<TypeName> = transitive_interfaces(descriptor, loader)
                .into_iter()
                .filter(|interface| registry.live_test(interface).is_some())
                .collect();
            if !interfaces.is_empty() {
                report.unimplemented.push(UnimplementedContract {
                    class: descriptor.name().clone(),
                    interfaces,
                });
            }
        }
        report
    }

    /// Returns interfaces without a live contract test.
    #[must_use]
    pub fn untested_interfaces(&self) -> &[TypeName] {
        &self.untested
    }

    /// Returns concrete classes implementing tested interfaces that no
    /// suite targets.
    #[must_use]
    pub fn unimplemented_contracts(&self) -> &[UnimplementedContract] {
        &self.unimplemented
    }

    /// Returns every collected configuration error.
    #[must_use]
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.errors
    }
}

/// Returns `true` for a scanned interface lacking both a live test and the
/// `NoContractTest` exemption.
fn is_untested_interface(registry: &ContractRegistry, descriptor: &TypeDescriptor) -> bool {
    descriptor.is_interface()
        && !descriptor.is_annotation()
        && !descriptor.has_marker(MarkerKind::NoContractTest)
        && registry.live_test(descriptor.name()).is_none()
}

/// Returns `true` for contract tests, suites, and other test classes.
fn is_test_type(descriptor: &TypeDescriptor) -> bool {
    descriptor.has_marker(MarkerKind::Contract)
        || descriptor.has_marker(MarkerKind::ContractImpl)
        || descriptor.has_marker(MarkerKind::ContractSuite)
        || descriptor.methods().iter().any(|method| method.has_marker(MarkerKind::Test))
}

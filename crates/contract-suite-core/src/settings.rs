// crates/contract-suite-core/src/settings.rs
// ============================================================================
// Module: Discovery Settings
// Description: Scan roots, include/exclude filters, and the explicit skip list.
// Purpose: Thread discovery configuration through registry population.
// Dependencies: class-filter, crate::{model, registry}
// ============================================================================

//! ## Overview
//! [`DiscoverySettings`] is passed explicitly to registry population; there
//! is no process-wide skip property. Filter expressions given as text are
//! parsed immediately. A parse failure is kept as a
//! [`ConfigurationError::MalformedFilter`] and turns every suite composed
//! with these settings into an error terminal.

use std::collections::BTreeSet;

use class_filter::ClassFilter;
use class_filter::parse_filter;

use crate::model::TypeName;
use crate::registry::ConfigurationError;

/// Registry population settings.
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    /// Scan roots; empty means "scan everything".
    roots: Vec<String>,
    /// Types a scan may consider.
    include: ClassFilter,
    /// Types skipped after scanning.
    exclude: ClassFilter,
    /// Test types or contract interfaces left out of the registry.
    skip: BTreeSet<TypeName>,
    /// Errors from textual filter expressions.
    errors: Vec<ConfigurationError>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscoverySettings {
    /// Creates settings that scan everything and exclude nothing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            include: ClassFilter::True,
            exclude: ClassFilter::False,
            skip: BTreeSet::new(),
            errors: Vec::new(),
        }
    }

    /// Adds a scan root.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Replaces the include filter.
    #[must_use]
    pub fn with_include(mut self, filter: ClassFilter) -> Self {
        self.include = filter;
        self
    }

    /// Replaces the exclude filter.
    #[must_use]
    pub fn with_exclude(mut self, filter: ClassFilter) -> Self {
        self.exclude = filter;
        self
    }

    /// Replaces the include filter from its textual form.
    #[must_use]
    pub fn include_expression(mut self, expression: &str) -> Self {
        if let Some(filter) = self.parse_field("include", expression) {
            self.include = filter;
        }
        self
    }

    /// Replaces the exclude filter from its textual form.
    #[must_use]
    pub fn exclude_expression(mut self, expression: &str) -> Self {
        if let Some(filter) = self.parse_field("exclude", expression) {
            self.exclude = filter;
        }
        self
    }

    /// Adds a test type or contract interface to the skip list.
    #[must_use]
    pub fn with_skip(mut self, name: impl Into<TypeName>) -> Self {
        self.skip.insert(name.into());
        self
    }

    /// Parses an expression, recording failures against `field`.
    fn parse_field(&mut self, field: &'static str, expression: &str) -> Option<ClassFilter> {
        match parse_filter(expression) {
            Ok(filter) => Some(filter),
            Err(err) => {
                self.errors.push(ConfigurationError::MalformedFilter {
                    field,
                    message: err.to_string(),
                });
                None
            }
        }
    }

    /// Returns the scan roots, substituting the empty root when none is set.
    #[must_use]
    pub fn effective_roots(&self) -> Vec<&str> {
        if self.roots.is_empty() {
            return vec![""];
        }
        let mut roots: Vec<&str> = Vec::with_capacity(self.roots.len());
        for root in &self.roots {
            if !roots.contains(&root.as_str()) {
                roots.push(root);
            }
        }
        roots
    }

    /// Returns the include filter.
    #[must_use]
    pub const fn include(&self) -> &ClassFilter {
        &self.include
    }

    /// Returns the exclude filter.
    #[must_use]
    pub const fn exclude(&self) -> &ClassFilter {
        &self.exclude
    }

    /// Returns the skip list.
    #[must_use]
    pub const fn skip(&self) -> &BTreeSet<TypeName> {
        &self.skip
    }

    /// Returns `true` when `name` is on the skip list.
    #[must_use]
    pub fn is_skipped(&self, name: &TypeName) -> bool {
        self.skip.contains(name)
    }

    /// Returns errors from malformed filter expressions.
    #[must_use]
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.errors
    }
}

// crates/contract-suite-core/src/host/description.rs
// ============================================================================
// Module: Run Descriptions
// Description: Describable tree of suites and tests.
// Purpose: Name runnable units the way the host protocol reports them.
// Dependencies: crate::model
// ============================================================================

//! ## Overview
//! A [`Description`] is either a suite, whose children are further
//! descriptions, or a single test named `method(Class)`.

use std::fmt;

use crate::model::TypeName;

/// Description of a suite or test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    /// Name shown to the host.
    display_name: String,
    /// Class the unit belongs to.
    class: Option<TypeName>,
    /// Test method, for test descriptions.
    method: Option<String>,
    /// Child descriptions, for suites.
    children: Vec<Self>,
}

impl Description {
    /// Creates a suite description with an arbitrary name.
    #[must_use]
    pub fn suite(name: impl Into<String>) -> Self {
        Self {
            display_name: name.into(),
            class: None,
            method: None,
            children: Vec::new(),
        }
    }

    /// Creates a suite description named after a class.
    #[must_use]
    pub fn for_class(class: &TypeName) -> Self {
        Self {
            display_name: class.to_string(),
            class: Some(class.clone()),
            method: None,
            children: Vec::new(),
        }
    }

    /// Creates a test description rendered as `method(Class)`.
    #[must_use]
    pub fn test(class: &TypeName, method: impl Into<String>) -> Self {
        let method = method.into();
        Self {
            display_name: format!("{method}({class})"),
            class: Some(class.clone()),
            method: Some(method),
            children: Vec::new(),
        }
    }

    /// Appends a child description.
    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the class the unit belongs to.
    #[must_use]
    pub const fn class(&self) -> Option<&TypeName> {
        self.class.as_ref()
    }

    /// Returns the test method name.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Returns the children.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns `true` for a test description.
    #[must_use]
    pub const fn is_test(&self) -> bool {
        self.method.is_some()
    }

    /// Returns every test description beneath this one, depth first.
    #[must_use]
    pub fn tests(&self) -> Vec<&Self> {
        if self.is_test() {
            return vec![self];
        }
        self.children.iter().flat_map(Self::tests).collect()
    }

    /// Returns the number of tests beneath this description.
    #[must_use]
    pub fn test_count(&self) -> usize {
        if self.is_test() {
            return 1;
        }
        self.children.iter().map(Self::test_count).sum()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

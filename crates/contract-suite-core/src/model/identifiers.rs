// crates/contract-suite-core/src/model/identifiers.rs
// ============================================================================
// Module: Type Names
// Description: Fully-qualified dotted names for registered types.
// Purpose: Provide a strongly typed, ordered, serializable type identifier.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Types are identified by their fully-qualified dotted name
//! (`org.example.Impl`). A `$` separates a nested type from its enclosing
//! type (`org.example.Outer$Inner`); nested names never appear as top-level
//! scan candidates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Type Name
// ============================================================================

/// Separator between an enclosing type and a nested type.
pub const NESTED_SEPARATOR: char = '$';

/// Fully-qualified type name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Creates a new type name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last dotted segment (`Impl` for `org.example.Impl`).
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Returns `true` when the name denotes a nested type.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.0.contains(NESTED_SEPARATOR)
    }

    /// Returns `true` when the name lies under `root`.
    ///
    /// An empty root contains every name; otherwise the name must equal the
    /// root or continue it after a `.` or `$`.
    #[must_use]
    pub fn is_under(&self, root: &str) -> bool {
        if root.is_empty() {
            return true;
        }
        self.0.strip_prefix(root).is_some_and(|rest| {
            rest.is_empty() || rest.starts_with('.') || rest.starts_with(NESTED_SEPARATOR)
        })
    }

    /// Returns `true` when the text is a syntactically valid type name.
    ///
    /// Segments are separated by `.`, must be non-empty, and may contain
    /// alphanumerics, `_` and `$`.
    #[must_use]
    pub fn is_valid(name: &str) -> bool {
        !name.is_empty()
            && name.split('.').all(|segment| {
                !segment.is_empty()
                    && segment.chars().all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$')
            })
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::TypeName;

    #[test]
    fn root_containment_respects_segments() {
        let name = TypeName::new("org.example.Impl");
        assert!(name.is_under(""));
        assert!(name.is_under("org.example"));
        assert!(name.is_under("org.example.Impl"));
        assert!(!name.is_under("org.ex"));
        assert!(TypeName::new("org.example.Outer$Inner").is_under("org.example.Outer"));
    }

    #[test]
    fn nested_and_simple_names() {
        let nested = TypeName::new("org.example.Outer$Inner");
        assert!(nested.is_nested());
        assert_eq!(nested.simple_name(), "Outer$Inner");
        assert_eq!(TypeName::new("Plain").simple_name(), "Plain");
    }

    #[test]
    fn validity_rejects_empty_segments() {
        assert!(TypeName::is_valid("org.example.Impl"));
        assert!(!TypeName::is_valid("org..Impl"));
        assert!(!TypeName::is_valid(""));
        assert!(!TypeName::is_valid("org.exa mple"));
    }
}

// crates/class-filter/src/lib.rs
// ============================================================================
// Module: Class Filter Root
// Description: Public API surface for the class filter subsystem.
// Purpose: Wire together the filter algebra, patterns, rendering, and parser.
// Dependencies: crate::{filter, parse, pattern, render, serde_support, subject}
// ============================================================================

//! ## Overview
//! `class-filter` is a small boolean algebra for selecting types by name or
//! structure. Filters render to a canonical `FunctionName( arg, ... )` string
//! and parse back from it, which lets configuration files and command lines
//! carry them as plain text.
//!
//! ```
//! use class_filter::Case;
//! use class_filter::ClassFilter;
//! use class_filter::parse_filter;
//!
//! let filter = ClassFilter::or(vec![
//!     ClassFilter::suffix(Case::Sensitive, ["Test"]),
//!     ClassFilter::prefix(Case::Insensitive, ["org.example.contract"]),
//! ]);
//! let text = filter.to_string();
//! assert_eq!(parse_filter(&text).unwrap(), filter);
//! ```

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod filter;
pub mod parse;
pub mod pattern;
mod render;
mod serde_support;
pub mod subject;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use filter::ClassFilter;
pub use filter::Operands;
pub use parse::FilterParseError;
pub use parse::parse_filter;
pub use pattern::Case;
pub use pattern::Pattern;
pub use pattern::make_regex;
pub use subject::FilterSubject;

// ============================================================================
// SECTION: Convenience Constructors
// ============================================================================

/// Convenience functions for composing filters without the enum syntax.
pub mod convenience {
    use super::ClassFilter;

    /// Accepts types accepted by every filter.
    #[must_use]
    pub fn all(filters: Vec<ClassFilter>) -> ClassFilter {
        ClassFilter::and(filters)
    }

    /// Accepts types accepted by any filter.
    #[must_use]
    pub fn any(filters: Vec<ClassFilter>) -> ClassFilter {
        ClassFilter::or(filters)
    }

    /// Accepts types the filter rejects.
    #[must_use]
    pub fn not(filter: ClassFilter) -> ClassFilter {
        ClassFilter::negate(filter)
    }
}

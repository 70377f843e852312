// crates/class-filter/src/render.rs
// ============================================================================
// Module: Filter Rendering
// Description: Canonical textual form for class filters.
// Purpose: Serialize filters as `FunctionName( arg, arg, ... )` expressions.
// Dependencies: crate::filter, std::fmt
// ============================================================================

//! ## Overview
//! Every filter renders to `FunctionName( arg, arg, ... )`; leaves without
//! arguments render as `FunctionName()`. Name-based leaves always lead with
//! their case keyword. Literal arguments that would confuse the parser
//! (commas, parentheses, quotes, surrounding whitespace, case keywords) are
//! written as double-quoted strings with `\` escapes.
//!
//! [`crate::parse_filter`] accepts exactly this form, so
//! `parse_filter(&filter.to_string())` reconstructs an equivalent filter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fmt::Write as _;

use crate::filter::ClassFilter;
use crate::pattern::Case;
use crate::pattern::Pattern;

// ============================================================================
// SECTION: Display
// ============================================================================

impl fmt::Display for ClassFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.function_name();
        match self {
            Self::True | Self::False | Self::Interface | Self::Abstract | Self::Annotation => {
                write!(f, "{name}()")
            }
            Self::And(filters) | Self::Or(filters) => {
                if filters.is_empty() {
                    return write!(f, "{name}()");
                }
                write!(f, "{name}( ")?;
                for (index, filter) in filters.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{filter}")?;
                }
                f.write_str(" )")
            }
            Self::Not(filter) => write!(f, "{name}( {filter} )"),
            Self::Name {
                case,
                names: values,
            }
            | Self::Prefix {
                case,
                prefixes: values,
            }
            | Self::Suffix {
                case,
                suffixes: values,
            }
            | Self::HasAnnotation {
                case,
                annotations: values,
            }
            | Self::Assignable {
                case,
                supertypes: values,
            } => write_leaf(f, name, *case, values.iter().map(String::as_str)),
            Self::Wildcard {
                case,
                patterns,
            }
            | Self::Regex {
                case,
                patterns,
            } => write_leaf(f, name, *case, patterns.iter().map(Pattern::as_str)),
        }
    }
}

/// Writes a name-based leaf with its case keyword and literal arguments.
fn write_leaf<'a>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    case: Case,
    values: impl Iterator<Item = &'a str>,
) -> fmt::Result {
    write!(f, "{name}( {case}")?;
    for value in values {
        f.write_str(", ")?;
        write_literal(f, value)?;
    }
    f.write_str(" )")
}

/// Writes a literal, quoting it when the bare form would not parse back.
fn write_literal(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if !needs_quotes(text) {
        return f.write_str(text);
    }
    f.write_char('"')?;
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(ch)?;
    }
    f.write_char('"')
}

/// Returns `true` when a literal must be written in quoted form.
fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.contains([',', '(', ')', '"'])
        || Case::from_keyword(text).is_some()
}

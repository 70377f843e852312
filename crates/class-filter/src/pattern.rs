// crates/class-filter/src/pattern.rs
// ============================================================================
// Module: Name Patterns
// Description: Case modes, wildcard translation, and compiled name patterns.
// Purpose: Provide the string-matching primitives used by name-based filters.
// Dependencies: regex
// ============================================================================

//! ## Overview
//! Name-based filters compare type names either literally (exact, prefix,
//! suffix) or through compiled patterns (wildcard, regex). Every comparison
//! honours a [`Case`] mode. Wildcards are translated to anchored regular
//! expressions by [`make_regex`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use regex::Regex;
use regex::RegexBuilder;

// ============================================================================
// SECTION: Case Mode
// ============================================================================

/// Case handling for name comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Case {
    /// Names must match exactly.
    #[default]
    Sensitive,
    /// Names are compared after lowercasing both sides.
    Insensitive,
}

impl Case {
    /// Returns the keyword used in the textual filter grammar.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sensitive => "Sensitive",
            Self::Insensitive => "Insensitive",
        }
    }

    /// Parses a case keyword (`Sensitive` / `Insensitive`, any letter case).
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("sensitive") {
            Some(Self::Sensitive)
        } else if keyword.eq_ignore_ascii_case("insensitive") {
            Some(Self::Insensitive)
        } else {
            None
        }
    }

    /// Compares two names for equality.
    #[must_use]
    pub fn equals(self, left: &str, right: &str) -> bool {
        match self {
            Self::Sensitive => left == right,
            Self::Insensitive => left.to_lowercase() == right.to_lowercase(),
        }
    }

    /// Returns `true` when `name` starts with `prefix`.
    #[must_use]
    pub fn starts_with(self, name: &str, prefix: &str) -> bool {
        match self {
            Self::Sensitive => name.starts_with(prefix),
            Self::Insensitive => name.to_lowercase().starts_with(&prefix.to_lowercase()),
        }
    }

    /// Returns `true` when `name` ends with `suffix`.
    #[must_use]
    pub fn ends_with(self, name: &str, suffix: &str) -> bool {
        match self {
            Self::Sensitive => name.ends_with(suffix),
            Self::Insensitive => name.to_lowercase().ends_with(&suffix.to_lowercase()),
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Wildcard Translation
// ============================================================================

/// Translates a wildcard into an anchored regular expression.
///
/// `*` matches any sequence, `?` matches exactly one character, and every
/// other character is quoted. A `.` immediately followed by `*` is absorbed
/// into the star, so `.*` written inside a wildcard also reads as "any
/// sequence".
///
/// ```
/// use class_filter::make_regex;
///
/// let regex = regex::Regex::new(&make_regex("*xene?.*Foo")).unwrap();
/// assert!(regex.is_match("anyxeneXblahFoo"));
/// assert!(!regex.is_match("xeneFoo"));
/// ```
#[must_use]
pub fn make_regex(wildcard: &str) -> String {
    let mut out = String::with_capacity(wildcard.len() * 2 + 2);
    out.push('^');
    let mut chars = wildcard.chars().peekable();
    let mut buf = [0u8; 4];
    while let Some(ch) = chars.next() {
        match ch {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '.' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str(".*");
            }
            other => out.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }
    out.push('$');
    out
}

// ============================================================================
// SECTION: Compiled Patterns
// ============================================================================

/// A compiled name pattern that remembers its source text.
///
/// # Invariants
/// - `regex` is always compiled from `source` (translated when `wildcard`).
/// - Equality considers only the source text, kind, and case.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// Pattern text as written by the author.
    source: String,
    /// Whether `source` is a wildcard (otherwise a regex).
    wildcard: bool,
    /// Case mode the pattern was compiled with.
    case: Case,
    /// Compiled matcher.
    regex: Regex,
}

impl Pattern {
    /// Compiles a wildcard pattern.
    ///
    /// # Errors
    /// Returns [`regex::Error`] when the translated expression is rejected
    /// (for example when it exceeds the regex size limit).
    pub fn wildcard(source: impl Into<String>, case: Case) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = compile(&make_regex(&source), case)?;
        Ok(Self {
            source,
            wildcard: true,
            case,
            regex,
        })
    }

    /// Compiles a regular-expression pattern.
    ///
    /// The expression must match the whole name; it is anchored on compile.
    ///
    /// # Errors
    /// Returns [`regex::Error`] when the expression is invalid.
    pub fn regex(source: impl Into<String>, case: Case) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = compile(&format!("^(?:{source})$"), case)?;
        Ok(Self {
            source,
            wildcard: false,
            case,
            regex,
        })
    }

    /// Returns the pattern text as written by the author.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` when the whole name matches the pattern.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.wildcard == other.wildcard && self.case == other.case
    }
}

impl Eq for Pattern {}

/// Compiles an anchored expression with the requested case mode.
fn compile(expression: &str, case: Case) -> Result<Regex, regex::Error> {
    RegexBuilder::new(expression).case_insensitive(case == Case::Insensitive).build()
}

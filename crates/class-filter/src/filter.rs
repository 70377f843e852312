// crates/class-filter/src/filter.rs
// ============================================================================
// Module: Class Filter Algebra
// Description: Boolean algebra over type metadata with name and structure leaves.
// Purpose: Define `ClassFilter`, its constructors, and short-circuit evaluation.
// Dependencies: crate::{pattern, subject}, smallvec::SmallVec
// ============================================================================

//! ## Overview
//! A [`ClassFilter`] is a tree of composite operators (`And`, `Or`, `Not`)
//! over leaves that test a type's name or structure. Every filter answers two
//! questions: does it accept a [`FilterSubject`], and does it accept a bare
//! name. Structural leaves cannot judge a bare name and reject it.
//!
//! Composite operators short-circuit. Unlike the usual algebraic identities,
//! an `And` or `Or` with no operands rejects everything.

// ============================================================================
// SECTION: Imports
// ============================================================================

use smallvec::SmallVec;

use crate::pattern::Case;
use crate::pattern::Pattern;
use crate::subject::FilterSubject;

// ============================================================================
// SECTION: Filter Definition
// ============================================================================

/// Operand list for composite filters.
pub type Operands = SmallVec<[Box<ClassFilter>; 4]>;

/// Boolean filter over types.
///
/// # Invariants
/// - Leaf value lists (`names`, `prefixes`, ...) are non-empty when built
///   through the parser; programmatic construction may leave them empty, in
///   which case the leaf rejects everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClassFilter {
    /// Accepts everything.
    #[default]
    True,

    /// Rejects everything.
    False,

    /// Accepts when every operand accepts; stops at the first reject.
    ///
    /// An empty `And` rejects everything.
    And(Operands),

    /// Accepts when any operand accepts; stops at the first accept.
    ///
    /// An empty `Or` rejects everything.
    Or(Operands),

    /// Inverts its operand.
    Not(Box<Self>),

    /// Accepts names that belong to the set.
    Name {
        /// Comparison mode.
        case: Case,
        /// Accepted fully-qualified names.
        names: Vec<String>,
    },

    /// Accepts names starting with any prefix.
    Prefix {
        /// Comparison mode.
        case: Case,
        /// Accepted prefixes.
        prefixes: Vec<String>,
    },

    /// Accepts names ending with any suffix.
    Suffix {
        /// Comparison mode.
        case: Case,
        /// Accepted suffixes.
        suffixes: Vec<String>,
    },

    /// Accepts names matching any wildcard.
    Wildcard {
        /// Comparison mode.
        case: Case,
        /// Compiled wildcard patterns.
        patterns: Vec<Pattern>,
    },

    /// Accepts names matching any regular expression.
    Regex {
        /// Comparison mode.
        case: Case,
        /// Compiled regex patterns.
        patterns: Vec<Pattern>,
    },

    /// Accepts interfaces.
    Interface,

    /// Accepts abstract types (interfaces included).
    Abstract,

    /// Accepts annotation types.
    Annotation,

    /// Accepts types carrying any of the named annotations.
    HasAnnotation {
        /// Comparison mode.
        case: Case,
        /// Annotation type names.
        annotations: Vec<String>,
    },

    /// Accepts types that are, extend, or implement any named supertype.
    Assignable {
        /// Comparison mode.
        case: Case,
        /// Supertype names.
        supertypes: Vec<String>,
    },
}

// ============================================================================
// SECTION: Constructors
// ============================================================================

impl ClassFilter {
    /// Creates an `And` over the given filters.
    #[must_use]
    pub fn and(filters: Vec<Self>) -> Self {
        Self::And(filters.into_iter().map(Box::new).collect())
    }

    /// Creates an `Or` over the given filters.
    #[must_use]
    pub fn or(filters: Vec<Self>) -> Self {
        Self::Or(filters.into_iter().map(Box::new).collect())
    }

    /// Creates a negation.
    #[must_use]
    pub fn negate(filter: Self) -> Self {
        Self::Not(Box::new(filter))
    }

    /// Creates an exact-name filter.
    #[must_use]
    pub fn name<I, S>(case: Case, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Name {
            case,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a prefix filter.
    #[must_use]
    pub fn prefix<I, S>(case: Case, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Prefix {
            case,
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a suffix filter.
    #[must_use]
    pub fn suffix<I, S>(case: Case, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Suffix {
            case,
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a wildcard filter.
    ///
    /// # Errors
    /// Returns [`regex::Error`] when a translated wildcard fails to compile.
    pub fn wildcard<I, S>(case: Case, wildcards: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = wildcards
            .into_iter()
            .map(|source| Pattern::wildcard(source, case))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::Wildcard {
            case,
            patterns,
        })
    }

    /// Creates a regular-expression filter.
    ///
    /// # Errors
    /// Returns [`regex::Error`] when an expression is invalid.
    pub fn regex<I, S>(case: Case, expressions: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = expressions
            .into_iter()
            .map(|source| Pattern::regex(source, case))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::Regex {
            case,
            patterns,
        })
    }

    /// Creates an annotation-presence filter.
    #[must_use]
    pub fn has_annotation<I, S>(case: Case, annotations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::HasAnnotation {
            case,
            annotations: annotations.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a supertype filter.
    #[must_use]
    pub fn assignable<I, S>(case: Case, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Assignable {
            case,
            supertypes: supertypes.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

impl ClassFilter {
    /// Evaluates the filter against a type.
    pub fn accepts<S>(&self, subject: &S) -> bool
    where
        S: FilterSubject + ?Sized,
    {
        match self {
            Self::True => true,
            Self::False => false,
            Self::And(filters) => {
                if filters.is_empty() {
                    return false;
                }
                for filter in filters {
                    if !filter.accepts(subject) {
                        return false;
                    }
                }
                true
            }
            Self::Or(filters) => {
                for filter in filters {
                    if filter.accepts(subject) {
                        return true;
                    }
                }
                false
            }
            Self::Not(filter) => !filter.accepts(subject),
            Self::Interface => subject.is_interface(),
            Self::Abstract => subject.is_abstract(),
            Self::Annotation => subject.is_annotation(),
            Self::HasAnnotation {
                case,
                annotations,
            } => subject.has_annotation(&|carried| {
                annotations.iter().any(|wanted| case.equals(carried, wanted))
            }),
            Self::Assignable {
                case,
                supertypes,
            } => subject.is_assignable_to(&|candidate| {
                supertypes.iter().any(|wanted| case.equals(candidate, wanted))
            }),
            Self::Name {
                ..
            }
            | Self::Prefix {
                ..
            }
            | Self::Suffix {
                ..
            }
            | Self::Wildcard {
                ..
            }
            | Self::Regex {
                ..
            } => self.accepts_name(subject.type_name()),
        }
    }

    /// Evaluates the filter against a bare type name.
    ///
    /// Structural leaves (`Interface`, `Abstract`, `Annotation`,
    /// `HasAnnotation`, `Assignable`) cannot be decided from a name and
    /// reject it.
    #[must_use]
    pub fn accepts_name(&self, name: &str) -> bool {
        match self {
            Self::True => true,
            Self::False
            | Self::Interface
            | Self::Abstract
            | Self::Annotation
            | Self::HasAnnotation {
                ..
            }
            | Self::Assignable {
                ..
            } => false,
            Self::And(filters) => {
                !filters.is_empty() && filters.iter().all(|filter| filter.accepts_name(name))
            }
            Self::Or(filters) => filters.iter().any(|filter| filter.accepts_name(name)),
            Self::Not(filter) => !filter.accepts_name(name),
            Self::Name {
                case,
                names,
            } => names.iter().any(|candidate| case.equals(name, candidate)),
            Self::Prefix {
                case,
                prefixes,
            } => prefixes.iter().any(|prefix| case.starts_with(name, prefix)),
            Self::Suffix {
                case,
                suffixes,
            } => suffixes.iter().any(|suffix| case.ends_with(name, suffix)),
            Self::Wildcard {
                patterns,
                ..
            }
            | Self::Regex {
                patterns,
                ..
            } => patterns.iter().any(|pattern| pattern.is_match(name)),
        }
    }

    /// Returns the function name used by the textual grammar.
    #[must_use]
    pub const fn function_name(&self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::And(_) => "And",
            Self::Or(_) => "Or",
            Self::Not(_) => "Not",
            Self::Name {
                ..
            } => "Name",
            Self::Prefix {
                ..
            } => "Prefix",
            Self::Suffix {
                ..
            } => "Suffix",
            Self::Wildcard {
                ..
            } => "Wildcard",
            Self::Regex {
                ..
            } => "Regex",
            Self::Interface => "Interface",
            Self::Abstract => "Abstract",
            Self::Annotation => "Annotation",
            Self::HasAnnotation {
                ..
            } => "HasAnnotation",
            Self::Assignable {
                ..
            } => "Assignable",
        }
    }

    /// Returns the nesting depth of the filter tree (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::And(filters) | Self::Or(filters) => {
                1 + filters.iter().map(|filter| filter.depth()).max().unwrap_or(0)
            }
            Self::Not(filter) => 1 + filter.depth(),
            _ => 1,
        }
    }
}

// crates/class-filter/src/parse.rs
// ============================================================================
// Module: Filter Expression Parser
// Description: Recursive-descent parser for the textual filter grammar.
// Purpose: Rebuild `ClassFilter` trees from `FunctionName( arg, ... )` text
//          with positioned diagnostics.
// Dependencies: crate::{filter, pattern}
// ============================================================================

//! ## Overview
//! The parser reconstructs filters from the form produced by the
//! [`Display`](std::fmt::Display) implementation of [`ClassFilter`].
//! Arguments are located by balanced-parenthesis scanning, so nested
//! composites and literal patterns that contain balanced parentheses need no
//! escaping. Double-quoted literals carry anything else.
//!
//! ### Grammar (informal)
//! - **Constants**: `True()`, `False()`
//! - **Composites**: `And( f, ... )`, `Or( f, ... )`, `Not( f )`
//! - **Structure**: `Interface()`, `Abstract()`, `Annotation()`
//! - **Names**: `Name`, `Prefix`, `Suffix`, `Wildcard`, `Regex`,
//!   `HasAnnotation`, `Assignable` taking `( [Sensitive|Insensitive,] value, ... )`
//!
//! ### Example
//!
//! ```
//! use class_filter::parse_filter;
//!
//! let filter =
//!     parse_filter("And( Prefix( Sensitive, org.example ), Not( Suffix( Sensitive, Test ) ) )")
//!         .unwrap();
//! assert!(filter.accepts_name("org.example.Impl"));
//! assert!(!filter.accepts_name("org.example.ImplTest"));
//! ```
//!
//! Input is treated as untrusted configuration: size and nesting are bounded
//! and every failure is reported, never ignored.

use std::fmt;

use crate::filter::ClassFilter;
use crate::pattern::Case;
use crate::pattern::Pattern;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum allowed expression size in bytes.
const MAX_FILTER_INPUT_BYTES: usize = 64 * 1024;
/// Maximum supported nesting depth for filter expressions.
const MAX_FILTER_NESTING: usize = 32;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that can occur while parsing a filter expression.
///
/// # Invariants
/// - Positions are byte offsets into the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterParseError {
    /// Input was empty or contained only whitespace.
    EmptyInput,
    /// Input exceeded the configured size limit.
    InputTooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual input length in bytes.
        actual_bytes: usize,
    },
    /// Input exceeded the configured nesting depth.
    NestingTooDeep {
        /// Maximum allowed nesting depth.
        max_depth: usize,
        /// Byte offset of the call that exceeded the limit.
        position: usize,
    },
    /// An opening parenthesis or quote was never closed.
    UnbalancedParentheses {
        /// Byte offset of the unclosed opening character.
        position: usize,
    },
    /// Something other than the expected construct was found.
    Expected {
        /// Human-friendly expectation summary.
        expected: &'static str,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Function name was not recognized.
    UnknownFunction {
        /// The unknown function identifier.
        name: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// A function received the wrong number of arguments.
    Arity {
        /// Function name.
        function: String,
        /// Description of the accepted argument count.
        expected: &'static str,
        /// Number of arguments supplied.
        found: usize,
        /// Byte offset of the function name.
        position: usize,
    },
    /// A wildcard or regex argument failed to compile.
    InvalidPattern {
        /// Pattern text.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
        /// Byte offset of the argument.
        position: usize,
    },
    /// Unexpected input after a complete expression.
    TrailingInput {
        /// Byte offset where unexpected input begins.
        position: usize,
    },
}

impl fmt::Display for FilterParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "filter expression is empty"),
            Self::InputTooLarge {
                max_bytes,
                actual_bytes,
            } => {
                write!(
                    f,
                    "filter expression exceeds size limit: {actual_bytes} bytes (max {max_bytes})"
                )
            }
            Self::NestingTooDeep {
                max_depth,
                position,
            } => write!(f, "filter nesting exceeds limit of {max_depth} at {position}"),
            Self::UnbalancedParentheses {
                position,
            } => write!(f, "unbalanced parentheses: `(` or `\"` at {position} is never closed"),
            Self::Expected {
                expected,
                position,
            } => write!(f, "expected {expected} at {position}"),
            Self::UnknownFunction {
                name,
                position,
            } => write!(f, "unknown filter function `{name}` at {position}"),
            Self::Arity {
                function,
                expected,
                found,
                position,
            } => write!(
                f,
                "`{function}` at {position} takes {expected}, found {found} argument(s)"
            ),
            Self::InvalidPattern {
                pattern,
                reason,
                position,
            } => write!(f, "invalid pattern `{pattern}` at {position}: {reason}"),
            Self::TrailingInput {
                position,
            } => write!(f, "unexpected trailing input at {position}"),
        }
    }
}

impl std::error::Error for FilterParseError {}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Parses a filter expression into a [`ClassFilter`].
///
/// # Errors
/// Returns [`FilterParseError`] for empty or oversized input, unbalanced
/// parentheses, unknown functions, wrong arity, invalid patterns, or trailing
/// input.
pub fn parse_filter(input: &str) -> Result<ClassFilter, FilterParseError> {
    if input.len() > MAX_FILTER_INPUT_BYTES {
        return Err(FilterParseError::InputTooLarge {
            max_bytes: MAX_FILTER_INPUT_BYTES,
            actual_bytes: input.len(),
        });
    }
    let parser = Parser::new(input);
    let span = parser.trim(Span::new(0, input.len()));
    if span.is_empty() {
        return Err(FilterParseError::EmptyInput);
    }
    parser.parse_call(span, 0)
}

// ============================================================================
// SECTION: Spans
// ============================================================================

/// Half-open byte range into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    /// Inclusive start offset.
    start: usize,
    /// Exclusive end offset.
    end: usize,
}

impl Span {
    /// Creates a span.
    const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
        }
    }

    /// Returns `true` when the span covers no bytes.
    const fn is_empty(self) -> bool {
        self.start >= self.end
    }
}

/// Argument literal decoded from the input.
#[derive(Debug)]
struct Literal {
    /// Decoded text.
    text: String,
    /// Whether the literal was written in quotes.
    quoted: bool,
    /// Byte offset of the literal.
    position: usize,
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Recursive-descent parser over a borrowed expression.
struct Parser<'a> {
    /// Original input string.
    input: &'a str,
}

impl<'a> Parser<'a> {
    /// Creates a parser for the input.
    const fn new(input: &'a str) -> Self {
        Self {
            input,
        }
    }

    /// Parses one `Name( args )` call occupying exactly `span`.
    fn parse_call(&self, span: Span, depth: usize) -> Result<ClassFilter, FilterParseError> {
        if depth >= MAX_FILTER_NESTING {
            return Err(FilterParseError::NestingTooDeep {
                max_depth: MAX_FILTER_NESTING,
                position: span.start,
            });
        }
        let bytes = self.input.as_bytes();
        let mut cursor = span.start;
        while cursor < span.end && (bytes[cursor].is_ascii_alphanumeric() || bytes[cursor] == b'_')
        {
            cursor += 1;
        }
        if cursor == span.start {
            return Err(FilterParseError::Expected {
                expected: "filter function name",
                position: span.start,
            });
        }
        let name = &self.input[span.start .. cursor];
        let open = self.skip_whitespace(cursor, span.end);
        if open >= span.end || bytes[open] != b'(' {
            return Err(FilterParseError::Expected {
                expected: "`(` after filter function name",
                position: open,
            });
        }
        let close = self.matching_paren(open, span.end)?;
        if close + 1 != span.end {
            return Err(FilterParseError::TrailingInput {
                position: self.skip_whitespace(close + 1, span.end),
            });
        }
        let args = self.split_arguments(Span::new(open + 1, close))?;
        self.build(name, span.start, &args, depth)
    }

    /// Dispatches a parsed call to its filter constructor.
    fn build(
        &self,
        name: &str,
        position: usize,
        args: &[Span],
        depth: usize,
    ) -> Result<ClassFilter, FilterParseError> {
        match name {
            "True" | "False" | "Interface" | "Abstract" | "Annotation" => {
                if !args.is_empty() {
                    return Err(arity(name, "no arguments", args.len(), position));
                }
                Ok(match name {
                    "True" => ClassFilter::True,
                    "False" => ClassFilter::False,
                    "Interface" => ClassFilter::Interface,
                    "Abstract" => ClassFilter::Abstract,
                    _ => ClassFilter::Annotation,
                })
            }
            "And" | "Or" => {
                let filters = args
                    .iter()
                    .map(|arg| self.parse_call(*arg, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                if name == "And" {
                    Ok(ClassFilter::and(filters))
                } else {
                    Ok(ClassFilter::or(filters))
                }
            }
            "Not" => {
                let [arg] = args else {
                    return Err(arity(name, "exactly one argument", args.len(), position));
                };
                Ok(ClassFilter::negate(self.parse_call(*arg, depth + 1)?))
            }
            "Name" | "Prefix" | "Suffix" | "Wildcard" | "Regex" | "HasAnnotation"
            | "Assignable" => self.build_leaf(name, position, args),
            _ => Err(FilterParseError::UnknownFunction {
                name: name.to_string(),
                position,
            }),
        }
    }

    /// Builds a name-based leaf from literal arguments.
    fn build_leaf(
        &self,
        name: &str,
        position: usize,
        args: &[Span],
    ) -> Result<ClassFilter, FilterParseError> {
        let mut literals =
            args.iter().map(|arg| self.literal(*arg)).collect::<Result<Vec<_>, _>>()?;
        let mut case = Case::Sensitive;
        if let Some(first) = literals.first()
            && !first.quoted
            && let Some(parsed) = Case::from_keyword(&first.text)
        {
            case = parsed;
            literals.remove(0);
        }
        if literals.is_empty() {
            return Err(arity(name, "at least one value", 0, position));
        }
        let values = literals.iter().map(|literal| literal.text.clone());
        match name {
            "Name" => Ok(ClassFilter::name(case, values)),
            "Prefix" => Ok(ClassFilter::prefix(case, values)),
            "Suffix" => Ok(ClassFilter::suffix(case, values)),
            "HasAnnotation" => Ok(ClassFilter::has_annotation(case, values)),
            "Assignable" => Ok(ClassFilter::assignable(case, values)),
            _ => {
                let wildcard = name == "Wildcard";
                let mut patterns = Vec::with_capacity(literals.len());
                for literal in &literals {
                    let compiled = if wildcard {
                        Pattern::wildcard(literal.text.clone(), case)
                    } else {
                        Pattern::regex(literal.text.clone(), case)
                    };
                    patterns.push(compiled.map_err(|err| FilterParseError::InvalidPattern {
                        pattern: literal.text.clone(),
                        reason: err.to_string(),
                        position: literal.position,
                    })?);
                }
                if wildcard {
                    Ok(ClassFilter::Wildcard {
                        case,
                        patterns,
                    })
                } else {
                    Ok(ClassFilter::Regex {
                        case,
                        patterns,
                    })
                }
            }
        }
    }

    /// Finds the parenthesis closing the one at `open`, skipping quoted text.
    fn matching_paren(&self, open: usize, end: usize) -> Result<usize, FilterParseError> {
        let bytes = self.input.as_bytes();
        let mut depth = 0usize;
        let mut index = open;
        let mut quote_start = None;
        while index < end {
            let byte = bytes[index];
            if quote_start.is_some() {
                match byte {
                    b'\\' => index += 1,
                    b'"' => quote_start = None,
                    _ => {}
                }
            } else {
                match byte {
                    b'"' => quote_start = Some(index),
                    b'(' => depth += 1,
                    b')' => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(index);
                        }
                    }
                    _ => {}
                }
            }
            index += 1;
        }
        Err(FilterParseError::UnbalancedParentheses {
            position: quote_start.unwrap_or(open),
        })
    }

    /// Splits the interior of a call at top-level commas.
    fn split_arguments(&self, inner: Span) -> Result<Vec<Span>, FilterParseError> {
        let bytes = self.input.as_bytes();
        if self.trim(inner).is_empty() {
            return Ok(Vec::new());
        }
        let mut spans = Vec::new();
        let mut depth = 0usize;
        let mut in_quote = false;
        let mut segment_start = inner.start;
        let mut index = inner.start;
        while index < inner.end {
            let byte = bytes[index];
            if in_quote {
                match byte {
                    b'\\' => index += 1,
                    b'"' => in_quote = false,
                    _ => {}
                }
            } else {
                match byte {
                    b'"' => in_quote = true,
                    b'(' => depth += 1,
                    b')' => depth = depth.saturating_sub(1),
                    b',' if depth == 0 => {
                        spans.push(Span::new(segment_start, index));
                        segment_start = index + 1;
                    }
                    _ => {}
                }
            }
            index += 1;
        }
        spans.push(Span::new(segment_start, inner.end));

        spans
            .into_iter()
            .map(|span| {
                let trimmed = self.trim(span);
                if trimmed.is_empty() {
                    Err(FilterParseError::Expected {
                        expected: "argument",
                        position: span.start,
                    })
                } else {
                    Ok(trimmed)
                }
            })
            .collect()
    }

    /// Decodes a literal argument, unescaping quoted forms.
    fn literal(&self, span: Span) -> Result<Literal, FilterParseError> {
        let raw = &self.input[span.start .. span.end];
        let Some(body) = raw.strip_prefix('"') else {
            return Ok(Literal {
                text: raw.to_string(),
                quoted: false,
                position: span.start,
            });
        };
        let mut text = String::with_capacity(body.len());
        let mut chars = body.char_indices();
        while let Some((offset, ch)) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some((_, escaped)) => text.push(escaped),
                    None => break,
                },
                '"' => {
                    let after = span.start + 1 + offset + 1;
                    if after != span.end {
                        return Err(FilterParseError::Expected {
                            expected: "`,` or `)` after quoted literal",
                            position: after,
                        });
                    }
                    return Ok(Literal {
                        text,
                        quoted: true,
                        position: span.start,
                    });
                }
                other => text.push(other),
            }
        }
        Err(FilterParseError::UnbalancedParentheses {
            position: span.start,
        })
    }

    /// Narrows a span to exclude surrounding whitespace.
    fn trim(&self, span: Span) -> Span {
        let bytes = self.input.as_bytes();
        let mut start = span.start;
        let mut end = span.end;
        while start < end && bytes[start].is_ascii_whitespace() {
            start += 1;
        }
        while end > start && bytes[end - 1].is_ascii_whitespace() {
            end -= 1;
        }
        Span::new(start, end)
    }

    /// Returns the first non-whitespace offset at or after `from`.
    fn skip_whitespace(&self, from: usize, end: usize) -> usize {
        let bytes = self.input.as_bytes();
        let mut cursor = from;
        while cursor < end && bytes[cursor].is_ascii_whitespace() {
            cursor += 1;
        }
        cursor
    }
}

/// Builds an arity error.
fn arity(
    function: &str,
    expected: &'static str,
    found: usize,
    position: usize,
) -> FilterParseError {
    FilterParseError::Arity {
        function: function.to_string(),
        expected,
        found,
        position,
    }
}

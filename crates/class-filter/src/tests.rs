// crates/class-filter/src/tests.rs
// ============================================================================
// Module: Class Filter Unit Tests
// Description: Unit coverage for rendering and literal decoding internals.
// Purpose: Pin the quoting rules that keep render/parse symmetric.
// Dependencies: class-filter
// ============================================================================

//! ## Overview
//! Unit tests for quoting decisions made by the renderer and honoured by the
//! parser.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use crate::Case;
use crate::ClassFilter;
use crate::parse_filter;

#[test]
fn plain_literals_render_bare() {
    let filter = ClassFilter::name(Case::Sensitive, ["org.example.Impl", "org.example.Other"]);
    assert_eq!(filter.to_string(), "Name( Sensitive, org.example.Impl, org.example.Other )");
}

#[test]
fn literals_with_commas_render_quoted() {
    let filter = ClassFilter::regex(Case::Sensitive, ["a{1,2}"]).unwrap();
    assert_eq!(filter.to_string(), "Regex( Sensitive, \"a{1,2}\" )");
    assert_eq!(parse_filter(&filter.to_string()).unwrap(), filter);
}

#[test]
fn case_keyword_literal_is_quoted() {
    let filter = ClassFilter::suffix(Case::Insensitive, ["Sensitive"]);
    assert_eq!(filter.to_string(), "Suffix( Insensitive, \"Sensitive\" )");
    assert_eq!(parse_filter(&filter.to_string()).unwrap(), filter);
}

#[test]
fn quotes_and_backslashes_are_escaped() {
    let filter = ClassFilter::name(Case::Sensitive, ["say \"hi\"\\"]);
    assert_eq!(filter.to_string(), "Name( Sensitive, \"say \\\"hi\\\"\\\\\" )");
    assert_eq!(parse_filter(&filter.to_string()).unwrap(), filter);
}

#[test]
fn empty_composites_render_without_operands() {
    assert_eq!(ClassFilter::and(Vec::new()).to_string(), "And()");
    assert_eq!(ClassFilter::or(Vec::new()).to_string(), "Or()");
}

#[test]
fn depth_counts_nesting() {
    let filter = ClassFilter::and(vec![
        ClassFilter::negate(ClassFilter::Interface),
        ClassFilter::True,
    ]);
    assert_eq!(filter.depth(), 3);
}

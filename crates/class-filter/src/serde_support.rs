// crates/class-filter/src/serde_support.rs
// ============================================================================
// Module: Filter Serde Support
// Description: Serde integration through the canonical textual form.
// Purpose: Let configuration formats carry filters as expression strings.
// Dependencies: serde, crate::{filter, parse}
// ============================================================================

//! ## Overview
//! Filters serialize as their canonical expression string and deserialize by
//! parsing one, so a TOML or JSON document can hold
//! `include = "Prefix( Sensitive, org.example )"` and receive a validated
//! [`ClassFilter`]. Parse failures become deserialization errors carrying the
//! positioned [`FilterParseError`](crate::FilterParseError) message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;

use crate::filter::ClassFilter;
use crate::parse::parse_filter;

// ============================================================================
// SECTION: Implementations
// ============================================================================

impl Serialize for ClassFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClassFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(FilterVisitor)
    }
}

/// Visitor that parses filter expressions.
struct FilterVisitor;

impl de::Visitor<'_> for FilterVisitor {
    type Value = ClassFilter;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a filter expression such as `Prefix( Sensitive, org.example )`")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse_filter(value).map_err(E::custom)
    }
}

// crates/contract-suite-config/src/lib.rs
// ============================================================================
// Module: Contract Suite Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for contract-suite.toml semantics.
// Dependencies: class-filter, contract-suite-core, serde, toml
// ============================================================================

//! ## Overview
//! `contract-suite-config` defines the configuration model used by the
//! `contract-suite` tool: where to look for type manifests, which types
//! discovery considers, and what the coverage report shows. Loading is
//! strict and fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;

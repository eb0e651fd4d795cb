//! # Chargen Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Standard catalog and character fixtures
//! - Snapshot round-trip harness
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod round_trip;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;

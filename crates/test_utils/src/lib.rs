//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! insurance settlement test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for ledger entries and companies
//! - `assertions`: Custom assertion helpers for ledger state
//! - `generators`: Property-based test data generators
//! - `tracing_init`: One-time tracing setup that writes through the test harness

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod tracing_init;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use tracing_init::init_test_tracing;

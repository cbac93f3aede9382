//! ferrosync integration testing suite
//!
//! End-to-end tests and benchmarks that exercise the comparison engine and the
//! sync executor together on real temporary directory trees.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Unified test utilities
///
/// Fixture builders and tree snapshots shared by the integration tests,
/// property tests and benchmarks.
pub mod test_utils;

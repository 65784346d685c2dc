//! Run-level behavior
//!
//! - Deterministic, traceable output
//! - Atomic exclusion
//! - Overload disambiguation
//! - Configuration errors and diagnostics

pub mod tests_config_errors;
pub mod tests_determinism;
pub mod tests_diagnostics;
pub mod tests_exclusion;
pub mod tests_overloads;

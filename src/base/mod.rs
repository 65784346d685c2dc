//! Foundation types for the litbind toolchain.
//!
//! This module provides fundamental types used throughout the generator:
//! - [`SourceLocation`], [`Position`] - Where a declaration came from
//! - [`QualifiedName`] - `::`-separated native scope paths
//! - Domain constants (host keywords, authorized buffer element types)
//!
//! This module has NO dependencies on other litbind modules.

pub mod constants;
mod name;
mod position;

pub use name::QualifiedName;
pub use position::{Position, SourceLocation};

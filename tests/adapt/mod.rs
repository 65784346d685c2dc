//! Adapter synthesis through the full pipeline
//!
//! - Boxed helper types and their single prelude
//! - Numeric buffers and shared counts
//! - C arrays and bounds conflicts
//! - Template instantiation

pub mod tests_arrays;
pub mod tests_boxing;
pub mod tests_buffers;
pub mod tests_templates;

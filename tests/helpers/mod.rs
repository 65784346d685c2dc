//! Shared fixtures and assertions for integration tests.

pub mod assertions;
pub mod fixtures;

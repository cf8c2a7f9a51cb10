//! Builder API for ergonomic engine and puzzle construction.
//!
//! This module provides a fluent builder for the session engine and a
//! macro for declaring puzzle definitions with minimal boilerplate.

pub mod engine;
pub mod error;
pub mod macros;

pub use engine::{EngineBuilder, EngineConfig, DEFAULT_NAMESPACE};
pub use error::BuildError;

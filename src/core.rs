//! # Core Module
//!
//! This module contains the core functionality of the corpus runner:
//! the expectation model, annotation parsing, path resolution, result
//! validation and the sequential suite driver.

pub mod annotations;
pub mod config;
pub mod execution;
pub mod models;
pub mod resolver;
pub mod validation;

// Re-exports
pub use annotations::parse_source;
pub use config::SuiteConfig;
pub use execution::{Suite, run_suite};

//! # Corpus Runner Library
//!
//! This library provides the core functionality for the corpus runner, a
//! harness that runs an interpreter over a corpus of annotated test programs
//! and checks its stdout, compile errors and runtime errors against the
//! expectations written in the programs' comments.
//!
//! ## Modules
//!
//! - `core` - Expectation model, annotation parsing, path resolution, validation and the suite driver
//! - `infra` - Infrastructure services like process invocation and corpus discovery
//! - `reporting` - Console progress and summary rendering
//! - `cli` - Command-line interface and commands

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::annotations;
pub use crate::core::config;
pub use crate::core::execution;
pub use crate::core::models;
pub use crate::core::validation;

//! # Reporting Module
//!
//! This module handles how suite progress and results reach the console:
//! a live status line, per-test PASS/FAIL/SKIP lines and the final summary.

pub mod console;

// Re-export common reporting functions
pub use console::{Console, print_summary};

//! # Infrastructure Module
//!
//! This module provides infrastructure services for the corpus runner:
//! running the target process and discovering test files on disk.

pub mod command;
pub mod fs;

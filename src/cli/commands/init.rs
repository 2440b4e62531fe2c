//! # Init Command Module
//!
//! This module implements the `init` command, which writes a commented
//! default suite configuration file.

use anyhow::{Context, Result};
use colored::*;
use std::{fs, path::PathBuf};

use crate::core::config::DEFAULT_CONFIG;

/// Executes the init command with the provided arguments.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
///
/// # Returns
/// `false` when an existing file was left untouched
pub fn execute(output: PathBuf, force: bool) -> Result<bool> {
    if output.exists() && !force {
        println!(
            "{}",
            format!("Config file already exists: {}", output.display()).red()
        );
        println!("{}", "Use --force to overwrite it.".yellow());
        return Ok(false);
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create parent directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&output, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config file: {}", output.display()))?;

    println!(
        "{}",
        format!("Created config file: {}", output.display()).green()
    );
    println!("Edit the target command and path registrations, then run `corpus-runner`.");

    Ok(true)
}

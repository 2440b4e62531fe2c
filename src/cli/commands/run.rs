//! # Run Command Module
//!
//! Loads the suite configuration, resolves the target and runs every test
//! in the corpus against it.

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::{
    core::{config, execution::{Suite, run_suite}},
    reporting::{Console, print_summary},
};

/// Executes the run command with the provided arguments.
///
/// # Arguments
/// * `config_path` - Path to the suite configuration file
/// * `target` - Target to test; the configured default when `None`
/// * `filter` - Comma-separated path prefixes restricting the run
/// * `verbose` - Whether to print passed and skipped tests as well
///
/// # Returns
/// `true` when no executed test failed
pub async fn execute(
    config_path: PathBuf,
    target: Option<String>,
    filter: Option<String>,
    verbose: bool,
) -> Result<bool> {
    let (suite_config, base_dir) = config::load(&config_path)?;
    let suite = Suite::from_config(&suite_config, &base_dir, target.as_deref(), filter.as_deref())?;

    if verbose {
        println!(
            "Testing target {} ({}) against {}",
            suite.target.name.yellow(),
            suite.target.program.display(),
            base_dir.join(&suite.test_dir).display()
        );
    }

    let console = Console::new(verbose);
    let stats = run_suite(&suite, &console).await?;
    print_summary(&stats);

    Ok(stats.is_success())
}

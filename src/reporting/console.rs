//! # Console Reporting Module
//!
//! Renders suite progress: a single status line that is redrawn in place on a
//! terminal, one line per finished test that deserves attention, and a final
//! summary. Colors follow `colored`, which drops them off a terminal.

use colored::*;
use std::io::{self, IsTerminal, Write};

use crate::core::annotations::DefinitionError;
use crate::core::models::{SuiteStats, TestCase};

const ERASE_LINE: &str = "\x1b[2K";

/// Terminal renderer for one suite run.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    verbose: bool,
    /// Whether the status line is erased and redrawn in place. Otherwise each
    /// redraw starts after a bare carriage return.
    live: bool,
}

impl Console {
    /// The status line is redrawn in place only when stdout is a terminal.
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            live: io::stdout().is_terminal(),
        }
    }

    pub fn with_live_status(verbose: bool, live: bool) -> Self {
        Self { verbose, live }
    }

    /// Replaces the status line with `line`, or just erases it.
    fn status(&self, line: Option<&str>) {
        if self.live {
            print!("{ERASE_LINE}");
        }
        print!("\r");
        if let Some(line) = line {
            print!("{line}");
        }
        let _ = io::stdout().flush();
    }

    /// Redraws `Passed: N Failed: N Skipped: N (path)`.
    pub fn draw_progress(&self, stats: &SuiteStats, path: &str) {
        self.status(Some(&progress_line(stats, path)));
    }

    /// Clears the status line before the summary is printed. Without a
    /// terminal the last status line is ended instead.
    pub fn clear(&self) {
        if self.live {
            self.status(None);
        } else {
            println!();
        }
    }

    pub fn report_pass(&self, stats: &SuiteStats, path: &str) {
        if self.verbose {
            self.status(Some(&format!("{}: {}", "PASS".green(), path)));
            println!();
            self.draw_progress(stats, path);
        }
    }

    pub fn report_skip(&self, stats: &SuiteStats, path: &str) {
        if self.verbose {
            self.status(Some(&format!("{}: {}", "SKIP".yellow(), path)));
            println!();
            self.draw_progress(stats, path);
        }
    }

    pub fn report_fail(&self, case: &TestCase) {
        self.status(Some(&format!("{}: {}", "FAIL".red(), case.path)));
        println!();
        for failure in &case.failures {
            println!("      {}", failure.bright_red());
        }
        println!();
    }

    /// A path that no registry prefix covers.
    pub fn warn_unknown(&self, path: &str) {
        self.status(Some(
            &format!("Unknown test state for '{path}'.").yellow().to_string(),
        ));
        println!();
    }

    /// A file whose annotations contradict each other.
    pub fn report_definition_error(&self, error: &DefinitionError) {
        self.status(Some(&format!("{} {}", "TEST ERROR".bright_red(), error.path())));
        println!();
        println!("    {error}");
        println!();
    }
}

/// The text of the live status line.
pub fn progress_line(stats: &SuiteStats, path: &str) -> String {
    format!(
        "Passed: {} Failed: {} Skipped: {} ({})",
        stats.passed.to_string().green(),
        stats.failed.to_string().red(),
        stats.skipped.to_string().yellow(),
        path.bright_cyan().bold()
    )
}

/// The final one-line summary.
pub fn summary_line(stats: &SuiteStats) -> String {
    if stats.is_success() {
        format!(
            "All {} tests passed ({} expectations).",
            stats.passed.to_string().green(),
            stats.expectations
        )
    } else {
        format!(
            "{} tests passed. {} tests failed ({} expectations).",
            stats.passed.to_string().green(),
            stats.failed.to_string().red(),
            stats.expectations
        )
    }
}

/// Prints the final summary.
pub fn print_summary(stats: &SuiteStats) {
    println!("{}", summary_line(stats));
}

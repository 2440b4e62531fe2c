//! # Data Models Module
//!
//! This module defines the core data structures used throughout the corpus runner.
//! It includes the per-file expectation model, the captured process output,
//! the per-file outcome and the suite-wide counters.

use std::collections::BTreeSet;
use std::fmt;

use crate::core::annotations::DefinitionError;

/// Exit code a target reports for a compile-time (static) error.
pub const EX_DATAERR: i32 = 65;
/// Exit code a target reports for a runtime error.
pub const EX_SOFTWARE: i32 = 70;

/// One `expect:` annotation: a line the program must print, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedOutputLine {
    pub text: String,
    /// The 1-based source line the annotation sits on.
    pub source_line: usize,
}

/// A compile error the target must report, keyed by `[line] message`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpectedCompileError {
    pub source_line: usize,
    pub message: String,
}

impl ExpectedCompileError {
    pub fn new(source_line: usize, message: impl Into<String>) -> Self {
        Self {
            source_line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExpectedCompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.source_line, self.message)
    }
}

/// A runtime error the target must raise: the first stderr line must be
/// `message` and the first stack frame must cite `source_line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedRuntimeError {
    pub source_line: usize,
    pub message: String,
}

/// One corpus file's parsed expectations plus the failures found while
/// validating it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCase {
    /// Corpus-relative, `/`-separated path of the source file.
    pub path: String,
    pub output: Vec<ExpectedOutputLine>,
    pub compile_errors: BTreeSet<ExpectedCompileError>,
    pub runtime_error: Option<ExpectedRuntimeError>,
    /// Derived from the annotation kinds present: 0, [`EX_DATAERR`] or [`EX_SOFTWARE`].
    pub expected_exit_code: i32,
    /// Number of recognized annotations, counted once each.
    pub expectations: usize,
    pub failures: Vec<String>,
}

impl TestCase {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Records an assertion failure.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.failures.push(message.into());
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The captured result of one interpreter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Run/skip classification of a corpus path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Run,
    Skip,
    /// No registered prefix covers the path.
    Unknown,
}

/// What happened to a single corpus file.
#[derive(Debug, Clone)]
pub enum Outcome {
    Passed(TestCase),
    Failed(TestCase),
    /// Skipped by the path registry (`Unknown` dispositions land here too).
    Skipped(Disposition),
    /// Carries the non-test marker. Counted nowhere.
    NonTest,
    /// Annotations contradict each other. Never invoked; only its recognized
    /// annotations reach the expectation total.
    Invalid(DefinitionError),
}

/// Counters accumulated across the suite, merged from each file's outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteStats {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub expectations: usize,
}

impl SuiteStats {
    /// Folds one file's outcome into the counters.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Passed(case) => {
                self.passed += 1;
                self.expectations += case.expectations;
            }
            Outcome::Failed(case) => {
                self.failed += 1;
                self.expectations += case.expectations;
            }
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Invalid(error) => self.expectations += error.expectations(),
            Outcome::NonTest => {}
        }
    }

    /// The suite succeeds iff no executed test failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

//! # Result Validation
//!
//! Compares a captured [`ProcessResult`] against a [`TestCase`]'s expectations
//! and records every mismatch as a failure string on the case. Nothing here
//! returns an error: a mismatch is data, not control flow.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::models::{ExpectedCompileError, ProcessResult, TestCase};

/// A compile diagnostic on stderr: `[line N] Error ...`, optionally with a
/// location between the bracket and `line`.
static SYNTAX_ERROR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*line ([0-9]+)\] (Error.+)").expect("valid regex"));

/// A stack frame of a runtime error: `[line N]`.
static STACK_TRACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[line ([0-9]+)\]").expect("valid regex"));

/// Individually reported unexpected stderr lines before the rest are summarized.
const MAX_UNEXPECTED: usize = 10;
/// Stderr lines echoed as context for a wrong exit code.
const MAX_STDERR_CONTEXT: usize = 10;
const DIVIDER: &str = "---";

/// Validates `result` against `case`, appending failures to `case.failures`.
pub fn validate(case: &mut TestCase, result: &ProcessResult) {
    let (out, err) = match (
        std::str::from_utf8(&result.stdout),
        std::str::from_utf8(&result.stderr),
    ) {
        (Ok(out), Ok(err)) => (out, err),
        _ => {
            case.fail("Error decoding output.");
            return;
        }
    };

    let out_lines = split_lines(out);
    let error_lines = split_lines(err);

    if case.runtime_error.is_some() {
        validate_runtime_error(case, &error_lines);
    } else {
        validate_compile_errors(case, &error_lines);
    }

    validate_exit_code(case, result.exit_code, &error_lines);
    validate_output(case, &out_lines);
}

/// Normalizes line endings, splits on `\n` and drops the one empty line a
/// trailing newline leaves behind.
pub fn split_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut lines: Vec<String> = normalized.split('\n').map(str::to_string).collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

fn validate_runtime_error(case: &mut TestCase, error_lines: &[String]) {
    let Some(expected) = case.runtime_error.clone() else {
        return;
    };

    if error_lines.len() < 2 {
        case.fail(format!(
            "Expected runtime error '{}' but got none.",
            expected.message
        ));
        return;
    }

    let first = &error_lines[0];
    if *first != expected.message {
        case.fail(format!(
            "Expected runtime error '{}' but got:",
            expected.message
        ));
        case.fail(first.clone());
    }

    let stack_lines = &error_lines[1..];
    let frame = stack_lines
        .iter()
        .find_map(|line| STACK_TRACE_RE.captures(line));

    match frame {
        None => case.fail(format!("Expected stack trace but got: {:?}", stack_lines)),
        Some(caps) => {
            let stack_line = caps[1].parse::<usize>().ok();
            if stack_line != Some(expected.source_line) {
                case.fail(format!(
                    "Expected runtime error on line {} but was on line {}",
                    expected.source_line, &caps[1]
                ));
            }
        }
    }
}

fn validate_compile_errors(case: &mut TestCase, error_lines: &[String]) {
    let mut found: Vec<ExpectedCompileError> = Vec::new();
    let mut num_unexpected = 0;

    for line in error_lines {
        if let Some(caps) = SYNTAX_ERROR_RE.captures(line) {
            let reported = caps[1]
                .parse::<usize>()
                .ok()
                .map(|n| ExpectedCompileError::new(n, &caps[2]));
            match reported {
                Some(error) if case.compile_errors.contains(&error) => found.push(error),
                _ => {
                    if num_unexpected < MAX_UNEXPECTED {
                        case.fail("Unexpected error:");
                        case.fail(line.clone());
                    }
                    num_unexpected += 1;
                }
            }
        } else if !line.is_empty() {
            if num_unexpected < MAX_UNEXPECTED {
                case.fail("Unexpected output on stderr:");
                case.fail(line.clone());
            }
            num_unexpected += 1;
        }
    }

    if num_unexpected > MAX_UNEXPECTED {
        case.fail(format!(
            "(truncated {} more...)",
            num_unexpected - MAX_UNEXPECTED
        ));
    }

    let missing: Vec<String> = case
        .compile_errors
        .iter()
        .filter(|expected| !found.contains(expected))
        .map(|expected| format!("Missing expected error: {expected}"))
        .collect();
    case.failures.extend(missing);
}

fn validate_exit_code(case: &mut TestCase, exit_code: Option<i32>, error_lines: &[String]) {
    if exit_code == Some(case.expected_exit_code) {
        return;
    }

    push_divider(case);

    let got = exit_code.map_or_else(|| "none".to_string(), |code| code.to_string());
    case.fail(format!(
        "Expected return code {} but got {}. Stderr:",
        case.expected_exit_code, got
    ));

    case.failures
        .extend(error_lines.iter().take(MAX_STDERR_CONTEXT).cloned());
    if error_lines.len() > MAX_STDERR_CONTEXT {
        case.fail("(truncated...)");
    }
}

fn validate_output(case: &mut TestCase, out_lines: &[String]) {
    let expected = case.output.clone();
    let mut mismatches = Vec::new();

    for (index, line) in out_lines.iter().enumerate() {
        match expected.get(index) {
            None => mismatches.push(format!("Got output '{line}' when none was expected.")),
            Some(want) if want.text != *line => mismatches.push(format!(
                "Expected output '{}' on line {} but got '{}'.",
                want.text, want.source_line, line
            )),
            Some(_) => {}
        }
    }

    for want in expected.iter().skip(out_lines.len()) {
        mismatches.push(format!(
            "Missing expected output '{}' on line {}.",
            want.text, want.source_line
        ));
    }

    if !mismatches.is_empty() {
        push_divider(case);
        case.failures.extend(mismatches);
    }
}

/// Separates blocks of failures; never leading and never doubled.
fn push_divider(case: &mut TestCase) {
    if case.failures.last().is_some_and(|last| last != DIVIDER) {
        case.failures.push(DIVIDER.to_string());
    }
}

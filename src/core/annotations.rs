//! # Annotation Parser
//!
//! Scans a test source line by line and turns its trailing-comment
//! annotations into a [`TestCase`]:
//!
//! | Form                               | Meaning                                   |
//! |------------------------------------|-------------------------------------------|
//! | `// expect: TEXT`                  | next stdout line must equal `TEXT`        |
//! | `// Error MESSAGE`                 | compile error `[thisLine] Error MESSAGE`  |
//! | `// [LANG line N] Error MESSAGE`   | same, only for target `LANG`, on line `N` |
//! | `// expect runtime error: MESSAGE` | runtime error raised on this line         |
//! | `// nontest`                       | the file is not a test at all             |
//!
//! The comment token is configurable; `//` is the default.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::core::models::{
    EX_DATAERR, EX_SOFTWARE, ExpectedCompileError, ExpectedOutputLine, ExpectedRuntimeError,
    TestCase,
};

/// A file whose annotations cannot describe a single consistent run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Cannot expect both compile and runtime errors.")]
    ConflictingErrorModes { path: String, expectations: usize },
    #[error("Invalid line number '{number}' in annotation on line {line}.")]
    InvalidLineNumber {
        path: String,
        line: usize,
        number: String,
    },
}

impl DefinitionError {
    pub fn path(&self) -> &str {
        match self {
            DefinitionError::ConflictingErrorModes { path, .. } => path,
            DefinitionError::InvalidLineNumber { path, .. } => path,
        }
    }

    /// Annotations recognized before the file was rejected. A file with an
    /// unparseable line number stops scanning early and counts none.
    pub fn expectations(&self) -> usize {
        match self {
            DefinitionError::ConflictingErrorModes { expectations, .. } => *expectations,
            DefinitionError::InvalidLineNumber { .. } => 0,
        }
    }
}

/// The compiled annotation patterns for one comment token.
#[derive(Debug, Clone)]
pub struct AnnotationGrammar {
    non_test: Regex,
    output: Regex,
    error: Regex,
    error_line: Regex,
    runtime_error: Regex,
}

static DEFAULT_GRAMMAR: Lazy<AnnotationGrammar> = Lazy::new(|| {
    AnnotationGrammar::new("//").expect("the default annotation grammar is valid")
});

impl AnnotationGrammar {
    /// Builds the patterns for annotations introduced by `comment`.
    pub fn new(comment: &str) -> Result<Self, regex::Error> {
        let c = regex::escape(comment);
        Ok(Self {
            non_test: Regex::new(&format!(r"{c} nontest"))?,
            output: Regex::new(&format!(r"{c} expect: ?(.*)"))?,
            error: Regex::new(&format!(r"{c} (Error.*)"))?,
            error_line: Regex::new(&format!(r"{c} \[((\w+) )?line ([0-9]+)\] (Error.*)"))?,
            runtime_error: Regex::new(&format!(r"{c} expect runtime error: (.+)"))?,
        })
    }

    /// The grammar for `//` comments.
    pub fn standard() -> &'static AnnotationGrammar {
        &DEFAULT_GRAMMAR
    }
}

/// Parses a test source into its expectations.
///
/// Returns `Ok(None)` for a non-test file (the marker aborts parsing at once),
/// and a [`DefinitionError`] for a file that expects both compile and runtime
/// errors. `language` gates `[LANG line N]` annotations; an untagged one
/// applies to every target.
pub fn parse_source(
    path: &str,
    source: &str,
    grammar: &AnnotationGrammar,
    language: &str,
) -> Result<Option<TestCase>, DefinitionError> {
    let mut case = TestCase::new(path);

    for (index, line) in source.lines().enumerate() {
        let line_num = index + 1;

        if grammar.non_test.is_match(line) {
            return Ok(None);
        }

        if let Some(caps) = grammar.output.captures(line) {
            case.output.push(ExpectedOutputLine {
                text: caps[1].to_string(),
                source_line: line_num,
            });
            case.expectations += 1;
            continue;
        }

        if let Some(caps) = grammar.error.captures(line) {
            case.compile_errors
                .insert(ExpectedCompileError::new(line_num, &caps[1]));
            case.expected_exit_code = EX_DATAERR;
            case.expectations += 1;
            continue;
        }

        if let Some(caps) = grammar.error_line.captures(line) {
            let applies = caps.get(2).is_none_or(|lang| lang.as_str() == language);
            if applies {
                let number = &caps[3];
                let reported_line =
                    number
                        .parse::<usize>()
                        .map_err(|_| DefinitionError::InvalidLineNumber {
                            path: path.to_string(),
                            line: line_num,
                            number: number.to_string(),
                        })?;
                case.compile_errors
                    .insert(ExpectedCompileError::new(reported_line, &caps[4]));
                case.expected_exit_code = EX_DATAERR;
                case.expectations += 1;
            }
            continue;
        }

        if let Some(caps) = grammar.runtime_error.captures(line) {
            // A later annotation replaces an earlier one.
            case.runtime_error = Some(ExpectedRuntimeError {
                source_line: line_num,
                message: caps[1].to_string(),
            });
            case.expected_exit_code = EX_SOFTWARE;
            case.expectations += 1;
        }
    }

    if !case.compile_errors.is_empty() && case.runtime_error.is_some() {
        return Err(DefinitionError::ConflictingErrorModes {
            path: path.to_string(),
            expectations: case.expectations,
        });
    }

    Ok(Some(case))
}

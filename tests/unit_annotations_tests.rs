//! # Annotation Parser Unit Tests
//!
//! Tests for `annotations.rs`: the recognized comment forms, the derived exit
//! code, language gating and rejection of non-test and conflicting files.

use corpus_runner::annotations::{AnnotationGrammar, DefinitionError, parse_source};
use corpus_runner::models::{EX_DATAERR, EX_SOFTWARE, ExpectedCompileError, TestCase};

fn parse(source: &str) -> Result<Option<TestCase>, DefinitionError> {
    parse_source("test/case.lox", source, AnnotationGrammar::standard(), "c")
}

fn parse_case(source: &str) -> TestCase {
    parse(source)
        .expect("annotations should be valid")
        .expect("source should be a test")
}

#[cfg(test)]
mod output_tests {
    use super::*;

    #[test]
    fn test_expect_lines_are_collected_in_order() {
        let case = parse_case("print 1; // expect: 1\n\nprint \"a b\"; // expect: a b\n");

        assert_eq!(case.output.len(), 2);
        assert_eq!(case.output[0].text, "1");
        assert_eq!(case.output[0].source_line, 1);
        assert_eq!(case.output[1].text, "a b");
        assert_eq!(case.output[1].source_line, 3);
        assert_eq!(case.expected_exit_code, 0);
        assert_eq!(case.expectations, 2);
    }

    #[test]
    fn test_space_after_colon_is_optional() {
        let case = parse_case("print 1; // expect:1\nprint \"\"; // expect: \n");

        assert_eq!(case.output[0].text, "1");
        assert_eq!(case.output[1].text, "");
    }

    #[test]
    fn test_plain_source_has_no_expectations() {
        let case = parse_case("var a = 1;\nprint a;\n");

        assert!(case.output.is_empty());
        assert!(case.compile_errors.is_empty());
        assert!(case.runtime_error.is_none());
        assert_eq!(case.expected_exit_code, 0);
        assert_eq!(case.path, "test/case.lox");
    }
}

#[cfg(test)]
mod compile_error_tests {
    use super::*;

    #[test]
    fn test_bare_error_uses_its_own_line() {
        let case = parse_case("\n\nvar = 1; // Error at '=': Expect variable name.\n");

        assert!(case.compile_errors.contains(&ExpectedCompileError::new(
            3,
            "Error at '=': Expect variable name."
        )));
        assert_eq!(case.expected_exit_code, EX_DATAERR);
    }

    #[test]
    fn test_line_override_without_language() {
        let case = parse_case("\"unterminated\n// [line 1] Error: Unterminated string.\n");

        assert_eq!(
            case.compile_errors.iter().next(),
            Some(&ExpectedCompileError::new(1, "Error: Unterminated string."))
        );
        assert_eq!(case.expected_exit_code, EX_DATAERR);
    }

    #[test]
    fn test_language_tag_matching_target_is_kept() {
        let case = parse_case("// [c line 7] Error at end: Expect '}'.\n");

        assert!(
            case.compile_errors
                .contains(&ExpectedCompileError::new(7, "Error at end: Expect '}'."))
        );
        assert_eq!(case.expectations, 1);
    }

    #[test]
    fn test_language_tag_for_other_target_is_ignored() {
        let case = parse_case("// [java line 7] Error at end: Expect '}'.\n");

        assert!(case.compile_errors.is_empty());
        assert_eq!(case.expected_exit_code, 0);
        assert_eq!(case.expectations, 0);
    }

    #[test]
    fn test_duplicate_errors_collapse() {
        let case = parse_case("// [line 2] Error: Oops.\n// [line 2] Error: Oops.\n");

        assert_eq!(case.compile_errors.len(), 1);
        assert_eq!(case.expectations, 2);
    }

    #[test]
    fn test_non_ascii_digits_are_not_a_line_number() {
        let case = parse_case("// [line \u{0663}] Error: Odd.\n");

        assert!(case.compile_errors.is_empty());
        assert_eq!(case.expected_exit_code, 0);
        assert_eq!(case.expectations, 0);
    }

    #[test]
    fn test_absurd_line_number_is_rejected() {
        let result = parse("// [line 99999999999999999999999999] Error: Huge.\n");

        assert!(matches!(
            result,
            Err(DefinitionError::InvalidLineNumber { line: 1, .. })
        ));
    }
}

#[cfg(test)]
mod runtime_error_tests {
    use super::*;

    #[test]
    fn test_runtime_error_records_message_and_line() {
        let case = parse_case("fun f() { f(); }\nf(); // expect runtime error: Stack overflow.\n");

        let expected = case.runtime_error.expect("runtime error expected");
        assert_eq!(expected.message, "Stack overflow.");
        assert_eq!(expected.source_line, 2);
        assert_eq!(case.expected_exit_code, EX_SOFTWARE);
    }

    #[test]
    fn test_last_runtime_error_wins() {
        let case = parse_case(
            "a; // expect runtime error: First.\nb; // expect runtime error: Second.\n",
        );

        let expected = case.runtime_error.expect("runtime error expected");
        assert_eq!(expected.message, "Second.");
        assert_eq!(expected.source_line, 2);
        assert_eq!(case.expectations, 2);
    }

    #[test]
    fn test_output_and_runtime_error_can_coexist() {
        let case = parse_case("print 1; // expect: 1\nnil(); // expect runtime error: Can only call functions.\n");

        assert_eq!(case.output.len(), 1);
        assert!(case.runtime_error.is_some());
        assert_eq!(case.expected_exit_code, EX_SOFTWARE);
    }
}

#[cfg(test)]
mod rejection_tests {
    use super::*;

    #[test]
    fn test_non_test_marker_excludes_the_file() {
        assert_eq!(parse("print 1; // expect: 1\n// nontest\n"), Ok(None));
        assert_eq!(parse("// nontest\nprint 1; // expect: 1\n"), Ok(None));
    }

    #[test]
    fn test_compile_and_runtime_errors_conflict() {
        let result = parse("a; // Error foo\nb; // expect runtime error: bar\n");

        assert_eq!(
            result,
            Err(DefinitionError::ConflictingErrorModes {
                path: "test/case.lox".to_string(),
                expectations: 2,
            })
        );
    }

    #[test]
    fn test_conflict_keeps_annotations_seen_before_rejection() {
        let error = parse("print 1; // expect: 1
a; // Error foo
b; // expect runtime error: bar
")
            .unwrap_err();

        assert_eq!(error.expectations(), 3);
        assert_eq!(error.path(), "test/case.lox");
    }

    #[test]
    fn test_gated_out_error_does_not_conflict() {
        let case = parse_case("// [java line 1] Error: Only jlox.\nb; // expect runtime error: bar\n");

        assert!(case.compile_errors.is_empty());
        assert!(case.runtime_error.is_some());
    }
}

#[cfg(test)]
mod grammar_tests {
    use super::*;

    #[test]
    fn test_custom_comment_token() {
        let grammar = AnnotationGrammar::new("#").unwrap();
        let case = parse_source("t.rb", "puts 1 # expect: 1\nx # Error: bad\n", &grammar, "c")
            .unwrap()
            .unwrap();

        assert_eq!(case.output[0].text, "1");
        assert!(case.compile_errors.contains(&ExpectedCompileError::new(2, "Error: bad")));
    }

    #[test]
    fn test_regex_metacharacters_in_token_are_literal() {
        let grammar = AnnotationGrammar::new("(*").unwrap();
        let case = parse_source("t.ml", "print 1 (* expect: 1 *)\n// expect: 2\n", &grammar, "c")
            .unwrap()
            .unwrap();

        assert_eq!(case.output.len(), 1);
        assert_eq!(case.output[0].text, "1 *)");
    }
}

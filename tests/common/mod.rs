// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// A fake interpreter. Each source line (with any trailing `//` comment cut
/// off) is a directive: `out TEXT` prints to stdout, `err TEXT` prints to
/// stderr, `exit N` sets the exit code. Every invocation is logged to
/// `invoked.log` in the working directory.
pub const FAKE_INTERPRETER: &str = r#"#!/bin/sh
printf '%s\n' "$1" >> invoked.log
code=0
while IFS= read -r line || [ -n "$line" ]; do
  body="${line%% //*}"
  case "$body" in
    "out "*) printf '%s\n' "${body#out }" ;;
    "err "*) printf '%s\n' "${body#err }" >&2 ;;
    "exit "*) code="${body#exit }" ;;
  esac
done < "$1"
exit "$code"
"#;

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

/// Creates a scratch suite: the fake interpreter plus a `TestSuite.toml`
/// whose registry runs `test` and skips `test/skipped`.
pub fn setup_suite() -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let root = temp_dir.path();
    write_file(root, "interp.sh", FAKE_INTERPRETER);
    write_file(
        root,
        "TestSuite.toml",
        r#"
test_dir = "test"
extension = "lox"

[[targets]]
name = "fake"
language = "c"
command = "sh interp.sh"

[targets.paths]
"test" = "run"
"test/skipped" = "skip"
"#,
    );
    fs::create_dir_all(root.join("test")).expect("Failed to create test directory");
    temp_dir
}

/// The paths the fake interpreter was invoked on, in order.
pub fn invoked(root: &Path) -> Vec<String> {
    fs::read_to_string(root.join("invoked.log"))
        .map(|log| log.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

pub const PASSING_TEST: &str = "out 1 // expect: 1\nout 2 // expect: 2\n";
pub const MISMATCH_TEST: &str = "out a // expect: a\nout c // expect: b\n";

//! # Configuration Module
//!
//! Loads the suite configuration (`TestSuite.toml`): where the corpus lives,
//! which extension marks a test source, and one or more interpreter targets,
//! each with its own language id, invocation template and path registry.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::resolver::PathStateRegistry;
use crate::infra::fs::to_slash_path;

/// A run/skip registration for a path prefix as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathState {
    #[serde(alias = "pass")]
    Run,
    Skip,
}

/// One interpreter the corpus can be run against.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Name used to select the target with `--target`.
    pub name: String,
    /// Compared against the `LANG` tag of `[LANG line N] Error ...` annotations.
    pub language: String,
    /// Executable plus fixed arguments. The test file path is appended.
    pub command: String,
    /// Path prefix registrations, relative to the config file's directory.
    #[serde(default)]
    pub paths: BTreeMap<String, PathState>,
}

/// The whole suite configuration, loaded from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct SuiteConfig {
    /// Corpus root, relative to the config file's directory.
    #[serde(default = "default_test_dir")]
    pub test_dir: String,

    /// Extension of test sources, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Line-comment token that introduces annotations.
    #[serde(default = "default_comment")]
    pub comment: String,

    #[serde(default)]
    pub default_target: Option<String>,

    pub targets: Vec<TargetConfig>,
}

fn default_test_dir() -> String {
    "test".to_string()
}

fn default_extension() -> String {
    "lox".to_string()
}

fn default_comment() -> String {
    "//".to_string()
}

/// Problems with a configuration that parsed as TOML but cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no targets are declared")]
    NoTargets,
    #[error("target '{0}' is declared more than once")]
    DuplicateTarget(String),
    #[error("target '{0}' has an empty command")]
    EmptyCommand(String),
    #[error("unknown target '{0}'")]
    UnknownTarget(String),
    #[error("the comment token must not be empty")]
    EmptyComment,
    #[error("failed to parse command for target '{0}': {1}")]
    BadCommand(String, String),
}

impl SuiteConfig {
    /// Parses a configuration from TOML text and checks it.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SuiteConfig =
            toml::from_str(content).context("Failed to parse the suite configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        if self.comment.trim().is_empty() {
            return Err(ConfigError::EmptyComment);
        }
        let mut seen = std::collections::BTreeSet::new();
        for target in &self.targets {
            if !seen.insert(target.name.as_str()) {
                return Err(ConfigError::DuplicateTarget(target.name.clone()));
            }
            if target.command.trim().is_empty() {
                return Err(ConfigError::EmptyCommand(target.name.clone()));
            }
        }
        if let Some(name) = &self.default_target {
            self.target(Some(name))?;
        }
        Ok(())
    }

    /// Picks the target named on the command line, else `default_target`,
    /// else the first declared target.
    pub fn target(&self, name: Option<&str>) -> Result<&TargetConfig, ConfigError> {
        match name.or(self.default_target.as_deref()) {
            Some(name) => self
                .targets
                .iter()
                .find(|t| t.name == name)
                .ok_or_else(|| ConfigError::UnknownTarget(name.to_string())),
            None => self.targets.first().ok_or(ConfigError::NoTargets),
        }
    }
}

/// Reads and parses the configuration file.
///
/// Returns the configuration together with its base directory: the
/// canonicalized directory containing the file, against which the corpus,
/// registry keys and relative executables are resolved.
pub fn load(config_path: &Path) -> Result<(SuiteConfig, PathBuf)> {
    let config_path = fs::canonicalize(config_path).with_context(|| {
        format!(
            "Failed to read config file: {}",
            config_path.display()
        )
    })?;

    let content = fs::read_to_string(&config_path).with_context(|| {
        format!(
            "Failed to read config file: {}",
            config_path.display()
        )
    })?;

    let config = SuiteConfig::from_toml(&content)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))?;

    let base_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok((config, base_dir))
}

/// The interpreter under test: its language id and invocation template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTarget {
    pub name: String,
    pub language: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ActiveTarget {
    /// Expands and splits the target's command. A relative program containing
    /// a path separator is resolved against `base_dir`.
    pub fn from_config(target: &TargetConfig, base_dir: &Path) -> Result<Self> {
        let expanded = shellexpand::full(&target.command)
            .map_err(|e| ConfigError::BadCommand(target.name.clone(), e.to_string()))?
            .to_string();

        let mut parts = shlex::split(&expanded)
            .ok_or_else(|| ConfigError::BadCommand(target.name.clone(), expanded.clone()))?
            .into_iter();

        let program = parts
            .next()
            .ok_or_else(|| ConfigError::EmptyCommand(target.name.clone()))?;

        let program_path = PathBuf::from(&program);
        let program = if program_path.is_relative() && program.contains(['/', '\\']) {
            base_dir.join(program_path)
        } else {
            program_path
        };

        Ok(Self {
            name: target.name.clone(),
            language: target.language.clone(),
            program,
            args: parts.collect(),
        })
    }
}

/// Builds the path registry for a target. The corpus root runs unless the
/// target registers it otherwise.
pub fn registry_for(target: &TargetConfig, test_dir: &str) -> PathStateRegistry {
    let mut registry = PathStateRegistry::new();
    registry.register(&to_slash_path(Path::new(test_dir)), PathState::Run);
    for (prefix, state) in &target.paths {
        registry.register(prefix, *state);
    }
    registry
}

/// The commented default written by `init`.
pub const DEFAULT_CONFIG: &str = r#"# Corpus runner configuration

# Directory holding the annotated test sources, relative to this file.
test_dir = "test"

# Extension of test sources.
extension = "lox"

# Line-comment token that introduces annotations (`// expect: 1`).
comment = "//"

# Target used when --target is not given. Defaults to the first one.
default_target = "clox"

[[targets]]
name = "clox"
# Matched against the LANG tag in `[LANG line N] Error ...` annotations.
language = "c"
# Executable and fixed arguments. The test file path is appended.
command = "build/clox"

# Longest matching prefix wins. "run" (or "pass") runs, "skip" skips.
[targets.paths]
"test" = "run"
"test/scanning" = "skip"
"test/expressions" = "skip"
"#;

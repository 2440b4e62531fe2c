//! # Suite Execution Engine Module
//!
//! Drives one test file through its lifecycle (resolve, parse, invoke,
//! validate) and walks the whole corpus, one file at a time. Each file's
//! evaluation returns an [`Outcome`] that is folded into [`SuiteStats`]; no
//! counter is shared between evaluations.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::core::annotations::{AnnotationGrammar, parse_source};
use crate::core::config::{self, ActiveTarget, SuiteConfig};
use crate::core::models::{Disposition, Outcome, SuiteStats};
use crate::core::resolver::PathStateRegistry;
use crate::core::validation;
use crate::infra::command;
use crate::infra::fs::{self, CorpusFilter};
use crate::reporting::Console;

/// Everything needed to run the corpus against one target.
#[derive(Debug, Clone)]
pub struct Suite {
    /// Directory that corpus paths, registry keys and the child's working
    /// directory are relative to.
    pub base_dir: PathBuf,
    pub test_dir: String,
    pub target: ActiveTarget,
    pub registry: PathStateRegistry,
    pub grammar: AnnotationGrammar,
    pub filter: CorpusFilter,
}

impl Suite {
    /// Resolves the chosen target and builds its registry and grammar.
    ///
    /// # Arguments
    /// * `config` - The loaded suite configuration
    /// * `base_dir` - Directory the configuration was loaded from
    /// * `target` - Target named on the command line, if any
    /// * `filters` - Comma-separated corpus-relative prefixes, if any
    pub fn from_config(
        config: &SuiteConfig,
        base_dir: &Path,
        target: Option<&str>,
        filters: Option<&str>,
    ) -> Result<Self> {
        let target_config = config.target(target)?;
        let grammar = AnnotationGrammar::new(&config.comment)
            .with_context(|| format!("Invalid comment token '{}'", config.comment))?;

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            test_dir: config.test_dir.clone(),
            target: ActiveTarget::from_config(target_config, base_dir)?,
            registry: config::registry_for(target_config, &config.test_dir),
            grammar,
            filter: CorpusFilter::new(&config.extension, filters),
        })
    }
}

/// Runs a single corpus file through resolve, parse, invoke and validate.
///
/// Skipped, non-test and invalid files never reach the target. Assertion
/// failures end up inside the returned outcome; only harness problems (an
/// unreadable file, a target that cannot be spawned) are errors.
pub async fn evaluate_file(suite: &Suite, path: &str) -> Result<Outcome> {
    match suite.registry.resolve(path) {
        Disposition::Run => {}
        other => return Ok(Outcome::Skipped(other)),
    }

    let source = fs::read_source(&suite.base_dir, path)?;
    let mut case = match parse_source(path, &source, &suite.grammar, &suite.target.language) {
        Ok(Some(case)) => case,
        Ok(None) => return Ok(Outcome::NonTest),
        Err(e) => return Ok(Outcome::Invalid(e)),
    };

    let result = command::invoke(&suite.target, path, &suite.base_dir).await?;
    validation::validate(&mut case, &result);

    Ok(if case.passed() {
        Outcome::Passed(case)
    } else {
        Outcome::Failed(case)
    })
}

/// Walks the corpus in lexicographic order, evaluating each file to completion
/// before starting the next, and reports progress through `console`.
pub async fn run_suite(suite: &Suite, console: &Console) -> Result<SuiteStats> {
    let files = fs::discover_tests(&suite.base_dir, &suite.test_dir, &suite.filter)?;
    let mut stats = SuiteStats::default();

    for path in &files {
        console.draw_progress(&stats, path);

        let outcome = evaluate_file(suite, path).await?;
        stats.record(&outcome);

        match &outcome {
            Outcome::Passed(_) => console.report_pass(&stats, path),
            Outcome::Failed(case) => console.report_fail(case),
            Outcome::Skipped(Disposition::Unknown) => {
                console.warn_unknown(path);
                console.report_skip(&stats, path);
            }
            Outcome::Skipped(_) | Outcome::NonTest => console.report_skip(&stats, path),
            Outcome::Invalid(error) => console.report_definition_error(error),
        }
    }

    console.clear();
    Ok(stats)
}

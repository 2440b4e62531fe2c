//! # Path State Resolution
//!
//! Decides whether a corpus path runs or is skipped by looking up the deepest
//! registered ancestor prefix. Paths that no prefix covers are `Unknown`.

use std::collections::HashMap;

use crate::core::config::PathState;
use crate::core::models::Disposition;

/// Maps `/`-separated path prefixes to a run/skip registration.
#[derive(Debug, Clone, Default)]
pub struct PathStateRegistry {
    states: HashMap<String, PathState>,
}

impl PathStateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `prefix`, replacing any earlier registration of the same prefix.
    /// Trailing separators are ignored so `"test/"` and `"test"` are the same key.
    pub fn register(&mut self, prefix: &str, state: PathState) {
        let key = prefix.trim_end_matches('/').to_string();
        self.states.insert(key, state);
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Walks the components of `path` root-to-leaf, checking the registry at
    /// every prefix boundary. The last (deepest) hit wins, so a descendant can
    /// re-enable or re-disable relative to its ancestor.
    pub fn resolve(&self, path: &str) -> Disposition {
        let mut state = None;
        let mut prefix = String::with_capacity(path.len());

        for part in path.split('/') {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(part);
            if let Some(found) = self.states.get(&prefix) {
                state = Some(*found);
            }
        }

        match state {
            Some(PathState::Run) => Disposition::Run,
            Some(PathState::Skip) => Disposition::Skip,
            None => Disposition::Unknown,
        }
    }
}


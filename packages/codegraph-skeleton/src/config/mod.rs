//! Analyzer configuration.

use serde::{Deserialize, Serialize};

use crate::shared::constants::DEFAULT_IGNORE_PATTERNS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Project root to scan. Relative ids/paths in the output are computed
    /// against this root.
    pub root: String,
    /// Path substrings that exclude a file from discovery.
    pub ignore_patterns: Vec<String>,
    /// Whether docstrings participate in fingerprint composition.
    pub include_docstrings: bool,
    /// `None` lets rayon's default global pool decide; `Some(n)` pins the
    /// number of Pass 2 worker threads.
    pub thread_count: Option<usize>,
}

impl AnalyzerConfig {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn should_ignore(&self, path: &str) -> bool {
        self.ignore_patterns.iter().any(|pat| path.contains(pat.as_str()))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            ignore_patterns: DEFAULT_IGNORE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            include_docstrings: true,
            thread_count: None,
        }
    }
}

//! Top-level orchestration: wires C1-C6 into the single public entry point,
//! `analyze_project`. Grounded on the teacher's `pipeline::processor`-style
//! orchestration (one function that drives the passes and returns a pure
//! value, no store side effects baked in).

use crate::config::AnalyzerConfig;
use crate::domain::model::AnalysisResult;
use crate::features::fingerprint::FingerprintEngine;
use crate::features::resolver::ProjectAnalyzer;
use crate::shared::cancellation::CancellationToken;

/// Run every pass over `config.root` and return the analyzer's pure output:
/// packages, modules folded into relationships, the fingerprint map, and any
/// per-file errors. No store is touched here; callers that want persistence
/// pass the result to `features::emitter::emit` with their own `GraphStore`.
///
/// This entry point never cancels; use `analyze_project_cancellable` to run
/// under a `CancellationToken`.
pub fn analyze_project(config: AnalyzerConfig) -> AnalysisResult {
    analyze_project_cancellable(config, None).expect("an uncancelled run always produces a result")
}

/// Same as `analyze_project`, but checks `token` between files in Pass 2 and
/// before each module in Pass 3 (§5). Returns `None` if cancelled — a
/// cancelled run produces no partial output.
pub fn analyze_project_cancellable(
    config: AnalyzerConfig,
    token: Option<CancellationToken>,
) -> Option<AnalysisResult> {
    let engine = FingerprintEngine { include_docstrings: config.include_docstrings };

    let mut analyzer = ProjectAnalyzer::new(config);
    if let Some(token) = token {
        analyzer = analyzer.with_cancellation(token);
    }
    let (packages, modules, relationships, errors) = analyzer.analyze()?;

    let mut fingerprints = std::collections::HashMap::new();
    for module in &modules {
        engine.hash_module(module, &mut fingerprints);
    }
    tracing::info!(fingerprint_count = fingerprints.len(), "fingerprinting complete");

    Some(AnalysisResult { packages, modules, relationships, fingerprints, errors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn end_to_end_single_file_project() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f.py"), "def alpha():\n    beta()\n\ndef beta():\n    pass\n").unwrap();

        let result = analyze_project(AnalyzerConfig::new(tmp.path().to_string_lossy().to_string()));

        assert!(result.errors.is_empty());
        assert_eq!(result.modules.len(), 1);
        assert!(result.fingerprints.contains_key("f"));
        assert!(result.fingerprints.contains_key("f.alpha"));
    }

    #[test]
    fn malformed_file_does_not_abort_the_rest_of_the_project() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("good.py"), "def ok():\n    pass\n").unwrap();
        fs::write(tmp.path().join("bad.py"), "def broken(:\n    pass\n").unwrap();

        let result = analyze_project(AnalyzerConfig::new(tmp.path().to_string_lossy().to_string()));

        assert_eq!(result.modules.len(), 2);
        assert!(result.modules.iter().any(|m| m.path == "good.py" && !m.functions.is_empty()));
    }

    #[test]
    fn pre_cancelled_token_yields_no_partial_output() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f.py"), "def alpha():\n    pass\n").unwrap();

        let token = CancellationToken::new();
        token.cancel();

        let result = analyze_project_cancellable(
            AnalyzerConfig::new(tmp.path().to_string_lossy().to_string()),
            Some(token),
        );
        assert!(result.is_none());
    }

    #[test]
    fn uncancelled_token_behaves_like_the_default_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f.py"), "def alpha():\n    pass\n").unwrap();

        let token = CancellationToken::new();
        let result = analyze_project_cancellable(
            AnalyzerConfig::new(tmp.path().to_string_lossy().to_string()),
            Some(token),
        );
        assert!(result.is_some());
    }
}

//! C5: Change Detector. Diffs two fingerprint maps into a change set and
//! keeps a per-project cache across runs, so a caller can re-ingest only
//! what moved. Grounded on
//! `original_source/backend/merkle/change_detector.py`'s `ChangeDetector`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::model::Module;
use crate::features::fingerprint::FingerprintEngine;
use crate::shared::error::{CodegraphError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub added: HashSet<String>,
    pub removed: HashSet<String>,
    pub modified: HashSet<String>,
    pub affected_modules: HashSet<String>,
}

impl ChangeSet {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || !self.modified.is_empty()
    }

    pub fn total_changes(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    pub fn merge(mut self, other: ChangeSet) -> ChangeSet {
        self.added.extend(other.added);
        self.removed.extend(other.removed);
        self.modified.extend(other.modified);
        self.affected_modules.extend(other.affected_modules);
        self
    }
}

/// Diff two `qualified_name -> hash` maps into (added, removed, modified).
pub fn compare_hashes(
    old: &HashMap<String, String>,
    new: &HashMap<String, String>,
) -> (HashSet<String>, HashSet<String>, HashSet<String>) {
    let old_keys: HashSet<&String> = old.keys().collect();
    let new_keys: HashSet<&String> = new.keys().collect();

    let added = new_keys.difference(&old_keys).map(|s| (*s).clone()).collect();
    let removed = old_keys.difference(&new_keys).map(|s| (*s).clone()).collect();
    let modified = old_keys
        .intersection(&new_keys)
        .filter(|k| old.get(**k) != new.get(**k))
        .map(|s| (*s).clone())
        .collect();

    (added, removed, modified)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheSnapshot {
    hashes: HashMap<String, HashMap<String, String>>,
    modules: HashMap<String, Module>,
}

#[derive(Debug, Default)]
pub struct ChangeDetector {
    engine: FingerprintEngine,
    snapshot: CacheSnapshot,
}

impl ChangeDetector {
    pub fn new(engine: FingerprintEngine) -> Self {
        Self { engine, snapshot: CacheSnapshot::default() }
    }

    /// Seed the cache from a batch of already-analyzed modules, as happens
    /// right after an initial full-project analysis.
    pub fn initialize_from_modules(&mut self, modules: &[Module]) {
        for module in modules {
            let hashes = self.engine.hash_tree(module);
            self.snapshot.hashes.insert(module.path.clone(), hashes);
            self.snapshot.modules.insert(module.path.clone(), module.clone());
        }
    }

    pub fn get_module(&self, file_path: &str) -> Option<&Module> {
        self.snapshot.modules.get(file_path)
    }

    pub fn get_all_modules(&self) -> impl Iterator<Item = &Module> {
        self.snapshot.modules.values()
    }

    pub fn get_hash(&self, file_path: &str, qualified_name: &str) -> Option<&String> {
        self.snapshot.hashes.get(file_path).and_then(|m| m.get(qualified_name))
    }

    pub fn clear_cache(&mut self) {
        self.snapshot.hashes.clear();
        self.snapshot.modules.clear();
    }

    pub fn remove_file(&mut self, file_path: &str) {
        self.snapshot.hashes.remove(file_path);
        self.snapshot.modules.remove(file_path);
    }

    /// Diff a single file: `new_module` is `None` when the file no longer
    /// exists on disk.
    pub fn detect_changes(&mut self, file_path: &str, new_module: Option<&Module>) -> ChangeSet {
        let old_hashes = self.snapshot.hashes.get(file_path).cloned().unwrap_or_default();

        let Some(module) = new_module else {
            self.remove_file(file_path);
            let mut set = ChangeSet { removed: old_hashes.keys().cloned().collect(), ..Default::default() };
            if !set.removed.is_empty() {
                set.affected_modules.insert(file_path.to_string());
            }
            return set;
        };

        let new_hashes = self.engine.hash_tree(module);
        let (added, removed, modified) = compare_hashes(&old_hashes, &new_hashes);

        self.snapshot.hashes.insert(file_path.to_string(), new_hashes);
        self.snapshot.modules.insert(file_path.to_string(), module.clone());

        let mut affected_modules = HashSet::new();
        if !added.is_empty() || !removed.is_empty() || !modified.is_empty() {
            affected_modules.insert(file_path.to_string());
        }

        ChangeSet { added, removed, modified, affected_modules }
    }

    /// Diff a batch of files in one pass; the result is order-independent.
    pub fn detect_changes_batch(&mut self, files: &[(String, Option<Module>)]) -> ChangeSet {
        let mut total = ChangeSet::default();
        for (path, module) in files {
            let set = self.detect_changes(path, module.as_ref());
            total = total.merge(set);
        }
        total
    }

    /// Strict dotted-prefixes of `qualified_name`, i.e. every containing
    /// scope an external observer should also consider touched.
    pub fn get_affected_by_change(&self, qualified_name: &str) -> Vec<String> {
        let parts: Vec<&str> = qualified_name.split('.').collect();
        (1..parts.len()).map(|i| parts[..i].join(".")).collect()
    }

    /// Recompute hashes for every module whose cached tree contains any of
    /// `changed_qualified_names` as a key or as a dotted-prefix of a key.
    pub fn propagate_hash_changes(&mut self, changed_qualified_names: &HashSet<String>) -> ChangeSet {
        let mut affected_files = Vec::new();
        for (file_path, hashes) in &self.snapshot.hashes {
            let touched = hashes.keys().any(|k| {
                changed_qualified_names.contains(k)
                    || changed_qualified_names.iter().any(|c| k.starts_with(&format!("{c}.")))
            });
            if touched {
                affected_files.push(file_path.clone());
            }
        }

        let mut total = ChangeSet::default();
        for file_path in affected_files {
            if let Some(module) = self.snapshot.modules.get(&file_path).cloned() {
                total = total.merge(self.detect_changes(&file_path, Some(&module)));
            }
        }
        total
    }

    pub fn get_cache_stats(&self) -> (usize, usize) {
        (self.snapshot.modules.len(), self.snapshot.hashes.values().map(|m| m.len()).sum())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(&self.snapshot)?;
        std::fs::write(path, json).map_err(|e| CodegraphError::io(e.to_string()).with_source(e))
    }

    pub fn load_from_path(engine: FingerprintEngine, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| CodegraphError::io(e.to_string()).with_source(e))?;
        let snapshot: CacheSnapshot = serde_json::from_slice(&bytes)?;
        Ok(Self { engine, snapshot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extractor::extract_module;

    fn module(src: &str) -> Module {
        extract_module("k.py", "k", "", src.as_bytes()).0
    }

    #[test]
    fn delete_a_method_is_removed_and_parent_modified() {
        let mut detector = ChangeDetector::default();
        let before = module("class K:\n    def m1(self):\n        pass\n    def m2(self):\n        pass\n");
        detector.initialize_from_modules(&[before]);

        let after = module("class K:\n    def m1(self):\n        pass\n");
        let changes = detector.detect_changes("k.py", Some(&after));

        assert!(changes.removed.contains("k.K.m2"));
        assert!(changes.modified.contains("k.K"));
        assert!(changes.modified.contains("k"));
    }

    #[test]
    fn deleted_file_removes_every_cached_name() {
        let mut detector = ChangeDetector::default();
        let before = module("def f():\n    pass\n");
        detector.initialize_from_modules(&[before]);

        let changes = detector.detect_changes("k.py", None);
        assert!(changes.removed.contains("k.f"));
        assert!(changes.removed.contains("k"));
        assert!(detector.get_module("k.py").is_none());
    }

    #[test]
    fn no_op_diff_has_no_changes() {
        let mut detector = ChangeDetector::default();
        let m = module("def f():\n    pass\n");
        detector.initialize_from_modules(&[m.clone()]);

        let changes = detector.detect_changes("k.py", Some(&m));
        assert!(!changes.has_changes());
    }

    #[test]
    fn affected_by_change_returns_strict_prefixes() {
        let detector = ChangeDetector::default();
        let affected = detector.get_affected_by_change("pkg.mod.Class.method");
        assert_eq!(affected, vec!["pkg", "pkg.mod", "pkg.mod.Class"]);
    }

    #[test]
    fn cache_round_trips_through_json() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut detector = ChangeDetector::default();
        detector.initialize_from_modules(&[module("def f():\n    pass\n")]);
        detector.save_to_path(tmp.path()).unwrap();

        let restored = ChangeDetector::load_from_path(FingerprintEngine::default(), tmp.path()).unwrap();
        assert_eq!(restored.get_cache_stats(), detector.get_cache_stats());
    }
}

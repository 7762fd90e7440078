//! Integration tests for the invariants named in the analyzer's testable
//! properties: ID determinism, the Contains tree, resolution-as-a-function,
//! diff correctness, and round-trip serialization. Unit tests closer to each
//! component cover the individual component behaviors (decorator ordering,
//! sibling-order insensitivity, etc); these exercise the whole pipeline.

use std::collections::{HashMap, HashSet};
use std::fs;

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use tempfile::TempDir;

use codegraph_skeleton::analyzer::analyze_project;
use codegraph_skeleton::config::AnalyzerConfig;
use codegraph_skeleton::domain::model::{AnalysisResult, RelationshipKind};
use codegraph_skeleton::features::changes::compare_hashes;

fn project_with(files: &[(&str, &str)]) -> (TempDir, AnalysisResult) {
    let tmp = TempDir::new().unwrap();
    for (rel, contents) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
    let config = AnalyzerConfig::new(tmp.path().to_string_lossy().to_string());
    let result = analyze_project(config);
    (tmp, result)
}

fn id_and_qname_sets(result: &AnalysisResult) -> (HashSet<String>, HashSet<String>) {
    let mut ids = HashSet::new();
    let mut qnames = HashSet::new();
    for p in &result.packages {
        ids.insert(p.id.clone());
        qnames.insert(p.qualified_name.clone());
    }
    for m in &result.modules {
        ids.insert(m.id.clone());
        qnames.insert(m.qualified_name());
        for f in &m.functions {
            ids.insert(f.id.clone());
            qnames.insert(f.qualified_name.clone());
        }
        for c in &m.classes {
            collect_class_ids(c, &mut ids, &mut qnames);
        }
    }
    (ids, qnames)
}

fn collect_class_ids(
    c: &codegraph_skeleton::domain::model::Class,
    ids: &mut HashSet<String>,
    qnames: &mut HashSet<String>,
) {
    ids.insert(c.id.clone());
    qnames.insert(c.qualified_name.clone());
    for m in &c.methods {
        ids.insert(m.id.clone());
        qnames.insert(m.qualified_name.clone());
    }
    for n in &c.nested_classes {
        collect_class_ids(n, ids, qnames);
    }
}

const SAMPLE_PROJECT: &[(&str, &str)] = &[
    ("a/__init__.py", "\"\"\"package a\"\"\"\n"),
    ("a/b.py", "import os\n\nclass Base:\n    def run(self):\n        pass\n\nclass Derived(Base):\n    def run(self):\n        self.run()\n"),
    ("a/c.py", "from .b import Derived\n\ndef make():\n    return Derived()\n"),
];

#[test]
fn p1_id_and_qualified_name_sets_are_stable_across_runs() {
    let (_tmp1, r1) = project_with(SAMPLE_PROJECT);
    let (_tmp2, r2) = project_with(SAMPLE_PROJECT);

    assert_eq!(id_and_qname_sets(&r1), id_and_qname_sets(&r2));
}

#[test]
fn p5_contains_edges_form_a_tree() {
    let (_tmp, result) = project_with(SAMPLE_PROJECT);

    let contains: Vec<&codegraph_skeleton::domain::model::Relationship> = result
        .relationships
        .iter()
        .filter(|r| r.kind == RelationshipKind::Contains)
        .collect();

    let mut parent_count: HashMap<&str, usize> = HashMap::new();
    for r in &contains {
        *parent_count.entry(r.target_id.as_str()).or_insert(0) += 1;
    }
    for (target, count) in &parent_count {
        assert_eq!(*count, 1, "node {target} has {count} Contains parents, expected exactly one");
    }

    // No Contains edge may point back at an ancestor of its own source (a
    // simple cycle check: source never appears as a target reachable by
    // walking from itself).
    let edges: HashMap<&str, &str> =
        contains.iter().map(|r| (r.source_id.as_str(), r.target_id.as_str())).collect();
    for r in &contains {
        let mut seen = HashSet::new();
        let mut cur = r.target_id.as_str();
        while let Some(&next) = edges.get(cur) {
            assert!(seen.insert(cur), "cycle detected in Contains graph at {cur}");
            cur = next;
        }
    }
}

#[test]
fn p6_each_call_name_resolves_to_at_most_one_target() {
    let (_tmp, result) = project_with(SAMPLE_PROJECT);

    let mut seen: HashMap<(&str, &str), &str> = HashMap::new();
    for r in result.relationships.iter().filter(|r| r.kind == RelationshipKind::Calls) {
        let call_name = r
            .properties
            .iter()
            .find(|(k, _)| k == "call_name")
            .map(|(_, v)| v.as_str())
            .unwrap_or_default();
        let key = (r.source_id.as_str(), call_name);
        if let Some(prior) = seen.get(&key) {
            assert_eq!(*prior, r.target_id.as_str(), "call {key:?} resolved to two different targets");
        } else {
            seen.insert(key, r.target_id.as_str());
        }
    }
}

#[test]
fn p7_applying_a_change_set_transforms_old_hashes_into_new() {
    let old: HashMap<String, String> =
        [("a".to_string(), "h1".to_string()), ("b".to_string(), "h2".to_string())].into_iter().collect();
    let new: HashMap<String, String> =
        [("b".to_string(), "h2-modified".to_string()), ("c".to_string(), "h3".to_string())]
            .into_iter()
            .collect();

    let (added, removed, modified) = compare_hashes(&old, &new);

    let mut rebuilt = old.clone();
    for k in &removed {
        rebuilt.remove(k);
    }
    for k in &added {
        rebuilt.insert(k.clone(), new[k].clone());
    }
    for k in &modified {
        rebuilt.insert(k.clone(), new[k].clone());
    }

    assert_eq!(rebuilt, new);
}

#[test]
fn analysis_result_round_trips_through_json() {
    let (_tmp, result) = project_with(SAMPLE_PROJECT);

    let json = serde_json::to_string(&result).unwrap();
    let restored: AnalysisResult = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.packages, result.packages);
    assert_eq!(restored.modules, result.modules);
    assert_eq!(restored.relationships, result.relationships);
    assert_eq!(restored.fingerprints, result.fingerprints);
    assert_eq!(restored.errors, result.errors);
}

/// Quickcheck-driven variant of P7: for arbitrary disjoint key/value maps,
/// diff-then-apply always reconstructs the new map exactly.
#[quickcheck]
fn diff_then_apply_reconstructs_new_map(
    shared_keys: Vec<(String, u8, u8)>,
    removed_only: Vec<(String, u8)>,
    added_only: Vec<(String, u8)>,
) -> TestResult {
    if shared_keys.iter().any(|(k, _, _)| k.is_empty())
        || removed_only.iter().any(|(k, _)| k.is_empty())
        || added_only.iter().any(|(k, _)| k.is_empty())
    {
        return TestResult::discard();
    }

    let mut old = HashMap::new();
    let mut new = HashMap::new();
    for (k, old_v, new_v) in &shared_keys {
        old.insert(format!("shared:{k}"), old_v.to_string());
        new.insert(format!("shared:{k}"), new_v.to_string());
    }
    for (k, v) in &removed_only {
        old.insert(format!("removed:{k}"), v.to_string());
    }
    for (k, v) in &added_only {
        new.insert(format!("added:{k}"), v.to_string());
    }

    let (added, removed, modified) = compare_hashes(&old, &new);

    let mut rebuilt = old.clone();
    for k in &removed {
        rebuilt.remove(k);
    }
    for k in added.iter().chain(modified.iter()) {
        rebuilt.insert(k.clone(), new[k].clone());
    }

    TestResult::from_bool(rebuilt == new)
}

//! C4: Fingerprint Engine. Deterministic content hashing over the typed
//! graph, bottom-up, producing the Merkle map the change detector diffs.
//! Grounded on `codegraph-ir/src/features/cache/fingerprint.rs`'s use of
//! `blake3::Hasher` and on
//! `original_source/backend/merkle/hash_calculator.py`'s component
//! composition rules.

use std::collections::HashMap;

use crate::domain::model::{Class, Function, Import, Module, Variable};

/// Controls whether docstrings participate in hash composition.
#[derive(Debug, Clone, Copy)]
pub struct FingerprintEngine {
    pub include_docstrings: bool,
}

impl Default for FingerprintEngine {
    fn default() -> Self {
        Self { include_docstrings: true }
    }
}

fn compute_hash(components: &[String]) -> String {
    let mut hasher = blake3::Hasher::new();
    let mut any = false;
    for c in components {
        if c.is_empty() {
            continue;
        }
        if any {
            hasher.update(&[0u8]);
        }
        hasher.update(c.as_bytes());
        any = true;
    }
    hasher.finalize().to_hex().to_string()
}

impl FingerprintEngine {
    pub fn hash_variable(&self, v: &Variable) -> String {
        compute_hash(&[
            v.name.clone(),
            v.type_hint.clone().unwrap_or_default(),
            v.initial_value.clone().unwrap_or_default(),
        ])
    }

    pub fn hash_import(&self, imp: &Import) -> String {
        let mut names = imp.imported_names.clone();
        names.sort();
        let mut alias_pairs: Vec<String> = imp.aliases.iter().map(|(n, a)| format!("{n}={a}")).collect();
        alias_pairs.sort();
        let relative = if imp.is_relative { format!("relative:{}", imp.relative_level) } else { String::new() };
        compute_hash(&[
            imp.module_name.clone(),
            relative,
            names.join(","),
            alias_pairs.join(","),
        ])
    }

    pub fn hash_function(&self, f: &Function, out: &mut HashMap<String, String>) -> String {
        for v in &f.variables {
            out.entry(v.id.clone()).or_insert_with(|| self.hash_variable(v));
        }

        let params = f.parameters.iter().map(|p| p.render()).collect::<Vec<_>>().join(",");
        let decorators = f.decorators.iter().map(|d| d.written_form()).collect::<Vec<_>>().join(",");
        let mut calls = f.calls.clone();
        calls.sort();
        let mut var_hashes: Vec<String> = f.variables.iter().map(|v| self.hash_variable(v)).collect();
        var_hashes.sort();

        let hash = compute_hash(&[
            f.name.clone(),
            params,
            f.return_type.clone().map(|t| format!("->{t}")).unwrap_or_default(),
            decorators,
            if f.is_async { "async".to_string() } else { String::new() },
            if f.is_generator { "generator".to_string() } else { String::new() },
            if self.include_docstrings { f.docstring.clone().unwrap_or_default() } else { String::new() },
            calls.join(","),
            var_hashes.join(","),
            f.body_hash.clone().unwrap_or_default(),
        ]);
        out.insert(f.qualified_name.clone(), hash.clone());
        hash
    }

    pub fn hash_class(&self, c: &Class, out: &mut HashMap<String, String>) -> String {
        let mut bases = c.bases.clone();
        bases.sort();
        let decorators = c.decorators.iter().map(|d| d.written_form()).collect::<Vec<_>>().join(",");

        let mut method_hashes: Vec<String> = c.methods.iter().map(|m| self.hash_function(m, out)).collect();
        method_hashes.sort();

        let mut class_var_hashes: Vec<String> = c.class_variables.iter().map(|v| self.hash_variable(v)).collect();
        for v in &c.class_variables {
            out.entry(v.id.clone()).or_insert_with(|| self.hash_variable(v));
        }
        class_var_hashes.sort();

        let mut instance_var_hashes: Vec<String> = c.instance_variables.iter().map(|v| self.hash_variable(v)).collect();
        for v in &c.instance_variables {
            out.entry(v.id.clone()).or_insert_with(|| self.hash_variable(v));
        }
        instance_var_hashes.sort();

        let mut nested_hashes: Vec<String> = c.nested_classes.iter().map(|n| self.hash_class(n, out)).collect();
        nested_hashes.sort();

        let hash = compute_hash(&[
            c.name.clone(),
            bases.join(","),
            decorators,
            if self.include_docstrings { c.docstring.clone().unwrap_or_default() } else { String::new() },
            method_hashes.join(","),
            class_var_hashes.join(","),
            instance_var_hashes.join(","),
            nested_hashes.join(","),
        ]);
        out.insert(c.qualified_name.clone(), hash.clone());
        hash
    }

    pub fn hash_module(&self, m: &Module, out: &mut HashMap<String, String>) -> String {
        let mut import_hashes: Vec<String> = m.imports.iter().map(|i| self.hash_import(i)).collect();
        for i in &m.imports {
            out.entry(i.id.clone()).or_insert_with(|| self.hash_import(i));
        }
        import_hashes.sort();

        let mut class_hashes: Vec<String> = m.classes.iter().map(|c| self.hash_class(c, out)).collect();
        class_hashes.sort();

        let mut func_hashes: Vec<String> = m.functions.iter().map(|f| self.hash_function(f, out)).collect();
        func_hashes.sort();

        let mut var_hashes: Vec<String> = m.variables.iter().map(|v| self.hash_variable(v)).collect();
        for v in &m.variables {
            out.entry(v.id.clone()).or_insert_with(|| self.hash_variable(v));
        }
        var_hashes.sort();

        let hash = compute_hash(&[
            m.path.clone(),
            if self.include_docstrings { m.docstring.clone().unwrap_or_default() } else { String::new() },
            import_hashes.join(","),
            class_hashes.join(","),
            func_hashes.join(","),
            var_hashes.join(","),
        ]);
        out.insert(m.qualified_name(), hash.clone());
        hash
    }

    /// `hash_tree` for one module: every descendant plus the module itself.
    /// Classes, functions, variables, and the module are keyed by qualified
    /// name; imports have no qualified name of their own and are keyed by
    /// their hierarchical id instead. The module's own hash depends
    /// transitively on every entry already in the map — the Merkle property.
    pub fn hash_tree(&self, module: &Module) -> HashMap<String, String> {
        let mut out = HashMap::new();
        self.hash_module(module, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extractor::extract_module;

    fn tree(src: &str) -> HashMap<String, String> {
        let (module, _) = extract_module("f.py", "f", "", src.as_bytes());
        FingerprintEngine::default().hash_tree(&module)
    }

    #[test]
    fn sibling_function_reorder_does_not_change_module_hash() {
        let a = tree("def f():\n    pass\n\ndef g():\n    pass\n");
        let b = tree("def g():\n    pass\n\ndef f():\n    pass\n");
        assert_eq!(a.get("f"), b.get("f"));
        assert_eq!(a.get("f.f"), b.get("f.f"));
        assert_eq!(a.get("f.g"), b.get("f.g"));
    }

    #[test]
    fn decorator_reorder_changes_function_and_module_hash() {
        let a = tree("@dec1\n@dec2\ndef f():\n    pass\n");
        let b = tree("@dec2\n@dec1\ndef f():\n    pass\n");
        assert_ne!(a.get("f.f"), b.get("f.f"));
        assert_ne!(a.get("f"), b.get("f"));
    }

    #[test]
    fn changing_a_method_changes_class_and_module_hash() {
        let a = tree("class K:\n    def m(self):\n        return 1\n");
        let b = tree("class K:\n    def m(self):\n        return 2\n");
        assert_ne!(a.get("f.K"), b.get("f.K"));
        assert_ne!(a.get("f"), b.get("f"));
    }

    #[test]
    fn hash_tree_covers_every_import() {
        let t = tree("import os\nimport sys\n");
        assert!(t.contains_key("f.py::import0"));
        assert!(t.contains_key("f.py::import1"));
    }

    #[test]
    fn identical_sources_hash_identically() {
        let src = "class K:\n    def m(self):\n        return 1\n";
        assert_eq!(tree(src), tree(src));
    }
}

//! C3: Resolver. The four-pass driver over a project's file set, grounded on
//! `original_source/backend/parser/project_parser.py`'s `ProjectParser`
//! (`_pass0_packages` .. `_pass3_linker`, `_resolve_symbol`).
//!
//! No pass may read a data product a later pass produces. Pass 2 runs in
//! parallel across files; every other pass is single-threaded over a
//! quiescent symbol table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::AnalyzerConfig;
use crate::domain::model::{
    Class, Function, Module, NodeId, Package, Relationship, RelationshipKind, SymbolKind,
};
use crate::features::extractor::extract_module;
use crate::features::symtab::{ImportEntry, SymbolEntry, SymbolTable};
use crate::shared::cancellation::CancellationToken;
use crate::shared::constants::pipeline::PROGRESS_LOG_INTERVAL;

pub struct ProjectAnalyzer {
    root: PathBuf,
    config: AnalyzerConfig,
    table: SymbolTable,
    package_dir_to_id: HashMap<PathBuf, NodeId>,
    errors: Vec<String>,
    cancel: Option<CancellationToken>,
}

impl ProjectAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let root = PathBuf::from(&config.root);
        Self {
            root,
            config,
            table: SymbolTable::new(),
            package_dir_to_id: HashMap::new(),
            errors: Vec::new(),
            cancel: None,
        }
    }

    /// Check `token` between files in Pass 2 and before each module in Pass
    /// 3 (§5). A cancelled run produces no partial output: `analyze` returns
    /// `None` instead of a half-filled result.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map(|t| t.is_cancelled()).unwrap_or(false)
    }

    pub fn analyze(mut self) -> Option<(Vec<Package>, Vec<Module>, Vec<Relationship>, Vec<String>)> {
        let files = self.discover_files();
        tracing::info!(file_count = files.len(), "pass 0: discovered project files");

        let mut packages = self.pass0_packages(&files);
        tracing::info!(package_count = packages.len(), "pass 0 complete");
        if self.is_cancelled() {
            return None;
        }

        self.pass1_discovery(&files, &mut packages);
        tracing::info!("pass 1 complete");
        if self.is_cancelled() {
            return None;
        }

        let mut modules = self.pass2_local_ast(&files, &packages);
        tracing::info!(module_count = modules.len(), "pass 2 complete");
        if self.is_cancelled() {
            return None;
        }

        let relationships = self.pass3_linker(&packages, &mut modules)?;
        tracing::info!(relationship_count = relationships.len(), "pass 3 complete");

        Some((packages, modules, relationships, self.errors))
    }

    // --- discovery ---------------------------------------------------------

    fn discover_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().map(|e| e == "py").unwrap_or(false))
            .filter(|p| !self.config.should_ignore(&relative_path_string(&self.root, p)))
            .collect();
        files.sort();
        files
    }

    // --- pass 0: package discovery ------------------------------------------

    fn pass0_packages(&mut self, files: &[PathBuf]) -> Vec<Package> {
        let mut package_dirs: std::collections::BTreeSet<PathBuf> = Default::default();
        for f in files {
            if f.file_name().map(|n| n == "__init__.py").unwrap_or(false) {
                let mut dir = f.parent().unwrap_or(&self.root).to_path_buf();
                loop {
                    if dir.join("__init__.py").exists() {
                        package_dirs.insert(dir.clone());
                    }
                    if dir == self.root {
                        break;
                    }
                    match dir.parent() {
                        Some(p) if p.starts_with(&self.root) => dir = p.to_path_buf(),
                        _ => break,
                    }
                }
            }
        }

        let mut dirs: Vec<PathBuf> = package_dirs.into_iter().collect();
        dirs.sort_by_key(|d| d.components().count());

        let mut packages = Vec::with_capacity(dirs.len());
        for dir in &dirs {
            let rel = dir.strip_prefix(&self.root).unwrap_or(dir);
            let rel_str = rel.to_string_lossy().replace('\\', "/");
            let id = if rel_str.is_empty() { ".".to_string() } else { rel_str };
            let name = dir.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
            let qualified_name = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join(".");
            let parent_id = dir.parent().and_then(|p| self.package_dir_to_id.get(p)).cloned();
            let docstring = std::fs::read(dir.join("__init__.py"))
                .ok()
                .and_then(|bytes| extract_module("", "", "", &bytes).0.docstring);

            self.package_dir_to_id.insert(dir.clone(), id.clone());
            self.table.register(SymbolEntry {
                id: id.clone(),
                name: name.clone(),
                kind: SymbolKind::Package,
                file_path: dir.to_string_lossy().to_string(),
                qualified_name: qualified_name.clone(),
                parent_id: parent_id.clone(),
            });
            packages.push(Package {
                id,
                path: rel.to_string_lossy().replace('\\', "/"),
                name,
                qualified_name,
                parent_id,
                docstring,
                child_packages: Vec::new(),
                child_modules: Vec::new(),
            });
        }

        let idx_by_id: HashMap<String, usize> =
            packages.iter().enumerate().map(|(i, p)| (p.id.clone(), i)).collect();
        for i in 0..packages.len() {
            if let Some(pid) = packages[i].parent_id.clone() {
                if let Some(&pi) = idx_by_id.get(&pid) {
                    let child_id = packages[i].id.clone();
                    packages[pi].child_packages.push(child_id);
                }
            }
        }
        packages
    }

    // --- pass 1: module discovery -------------------------------------------

    fn pass1_discovery(&mut self, files: &[PathBuf], packages: &mut [Package]) {
        let idx_by_id: HashMap<String, usize> =
            packages.iter().enumerate().map(|(i, p)| (p.id.clone(), i)).collect();

        for f in files {
            let (file_id, module_name, package_qualified, package_id, is_init) =
                self.module_identity(f, packages, &idx_by_id);

            let module_qname = if package_qualified.is_empty() {
                module_name.clone()
            } else {
                format!("{package_qualified}.{module_name}")
            };

            let entry = SymbolEntry {
                id: file_id.clone(),
                name: module_name,
                kind: SymbolKind::Module,
                file_path: file_id.clone(),
                qualified_name: module_qname,
                parent_id: package_id.clone(),
            };
            // An `__init__` module shares its qualified name with the
            // package it belongs to (registered in Pass 0); the module's id
            // must win so imports resolve to the module, not the package.
            if is_init {
                self.table.register_overriding(entry);
            } else {
                self.table.register(entry);
            }

            if !is_init {
                if let Some(pid) = package_id {
                    if let Some(&pi) = idx_by_id.get(&pid) {
                        packages[pi].child_modules.push(file_id);
                    }
                }
            }
        }
    }

    /// Shared by pass 1 (registration) and pass 2 (extraction): computes the
    /// module's hierarchical id, simple name, and owning package qualified
    /// name, special-casing `__init__.py` to adopt its package's own name
    /// (§4.1's "_path_to_module_name" rule).
    fn module_identity(
        &self,
        file: &Path,
        packages: &[Package],
        idx_by_id: &HashMap<String, usize>,
    ) -> (String, String, String, Option<NodeId>, bool) {
        let rel = file.strip_prefix(&self.root).unwrap_or(file);
        let file_id = rel.to_string_lossy().replace('\\', "/");
        let is_init = file.file_name().map(|n| n == "__init__.py").unwrap_or(false);
        let dir = file.parent().unwrap_or(&self.root);
        let dir_pkg_id = self.package_dir_to_id.get(dir).cloned();

        if is_init {
            let pkg_idx = dir_pkg_id.as_ref().and_then(|id| idx_by_id.get(id)).copied();
            let pkg_name = pkg_idx.map(|i| packages[i].name.clone()).unwrap_or_default();
            let parent_qname = pkg_idx
                .and_then(|i| packages[i].parent_id.clone())
                .and_then(|pid| idx_by_id.get(&pid).copied())
                .map(|pi| packages[pi].qualified_name.clone())
                .unwrap_or_default();
            (file_id, pkg_name, parent_qname, dir_pkg_id, true)
        } else {
            let module_name = rel.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
            let pkg_qname = dir_pkg_id
                .as_ref()
                .and_then(|id| idx_by_id.get(id))
                .map(|&i| packages[i].qualified_name.clone())
                .unwrap_or_default();
            (file_id, module_name, pkg_qname, dir_pkg_id, false)
        }
    }

    // --- pass 2: local ast (parallel) ---------------------------------------

    fn pass2_local_ast(&mut self, files: &[PathBuf], packages: &[Package]) -> Vec<Module> {
        let idx_by_id: HashMap<String, usize> =
            packages.iter().enumerate().map(|(i, p)| (p.id.clone(), i)).collect();

        let inputs: Vec<(String, String, String, PathBuf)> = files
            .iter()
            .map(|f| {
                let (file_id, module_name, package_qualified, _pkg_id, _is_init) =
                    self.module_identity(f, packages, &idx_by_id);
                (file_id, module_name, package_qualified, f.clone())
            })
            .collect();

        let total = inputs.len();
        let extract_all = || -> Vec<(Module, Vec<String>)> {
            inputs
                .par_iter()
                .enumerate()
                .map(|(i, (file_id, module_name, package_qualified, path))| {
                    if i > 0 && i % PROGRESS_LOG_INTERVAL == 0 {
                        tracing::debug!(processed = i, total, "pass 2 progress");
                    }
                    match std::fs::read(path) {
                        Ok(bytes) => extract_module(file_id, module_name, package_qualified, &bytes),
                        Err(e) => {
                            let m = Module {
                                id: file_id.clone(),
                                path: file_id.clone(),
                                name: module_name.clone(),
                                package: package_qualified.clone(),
                                docstring: None,
                                imports: Vec::new(),
                                classes: Vec::new(),
                                functions: Vec::new(),
                                variables: Vec::new(),
                                lines_of_code: 0,
                                fingerprint: None,
                            };
                            (m, vec![format!("{file_id}: read error: {e}")])
                        }
                    }
                })
                .collect()
        };

        // A pinned `thread_count` gets its own scoped pool (§5: the analyzer
        // core does not impose a global pool on its embedder); otherwise Pass
        // 2 runs on rayon's default global pool.
        let results: Vec<(Module, Vec<String>)> = match self.config.thread_count {
            Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => pool.install(extract_all),
                Err(e) => {
                    tracing::warn!(requested = n, error = %e, "failed to build pinned thread pool, using default");
                    extract_all()
                }
            },
            None => extract_all(),
        };

        let mut modules = Vec::with_capacity(results.len());
        for (module, errs) in results {
            self.errors.extend(errs);
            self.register_module_symbols(&module);
            modules.push(module);
        }
        modules
    }

    fn register_module_symbols(&mut self, module: &Module) {
        for imp in &module.imports {
            let resolved = imp.resolved_module.clone().unwrap_or_else(|| imp.module_name.clone());
            if imp.imported_names.is_empty() {
                let alias = imp
                    .aliases
                    .first()
                    .map(|(_, a)| a.clone())
                    .unwrap_or_else(|| imp.module_name.clone());
                self.table.record_import(
                    &module.id,
                    ImportEntry {
                        alias,
                        qualified_name: resolved,
                        target_id: None,
                        imported_names: Vec::new(),
                    },
                );
            } else {
                let alias_map: HashMap<&str, &str> =
                    imp.aliases.iter().map(|(n, a)| (n.as_str(), a.as_str())).collect();
                for name in &imp.imported_names {
                    if name == "*" {
                        continue;
                    }
                    let alias = alias_map.get(name.as_str()).copied().unwrap_or(name.as_str());
                    self.table.record_import(
                        &module.id,
                        ImportEntry {
                            alias: alias.to_string(),
                            qualified_name: format!("{resolved}.{name}"),
                            target_id: None,
                            imported_names: vec![name.clone()],
                        },
                    );
                }
            }
        }

        for func in &module.functions {
            self.register_function(func);
        }
        for var in &module.variables {
            self.register_variable(var);
        }
        for class in &module.classes {
            self.register_class(class);
        }
    }

    fn register_function(&mut self, f: &Function) {
        self.table.register(SymbolEntry {
            id: f.id.clone(),
            name: f.name.clone(),
            kind: SymbolKind::Function,
            file_path: file_path_of(&f.id),
            qualified_name: f.qualified_name.clone(),
            parent_id: None,
        });
    }

    fn register_variable(&mut self, v: &crate::domain::model::Variable) {
        self.table.register(SymbolEntry {
            id: v.id.clone(),
            name: v.name.clone(),
            kind: SymbolKind::Variable,
            file_path: file_path_of(&v.id),
            qualified_name: String::new(),
            parent_id: None,
        });
    }

    fn register_class(&mut self, c: &Class) {
        self.table.register(SymbolEntry {
            id: c.id.clone(),
            name: c.name.clone(),
            kind: SymbolKind::Class,
            file_path: file_path_of(&c.id),
            qualified_name: c.qualified_name.clone(),
            parent_id: None,
        });
        for m in &c.methods {
            self.register_function(m);
        }
        for v in c.class_variables.iter().chain(c.instance_variables.iter()) {
            self.register_variable(v);
        }
        for n in &c.nested_classes {
            self.register_class(n);
        }
    }

    // --- pass 3: linking -----------------------------------------------------

    fn pass3_linker(&self, packages: &[Package], modules: &mut [Module]) -> Option<Vec<Relationship>> {
        let mut rels = Vec::new();
        self.create_package_relationships(packages, &mut rels);
        for module in modules.iter_mut() {
            if self.is_cancelled() {
                return None;
            }
            self.create_contains_relationships(module, &mut rels);
            self.resolve_imports(module, &mut rels);

            let module_id = module.id.clone();
            for func in module.functions.iter_mut() {
                Self::resolve_function_calls(&self.table, &module_id, None, func, &mut rels);
            }
            for class in module.classes.iter_mut() {
                Self::resolve_class(&self.table, &module_id, class, &mut rels);
            }
        }
        Some(rels)
    }

    fn create_package_relationships(&self, packages: &[Package], rels: &mut Vec<Relationship>) {
        for pkg in packages {
            for cp in &pkg.child_packages {
                rels.push(Relationship::new(pkg.id.clone(), cp.clone(), RelationshipKind::Contains));
            }
            for cm in &pkg.child_modules {
                rels.push(Relationship::new(pkg.id.clone(), cm.clone(), RelationshipKind::Contains));
            }
        }
    }

    fn create_contains_relationships(&self, module: &Module, rels: &mut Vec<Relationship>) {
        for class in &module.classes {
            rels.push(Relationship::new(module.id.clone(), class.id.clone(), RelationshipKind::Contains));
            Self::class_contains(class, rels);
        }
        for f in &module.functions {
            rels.push(Relationship::new(module.id.clone(), f.id.clone(), RelationshipKind::Contains));
        }
        for v in &module.variables {
            rels.push(Relationship::new(module.id.clone(), v.id.clone(), RelationshipKind::Defines));
        }
    }

    fn class_contains(class: &Class, rels: &mut Vec<Relationship>) {
        for m in &class.methods {
            rels.push(Relationship::new(class.id.clone(), m.id.clone(), RelationshipKind::Contains));
        }
        for v in class.class_variables.iter().chain(class.instance_variables.iter()) {
            rels.push(Relationship::new(class.id.clone(), v.id.clone(), RelationshipKind::Defines));
        }
        for n in &class.nested_classes {
            rels.push(Relationship::new(class.id.clone(), n.id.clone(), RelationshipKind::Contains));
            Self::class_contains(n, rels);
        }
    }

    fn resolve_imports(&self, module: &Module, rels: &mut Vec<Relationship>) {
        for imp in &module.imports {
            let resolved_mod = imp.resolved_module.clone().unwrap_or_else(|| imp.module_name.clone());
            let Some(target_mod_id) = self.table.id_for_qualified_name(&resolved_mod).cloned() else {
                continue;
            };
            rels.push(
                Relationship::new(module.id.clone(), target_mod_id, RelationshipKind::Imports)
                    .with_property("imported_names", imp.imported_names.join(","))
                    .with_property("is_relative", imp.is_relative.to_string()),
            );
            for name in &imp.imported_names {
                if name == "*" {
                    continue;
                }
                let sym_qname = format!("{resolved_mod}.{name}");
                if let Some(sym_id) = self.table.id_for_qualified_name(&sym_qname).cloned() {
                    rels.push(
                        Relationship::new(module.id.clone(), sym_id, RelationshipKind::Imports)
                            .with_property("symbol_name", name.clone()),
                    );
                }
            }
        }
    }

    fn resolve_function_calls(
        table: &SymbolTable,
        module_id: &str,
        parent_class_name: Option<&str>,
        func: &mut Function,
        rels: &mut Vec<Relationship>,
    ) {
        let imports = table.imports_for(module_id);
        let mut resolved_for_name: HashMap<String, String> = HashMap::new();

        for call_name in &func.calls {
            if let Some(target) = resolve_symbol(table, call_name, module_id, imports, parent_class_name) {
                resolved_for_name.entry(call_name.clone()).or_insert_with(|| target.clone());
                rels.push(
                    Relationship::new(func.id.clone(), target.clone(), RelationshipKind::Calls)
                        .with_property("call_name", call_name.clone()),
                );
                if table.get(&target).map(|s| s.kind) == Some(SymbolKind::Class) {
                    rels.push(Relationship::new(func.id.clone(), target, RelationshipKind::Instantiates));
                }
            }
        }

        for (i, dec) in func.decorators.iter().enumerate() {
            if let Some(target) = resolve_symbol(table, &dec.name, module_id, imports, parent_class_name) {
                rels.push(
                    Relationship::new(func.id.clone(), target, RelationshipKind::Decorates)
                        .with_property("decorator_order", i.to_string()),
                );
            }
        }

        for r in func.references.iter_mut() {
            if let Some(target) = resolved_for_name.get(&r.name) {
                r.resolved_id = Some(target.clone());
            }
        }
    }

    fn resolve_class(table: &SymbolTable, module_id: &str, class: &mut Class, rels: &mut Vec<Relationship>) {
        let imports = table.imports_for(module_id);
        for base in class.bases.clone() {
            if let Some(target) = resolve_symbol(table, &base, module_id, imports, None) {
                class.resolved_bases.push(target.clone());
                rels.push(
                    Relationship::new(class.id.clone(), target, RelationshipKind::Inherits)
                        .with_property("base_name", base),
                );
            }
        }
        for (i, dec) in class.decorators.iter().enumerate() {
            if let Some(target) = resolve_symbol(table, &dec.name, module_id, imports, None) {
                rels.push(
                    Relationship::new(class.id.clone(), target, RelationshipKind::Decorates)
                        .with_property("decorator_order", i.to_string()),
                );
            }
        }
        for method in class.methods.iter_mut() {
            Self::resolve_function_calls(table, module_id, Some(class.name.as_str()), method, rels);
        }
        for nested in class.nested_classes.iter_mut() {
            Self::resolve_class(table, module_id, nested, rels);
        }
    }
}

fn relative_path_string(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().replace('\\', "/")
}

fn file_path_of(id: &str) -> String {
    id.split("::").next().unwrap_or(id).to_string()
}

/// The §4.3 resolution order for a written name `N`.
fn resolve_symbol(
    table: &SymbolTable,
    name: &str,
    file_id: &str,
    imports: Option<&HashMap<String, ImportEntry>>,
    parent_class_name: Option<&str>,
) -> Option<NodeId> {
    if let Some((head, rest)) = name.split_once('.') {
        if head == "self" || head == "cls" {
            if let Some(class_name) = parent_class_name {
                let method = rest.split('.').next().unwrap_or(rest);
                let candidate = format!("{file_id}::{class_name}::{method}");
                if table.get(&candidate).is_some() {
                    return Some(candidate);
                }
            }
        } else if let Some(entry) = imports.and_then(|m| m.get(head)) {
            let full = format!("{}.{}", entry.qualified_name, rest);
            if let Some(id) = table.id_for_qualified_name(&full) {
                return Some(id.clone());
            }
        }
    }

    if let Some(class_name) = parent_class_name {
        let candidate = format!("{file_id}::{class_name}::{name}");
        if table.get(&candidate).is_some() {
            return Some(candidate);
        }
    }

    let candidate = format!("{file_id}::{name}");
    if table.get(&candidate).is_some() {
        return Some(candidate);
    }

    if let Some(entry) = imports.and_then(|m| m.get(name)) {
        if let Some(id) = table.id_for_qualified_name(&entry.qualified_name) {
            return Some(id.clone());
        }
        if let Some(tid) = &entry.target_id {
            return Some(tid.clone());
        }
    }

    table.id_for_qualified_name(name).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn single_file_two_functions() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "f.py", "def alpha():\n    beta()\n\ndef beta():\n    pass\n");

        let config = AnalyzerConfig::new(tmp.path().to_string_lossy().to_string());
        let (_, modules, rels, errors) = ProjectAnalyzer::new(config).analyze().expect("uncancelled analysis always returns Some");

        assert!(errors.is_empty());
        assert_eq!(modules.len(), 1);
        assert!(rels
            .iter()
            .any(|r| r.kind == RelationshipKind::Calls && r.source_id == "f.py::alpha" && r.target_id == "f.py::beta"));
    }

    #[test]
    fn relative_import_emits_imports_edge() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a/__init__.py", "");
        write(tmp.path(), "a/b/__init__.py", "");
        write(tmp.path(), "a/b/m.py", "from .. import c\n");
        write(tmp.path(), "a/c.py", "X = 1\n");

        let config = AnalyzerConfig::new(tmp.path().to_string_lossy().to_string());
        let (_, _, rels, _) = ProjectAnalyzer::new(config).analyze().expect("uncancelled analysis always returns Some");

        assert!(rels
            .iter()
            .any(|r| r.kind == RelationshipKind::Imports && r.source_id == "a/b/m.py" && r.target_id == "a/__init__.py"));
    }

    #[test]
    fn cross_module_inheritance_resolves() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.py", "class B:\n    pass\n");
        write(tmp.path(), "b.py", "import a\n\nclass D(a.B):\n    pass\n");

        let config = AnalyzerConfig::new(tmp.path().to_string_lossy().to_string());
        let (_, _, rels, _) = ProjectAnalyzer::new(config).analyze().expect("uncancelled analysis always returns Some");

        assert!(rels.iter().any(|r| r.kind == RelationshipKind::Inherits
            && r.source_id == "b.py::D"
            && r.target_id == "a.py::B"));
    }

    #[test]
    fn delete_a_method_marks_class_as_changed_scope() {
        // This test only verifies structural Contains wiring; the diff itself
        // is exercised in features::changes's tests.
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "k.py", "class K:\n    def m1(self):\n        pass\n    def m2(self):\n        pass\n");

        let config = AnalyzerConfig::new(tmp.path().to_string_lossy().to_string());
        let (_, modules, rels, _) = ProjectAnalyzer::new(config).analyze().expect("uncancelled analysis always returns Some");

        let class_id = &modules[0].classes[0].id;
        assert!(rels
            .iter()
            .filter(|r| r.kind == RelationshipKind::Contains && &r.source_id == class_id)
            .count()
            >= 2);
    }

    #[test]
    fn cancelling_before_analysis_starts_yields_no_output() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "f.py", "def alpha():\n    pass\n");

        let token = crate::shared::cancellation::CancellationToken::new();
        token.cancel();

        let config = AnalyzerConfig::new(tmp.path().to_string_lossy().to_string());
        let result = ProjectAnalyzer::new(config).with_cancellation(token).analyze();
        assert!(result.is_none());
    }
}

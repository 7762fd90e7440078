//! C2: Symbol Table. A project-wide index mapping hierarchical ids to
//! qualified names and back, plus per-file import-alias tables. Grounded on
//! `original_source/backend/parser/project_parser.py`'s `self.symbols`,
//! `self.qualified_to_id`, and `self.file_imports` fields.
//!
//! Write contract: only the resolver (C3) mutates this. Read contract: C3
//! pass 3, C6, and tests may query freely.

use std::collections::HashMap;

use crate::domain::model::{NodeId, QualifiedName, SymbolKind};
use crate::shared::constants::symtab::{INITIAL_FILE_CAPACITY, INITIAL_SYMBOL_CAPACITY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub id: NodeId,
    pub name: String,
    pub kind: SymbolKind,
    pub file_path: String,
    pub qualified_name: QualifiedName,
    pub parent_id: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub alias: String,
    pub qualified_name: QualifiedName,
    pub target_id: Option<NodeId>,
    pub imported_names: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    pub symbols: HashMap<NodeId, SymbolEntry>,
    pub qualified_to_id: HashMap<QualifiedName, NodeId>,
    /// file id -> (alias -> import entry)
    pub file_imports: HashMap<String, HashMap<String, ImportEntry>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::with_capacity(INITIAL_SYMBOL_CAPACITY),
            qualified_to_id: HashMap::with_capacity(INITIAL_SYMBOL_CAPACITY),
            file_imports: HashMap::with_capacity(INITIAL_FILE_CAPACITY),
        }
    }

    /// Register a symbol. If a qualified name is already taken, the
    /// first-registered entry wins (callers iterate files in sorted order,
    /// which is what makes this deterministic).
    pub fn register(&mut self, entry: SymbolEntry) {
        if !entry.qualified_name.is_empty() {
            self.qualified_to_id
                .entry(entry.qualified_name.clone())
                .or_insert_with(|| entry.id.clone());
        }
        self.symbols.insert(entry.id.clone(), entry);
    }

    /// Register a symbol whose id supersedes whatever currently owns its
    /// qualified name, last-write-wins. Used only for the package/`__init__`
    /// module collision (Pass 1 runs after Pass 0 and the `__init__` module's
    /// id is what callers actually want resolved against, matching
    /// `project_parser.py`'s `qualified_to_id` overwrite for that case).
    pub fn register_overriding(&mut self, entry: SymbolEntry) {
        if !entry.qualified_name.is_empty() {
            self.qualified_to_id.insert(entry.qualified_name.clone(), entry.id.clone());
        }
        self.symbols.insert(entry.id.clone(), entry);
    }

    pub fn get(&self, id: &str) -> Option<&SymbolEntry> {
        self.symbols.get(id)
    }

    pub fn id_for_qualified_name(&self, qname: &str) -> Option<&NodeId> {
        self.qualified_to_id.get(qname)
    }

    pub fn record_import(&mut self, file_id: &str, entry: ImportEntry) {
        self.file_imports
            .entry(file_id.to_string())
            .or_default()
            .insert(entry.alias.clone(), entry);
    }

    pub fn imports_for(&self, file_id: &str) -> Option<&HashMap<String, ImportEntry>> {
        self.file_imports.get(file_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registration_wins_on_qualified_name_collision() {
        let mut table = SymbolTable::new();
        table.register(SymbolEntry {
            id: "a.py::f".into(),
            name: "f".into(),
            kind: SymbolKind::Function,
            file_path: "a.py".into(),
            qualified_name: "pkg.f".into(),
            parent_id: None,
        });
        table.register(SymbolEntry {
            id: "b.py::f".into(),
            name: "f".into(),
            kind: SymbolKind::Function,
            file_path: "b.py".into(),
            qualified_name: "pkg.f".into(),
            parent_id: None,
        });
        assert_eq!(table.id_for_qualified_name("pkg.f"), Some(&"a.py::f".to_string()));
    }

    #[test]
    fn overriding_registration_wins_on_qualified_name_collision() {
        let mut table = SymbolTable::new();
        table.register(SymbolEntry {
            id: "a".into(),
            name: "a".into(),
            kind: SymbolKind::Package,
            file_path: "a".into(),
            qualified_name: "a".into(),
            parent_id: None,
        });
        table.register_overriding(SymbolEntry {
            id: "a/__init__.py".into(),
            name: "a".into(),
            kind: SymbolKind::Module,
            file_path: "a/__init__.py".into(),
            qualified_name: "a".into(),
            parent_id: Some("a".into()),
        });
        assert_eq!(table.id_for_qualified_name("a"), Some(&"a/__init__.py".to_string()));
    }

    #[test]
    fn import_alias_lookup_scoped_per_file() {
        let mut table = SymbolTable::new();
        table.record_import(
            "a.py",
            ImportEntry {
                alias: "np".into(),
                qualified_name: "numpy".into(),
                target_id: None,
                imported_names: vec![],
            },
        );
        assert!(table.imports_for("a.py").unwrap().contains_key("np"));
        assert!(table.imports_for("b.py").is_none());
    }
}

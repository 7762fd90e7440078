//! The typed graph the analyzer produces: packages, modules, classes,
//! functions, variables, imports, and the relationships between them.
//!
//! Every entity is addressed by a hierarchical id of the form
//! `<relative-file-path>(::<scope-name>)*`, distinct from its qualified name
//! (the language-level dotted form). See `generate_id` / `qualified_name`
//! helpers below for how the two are constructed.

use serde::{Deserialize, Serialize};

/// A hierarchical id: `<relative-file-path>[::<scope>]*`.
pub type NodeId = String;

/// The language-level dotted qualified name, e.g. `pkg.util.io.Reader.read`.
pub type QualifiedName = String;

/// Build a hierarchical id by appending scope segments to a file-relative id.
pub fn child_id(parent_id: &str, segment: &str) -> NodeId {
    format!("{parent_id}::{segment}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl SourceLocation {
    pub fn zero() -> Self {
        Self {
            start_line: 0,
            start_column: 0,
            end_line: 0,
            end_column: 0,
            start_byte: 0,
            end_byte: 0,
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableScope {
    Module,
    Class,
    Function,
    Instance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_hint: Option<String>,
    pub default_value: Option<String>,
    pub is_variadic_positional: bool,
    pub is_variadic_keyword: bool,
}

impl Parameter {
    /// Render as `name[:type][=default]` with `*`/`**` prefixes, matching the
    /// order the fingerprint engine expects.
    pub fn render(&self) -> String {
        let prefix = if self.is_variadic_positional {
            "*"
        } else if self.is_variadic_keyword {
            "**"
        } else {
            ""
        };
        let mut s = format!("{prefix}{}", self.name);
        if let Some(t) = &self.type_hint {
            s.push(':');
            s.push_str(t);
        }
        if let Some(d) = &self.default_value {
            s.push('=');
            s.push_str(d);
        }
        s
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decorator {
    pub name: String,
    pub arguments: Vec<String>,
    pub location: SourceLocation,
}

impl Decorator {
    /// Written form used both for display and as a fingerprint component.
    pub fn written_form(&self) -> String {
        if self.arguments.is_empty() {
            self.name.clone()
        } else {
            format!("{}({})", self.name, self.arguments.join(", "))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    Call,
    Read,
    Write,
    Import,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub kind: ReferenceKind,
    pub location: SourceLocation,
    pub containing_id: NodeId,
    /// Populated by Pass 3; empty until then.
    pub resolved_id: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub id: NodeId,
    pub name: String,
    pub scope: VariableScope,
    pub type_hint: Option<String>,
    pub initial_value: Option<String>,
    pub is_constant: bool,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub id: NodeId,
    /// Module name as written in source (e.g. `..util` or `os.path`).
    pub module_name: String,
    /// Resolved absolute module name, if computable without the symbol table
    /// (relative imports are resolved here; cross-file lookups happen in
    /// Pass 3).
    pub resolved_module: Option<String>,
    pub imported_names: Vec<String>,
    /// `imported name -> alias`, only present for aliased imports.
    pub aliases: Vec<(String, String)>,
    pub is_relative: bool,
    pub relative_level: u32,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub id: NodeId,
    pub name: String,
    pub qualified_name: QualifiedName,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub decorators: Vec<Decorator>,
    pub docstring: Option<String>,
    pub is_async: bool,
    pub is_generator: bool,
    pub is_method: bool,
    pub is_classmethod: bool,
    pub is_staticmethod: bool,
    pub is_property: bool,
    pub complexity: u32,
    pub location: SourceLocation,
    pub variables: Vec<Variable>,
    /// Raw call names written in the body, in the order they were seen. Not
    /// deduplicated; callers wanting edge counts should count repeats.
    pub calls: Vec<String>,
    pub references: Vec<Reference>,
    /// Hash of the function body's source bytes; a fingerprint component, not
    /// itself a full content hash of the function.
    pub body_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: NodeId,
    pub name: String,
    pub qualified_name: QualifiedName,
    pub bases: Vec<String>,
    pub resolved_bases: Vec<NodeId>,
    pub decorators: Vec<Decorator>,
    pub docstring: Option<String>,
    pub is_abstract: bool,
    pub methods: Vec<Function>,
    pub class_variables: Vec<Variable>,
    pub instance_variables: Vec<Variable>,
    pub nested_classes: Vec<Class>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: NodeId,
    pub path: String,
    pub name: String,
    /// Qualified name of the owning package, empty string at project root.
    pub package: String,
    pub docstring: Option<String>,
    pub imports: Vec<Import>,
    pub classes: Vec<Class>,
    pub functions: Vec<Function>,
    pub variables: Vec<Variable>,
    pub lines_of_code: u32,
    /// Populated by the fingerprint engine; empty until then.
    pub fingerprint: Option<String>,
}

impl Module {
    pub fn qualified_name(&self) -> QualifiedName {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: NodeId,
    pub path: String,
    pub name: String,
    pub qualified_name: QualifiedName,
    pub parent_id: Option<NodeId>,
    pub docstring: Option<String>,
    pub child_packages: Vec<NodeId>,
    pub child_modules: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipKind {
    Contains,
    Imports,
    Calls,
    Instantiates,
    Inherits,
    Decorates,
    Defines,
    Uses,
    Returns,
    Raises,
    Reads,
    Writes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub kind: RelationshipKind,
    /// String-valued properties (e.g. `call_name`, `base_name`,
    /// `imported_names`, `is_relative`). Kept as strings to stay
    /// store-agnostic; the emitter is responsible for richer typing if its
    /// target store wants it.
    pub properties: Vec<(String, String)>,
}

impl Relationship {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind,
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }
}

/// The closed union of entity kinds the symbol table indexes uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    Package,
    Module,
    Class,
    Function,
    Variable,
    Import,
}

/// Final analyzer output: a pure value, no store side effects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub packages: Vec<Package>,
    pub modules: Vec<Module>,
    pub relationships: Vec<Relationship>,
    /// qualified_name -> hex fingerprint
    pub fingerprints: std::collections::HashMap<String, String>,
    pub errors: Vec<String>,
}

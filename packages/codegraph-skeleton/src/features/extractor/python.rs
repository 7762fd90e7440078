//! Tree-sitter-backed walk of a single Python source file into a `Module`
//! record. Grounded on the reference `TreeSitterParser` (tree-sitter-python
//! based) and the teacher's own direct `tree_sitter_python::language()` usage
//! in `codegraph-ir/src/lib.rs`.

use tree_sitter::Node;

use crate::domain::model::{
    Class, Decorator, Function, Import, Module, Parameter, Reference, ReferenceKind,
    SourceLocation, Variable, VariableScope,
};

const DECISION_KINDS: &[&str] = &[
    "if_statement",
    "elif_clause",
    "for_statement",
    "while_statement",
    "except_clause",
    "with_statement",
    "conditional_expression",
    "assert_statement",
    "boolean_operator",
];

/// Parse `source` (relative path `file_id`, already-resolved module name and
/// owning package qualified name) into a `Module`. Never panics: a parser
/// failure yields a near-empty module plus a human-readable error string.
pub fn extract_module(
    file_id: &str,
    module_name: &str,
    package_qualified: &str,
    source: &[u8],
) -> (Module, Vec<String>) {
    let mut errors = Vec::new();
    let module_qname = if package_qualified.is_empty() {
        module_name.to_string()
    } else {
        format!("{package_qualified}.{module_name}")
    };

    let lines_of_code = source.iter().filter(|&&b| b == b'\n').count() as u32 + 1;

    let mut module = Module {
        id: file_id.to_string(),
        path: file_id.to_string(),
        name: module_name.to_string(),
        package: package_qualified.to_string(),
        docstring: None,
        imports: Vec::new(),
        classes: Vec::new(),
        functions: Vec::new(),
        variables: Vec::new(),
        lines_of_code,
        fingerprint: None,
    };

    let mut parser = tree_sitter::Parser::new();
    if let Err(e) = parser.set_language(&tree_sitter_python::language()) {
        errors.push(format!("{file_id}: failed to load python grammar: {e}"));
        return (module, errors);
    }

    let tree = match parser.parse(source, None) {
        Some(t) => t,
        None => {
            errors.push(format!("{file_id}: parser produced no tree"));
            return (module, errors);
        }
    };

    let root = tree.root_node();
    let mut cursor = root.walk();
    let mut children: Vec<Node> = root.named_children(&mut cursor).collect();

    if let Some(first) = children.first() {
        if first.kind() == "expression_statement" {
            if let Some(inner) = first.named_child(0) {
                if inner.kind() == "string" {
                    module.docstring = Some(clean_docstring(text(inner, source)));
                    children.remove(0);
                }
            }
        }
    }

    for child in children {
        match child.kind() {
            "import_statement" => module.imports.extend(parse_import_statement(child, source)),
            "import_from_statement" => {
                if let Some(imp) = parse_import_from_statement(child, source, package_qualified) {
                    module.imports.push(imp);
                }
            }
            "class_definition" => {
                module
                    .classes
                    .push(build_class(child, &[], source, file_id, &module_qname, Vec::new()));
            }
            "function_definition" => {
                module.functions.push(build_function(
                    child,
                    &[],
                    source,
                    file_id,
                    &module_qname,
                    Vec::new(),
                    false,
                ));
            }
            "decorated_definition" => {
                let decorators = collect_decorators(child, source);
                if let Some(inner) = trailing_definition(child) {
                    match inner.kind() {
                        "class_definition" => module.classes.push(build_class(
                            inner,
                            &[],
                            source,
                            file_id,
                            &module_qname,
                            decorators,
                        )),
                        "function_definition" => module.functions.push(build_function(
                            inner,
                            &[],
                            source,
                            file_id,
                            &module_qname,
                            decorators,
                            false,
                        )),
                        _ => {}
                    }
                }
            }
            "expression_statement" => {
                module.variables.extend(parse_module_variables(child, source, file_id));
            }
            "ERROR" => {
                errors.push(format!("{file_id}: syntax error near byte {}", child.start_byte()));
            }
            _ => {}
        }
    }

    for (idx, imp) in module.imports.iter_mut().enumerate() {
        imp.id = crate::domain::model::child_id(file_id, &format!("import{idx}"));
    }

    (module, errors)
}

fn text<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or_default()
}

fn loc(node: Node) -> SourceLocation {
    let start = node.start_position();
    let end = node.end_position();
    SourceLocation {
        start_line: start.row as u32 + 1,
        start_column: start.column as u32,
        end_line: end.row as u32 + 1,
        end_column: end.column as u32,
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
    }
}

fn clean_docstring(raw: &str) -> String {
    let mut s = raw.trim();
    while let Some(stripped) = s
        .strip_prefix('r')
        .or_else(|| s.strip_prefix('R'))
        .or_else(|| s.strip_prefix('u'))
        .or_else(|| s.strip_prefix('U'))
        .or_else(|| s.strip_prefix('b'))
        .or_else(|| s.strip_prefix('B'))
    {
        s = stripped;
    }
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if let Some(inner) = s.strip_prefix(quote) {
            if let Some(inner) = inner.strip_suffix(quote) {
                return inner.trim().to_string();
            }
        }
    }
    s.trim().to_string()
}

fn trailing_definition(decorated: Node) -> Option<Node> {
    let mut cursor = decorated.walk();
    decorated
        .named_children(&mut cursor)
        .find(|c| c.kind() == "function_definition" || c.kind() == "class_definition")
}

fn collect_decorators(decorated: Node, src: &[u8]) -> Vec<Decorator> {
    let mut cursor = decorated.walk();
    decorated
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "decorator")
        .map(|d| parse_decorator(d, src))
        .collect()
}

fn parse_decorator(node: Node, src: &[u8]) -> Decorator {
    let location = loc(node);
    let expr = node.named_child(0);
    let (name, arguments) = match expr {
        Some(e) if e.kind() == "call" => {
            let func = e.child_by_field_name("function").map(|f| text(f, src).to_string()).unwrap_or_default();
            let args = e
                .child_by_field_name("arguments")
                .map(|al| {
                    let mut c = al.walk();
                    al.named_children(&mut c).map(|a| text(a, src).to_string()).collect()
                })
                .unwrap_or_default();
            (func, args)
        }
        Some(e) => (text(e, src).to_string(), Vec::new()),
        None => (text(node, src).trim_start_matches('@').to_string(), Vec::new()),
    };
    Decorator { name, arguments, location }
}

// --- imports -----------------------------------------------------------

fn parse_import_statement(node: Node, src: &[u8]) -> Vec<Import> {
    let location = loc(node);
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter_map(|child| match child.kind() {
            "dotted_name" => {
                let module_name = text(child, src).to_string();
                Some(Import {
                    id: String::new(),
                    module_name: module_name.clone(),
                    resolved_module: Some(module_name),
                    imported_names: Vec::new(),
                    aliases: Vec::new(),
                    is_relative: false,
                    relative_level: 0,
                    location,
                })
            }
            "aliased_import" => {
                let name_node = child.child_by_field_name("name")?;
                let alias_node = child.child_by_field_name("alias")?;
                let module_name = text(name_node, src).to_string();
                let alias = text(alias_node, src).to_string();
                Some(Import {
                    id: String::new(),
                    module_name: module_name.clone(),
                    resolved_module: Some(module_name.clone()),
                    imported_names: Vec::new(),
                    aliases: vec![(module_name, alias)],
                    is_relative: false,
                    relative_level: 0,
                    location,
                })
            }
            _ => None,
        })
        .collect()
}

fn parse_module_name(node: Node, src: &[u8]) -> (bool, u32, String) {
    match node.kind() {
        "relative_import" => {
            let mut level = 0u32;
            let mut module_text = String::new();
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "import_prefix" => level = text(child, src).chars().filter(|c| *c == '.').count() as u32,
                    "dotted_name" => module_text = text(child, src).to_string(),
                    _ => {}
                }
            }
            (true, level.max(1), module_text)
        }
        _ => (false, 0, text(node, src).to_string()),
    }
}

fn resolve_relative(current_package: &str, module_text: &str, level: u32) -> String {
    if level == 0 {
        return module_text.to_string();
    }
    let mut parts: Vec<&str> = if current_package.is_empty() {
        Vec::new()
    } else {
        current_package.split('.').collect()
    };
    let drop = (level - 1) as usize;
    if drop <= parts.len() {
        parts.truncate(parts.len() - drop);
    } else {
        parts.clear();
    }
    let mut base = parts.join(".");
    if !module_text.is_empty() {
        if base.is_empty() {
            base = module_text.to_string();
        } else {
            base.push('.');
            base.push_str(module_text);
        }
    }
    base
}

fn parse_import_from_statement(node: Node, src: &[u8], package_qualified: &str) -> Option<Import> {
    let location = loc(node);
    let module_node = node.child_by_field_name("module_name")?;
    let (is_relative, relative_level, module_text) = parse_module_name(module_node, src);
    let resolved = if is_relative {
        resolve_relative(package_qualified, &module_text, relative_level)
    } else {
        module_text.clone()
    };

    let mut imported_names = Vec::new();
    let mut aliases = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "wildcard_import" => imported_names.push("*".to_string()),
            "dotted_name" | "identifier" => {
                if child.id() != module_node.id() {
                    imported_names.push(text(child, src).to_string());
                }
            }
            "aliased_import" => {
                if let (Some(name_node), Some(alias_node)) =
                    (child.child_by_field_name("name"), child.child_by_field_name("alias"))
                {
                    let imported = text(name_node, src).to_string();
                    let alias = text(alias_node, src).to_string();
                    imported_names.push(imported.clone());
                    aliases.push((imported, alias));
                }
            }
            _ => {}
        }
    }

    Some(Import {
        id: String::new(),
        module_name: module_text,
        resolved_module: Some(resolved),
        imported_names,
        aliases,
        is_relative,
        relative_level,
        location,
    })
}

// --- variables -----------------------------------------------------------

fn is_constant_name(name: &str) -> bool {
    name.chars().any(|c| c.is_alphabetic()) && name.chars().all(|c| !c.is_lowercase())
}

/// `scope_id` is the hierarchical id of the enclosing module/class/function;
/// each produced variable's id is `scope_id::name`, per §4.1's "variables use
/// the same pattern with their owning scope's id" rule.
fn parse_assignment(assign: Node, src: &[u8], scope: VariableScope, scope_id: &str) -> Vec<Variable> {
    let Some(left) = assign.child_by_field_name("left") else {
        return Vec::new();
    };
    let type_hint = assign.child_by_field_name("type").map(|n| text(n, src).to_string());
    let initial_value = assign.child_by_field_name("right").map(|n| text(n, src).to_string());
    let location = loc(assign);

    let names: Vec<Node> = match left.kind() {
        "identifier" => vec![left],
        "pattern_list" | "tuple_pattern" | "expression_list" => {
            let mut c = left.walk();
            left.named_children(&mut c).filter(|n| n.kind() == "identifier").collect()
        }
        _ => Vec::new(),
    };

    names
        .into_iter()
        .map(|n| {
            let name = text(n, src).to_string();
            let id = crate::domain::model::child_id(scope_id, &name);
            Variable {
                id,
                is_constant: is_constant_name(&name),
                name,
                scope,
                type_hint: type_hint.clone(),
                initial_value: initial_value.clone(),
                location,
            }
        })
        .collect()
}

fn parse_module_variables(expr_stmt: Node, src: &[u8], file_id: &str) -> Vec<Variable> {
    let Some(inner) = expr_stmt.named_child(0) else {
        return Vec::new();
    };
    if inner.kind() != "assignment" {
        return Vec::new();
    }
    parse_assignment(inner, src, VariableScope::Module, file_id)
}

// --- scoped walk (excludes nested function/class bodies) -----------------

fn walk_scope<'a>(node: Node<'a>, f: &mut impl FnMut(Node<'a>)) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "function_definition" || child.kind() == "class_definition" {
            continue;
        }
        f(child);
        walk_scope(child, f);
    }
}

fn calculate_complexity(body: Node) -> u32 {
    let mut count = 1u32;
    walk_scope(body, &mut |n| {
        if DECISION_KINDS.contains(&n.kind()) {
            count += 1;
        }
    });
    count
}

fn has_yield(body: Node) -> bool {
    let mut found = false;
    walk_scope(body, &mut |n| {
        if n.kind() == "yield" {
            found = true;
        }
    });
    found
}

fn call_name(call: Node, src: &[u8]) -> Option<String> {
    let func = call.child_by_field_name("function")?;
    match func.kind() {
        "identifier" | "attribute" => Some(text(func, src).to_string()),
        _ => None,
    }
}

fn collect_calls(body: Node, src: &[u8], containing_id: &str) -> (Vec<String>, Vec<Reference>) {
    let mut names = Vec::new();
    let mut refs = Vec::new();
    walk_scope(body, &mut |n| {
        if n.kind() == "call" {
            if let Some(name) = call_name(n, src) {
                refs.push(Reference {
                    name: name.clone(),
                    kind: ReferenceKind::Call,
                    location: loc(n),
                    containing_id: containing_id.to_string(),
                    resolved_id: None,
                });
                names.push(name);
            }
        }
    });
    (names, refs)
}

fn collect_local_variables(body: Node, src: &[u8], function_id: &str) -> Vec<Variable> {
    let mut out = Vec::new();
    walk_scope(body, &mut |n| {
        if n.kind() == "assignment" {
            out.extend(parse_assignment(n, src, VariableScope::Function, function_id));
        }
    });
    out
}

fn collect_instance_variables(body: Node, src: &[u8], class_id: &str) -> Vec<Variable> {
    let mut out = Vec::new();
    walk_scope(body, &mut |n| {
        if n.kind() == "assignment" {
            if let Some(left) = n.child_by_field_name("left") {
                if left.kind() == "attribute" {
                    if let (Some(obj), Some(attr)) =
                        (left.child_by_field_name("object"), left.child_by_field_name("attribute"))
                    {
                        if text(obj, src) == "self" {
                            let name = text(attr, src).to_string();
                            let id = crate::domain::model::child_id(class_id, &name);
                            out.push(Variable {
                                id,
                                is_constant: is_constant_name(&name),
                                name,
                                scope: VariableScope::Instance,
                                type_hint: None,
                                initial_value: n.child_by_field_name("right").map(|r| text(r, src).to_string()),
                                location: loc(n),
                            });
                        }
                    }
                }
            }
        }
    });
    out
}

fn block_docstring(block: Node, src: &[u8]) -> Option<String> {
    let mut cursor = block.walk();
    let first = block.named_children(&mut cursor).next()?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let inner = first.named_child(0)?;
    if inner.kind() == "string" {
        Some(clean_docstring(text(inner, src)))
    } else {
        None
    }
}

// --- parameters ------------------------------------------------------------

fn parse_parameter(node: Node, src: &[u8]) -> Option<Parameter> {
    let (is_pos, is_kw) = match node.kind() {
        "list_splat_pattern" => (true, false),
        "dictionary_splat_pattern" => (false, true),
        "identifier" | "default_parameter" | "typed_parameter" | "typed_default_parameter" => (false, false),
        _ => return None,
    };

    let name_node = node
        .child_by_field_name("name")
        .or(if node.kind() == "identifier" { Some(node) } else { node.named_child(0) })?;
    let name = text(name_node, src).to_string();
    let type_hint = node.child_by_field_name("type").map(|n| text(n, src).to_string());
    let default_value = node.child_by_field_name("value").map(|n| text(n, src).to_string());

    Some(Parameter {
        name,
        type_hint,
        default_value,
        is_variadic_positional: is_pos,
        is_variadic_keyword: is_kw,
    })
}

fn parse_parameters(params_node: Node, src: &[u8]) -> Vec<Parameter> {
    let mut cursor = params_node.walk();
    params_node
        .named_children(&mut cursor)
        .filter_map(|p| parse_parameter(p, src))
        .collect()
}

// --- functions / classes ---------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn build_function(
    node: Node,
    scope_path: &[String],
    src: &[u8],
    file_id: &str,
    module_qname: &str,
    decorators: Vec<Decorator>,
    is_method: bool,
) -> Function {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, src).to_string())
        .unwrap_or_default();

    let id = {
        let mut full = file_id.to_string();
        for seg in scope_path {
            full.push_str("::");
            full.push_str(seg);
        }
        full.push_str("::");
        full.push_str(&name);
        full
    };
    let qualified_name = if scope_path.is_empty() {
        format!("{module_qname}.{name}")
    } else {
        format!("{module_qname}.{}.{name}", scope_path.join("."))
    };

    let is_async = node
        .child(0)
        .map(|c| c.kind() == "async")
        .unwrap_or(false);

    let parameters = node
        .child_by_field_name("parameters")
        .map(|p| parse_parameters(p, src))
        .unwrap_or_default();
    let return_type = node.child_by_field_name("return_type").map(|n| text(n, src).to_string());

    let is_classmethod = decorators.iter().any(|d| d.name == "classmethod");
    let is_staticmethod = decorators.iter().any(|d| d.name == "staticmethod");
    let is_property = decorators.iter().any(|d| d.name == "property");

    let body = node.child_by_field_name("body");
    let (complexity, docstring, is_generator, calls, references, variables, body_hash) = if let Some(body) = body {
        let docstring = block_docstring(body, src);
        let (calls, references) = collect_calls(body, src, &id);
        (
            calculate_complexity(body),
            docstring,
            has_yield(body),
            calls,
            references,
            collect_local_variables(body, src, &id),
            Some(blake3::hash(&src[body.start_byte()..body.end_byte()]).to_hex().to_string()),
        )
    } else {
        (1, None, false, Vec::new(), Vec::new(), Vec::new(), None)
    };

    Function {
        id,
        name,
        qualified_name,
        parameters,
        return_type,
        decorators,
        docstring,
        is_async,
        is_generator,
        is_method,
        is_classmethod,
        is_staticmethod,
        is_property,
        complexity,
        location: loc(node),
        variables,
        calls,
        references,
        body_hash,
    }
}

fn build_class(
    node: Node,
    scope_path: &[String],
    src: &[u8],
    file_id: &str,
    module_qname: &str,
    decorators: Vec<Decorator>,
) -> Class {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, src).to_string())
        .unwrap_or_default();

    let id = {
        let mut full = file_id.to_string();
        for seg in scope_path {
            full.push_str("::");
            full.push_str(seg);
        }
        full.push_str("::");
        full.push_str(&name);
        full
    };
    let qualified_name = if scope_path.is_empty() {
        format!("{module_qname}.{name}")
    } else {
        format!("{module_qname}.{}.{name}", scope_path.join("."))
    };

    let bases: Vec<String> = node
        .child_by_field_name("superclasses")
        .map(|args| {
            let mut c = args.walk();
            args.named_children(&mut c)
                .filter(|n| n.kind() != "keyword_argument")
                .map(|n| text(n, src).to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut inner_scope = scope_path.to_vec();
    inner_scope.push(name.clone());

    let mut methods = Vec::new();
    let mut class_variables = Vec::new();
    let mut instance_variables = Vec::new();
    let mut nested_classes = Vec::new();
    let mut docstring = None;

    if let Some(body) = node.child_by_field_name("body") {
        docstring = block_docstring(body, src);
        let mut cursor = body.walk();
        let mut children: Vec<Node> = body.named_children(&mut cursor).collect();
        if docstring.is_some() && !children.is_empty() {
            children.remove(0);
        }

        for child in children {
            match child.kind() {
                "function_definition" => {
                    let is_init = child
                        .child_by_field_name("name")
                        .map(|n| text(n, src) == "__init__")
                        .unwrap_or(false);
                    let func = build_function(child, &inner_scope, src, file_id, module_qname, Vec::new(), true);
                    if is_init {
                        if let Some(fbody) = child.child_by_field_name("body") {
                            instance_variables.extend(collect_instance_variables(fbody, src, &id));
                        }
                    }
                    methods.push(func);
                }
                "class_definition" => nested_classes.push(build_class(
                    child,
                    &inner_scope,
                    src,
                    file_id,
                    module_qname,
                    Vec::new(),
                )),
                "decorated_definition" => {
                    let decs = collect_decorators(child, src);
                    if let Some(inner) = trailing_definition(child) {
                        match inner.kind() {
                            "function_definition" => {
                                let is_init = inner
                                    .child_by_field_name("name")
                                    .map(|n| text(n, src) == "__init__")
                                    .unwrap_or(false);
                                let func =
                                    build_function(inner, &inner_scope, src, file_id, module_qname, decs, true);
                                if is_init {
                                    if let Some(fbody) = inner.child_by_field_name("body") {
                                        instance_variables.extend(collect_instance_variables(fbody, src, &id));
                                    }
                                }
                                methods.push(func);
                            }
                            "class_definition" => nested_classes.push(build_class(
                                inner,
                                &inner_scope,
                                src,
                                file_id,
                                module_qname,
                                decs,
                            )),
                            _ => {}
                        }
                    }
                }
                "expression_statement" => {
                    if let Some(inner) = child.named_child(0) {
                        if inner.kind() == "assignment" {
                            class_variables.extend(parse_assignment(inner, src, VariableScope::Class, &id));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let is_abstract = bases.iter().any(|b| b.contains("ABC"))
        || methods
            .iter()
            .any(|m| m.decorators.iter().any(|d| d.name.contains("abstractmethod")));

    Class {
        id,
        name,
        qualified_name,
        bases,
        resolved_bases: Vec::new(),
        decorators,
        docstring,
        is_abstract,
        methods,
        class_variables,
        instance_variables,
        nested_classes,
        location: loc(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(src: &str) -> Module {
        extract_module("f.py", "f", "", src.as_bytes()).0
    }

    #[test]
    fn extracts_two_functions_with_a_call() {
        let module = extract("def alpha():\n    beta()\n\ndef beta():\n    pass\n");
        assert_eq!(module.functions.len(), 2);
        assert_eq!(module.functions[0].id, "f.py::alpha");
        assert_eq!(module.functions[0].calls, vec!["beta".to_string()]);
    }

    #[test]
    fn module_docstring_is_extracted() {
        let module = extract("\"\"\"hello module\"\"\"\n\ndef f():\n    pass\n");
        assert_eq!(module.docstring.as_deref(), Some("hello module"));
    }

    #[test]
    fn class_with_init_yields_instance_variables() {
        let module = extract("class K:\n    def __init__(self):\n        self.x = 1\n        self.y = 2\n");
        let k = &module.classes[0];
        assert_eq!(k.instance_variables.len(), 2);
        assert!(k.instance_variables.iter().any(|v| v.name == "x" && v.id == "f.py::K::x"));
    }

    #[test]
    fn module_variable_id_is_scoped_under_the_file() {
        let module = extract("X = 1\n");
        assert_eq!(module.variables[0].id, "f.py::X");
    }

    #[test]
    fn tuple_unpacking_assignment_keeps_every_name() {
        let module = extract("a, b = 1, 2\n");
        let names: Vec<&str> = module.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(module.variables[1].id, "f.py::b");
    }

    #[test]
    fn decorator_order_is_preserved() {
        let module = extract("@dec1\n@dec2\ndef f():\n    pass\n");
        let f = &module.functions[0];
        assert_eq!(f.decorators[0].name, "dec1");
        assert_eq!(f.decorators[1].name, "dec2");
    }

    #[test]
    fn complexity_counts_decision_points_and_skips_nested_defs() {
        let module = extract(
            "def f(x):\n    if x:\n        return 1\n    def inner():\n        if x:\n            pass\n    return 0\n",
        );
        // one `if` at top level counted; nested `inner`'s `if` excluded
        assert_eq!(module.functions[0].complexity, 2);
    }

    #[test]
    fn relative_import_resolves_against_package() {
        let module = extract_module("a/b/m.py", "m", "a.b", b"from .. import c\n").0;
        assert_eq!(module.imports[0].resolved_module.as_deref(), Some("a"));
    }

    #[test]
    fn each_import_gets_a_distinct_id() {
        let module = extract("import os\nimport sys\n");
        assert_eq!(module.imports[0].id, "f.py::import0");
        assert_eq!(module.imports[1].id, "f.py::import1");
        assert_ne!(module.imports[0].id, module.imports[1].id);
    }

    #[test]
    fn self_and_cls_parameters_are_retained() {
        let module = extract("class K:\n    def m(self, x):\n        pass\n");
        let m = &module.classes[0].methods[0];
        assert_eq!(m.parameters.len(), 2);
        assert_eq!(m.parameters[0].name, "self");
        assert_eq!(m.parameters[1].name, "x");
    }

    #[test]
    fn sibling_functions_do_not_affect_each_others_ids() {
        let module = extract("def a():\n    pass\ndef b():\n    pass\n");
        assert_eq!(module.functions[0].id, "f.py::a");
        assert_eq!(module.functions[1].id, "f.py::b");
    }
}

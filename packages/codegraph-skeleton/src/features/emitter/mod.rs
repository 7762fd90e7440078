//! C6: Emitter. Turns the resolved graph into an ordered, idempotent
//! sequence of upsert operations for an external graph store. Store-agnostic:
//! produces a `Vec<UpsertOp>` and optionally drives a `GraphStore` port
//! (`domain::ports`), mirroring the teacher's hexagonal port pattern instead
//! of depending on any concrete store.
//!
//! Ordering (§4.6/§6): all node upserts for packages, then modules, then
//! classes, then functions, then variables; only after that do structural
//! edges (Contains/Defines) run, followed by every other relationship kind.
//! A relationship may therefore only ever reference an id upserted earlier in
//! the stream, or already present in the store.

use crate::domain::model::{
    AnalysisResult, Class, Function, Module, Package, Relationship, RelationshipKind, Variable,
};
use crate::domain::ports::GraphStore;
use crate::shared::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOp {
    UpsertPackage(Package),
    UpsertModule(Module),
    UpsertClass(Class),
    UpsertFunction(Function),
    UpsertVariable(Variable),
    UpsertRelationship(Relationship),
}

fn is_structural(kind: RelationshipKind) -> bool {
    matches!(kind, RelationshipKind::Contains | RelationshipKind::Defines)
}

fn collect_classes<'a>(class: &'a Class, out: &mut Vec<&'a Class>) {
    out.push(class);
    for nested in &class.nested_classes {
        collect_classes(nested, out);
    }
}

fn collect_functions<'a>(class: &'a Class, out: &mut Vec<&'a Function>) {
    out.extend(class.methods.iter());
    for nested in &class.nested_classes {
        collect_functions(nested, out);
    }
}

fn collect_variables<'a>(class: &'a Class, out: &mut Vec<&'a Variable>) {
    out.extend(class.class_variables.iter());
    out.extend(class.instance_variables.iter());
    for nested in &class.nested_classes {
        collect_variables(nested, out);
    }
}

/// Order the result per §4.6: package upserts, then module upserts, then
/// every class (including nested), then every function (including methods),
/// then every variable (module/class/instance), then structural edges
/// (Contains/Defines), then every other relationship kind.
pub fn build_upserts(result: &AnalysisResult) -> Vec<UpsertOp> {
    let mut ops = Vec::with_capacity(result.packages.len() + result.relationships.len());

    for package in &result.packages {
        ops.push(UpsertOp::UpsertPackage(package.clone()));
    }
    for module in &result.modules {
        ops.push(UpsertOp::UpsertModule(module.clone()));
    }

    let mut classes = Vec::new();
    for module in &result.modules {
        for class in &module.classes {
            collect_classes(class, &mut classes);
        }
    }
    for class in &classes {
        ops.push(UpsertOp::UpsertClass((*class).clone()));
    }

    let mut functions = Vec::new();
    for module in &result.modules {
        functions.extend(module.functions.iter());
    }
    for class in &classes {
        collect_functions(class, &mut functions);
    }
    for f in &functions {
        ops.push(UpsertOp::UpsertFunction((*f).clone()));
    }

    let mut variables = Vec::new();
    for module in &result.modules {
        variables.extend(module.variables.iter());
    }
    for class in &classes {
        collect_variables(class, &mut variables);
    }
    for v in &variables {
        ops.push(UpsertOp::UpsertVariable((*v).clone()));
    }

    let (structural, rest): (Vec<_>, Vec<_>) =
        result.relationships.iter().cloned().partition(|r| is_structural(r.kind));
    for r in structural {
        ops.push(UpsertOp::UpsertRelationship(r));
    }
    for r in rest {
        ops.push(UpsertOp::UpsertRelationship(r));
    }

    ops
}

/// Drive `store` with the ordered upsert stream, then persist the
/// fingerprint map. `store` is the only place this crate ever touches an
/// external system. The store's own node representation is whatever its
/// adapter derives from `Package`/`Module`/`Class`/`Function`/`Variable`; this
/// crate's `GraphStore` port only models the relationship/fingerprint
/// surface, so node ops are for callers who want the explicit ordering
/// without writing their own `AnalysisResult` walk.
pub fn emit(store: &dyn GraphStore, result: &AnalysisResult) -> Result<Vec<UpsertOp>> {
    let ops = build_upserts(result);
    let relationships: Vec<Relationship> = ops
        .iter()
        .filter_map(|op| match op {
            UpsertOp::UpsertRelationship(r) => Some(r.clone()),
            _ => None,
        })
        .collect();
    store.upsert_relationships(&relationships)?;
    store.upsert_fingerprints(&result.fingerprints)?;
    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AnalysisResult;
    use crate::domain::ports::NullGraphStore;
    use crate::features::extractor::extract_module;

    #[test]
    fn structural_edges_precede_non_structural_ones() {
        let mut result = AnalysisResult::default();
        result.relationships.push(Relationship::new("a", "b", RelationshipKind::Calls));
        result.relationships.push(Relationship::new("a", "b", RelationshipKind::Contains));

        let ops = build_upserts(&result);
        let kinds: Vec<RelationshipKind> = ops
            .iter()
            .filter_map(|op| match op {
                UpsertOp::UpsertRelationship(r) => Some(r.kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![RelationshipKind::Contains, RelationshipKind::Calls]);
    }

    #[test]
    fn node_ops_precede_every_relationship_op() {
        let (module, _) = extract_module("f.py", "f", "", b"class K:\n    def m(self):\n        pass\n");
        let class_id = module.classes[0].id.clone();
        let method_id = module.classes[0].methods[0].id.clone();

        let mut result = AnalysisResult::default();
        result
            .relationships
            .push(Relationship::new(module.id.clone(), class_id.clone(), RelationshipKind::Contains));
        result.relationships.push(Relationship::new(class_id, method_id, RelationshipKind::Contains));
        result.modules.push(module);

        let ops = build_upserts(&result);
        let last_node_idx = ops
            .iter()
            .rposition(|op| !matches!(op, UpsertOp::UpsertRelationship(_)))
            .unwrap();
        let first_rel_idx = ops.iter().position(|op| matches!(op, UpsertOp::UpsertRelationship(_))).unwrap();
        assert!(last_node_idx < first_rel_idx);
    }

    #[test]
    fn emit_drives_null_store_without_error() {
        let result = AnalysisResult::default();
        assert!(emit(&NullGraphStore, &result).is_ok());
    }
}

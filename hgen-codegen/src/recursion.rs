//! Aliases and externals that refer back to themselves.
//!
//! `Tree = List<Tree>` is a legal schema, but neither a Rust `type` item
//! nor a TypeScript `Record<..>` alias may mention itself. Emitters ask
//! here which declarations need a recursion-safe rendering.

use std::collections::HashSet;

use hgen_ir::{ModelDecl, Schema, TypeNode};

/// Inner type of an alias or external, `None` for structs and enums.
fn alias_body(model: &ModelDecl) -> Option<&TypeNode> {
    match model {
        ModelDecl::Alias(alias) => Some(&alias.inner),
        ModelDecl::External(external) => Some(&external.representation),
        ModelDecl::Struct(_) | ModelDecl::Enum(_) => None,
    }
}

/// Whether the alias or external `name` reaches itself again without
/// passing through a struct or enum.
pub fn is_recursive_alias(schema: &Schema, name: &str) -> bool {
    let Some(body) = schema.model(name).and_then(alias_body) else {
        return false;
    };

    let mut seen = HashSet::new();
    let mut pending: Vec<&TypeNode> = vec![body];
    while let Some(node) = pending.pop() {
        for target in node.references() {
            if target == name {
                return true;
            }
            if seen.insert(target)
                && let Some(next) = schema.model(target).and_then(alias_body)
            {
                pending.push(next);
            }
        }
    }
    false
}

/// Whether `ty` reaches `target` through nullable wrappers and aliases
/// only, with no list, set, map, struct or enum on the way.
///
/// Such a reference adds nothing but absence: `Maybe = Maybe?` only ever
/// holds `null`.
pub fn reaches_unguarded(schema: &Schema, ty: &TypeNode, target: &str) -> bool {
    let mut seen = HashSet::new();
    reaches_unguarded_inner(schema, ty, target, &mut seen)
}

fn reaches_unguarded_inner<'a>(
    schema: &'a Schema,
    ty: &'a TypeNode,
    target: &str,
    seen: &mut HashSet<&'a str>,
) -> bool {
    match ty {
        TypeNode::Nullable(inner) => reaches_unguarded_inner(schema, inner, target, seen),
        TypeNode::Reference(name) | TypeNode::Alias { name, .. } | TypeNode::External { name, .. } => {
            if name == target {
                return true;
            }
            if !seen.insert(name.as_str()) {
                return false;
            }
            schema
                .model(name)
                .and_then(alias_body)
                .is_some_and(|body| reaches_unguarded_inner(schema, body, target, seen))
        }
        TypeNode::Primitive(_) | TypeNode::List(_) | TypeNode::Set(_) | TypeNode::Map(..) => false,
    }
}

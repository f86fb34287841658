//! Breaking inline recursion in generated structs.
//!
//! A struct whose field holds the struct itself by value, directly or via
//! other structs and aliases, has no finite size. Collections already put
//! their elements on the heap; everything else gets a `Box` at the
//! reference that closes the cycle.

use std::collections::HashSet;

use hgen_codegen::{TypeMapper, mappers::RustTypeMapper};
use hgen_ir::{ModelDecl, Schema, TypeNode};

/// Whether a value of `ty` contains an `owner` value inline.
pub fn embeds(schema: &Schema, ty: &TypeNode, owner: &str) -> bool {
    let mut seen = HashSet::new();
    embeds_inner(schema, ty, owner, &mut seen)
}

fn embeds_inner<'a>(
    schema: &'a Schema,
    ty: &'a TypeNode,
    owner: &str,
    seen: &mut HashSet<&'a str>,
) -> bool {
    match ty {
        TypeNode::Primitive(_) | TypeNode::External { .. } => false,
        TypeNode::List(_) | TypeNode::Set(_) | TypeNode::Map(..) => false,
        TypeNode::Nullable(inner) => embeds_inner(schema, inner, owner, seen),
        TypeNode::Reference(name) | TypeNode::Alias { name, .. } => {
            if name == owner {
                return true;
            }
            if !seen.insert(name.as_str()) {
                return false;
            }
            match schema.model(name) {
                Some(ModelDecl::Struct(s)) => s
                    .fields
                    .values()
                    .any(|field| embeds_inner(schema, &field.ty, owner, seen)),
                Some(ModelDecl::Alias(a)) => embeds_inner(schema, &a.inner, owner, seen),
                Some(ModelDecl::Enum(_) | ModelDecl::External(_)) | None => false,
            }
        }
    }
}

/// The Rust type of a field of `owner`, boxed where it would embed `owner`.
pub fn field_type(schema: &Schema, owner: &str, ty: &TypeNode) -> String {
    if !embeds(schema, ty, owner) {
        return RustTypeMapper.map_type(ty);
    }

    match ty {
        TypeNode::Nullable(inner) => format!("Option<{}>", field_type(schema, owner, inner)),
        TypeNode::Reference(name) | TypeNode::Alias { name, .. } => format!("Box<{name}>"),
        other => RustTypeMapper.map_type(other),
    }
}

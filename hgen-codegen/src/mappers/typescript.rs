//! TypeScript type mapper implementation.

use hgen_ir::{Primitive, Schema, TypeNode};

use crate::{language::TypeMapper, recursion::reaches_unguarded};

/// TypeScript type mapper implementation.
pub struct TypeScriptTypeMapper;

impl TypeMapper for TypeScriptTypeMapper {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn map_primitive(&self, kind: Primitive) -> &'static str {
        match kind {
            Primitive::String => "string",
            Primitive::Bool => "boolean",
            Primitive::Int32 | Primitive::Float32 | Primitive::Float64 => "number",
            Primitive::Int64 => "bigint",
            Primitive::Instant => "Date",
            Primitive::Unit => "void",
        }
    }

    fn map_nullable(&self, inner: &TypeNode) -> String {
        format!("{} | null", self.map_type(inner))
    }

    fn map_list(&self, element: &TypeNode) -> String {
        list_of(element, self.map_type(element))
    }

    fn map_set(&self, element: &TypeNode) -> String {
        format!("Set<{}>", self.map_type(element))
    }

    fn map_map(&self, key: &TypeNode, value: &TypeNode) -> String {
        format!("Record<{}, {}>", map_key(self, key), self.map_type(value))
    }
}

fn list_of(element: &TypeNode, mapped: String) -> String {
    // `T | null[]` would bind the brackets to `null`
    if element.is_nullable() {
        format!("({mapped})[]")
    } else {
        format!("{mapped}[]")
    }
}

fn map_key(mapper: &impl TypeMapper, key: &TypeNode) -> String {
    // `bigint` cannot index an object type
    match key {
        TypeNode::Primitive(Primitive::Int64) => "number".to_string(),
        key => mapper.map_type(key),
    }
}

/// Mapper for the body of an alias that refers back to itself.
///
/// TypeScript defers a self-reference only inside arrays, `Set` and
/// object types, so maps become mapped object types instead of `Record`.
/// A reference that loops back through nullable wrappers alone can only
/// ever be `null` and is written as `never`.
pub struct RecursiveAliasMapper<'a> {
    schema: &'a Schema,
    owner: &'a str,
    guarded: bool,
}

impl<'a> RecursiveAliasMapper<'a> {
    pub fn new(schema: &'a Schema, owner: &'a str) -> Self {
        Self {
            schema,
            owner,
            guarded: false,
        }
    }

    fn guarded(&self) -> Self {
        Self {
            guarded: true,
            ..*self
        }
    }
}

impl TypeMapper for RecursiveAliasMapper<'_> {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn map_primitive(&self, kind: Primitive) -> &'static str {
        TypeScriptTypeMapper.map_primitive(kind)
    }

    fn map_nullable(&self, inner: &TypeNode) -> String {
        format!("{} | null", self.map_type(inner))
    }

    fn map_list(&self, element: &TypeNode) -> String {
        list_of(element, self.guarded().map_type(element))
    }

    fn map_set(&self, element: &TypeNode) -> String {
        format!("Set<{}>", self.guarded().map_type(element))
    }

    fn map_map(&self, key: &TypeNode, value: &TypeNode) -> String {
        let inner = self.guarded();
        format!(
            "{{ [key in {}]: {} }}",
            map_key(&inner, key),
            inner.map_type(value)
        )
    }

    fn map_named(&self, name: &str) -> String {
        if !self.guarded
            && reaches_unguarded(self.schema, &TypeNode::reference(name), self.owner)
        {
            "never".to_string()
        } else {
            name.to_string()
        }
    }
}

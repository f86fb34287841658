//! Rust type mapper implementation.

use hgen_ir::{Primitive, TypeNode};

use crate::language::TypeMapper;

/// Rust type mapper implementation.
pub struct RustTypeMapper;

impl TypeMapper for RustTypeMapper {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn map_primitive(&self, kind: Primitive) -> &'static str {
        match kind {
            Primitive::String => "String",
            Primitive::Bool => "bool",
            Primitive::Int32 => "i32",
            Primitive::Int64 => "i64",
            Primitive::Float32 => "f32",
            Primitive::Float64 => "f64",
            Primitive::Instant => "std::time::SystemTime",
            Primitive::Unit => "()",
        }
    }

    fn map_nullable(&self, inner: &TypeNode) -> String {
        format!("Option<{}>", self.map_type(inner))
    }

    fn map_list(&self, element: &TypeNode) -> String {
        format!("Vec<{}>", self.map_type(element))
    }

    fn map_set(&self, element: &TypeNode) -> String {
        format!("std::collections::BTreeSet<{}>", self.map_type(element))
    }

    fn map_map(&self, key: &TypeNode, value: &TypeNode) -> String {
        format!(
            "std::collections::BTreeMap<{}, {}>",
            self.map_type(key),
            self.map_type(value)
        )
    }
}

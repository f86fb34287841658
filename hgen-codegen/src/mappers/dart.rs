//! Dart type mapper implementation.

use hgen_ir::{Primitive, Schema, TypeNode};

use crate::{language::TypeMapper, recursion::is_recursive_alias};

/// Dart type mapper implementation.
pub struct DartTypeMapper;

impl TypeMapper for DartTypeMapper {
    fn language(&self) -> &'static str {
        "dart"
    }

    fn map_primitive(&self, kind: Primitive) -> &'static str {
        match kind {
            Primitive::String => "String",
            Primitive::Bool => "bool",
            Primitive::Int32 | Primitive::Int64 => "int",
            Primitive::Float32 | Primitive::Float64 => "double",
            Primitive::Instant => "DateTime",
            Primitive::Unit => "Null",
        }
    }

    fn map_nullable(&self, inner: &TypeNode) -> String {
        nullable(self.map_type(inner))
    }

    fn map_list(&self, element: &TypeNode) -> String {
        format!("List<{}>", self.map_type(element))
    }

    fn map_set(&self, element: &TypeNode) -> String {
        format!("Set<{}>", self.map_type(element))
    }

    fn map_map(&self, key: &TypeNode, value: &TypeNode) -> String {
        format!("Map<{}, {}>", self.map_type(key), self.map_type(value))
    }
}

fn nullable(mapped: String) -> String {
    if mapped.ends_with('?') || mapped == "Null" {
        mapped
    } else {
        format!("{mapped}?")
    }
}

/// Mapper for the body of a typedef that refers back to itself.
///
/// A Dart typedef may not mention itself, not even through a generic
/// argument, so every recursive alias met in the body is erased to
/// `Object?`.
pub struct DartRecursiveAliasMapper<'a> {
    schema: &'a Schema,
}

impl<'a> DartRecursiveAliasMapper<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }
}

impl TypeMapper for DartRecursiveAliasMapper<'_> {
    fn language(&self) -> &'static str {
        "dart"
    }

    fn map_primitive(&self, kind: Primitive) -> &'static str {
        DartTypeMapper.map_primitive(kind)
    }

    fn map_nullable(&self, inner: &TypeNode) -> String {
        nullable(self.map_type(inner))
    }

    fn map_list(&self, element: &TypeNode) -> String {
        format!("List<{}>", self.map_type(element))
    }

    fn map_set(&self, element: &TypeNode) -> String {
        format!("Set<{}>", self.map_type(element))
    }

    fn map_map(&self, key: &TypeNode, value: &TypeNode) -> String {
        format!("Map<{}, {}>", self.map_type(key), self.map_type(value))
    }

    fn map_named(&self, name: &str) -> String {
        if is_recursive_alias(self.schema, name) {
            "Object?".to_string()
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use hgen_ir::SchemaBuilder;

    use super::*;

    #[test]
    fn test_dart_primitives() {
        let mapper = DartTypeMapper;

        assert_eq!(mapper.map_primitive(Primitive::Int64), "int");
        assert_eq!(mapper.map_primitive(Primitive::Float32), "double");
        assert_eq!(mapper.map_primitive(Primitive::Instant), "DateTime");
    }

    #[test]
    fn test_dart_composites() {
        let mapper = DartTypeMapper;

        let node = TypeNode::nullable(TypeNode::list(TypeNode::reference("Post")));
        assert_eq!(mapper.map_type(&node), "List<Post>?");

        let node = TypeNode::map(
            TypeNode::primitive(Primitive::String),
            TypeNode::set(TypeNode::nullable(TypeNode::primitive(Primitive::Int32))),
        );
        assert_eq!(mapper.map_type(&node), "Map<String, Set<int?>>");

        let node = TypeNode::nullable(TypeNode::primitive(Primitive::Unit));
        assert_eq!(mapper.map_type(&node), "Null");
    }

    #[test]
    fn test_recursive_alias_bodies_are_erased() {
        let ast = hgen_manifest::parse_str(
            r#"
            [models.Tree]
            type = "alias"
            inner = "List<Tree>"

            [models.Maybe]
            type = "alias"
            inner = "Maybe?"

            [models.Slug]
            type = "alias"
            inner = "string"
            "#,
        )
        .expect("Failed to parse test schema");
        let schema = SchemaBuilder::new(&ast).build().expect("schema should build");
        let mapper = DartRecursiveAliasMapper::new(&schema);

        let tree = TypeNode::list(TypeNode::reference("Tree"));
        assert_eq!(mapper.map_type(&tree), "List<Object?>");

        let maybe = TypeNode::nullable(TypeNode::reference("Maybe"));
        assert_eq!(mapper.map_type(&maybe), "Object?");

        let slugs = TypeNode::map(TypeNode::reference("Slug"), TypeNode::reference("Tree"));
        assert_eq!(mapper.map_type(&slugs), "Map<Slug, Object?>");
    }
}

//! Resolved model and service declarations.
//!
//! Equality on every declaration is structural: names, shapes and
//! variant values are compared, metadata never is. Ordered mappings are
//! compared as mappings, so declaration order does not affect equality.

use indexmap::IndexMap;

use crate::{Metadata, TypeNode};

/// A struct field.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field type.
    pub ty: TypeNode,
    /// Merged field metadata.
    pub metadata: Metadata,
}

impl Field {
    pub fn new(ty: TypeNode) -> Self {
        Self {
            ty,
            metadata: Metadata::new(),
        }
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl Eq for Field {}

#[derive(Debug, Clone)]
pub struct StructDecl {
    pub name: String,
    /// Fields in declaration order.
    pub fields: IndexMap<String, Field>,
    pub metadata: Metadata,
}

impl PartialEq for StructDecl {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl Eq for StructDecl {}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    /// Variant name to raw value, in declaration order.
    pub variants: IndexMap<String, String>,
    pub metadata: Metadata,
}

impl PartialEq for EnumDecl {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.variants == other.variants
    }
}

impl Eq for EnumDecl {}

#[derive(Debug, Clone)]
pub struct AliasDecl {
    pub name: String,
    pub inner: TypeNode,
    pub metadata: Metadata,
}

impl PartialEq for AliasDecl {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.inner == other.inner
    }
}

impl Eq for AliasDecl {}

/// A type implemented outside the schema.
#[derive(Debug, Clone)]
pub struct ExternalDecl {
    pub name: String,
    /// The structural shape values of this type take on the wire.
    pub representation: TypeNode,
    /// Host-specific hints, e.g. the `module` to import it from.
    pub metadata: Metadata,
}

impl PartialEq for ExternalDecl {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.representation == other.representation
    }
}

impl Eq for ExternalDecl {}

/// The kind of a model declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Struct,
    Enum,
    Alias,
    External,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Struct => "struct",
            ModelKind::Enum => "enum",
            ModelKind::Alias => "alias",
            ModelKind::External => "external",
        }
    }
}

/// A top-level model declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelDecl {
    Struct(StructDecl),
    Enum(EnumDecl),
    Alias(AliasDecl),
    External(ExternalDecl),
}

impl ModelDecl {
    pub fn name(&self) -> &str {
        match self {
            ModelDecl::Struct(s) => &s.name,
            ModelDecl::Enum(e) => &e.name,
            ModelDecl::Alias(a) => &a.name,
            ModelDecl::External(x) => &x.name,
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            ModelDecl::Struct(_) => ModelKind::Struct,
            ModelDecl::Enum(_) => ModelKind::Enum,
            ModelDecl::Alias(_) => ModelKind::Alias,
            ModelDecl::External(_) => ModelKind::External,
        }
    }

    /// Declaration-level metadata.
    pub fn metadata(&self) -> &Metadata {
        match self {
            ModelDecl::Struct(s) => &s.metadata,
            ModelDecl::Enum(e) => &e.metadata,
            ModelDecl::Alias(a) => &a.metadata,
            ModelDecl::External(x) => &x.metadata,
        }
    }

    /// Type trees owned by this declaration, with their dotted locations.
    pub fn type_sites(&self) -> Vec<(String, &TypeNode)> {
        match self {
            ModelDecl::Struct(s) => s
                .fields
                .iter()
                .map(|(field, f)| (format!("{}.{field}", s.name), &f.ty))
                .collect(),
            ModelDecl::Enum(_) => Vec::new(),
            ModelDecl::Alias(a) => vec![(a.name.clone(), &a.inner)],
            ModelDecl::External(x) => vec![(x.name.clone(), &x.representation)],
        }
    }
}

/// A service method signature.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    /// Named inputs in declaration order.
    pub inputs: IndexMap<String, TypeNode>,
    pub output: TypeNode,
    /// Merged method metadata.
    pub metadata: Metadata,
}

impl PartialEq for MethodDecl {
    fn eq(&self, other: &Self) -> bool {
        self.inputs == other.inputs && self.output == other.output
    }
}

impl Eq for MethodDecl {}

#[derive(Debug, Clone)]
pub struct ServiceDecl {
    pub name: String,
    /// Methods in declaration order.
    pub methods: IndexMap<String, MethodDecl>,
    pub metadata: Metadata,
}

impl ServiceDecl {
    /// Type trees owned by this service, with their dotted locations.
    pub fn type_sites(&self) -> Vec<(String, &TypeNode)> {
        let mut sites = Vec::new();
        for (method_name, method) in &self.methods {
            for (input, ty) in &method.inputs {
                sites.push((format!("{}.{method_name}.{input}", self.name), ty));
            }
            sites.push((format!("{}.{method_name}.output", self.name), &method.output));
        }
        sites
    }
}

impl PartialEq for ServiceDecl {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.methods == other.methods
    }
}

impl Eq for ServiceDecl {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MetaValue, Primitive};

    fn post(metadata: Metadata) -> StructDecl {
        let mut fields = IndexMap::new();
        fields.insert(
            "slug".to_string(),
            Field {
                ty: TypeNode::primitive(Primitive::String),
                metadata,
            },
        );
        StructDecl {
            name: "Post".into(),
            fields,
            metadata: Metadata::new(),
        }
    }

    #[test]
    fn test_structs_differing_only_in_metadata_are_equal() {
        let plain = post(Metadata::new());
        let annotated = post(Metadata::new().with("max", MetaValue::Integer(64)));
        assert_eq!(plain, annotated);
    }

    #[test]
    fn test_field_order_does_not_affect_equality() {
        let string = || Field::new(TypeNode::primitive(Primitive::String));
        let a = StructDecl {
            name: "Post".into(),
            fields: [("slug".to_string(), string()), ("title".to_string(), string())]
                .into_iter()
                .collect(),
            metadata: Metadata::new(),
        };
        let b = StructDecl {
            name: "Post".into(),
            fields: [("title".to_string(), string()), ("slug".to_string(), string())]
                .into_iter()
                .collect(),
            metadata: Metadata::new(),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_type_sites_name_locations() {
        let service = ServiceDecl {
            name: "PostService".into(),
            methods: [(
                "findOne".to_string(),
                MethodDecl {
                    inputs: [("slug".to_string(), TypeNode::primitive(Primitive::String))]
                        .into_iter()
                        .collect(),
                    output: TypeNode::nullable(TypeNode::reference("Post")),
                    metadata: Metadata::new(),
                },
            )]
            .into_iter()
            .collect(),
            metadata: Metadata::new(),
        };

        let locations: Vec<_> = service.type_sites().into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            locations,
            vec!["PostService.findOne.slug", "PostService.findOne.output"]
        );
    }
}

//! The runtime schema document.
//!
//! This is the versioned wire shape embedded into generated code as the
//! `$schema` constant. Type nodes carry a lower-case `type` tag; metadata
//! appears only where the IR carries it (fields, methods, declarations
//! and external nodes).
//!
//! Decoding a document yields a [`Schema`] again, checked the same way a
//! built schema is.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    AliasDecl, EnumDecl, Error, ExternalDecl, Field, Metadata, MethodDecl, ModelDecl, Primitive,
    Resolver, Result, Schema, ServiceDecl, StructDecl, TypeNode, builder::check_variants,
};

/// Current document version.
pub const SCHEMA_VERSION: u32 = 1;

/// Serialized form of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub version: u32,
    pub models: IndexMap<String, WireModel>,
    pub services: IndexMap<String, WireService>,
}

/// A type node on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WireType {
    String,
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    Instant,
    Unit,
    Nullable {
        inner: Box<WireType>,
    },
    List {
        inner: Box<WireType>,
    },
    Set {
        inner: Box<WireType>,
    },
    Map {
        key: Box<WireType>,
        value: Box<WireType>,
    },
    Reference {
        name: String,
    },
    Alias {
        name: String,
        inner: Box<WireType>,
    },
    External {
        name: String,
        inner: Box<WireType>,
        metadata: Metadata,
    },
}

/// A struct field: its type node with the field metadata alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireField {
    #[serde(flatten)]
    pub ty: WireType,
    #[serde(default)]
    pub metadata: Metadata,
}

/// A model declaration on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WireModel {
    Struct {
        fields: IndexMap<String, WireField>,
        #[serde(default)]
        metadata: Metadata,
    },
    Enum {
        variants: IndexMap<String, String>,
        #[serde(default)]
        metadata: Metadata,
    },
    Alias {
        inner: WireType,
        #[serde(default)]
        metadata: Metadata,
    },
    External {
        inner: WireType,
        #[serde(default)]
        metadata: Metadata,
    },
}

/// Tag of a service entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTag {
    #[default]
    Service,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireService {
    #[serde(rename = "type", default)]
    pub tag: ServiceTag,
    pub methods: IndexMap<String, WireMethod>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMethod {
    pub inputs: IndexMap<String, WireType>,
    pub output: WireType,
    #[serde(default)]
    pub metadata: Metadata,
}

impl From<&TypeNode> for WireType {
    fn from(node: &TypeNode) -> Self {
        match node {
            TypeNode::Primitive(kind) => match kind {
                Primitive::String => WireType::String,
                Primitive::Bool => WireType::Bool,
                Primitive::Int32 => WireType::Int32,
                Primitive::Int64 => WireType::Int64,
                Primitive::Float32 => WireType::Float32,
                Primitive::Float64 => WireType::Float64,
                Primitive::Instant => WireType::Instant,
                Primitive::Unit => WireType::Unit,
            },
            TypeNode::Nullable(inner) => WireType::Nullable {
                inner: Box::new(inner.as_ref().into()),
            },
            TypeNode::List(inner) => WireType::List {
                inner: Box::new(inner.as_ref().into()),
            },
            TypeNode::Set(inner) => WireType::Set {
                inner: Box::new(inner.as_ref().into()),
            },
            TypeNode::Map(key, value) => WireType::Map {
                key: Box::new(key.as_ref().into()),
                value: Box::new(value.as_ref().into()),
            },
            TypeNode::Reference(name) => WireType::Reference { name: name.clone() },
            TypeNode::Alias { name, inner } => WireType::Alias {
                name: name.clone(),
                inner: Box::new(inner.as_ref().into()),
            },
            TypeNode::External {
                name,
                representation,
                metadata,
            } => WireType::External {
                name: name.clone(),
                inner: Box::new(representation.as_ref().into()),
                metadata: metadata.clone(),
            },
        }
    }
}

impl From<&WireType> for TypeNode {
    fn from(wire: &WireType) -> Self {
        match wire {
            WireType::String => TypeNode::Primitive(Primitive::String),
            WireType::Bool => TypeNode::Primitive(Primitive::Bool),
            WireType::Int32 => TypeNode::Primitive(Primitive::Int32),
            WireType::Int64 => TypeNode::Primitive(Primitive::Int64),
            WireType::Float32 => TypeNode::Primitive(Primitive::Float32),
            WireType::Float64 => TypeNode::Primitive(Primitive::Float64),
            WireType::Instant => TypeNode::Primitive(Primitive::Instant),
            WireType::Unit => TypeNode::Primitive(Primitive::Unit),
            WireType::Nullable { inner } => TypeNode::nullable(inner.as_ref().into()),
            WireType::List { inner } => TypeNode::list(inner.as_ref().into()),
            WireType::Set { inner } => TypeNode::set(inner.as_ref().into()),
            WireType::Map { key, value } => {
                TypeNode::map(key.as_ref().into(), value.as_ref().into())
            }
            WireType::Reference { name } => TypeNode::Reference(name.clone()),
            WireType::Alias { name, inner } => TypeNode::Alias {
                name: name.clone(),
                inner: Box::new(inner.as_ref().into()),
            },
            WireType::External {
                name,
                inner,
                metadata,
            } => TypeNode::External {
                name: name.clone(),
                representation: Box::new(inner.as_ref().into()),
                metadata: metadata.clone(),
            },
        }
    }
}

impl From<&ModelDecl> for WireModel {
    fn from(model: &ModelDecl) -> Self {
        match model {
            ModelDecl::Struct(decl) => WireModel::Struct {
                fields: decl
                    .fields
                    .iter()
                    .map(|(name, field)| {
                        let wire = WireField {
                            ty: (&field.ty).into(),
                            metadata: field.metadata.clone(),
                        };
                        (name.clone(), wire)
                    })
                    .collect(),
                metadata: decl.metadata.clone(),
            },
            ModelDecl::Enum(decl) => WireModel::Enum {
                variants: decl.variants.clone(),
                metadata: decl.metadata.clone(),
            },
            ModelDecl::Alias(decl) => WireModel::Alias {
                inner: (&decl.inner).into(),
                metadata: decl.metadata.clone(),
            },
            ModelDecl::External(decl) => WireModel::External {
                inner: (&decl.representation).into(),
                metadata: decl.metadata.clone(),
            },
        }
    }
}

impl From<&ServiceDecl> for WireService {
    fn from(service: &ServiceDecl) -> Self {
        let methods = service
            .methods
            .iter()
            .map(|(name, method)| {
                let wire = WireMethod {
                    inputs: method
                        .inputs
                        .iter()
                        .map(|(input, ty)| (input.clone(), ty.into()))
                        .collect(),
                    output: (&method.output).into(),
                    metadata: method.metadata.clone(),
                };
                (name.clone(), wire)
            })
            .collect();
        WireService {
            tag: ServiceTag::Service,
            methods,
            metadata: service.metadata.clone(),
        }
    }
}

impl From<&Schema> for SchemaDocument {
    fn from(schema: &Schema) -> Self {
        SchemaDocument {
            version: SCHEMA_VERSION,
            models: schema
                .models()
                .map(|model| (model.name().to_string(), model.into()))
                .collect(),
            services: schema
                .services()
                .map(|service| (service.name.clone(), service.into()))
                .collect(),
        }
    }
}

impl SchemaDocument {
    /// Rebuild a validated [`Schema`] named `name` from this document.
    pub fn into_schema(self, name: impl Into<String>) -> Result<Schema> {
        if self.version != SCHEMA_VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: SCHEMA_VERSION,
            });
        }

        let mut models = IndexMap::new();
        for (name, model) in self.models {
            let decl = match model {
                WireModel::Struct { fields, metadata } => ModelDecl::Struct(StructDecl {
                    fields: fields
                        .into_iter()
                        .map(|(field, wire)| {
                            let decl = Field {
                                ty: (&wire.ty).into(),
                                metadata: wire.metadata,
                            };
                            (field, decl)
                        })
                        .collect(),
                    name: name.clone(),
                    metadata,
                }),
                WireModel::Enum { variants, metadata } => ModelDecl::Enum(EnumDecl {
                    variants: check_variants(&name, variants)?,
                    name: name.clone(),
                    metadata,
                }),
                WireModel::Alias { inner, metadata } => ModelDecl::Alias(AliasDecl {
                    inner: (&inner).into(),
                    name: name.clone(),
                    metadata,
                }),
                WireModel::External { inner, metadata } => ModelDecl::External(ExternalDecl {
                    representation: (&inner).into(),
                    name: name.clone(),
                    metadata,
                }),
            };
            models.insert(name, decl);
        }

        let mut services = IndexMap::new();
        for (name, service) in self.services {
            if models.contains_key(&name) {
                return Err(Error::DuplicateName {
                    name,
                    first: "model",
                });
            }
            let methods = service
                .methods
                .into_iter()
                .map(|(method, wire)| {
                    let decl = MethodDecl {
                        inputs: wire
                            .inputs
                            .iter()
                            .map(|(input, ty)| (input.clone(), ty.into()))
                            .collect(),
                        output: (&wire.output).into(),
                        metadata: wire.metadata,
                    };
                    (method, decl)
                })
                .collect();
            let decl = ServiceDecl {
                name: name.clone(),
                methods,
                metadata: service.metadata,
            };
            services.insert(name, decl);
        }

        Resolver::new(&models, &services).check()?;
        Ok(Schema::new(name.into(), models, services))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        MetaValue, SchemaBuilder,
        ast::{
            DefaultsAst, FieldAst, MethodAst, ModelAst, ModelKindAst, ParamAst, SchemaAst,
            ServiceAst, TypeExpr, VariantAst,
        },
    };

    fn blog() -> Schema {
        let field = |name: &str, ty: TypeExpr| FieldAst {
            name: name.into(),
            ty,
            metadata: Metadata::new(),
        };
        let ast = SchemaAst {
            name: "blog".into(),
            defaults: DefaultsAst::default(),
            models: vec![
                ModelAst {
                    name: "Post".into(),
                    kind: ModelKindAst::Struct {
                        fields: vec![
                            field("slug", TypeExpr::ident("string")),
                            field("title", TypeExpr::ident("string")),
                            field("body", TypeExpr::ident("string")),
                            field("author", TypeExpr::ident("string")),
                            field("status", TypeExpr::ident("Status")),
                            field(
                                "tags",
                                TypeExpr::set(TypeExpr::ident("string")),
                            ),
                            field(
                                "published",
                                TypeExpr::nullable(TypeExpr::ident("Instant")),
                            ),
                        ],
                        field_defaults: Metadata::new(),
                    },
                    metadata: Metadata::new().with("table", "posts"),
                },
                ModelAst {
                    name: "Status".into(),
                    kind: ModelKindAst::Enum {
                        variants: vec![VariantAst {
                            name: "Draft".into(),
                            value: Some("draft".into()),
                        }],
                    },
                    metadata: Metadata::new(),
                },
                ModelAst {
                    name: "Instant".into(),
                    kind: ModelKindAst::External {
                        representation: TypeExpr::ident("string"),
                    },
                    metadata: Metadata::new().with("module", "./time"),
                },
            ],
            services: vec![ServiceAst {
                name: "PostService".into(),
                methods: vec![MethodAst {
                    name: "findOne".into(),
                    inputs: vec![ParamAst {
                        name: "slug".into(),
                        ty: TypeExpr::ident("string"),
                    }],
                    output: TypeExpr::nullable(TypeExpr::ident("Post")),
                    metadata: Metadata::new().with("cache", MetaValue::Integer(30)),
                }],
                metadata: Metadata::new(),
            }],
        };
        SchemaBuilder::new(&ast).build().unwrap()
    }

    #[test]
    fn test_document_round_trips_to_equal_schema() {
        let schema = blog();
        let json = serde_json::to_string(&SchemaDocument::from(&schema)).unwrap();
        let decoded: SchemaDocument = serde_json::from_str(&json).unwrap();
        let rebuilt = decoded.into_schema("blog").unwrap();

        assert_eq!(rebuilt, schema);
        let Some(ModelDecl::External(instant)) = rebuilt.model("Instant") else {
            panic!("Instant should be external");
        };
        assert_eq!(instant.metadata.get_str("module"), Some("./time"));
    }

    #[test]
    fn test_method_output_wire_shape() {
        let document = SchemaDocument::from(&blog());
        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(
            value["services"]["PostService"]["methods"]["findOne"]["output"],
            serde_json::json!({"type": "nullable", "inner": {"type": "reference", "name": "Post"}})
        );
        assert_eq!(value["services"]["PostService"]["type"], "service");
        assert_eq!(value["version"], 1);
    }

    #[test]
    fn test_field_order_is_preserved_on_the_wire() {
        let json = serde_json::to_string(&SchemaDocument::from(&blog())).unwrap();
        let positions: Vec<_> = ["\"slug\"", "\"title\"", "\"body\"", "\"author\""]
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_field_entry_flattens_type_and_metadata() {
        let json = serde_json::to_string(&SchemaDocument::from(&blog())).unwrap();
        assert!(json.contains(r#""slug":{"type":"string","metadata":{}}"#));
        assert!(json.contains(r#""tags":{"type":"set","inner":{"type":"string"},"metadata":{}}"#));
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let mut document = SchemaDocument::from(&blog());
        document.version = 2;
        assert_eq!(
            document.into_schema("blog"),
            Err(Error::UnsupportedVersion {
                found: 2,
                expected: 1,
            })
        );
    }

    #[test]
    fn test_decoding_checks_references() {
        let json = r#"{"version":1,"models":{"Feed":{"type":"struct","fields":{"top":{"type":"reference","name":"Ghost"}}}},"services":{}}"#;
        let document: SchemaDocument = serde_json::from_str(json).unwrap();
        assert_eq!(
            document.into_schema("feed"),
            Err(Error::DanglingReference {
                name: "Ghost".into(),
                location: "Feed.top".into(),
            })
        );
    }
}

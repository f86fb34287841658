//! Assembly of a validated [`Schema`] from the unresolved AST.

use std::collections::HashMap;

use indexmap::{IndexMap, map::Entry};
use tracing::debug;

use crate::{
    AliasDecl, EnumDecl, Error, ExternalDecl, Field, MetadataMerger, MethodDecl, ModelDecl,
    Resolver, Result, Schema, ServiceDecl, StructDecl, TypeNode,
    ast::{ModelAst, ModelKindAst, SchemaAst, ServiceAst},
};

/// Builds one generation unit.
///
/// The build runs in five steps, any of which aborts the whole build:
///
/// 1. register every declared name, rejecting duplicates,
/// 2. construct every type tree,
/// 3. resolve references, alias chains and map keys,
/// 4. merge metadata layers onto fields and methods,
/// 5. freeze the result into a [`Schema`].
pub struct SchemaBuilder<'a> {
    ast: &'a SchemaAst,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(ast: &'a SchemaAst) -> Self {
        Self { ast }
    }

    pub fn build(self) -> Result<Schema> {
        debug!(unit = %self.ast.name, "building schema");

        self.register()?;
        let (mut models, mut services) = self.construct()?;
        Resolver::new(&models, &services).check()?;
        self.merge_metadata(&mut models, &mut services);

        debug!(
            unit = %self.ast.name,
            models = models.len(),
            services = services.len(),
            "schema built"
        );
        Ok(Schema::new(self.ast.name.clone(), models, services))
    }

    fn register(&self) -> Result<()> {
        let mut names: HashMap<&str, &'static str> = HashMap::new();
        let declared = self
            .ast
            .models
            .iter()
            .map(|m| (m.name.as_str(), "model"))
            .chain(self.ast.services.iter().map(|s| (s.name.as_str(), "service")));
        for (name, kind) in declared {
            if let Some(first) = names.insert(name, kind) {
                return Err(Error::DuplicateName {
                    name: name.to_string(),
                    first,
                });
            }
        }

        for model in &self.ast.models {
            register_model(model)?;
        }
        for service in &self.ast.services {
            register_service(service)?;
        }
        Ok(())
    }

    fn construct(
        &self,
    ) -> Result<(IndexMap<String, ModelDecl>, IndexMap<String, ServiceDecl>)> {
        let mut models = IndexMap::new();
        for model in &self.ast.models {
            models.insert(model.name.clone(), construct_model(model)?);
        }

        let mut services = IndexMap::new();
        for service in &self.ast.services {
            services.insert(service.name.clone(), construct_service(service)?);
        }
        Ok((models, services))
    }

    fn merge_metadata(
        &self,
        models: &mut IndexMap<String, ModelDecl>,
        services: &mut IndexMap<String, ServiceDecl>,
    ) {
        let defaults = &self.ast.defaults;

        for model in &self.ast.models {
            let ModelKindAst::Struct { field_defaults, .. } = &model.kind else {
                continue;
            };
            let Some(ModelDecl::Struct(decl)) = models.get_mut(&model.name) else {
                continue;
            };
            for field in decl.fields.values_mut() {
                field.metadata = MetadataMerger::new()
                    .layer(&defaults.fields)
                    .layer(field_defaults)
                    .layer(&field.metadata)
                    .finish();
            }
        }

        for service in services.values_mut() {
            for method in service.methods.values_mut() {
                method.metadata = MetadataMerger::new()
                    .layer(&defaults.methods)
                    .layer(&service.metadata)
                    .layer(&method.metadata)
                    .finish();
            }
        }
    }
}

fn register_model(model: &ModelAst) -> Result<()> {
    match &model.kind {
        ModelKindAst::Struct { fields, .. } => {
            unique(fields.iter().map(|f| f.name.as_str()), |field| {
                Error::DuplicateField {
                    owner: model.name.clone(),
                    field,
                }
            })
        }
        ModelKindAst::Enum { variants } => {
            let variants = variants
                .iter()
                .map(|v| (v.name.clone(), v.value.clone().unwrap_or_else(|| v.name.clone())));
            check_variants(&model.name, variants).map(|_| ())
        }
        ModelKindAst::Alias { .. } | ModelKindAst::External { .. } => Ok(()),
    }
}

fn register_service(service: &ServiceAst) -> Result<()> {
    unique(service.methods.iter().map(|m| m.name.as_str()), |method| {
        Error::DuplicateMethod {
            owner: service.name.clone(),
            method,
        }
    })?;
    for method in &service.methods {
        unique(method.inputs.iter().map(|p| p.name.as_str()), |input| {
            Error::DuplicateInput {
                owner: format!("{}.{}", service.name, method.name),
                input,
            }
        })?;
    }
    Ok(())
}

fn unique<'n>(
    names: impl Iterator<Item = &'n str>,
    duplicate: impl FnOnce(String) -> Error,
) -> Result<()> {
    let mut seen = Vec::new();
    for name in names {
        if seen.contains(&name) {
            return Err(duplicate(name.to_string()));
        }
        seen.push(name);
    }
    Ok(())
}

/// Collect enum variants, rejecting duplicate names and raw values.
pub(crate) fn check_variants(
    owner: &str,
    variants: impl IntoIterator<Item = (String, String)>,
) -> Result<IndexMap<String, String>> {
    let mut by_value: HashMap<String, String> = HashMap::new();
    let mut collected = IndexMap::new();
    for (name, value) in variants {
        if let Some(first) = by_value.get(&value) {
            if *first == name {
                return Err(Error::DuplicateVariant {
                    owner: owner.to_string(),
                    variant: name,
                });
            }
            return Err(Error::DuplicateVariantValue {
                owner: owner.to_string(),
                value,
                first: first.clone(),
                second: name,
            });
        }
        match collected.entry(name) {
            Entry::Occupied(entry) => {
                return Err(Error::DuplicateVariant {
                    owner: owner.to_string(),
                    variant: entry.key().clone(),
                });
            }
            Entry::Vacant(entry) => {
                by_value.insert(value.clone(), entry.key().clone());
                entry.insert(value);
            }
        }
    }
    Ok(collected)
}

fn construct_model(model: &ModelAst) -> Result<ModelDecl> {
    let name = model.name.clone();
    let metadata = model.metadata.clone();

    Ok(match &model.kind {
        ModelKindAst::Struct { fields, .. } => {
            let mut decl_fields = IndexMap::new();
            for field in fields {
                let location = format!("{}.{}", model.name, field.name);
                let ty = TypeNode::from_expr(&field.ty, &location)?;
                decl_fields.insert(
                    field.name.clone(),
                    Field {
                        ty,
                        metadata: field.metadata.clone(),
                    },
                );
            }
            ModelDecl::Struct(StructDecl {
                name,
                fields: decl_fields,
                metadata,
            })
        }
        ModelKindAst::Enum { variants } => {
            let variants = variants
                .iter()
                .map(|v| (v.name.clone(), v.value.clone().unwrap_or_else(|| v.name.clone())));
            ModelDecl::Enum(EnumDecl {
                variants: check_variants(&model.name, variants)?,
                name,
                metadata,
            })
        }
        ModelKindAst::Alias { inner } => ModelDecl::Alias(AliasDecl {
            inner: TypeNode::from_expr(inner, &model.name)?,
            name,
            metadata,
        }),
        ModelKindAst::External { representation } => ModelDecl::External(ExternalDecl {
            representation: TypeNode::from_expr(representation, &model.name)?,
            name,
            metadata,
        }),
    })
}

fn construct_service(service: &ServiceAst) -> Result<ServiceDecl> {
    let mut methods = IndexMap::new();
    for method in &service.methods {
        let mut inputs = IndexMap::new();
        for param in &method.inputs {
            let location = format!("{}.{}.{}", service.name, method.name, param.name);
            inputs.insert(param.name.clone(), TypeNode::from_expr(&param.ty, &location)?);
        }
        let location = format!("{}.{}.output", service.name, method.name);
        methods.insert(
            method.name.clone(),
            MethodDecl {
                inputs,
                output: TypeNode::from_expr(&method.output, &location)?,
                metadata: method.metadata.clone(),
            },
        );
    }
    Ok(ServiceDecl {
        name: service.name.clone(),
        methods,
        metadata: service.metadata.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        MetaValue, Metadata, Primitive,
        ast::{DefaultsAst, FieldAst, MethodAst, ParamAst, TypeExpr, VariantAst},
    };

    fn field(name: &str, ty: &str) -> FieldAst {
        FieldAst {
            name: name.into(),
            ty: TypeExpr::ident(ty),
            metadata: Metadata::new(),
        }
    }

    fn post() -> ModelAst {
        ModelAst {
            name: "Post".into(),
            kind: ModelKindAst::Struct {
                fields: vec![
                    field("slug", "string"),
                    field("title", "string"),
                    field("body", "string"),
                    field("author", "string"),
                ],
                field_defaults: Metadata::new(),
            },
            metadata: Metadata::new(),
        }
    }

    fn post_service() -> ServiceAst {
        ServiceAst {
            name: "PostService".into(),
            methods: vec![MethodAst {
                name: "findOne".into(),
                inputs: vec![ParamAst {
                    name: "slug".into(),
                    ty: TypeExpr::ident("string"),
                }],
                output: TypeExpr::nullable(TypeExpr::ident("Post")),
                metadata: Metadata::new(),
            }],
            metadata: Metadata::new(),
        }
    }

    fn unit(models: Vec<ModelAst>, services: Vec<ServiceAst>) -> SchemaAst {
        SchemaAst {
            name: "blog".into(),
            defaults: DefaultsAst::default(),
            models,
            services,
        }
    }

    #[test]
    fn test_build_keeps_field_order() {
        let ast = unit(vec![post()], vec![post_service()]);
        let schema = SchemaBuilder::new(&ast).build().unwrap();

        let Some(ModelDecl::Struct(post)) = schema.model("Post") else {
            panic!("Post should be a struct");
        };
        let names: Vec<_> = post.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["slug", "title", "body", "author"]);

        let find_one = &schema.service("PostService").unwrap().methods["findOne"];
        assert_eq!(
            find_one.output,
            TypeNode::nullable(TypeNode::reference("Post"))
        );
        assert_eq!(
            find_one.inputs["slug"],
            TypeNode::primitive(Primitive::String)
        );
    }

    #[test]
    fn test_model_and_service_names_share_namespace() {
        let mut service = post_service();
        service.name = "Post".into();
        let ast = unit(vec![post()], vec![service]);
        assert_eq!(
            SchemaBuilder::new(&ast).build(),
            Err(Error::DuplicateName {
                name: "Post".into(),
                first: "model",
            })
        );
    }

    #[test]
    fn test_duplicate_field_fails() {
        let mut model = post();
        if let ModelKindAst::Struct { fields, .. } = &mut model.kind {
            fields.push(field("slug", "int32"));
        }
        let ast = unit(vec![model], vec![]);
        assert_eq!(
            SchemaBuilder::new(&ast).build(),
            Err(Error::DuplicateField {
                owner: "Post".into(),
                field: "slug".into(),
            })
        );
    }

    #[test]
    fn test_enum_variant_defaults_to_name() {
        let ast = unit(
            vec![ModelAst {
                name: "Status".into(),
                kind: ModelKindAst::Enum {
                    variants: vec![
                        VariantAst {
                            name: "Draft".into(),
                            value: None,
                        },
                        VariantAst {
                            name: "Published".into(),
                            value: Some("published".into()),
                        },
                    ],
                },
                metadata: Metadata::new(),
            }],
            vec![],
        );
        let schema = SchemaBuilder::new(&ast).build().unwrap();
        let Some(ModelDecl::Enum(status)) = schema.model("Status") else {
            panic!("Status should be an enum");
        };
        assert_eq!(status.variants["Draft"], "Draft");
        assert_eq!(status.variants["Published"], "published");
    }

    #[test]
    fn test_duplicate_variant_value_fails() {
        let ast = unit(
            vec![ModelAst {
                name: "Status".into(),
                kind: ModelKindAst::Enum {
                    variants: vec![
                        VariantAst {
                            name: "Draft".into(),
                            value: Some("d".into()),
                        },
                        VariantAst {
                            name: "Deleted".into(),
                            value: Some("d".into()),
                        },
                    ],
                },
                metadata: Metadata::new(),
            }],
            vec![],
        );
        assert_eq!(
            SchemaBuilder::new(&ast).build(),
            Err(Error::DuplicateVariantValue {
                owner: "Status".into(),
                value: "d".into(),
                first: "Draft".into(),
                second: "Deleted".into(),
            })
        );
    }

    #[test]
    fn test_duplicate_input_names_method() {
        let mut service = post_service();
        service.methods[0].inputs.push(ParamAst {
            name: "slug".into(),
            ty: TypeExpr::ident("int32"),
        });
        let ast = unit(vec![post()], vec![service]);
        assert_eq!(
            SchemaBuilder::new(&ast).build(),
            Err(Error::DuplicateInput {
                owner: "PostService.findOne".into(),
                input: "slug".into(),
            })
        );
    }

    #[test]
    fn test_dangling_output_fails_whole_build() {
        let ast = unit(vec![], vec![post_service()]);
        assert_eq!(
            SchemaBuilder::new(&ast).build(),
            Err(Error::DanglingReference {
                name: "Post".into(),
                location: "PostService.findOne.output".into(),
            })
        );
    }

    #[test]
    fn test_recursive_alias_builds() {
        let tree = ModelAst {
            name: "Tree".into(),
            kind: ModelKindAst::Alias {
                inner: TypeExpr::list(TypeExpr::ident("Tree")),
            },
            metadata: Metadata::new(),
        };
        let ast = unit(vec![tree], vec![]);

        let schema = SchemaBuilder::new(&ast).build().unwrap();
        let Some(ModelDecl::Alias(alias)) = schema.model("Tree") else {
            panic!("Tree should be an alias");
        };
        assert_eq!(alias.inner, TypeNode::list(TypeNode::reference("Tree")));
    }

    #[test]
    fn test_reference_to_service_dangles() {
        let mut service = post_service();
        service.methods[0].output = TypeExpr::ident("PostService");
        let ast = unit(vec![post()], vec![service]);
        assert!(matches!(
            SchemaBuilder::new(&ast).build(),
            Err(Error::DanglingReference { name, .. }) if name == "PostService"
        ));
    }

    #[test]
    fn test_metadata_layers_merge_in_order() {
        let mut model = post();
        if let ModelKindAst::Struct {
            fields,
            field_defaults,
        } = &mut model.kind
        {
            *field_defaults = Metadata::new().with("indexed", true);
            fields[0].metadata = Metadata::new().with("unique", true);
        }
        let mut service = post_service();
        service.metadata = Metadata::new().with("auth", "user");
        service.methods[0].metadata = Metadata::new().with("cache", 60i64);

        let mut ast = unit(vec![model], vec![service]);
        ast.defaults = DefaultsAst {
            fields: Metadata::new().with("indexed", false).with("nullable", false),
            methods: Metadata::new().with("auth", "none").with("cache", 0i64),
        };

        let schema = SchemaBuilder::new(&ast).build().unwrap();

        let Some(ModelDecl::Struct(post)) = schema.model("Post") else {
            panic!("Post should be a struct");
        };
        let slug = &post.fields["slug"].metadata;
        assert_eq!(slug.get("indexed"), Some(&MetaValue::Bool(true)));
        assert_eq!(slug.get("nullable"), Some(&MetaValue::Bool(false)));
        assert_eq!(slug.get("unique"), Some(&MetaValue::Bool(true)));
        let keys: Vec<_> = slug.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["indexed", "nullable", "unique"]);

        let find_one = &schema.service("PostService").unwrap().methods["findOne"].metadata;
        assert_eq!(find_one.get_str("auth"), Some("user"));
        assert_eq!(find_one.get("cache"), Some(&MetaValue::Integer(60)));
    }
}

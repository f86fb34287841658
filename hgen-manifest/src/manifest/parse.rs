//! Schema file parsing and lowering to the unresolved AST.

use std::path::Path;

use hgen_ir::{
    MetaValue, Metadata,
    ast::{
        DefaultsAst, FieldAst, MethodAst, ModelAst, ModelKindAst, ParamAst, SchemaAst, ServiceAst,
        VariantAst,
    },
};
use tracing::debug;

use super::{Manifest, Model, Service, Variants};
use crate::{Result, error::SourceContext, validate::ParseContext};

impl Manifest {
    /// Lower the manifest into the unresolved AST.
    ///
    /// Names are validated as identifiers and type expressions are parsed
    /// here. Primitive kinds and references are left for the schema builder.
    pub fn to_ast(&self, src: &str, filename: &str) -> Result<SchemaAst> {
        let ctx = ParseContext::new(src, filename);

        let name = match &self.schema.name {
            Some(name) => {
                ctx.validate_name(name, "schema")?;
                name.clone()
            }
            None => unit_name(filename),
        };
        check_metadata(&ctx, "defaults.fields", &self.defaults.fields)?;
        check_metadata(&ctx, "defaults.methods", &self.defaults.methods)?;

        let mut models = Vec::with_capacity(self.models.len());
        for (name, model) in &self.models {
            ctx.validate_name(name, "model")?;
            models.push(lower_model(&ctx.push(name), name, model)?);
        }

        let mut services = Vec::with_capacity(self.services.len());
        for (name, service) in &self.services {
            ctx.validate_name(name, "service")?;
            services.push(lower_service(&ctx.push(name), name, service)?);
        }

        debug!(
            unit = %name,
            models = models.len(),
            services = services.len(),
            "parsed schema file"
        );
        Ok(SchemaAst {
            name,
            defaults: DefaultsAst {
                fields: self.defaults.fields.clone(),
                methods: self.defaults.methods.clone(),
            },
            models,
            services,
        })
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    toml::from_str(content).map_err(|e| source_ctx.parse_error(e))
}

/// Unit name derived from a file name: the stem up to the first dot.
fn unit_name(filename: &str) -> String {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("schema")
        .to_string()
}

fn lower_model(ctx: &ParseContext<'_>, name: &str, model: &Model) -> Result<ModelAst> {
    let kind = match model {
        Model::Struct {
            fields,
            field_defaults,
            ..
        } => {
            check_metadata(ctx, &ctx.location("field_defaults"), field_defaults)?;
            let mut lowered = Vec::with_capacity(fields.len());
            for (field, spec) in fields {
                ctx.validate_name(field, "field")?;
                let metadata = spec.metadata();
                check_metadata(ctx, &ctx.location(field), &metadata)?;
                lowered.push(FieldAst {
                    name: field.clone(),
                    ty: ctx.parse_type(field, spec.ty())?,
                    metadata,
                });
            }
            ModelKindAst::Struct {
                fields: lowered,
                field_defaults: field_defaults.clone(),
            }
        }
        Model::Enum { variants, .. } => {
            let variants: Vec<VariantAst> = match variants {
                Variants::List(names) => names
                    .iter()
                    .map(|name| VariantAst {
                        name: name.clone(),
                        value: None,
                    })
                    .collect(),
                Variants::Table(table) => table
                    .iter()
                    .map(|(name, value)| VariantAst {
                        name: name.clone(),
                        value: Some(value.clone()),
                    })
                    .collect(),
            };
            if variants.is_empty() {
                return Err(ctx.validation_error(
                    name,
                    format!("enum '{name}' must declare at least one variant"),
                ));
            }
            for variant in &variants {
                ctx.validate_name(&variant.name, "variant")?;
            }
            ModelKindAst::Enum { variants }
        }
        Model::Alias { inner, .. } => ModelKindAst::Alias {
            inner: ctx.parse_type("inner", inner)?,
        },
        Model::External { inner, .. } => ModelKindAst::External {
            representation: ctx.parse_type("inner", inner)?,
        },
    };

    check_metadata(ctx, name, model.metadata())?;
    Ok(ModelAst {
        name: name.to_string(),
        kind,
        metadata: model.metadata().clone(),
    })
}

fn lower_service(ctx: &ParseContext<'_>, name: &str, service: &Service) -> Result<ServiceAst> {
    let mut methods = Vec::with_capacity(service.methods.len());
    for (method_name, method) in &service.methods {
        ctx.validate_name(method_name, "method")?;
        let method_ctx = ctx.push(method_name);
        check_metadata(ctx, &ctx.location(method_name), &method.metadata)?;

        let mut inputs = Vec::with_capacity(method.inputs.len());
        for (input, ty) in &method.inputs {
            method_ctx.validate_name(input, "input")?;
            inputs.push(ParamAst {
                name: input.clone(),
                ty: method_ctx.parse_type(input, ty)?,
            });
        }

        methods.push(MethodAst {
            name: method_name.clone(),
            inputs,
            output: method_ctx.parse_type("output", &method.output)?,
            metadata: method.metadata.clone(),
        });
    }

    check_metadata(ctx, name, &service.metadata)?;
    Ok(ServiceAst {
        name: name.to_string(),
        methods,
        metadata: service.metadata.clone(),
    })
}

/// Reject `nan` and `inf` anywhere in `metadata`, JSON cannot carry them.
fn check_metadata(ctx: &ParseContext<'_>, owner: &str, metadata: &Metadata) -> Result<()> {
    metadata
        .iter()
        .try_for_each(|(key, value)| check_meta_value(ctx, owner, key, key, value))
}

fn check_meta_value(
    ctx: &ParseContext<'_>,
    owner: &str,
    key: &str,
    path: &str,
    value: &MetaValue,
) -> Result<()> {
    match value {
        MetaValue::Float(number) if !number.is_finite() => Err(ctx.validation_error(
            key,
            format!("metadata '{path}' of '{owner}' must be a finite number, found {number}"),
        )),
        MetaValue::List(items) => items
            .iter()
            .try_for_each(|item| check_meta_value(ctx, owner, key, path, item)),
        MetaValue::Table(table) => table.iter().try_for_each(|(inner, value)| {
            check_meta_value(ctx, owner, inner, &format!("{path}.{inner}"), value)
        }),
        MetaValue::Bool(_) | MetaValue::Integer(_) | MetaValue::Float(_) | MetaValue::String(_) => {
            Ok(())
        }
    }
}

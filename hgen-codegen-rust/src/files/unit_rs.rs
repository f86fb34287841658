//! The `<unit>.rs` module: models, transport, consumers, providers and `SCHEMA`.

use hgen_codegen::{
    TypeMapper,
    annotations::{self, external_module},
    builder::Renderable,
    generation::ImportCollector,
    mappers::RustTypeMapper,
    naming::RUST_NAMING,
    recursion::is_recursive_alias,
    reflect,
};
use hgen_core::to_pascal_case;
use hgen_ir::{MethodDecl, ModelDecl, Schema, ServiceDecl, TypeNode};

use super::external_rs::{default_module, unit_module};
use crate::{
    ast::{Const, Enum, Field, Fn, Impl, Param, Struct, Trait, TypeAlias, Variant},
    recursion,
    rust_file::{RustFile, Use},
};

const MODEL_DERIVES: [&str; 5] = ["Debug", "Clone", "PartialEq", "Serialize", "Deserialize"];

const ENUM_DERIVES: [&str; 10] = [
    "Debug",
    "Clone",
    "Copy",
    "PartialEq",
    "Eq",
    "PartialOrd",
    "Ord",
    "Hash",
    "Serialize",
    "Deserialize",
];

/// Future type returned by transport and provider methods.
fn future_of(output: &str) -> String {
    format!("impl std::future::Future<Output = Result<{output}, Self::Error>> + Send")
}

/// A `serde(rename)` attribute when the Rust name differs from the wire name.
fn rename_attr(rust_name: &str, wire_name: &str) -> Option<String> {
    (rust_name.trim_start_matches("r#") != wire_name)
        .then(|| format!("serde(rename = \"{}\")", wire_name.escape_default()))
}

/// The generated module of one unit.
pub struct UnitRs<'a> {
    schema: &'a Schema,
}

impl<'a> UnitRs<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// File name relative to the output directory.
    pub fn file_name(&self) -> String {
        format!("{}.rs", unit_module(self.schema))
    }

    pub fn render(&self) -> String {
        let mut items: Vec<Box<dyn Renderable>> = Vec::new();

        for model in self.schema.models() {
            if let Some(item) = self.model(model) {
                items.push(item);
            }
        }

        if self.schema.services().next().is_some() {
            items.push(Box::new(transport_trait()));
        }
        for service in self.schema.services() {
            for (name, method) in &service.methods {
                items.push(Box::new(self.inputs_struct(service, name, method)));
            }
            items.push(Box::new(consumer_struct(service)));
            items.push(Box::new(self.consumer_impl(service)));
            items.push(Box::new(self.provider_trait(service)));
        }

        items.push(Box::new(
            Const::raw_str("SCHEMA", &reflect::render_compact(self.schema))
                .doc("Runtime schema document of this unit, as JSON."),
        ));

        let serde = self.uses_serde().then(|| {
            Use::new("serde").symbols(["Deserialize", "Serialize"])
        });

        RustFile::new()
            .use_stmts(serde)
            .use_stmts(self.reexports())
            .add_all(items)
            .render()
    }

    fn uses_serde(&self) -> bool {
        self.schema.services().next().is_some()
            || self.schema.models().any(|m| match m {
                ModelDecl::Struct(_) | ModelDecl::Enum(_) => true,
                ModelDecl::Alias(a) => is_recursive_alias(self.schema, &a.name),
                ModelDecl::External(_) => false,
            })
    }

    /// `pub use` of every external, grouped by module.
    fn reexports(&self) -> Vec<Use> {
        let fallback = default_module(self.schema);
        let mut collector = ImportCollector::new();
        for external in self.schema.externals() {
            let module = external_module(external).unwrap_or(&fallback);
            collector.add(module, &external.name);
        }

        collector
            .iter()
            .map(|(module, symbols)| Use::new(module).symbols(symbols.iter().cloned()).public())
            .collect()
    }

    fn model(&self, model: &ModelDecl) -> Option<Box<dyn Renderable>> {
        let doc = annotations::doc(model.metadata());

        match model {
            ModelDecl::Struct(s) => {
                let mut node = Struct::new(&s.name).derives(MODEL_DERIVES);
                for (name, field) in &s.fields {
                    let rust_name = RUST_NAMING.member_name(name);
                    let mut member = Field::new(
                        &rust_name,
                        recursion::field_type(self.schema, &s.name, &field.ty),
                    );
                    if let Some(doc) = annotations::doc(&field.metadata) {
                        member = member.doc(doc);
                    }
                    if let Some(attr) = rename_attr(&rust_name, name) {
                        member = member.attr(attr);
                    }
                    node = node.field(member);
                }
                if let Some(doc) = doc {
                    node = node.doc(doc);
                }
                Some(Box::new(node))
            }
            ModelDecl::Enum(e) => {
                let mut node = Enum::new(&e.name).derives(ENUM_DERIVES);
                for (name, value) in &e.variants {
                    let mut variant = Variant::new(name);
                    if let Some(attr) = rename_attr(name, value) {
                        variant = variant.attr(attr);
                    }
                    node = node.variant(variant);
                }
                if let Some(doc) = doc {
                    node = node.doc(doc);
                }
                Some(Box::new(node))
            }
            ModelDecl::Alias(a) => Some(alias_item(self.schema, &a.name, &a.inner, doc)),
            // re-exported from its module
            ModelDecl::External(_) => None,
        }
    }

    fn params(&self, method: &MethodDecl) -> Vec<Param> {
        let mapper = RustTypeMapper;
        method
            .inputs
            .iter()
            .map(|(input, ty)| Param::new(RUST_NAMING.member_name(input), mapper.map_type(ty)))
            .collect()
    }

    fn inputs_struct(&self, service: &ServiceDecl, name: &str, method: &MethodDecl) -> Struct {
        let mapper = RustTypeMapper;
        let mut node = Struct::new(inputs_name(service, name))
            .doc(format!(
                "Inputs of [`{}Consumer::{}`].",
                service.name,
                RUST_NAMING.member_name(name)
            ))
            .derives(MODEL_DERIVES);

        for (input, ty) in &method.inputs {
            let rust_name = RUST_NAMING.member_name(input);
            let mut member = Field::new(&rust_name, mapper.map_type(ty));
            if let Some(attr) = rename_attr(&rust_name, input) {
                member = member.attr(attr);
            }
            node = node.field(member);
        }
        node
    }

    fn consumer_impl(&self, service: &ServiceDecl) -> Impl {
        let mapper = RustTypeMapper;
        let methods: Vec<String> = service
            .methods
            .keys()
            .map(|name| RUST_NAMING.member_name(name))
            .collect();
        let mut block = Impl::new(format!("{}Consumer<T>", service.name))
            .generics("T: Transport")
            .method(
                Fn::new(RUST_NAMING.unclaimed("new", &methods))
                    .param(Param::new("transport", "T"))
                    .returns("Self")
                    .body_line("Self { transport }"),
            );

        for (name, method) in &service.methods {
            let bindings = method
                .inputs
                .keys()
                .map(|input| RUST_NAMING.member_name(input))
                .collect::<Vec<_>>();
            let inputs = if bindings.is_empty() {
                format!("{} {{}}", inputs_name(service, name))
            } else {
                format!("{} {{ {} }}", inputs_name(service, name), bindings.join(", "))
            };

            let mut function = Fn::new(RUST_NAMING.member_name(name))
                .async_()
                .param(Param::self_ref())
                .params(self.params(method))
                .returns(format!(
                    "Result<{}, T::Error>",
                    mapper.map_type(&method.output)
                ))
                .body_line(format!(
                    "self.transport.request(\"{}\", {inputs}).await",
                    name.escape_default()
                ));
            if let Some(doc) = annotations::method_doc(service, method) {
                function = function.doc(doc);
            }
            block = block.method(function);
        }
        block
    }

    fn provider_trait(&self, service: &ServiceDecl) -> Trait {
        let mapper = RustTypeMapper;
        let mut node = Trait::new(format!("{}Provider", service.name))
            .associated_type("Error", None);
        if let Some(doc) = annotations::doc(&service.metadata) {
            node = node.doc(doc);
        }

        for (name, method) in &service.methods {
            let mut function = Fn::new(RUST_NAMING.member_name(name))
                .param(Param::self_ref())
                .params(self.params(method))
                .returns(future_of(&mapper.map_type(&method.output)));
            if let Some(doc) = annotations::method_doc(service, method) {
                function = function.doc(doc);
            }
            node = node.method(function);
        }
        node
    }
}

/// An alias as a `type` item, or as a transparent newtype when it refers
/// back to itself, which a `type` item cannot.
pub(crate) fn alias_item(
    schema: &Schema,
    name: &str,
    inner: &TypeNode,
    doc: Option<&str>,
) -> Box<dyn Renderable> {
    if is_recursive_alias(schema, name) {
        let mut node = Struct::new(name)
            .derives(MODEL_DERIVES)
            .attr("serde(transparent)")
            .newtype(recursion::field_type(schema, name, inner));
        if let Some(doc) = doc {
            node = node.doc(doc);
        }
        return Box::new(node);
    }

    let mut alias = TypeAlias::new(name, RustTypeMapper.map_type(inner));
    if let Some(doc) = doc {
        alias = alias.doc(doc);
    }
    Box::new(alias)
}

fn inputs_name(service: &ServiceDecl, method: &str) -> String {
    format!("{}{}Inputs", service.name, to_pascal_case(method))
}

fn consumer_struct(service: &ServiceDecl) -> Struct {
    let mut node = Struct::new(format!("{}Consumer", service.name))
        .generics("T: Transport")
        .derive("Debug")
        .derive("Clone")
        .field(Field::new("transport", "T").private());
    if let Some(doc) = annotations::doc(&service.metadata) {
        node = node.doc(doc);
    }
    node
}

/// The injected invocation primitive every consumer delegates to.
fn transport_trait() -> Trait {
    Trait::new("Transport")
        .doc("Carries a method call to a provider and decodes its answer.")
        .associated_type("Error", None)
        .method(
            Fn::new("request")
                .generics("I, O")
                .param(Param::self_ref())
                .param(Param::new("method", "&str"))
                .param(Param::new("inputs", "I"))
                .returns(future_of("O"))
                .where_("I: Serialize + Send")
                .where_("O: serde::de::DeserializeOwned"),
        )
}

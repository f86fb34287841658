//! The `<unit>.ts` module: declarations, consumers, providers and `$schema`.

use hgen_codegen::{
    TypeMapper,
    annotations::{self, external_module},
    builder::Renderable,
    generation::ImportCollector,
    mappers::{RecursiveAliasMapper, TypeScriptTypeMapper},
    naming::TYPESCRIPT_NAMING,
    recursion::is_recursive_alias,
    reflect,
};
use hgen_ir::{MethodDecl, ModelDecl, Schema, ServiceDecl, TypeNode};

use super::external_ts::default_module;
use crate::{
    ast::{
        Class, ClassMethod, Const, Enum, Import, Interface, InterfaceField, Param, Signature,
        TypeAlias, string_literal,
    },
    code_file::CodeFile,
};

/// Type of the injected invocation primitive.
pub const REQUEST_TYPE: &str = "(method: string, inputs: any) => Promise<any>";

/// The generated module of one unit.
pub struct UnitTs<'a> {
    schema: &'a Schema,
}

impl<'a> UnitTs<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// File name relative to the output directory.
    pub fn file_name(&self) -> String {
        format!("{}.ts", self.schema.name())
    }

    pub fn render(&self) -> String {
        let mut declarations: Vec<Box<dyn Renderable>> = Vec::new();

        for model in self.schema.models() {
            if let Some(node) = self.model(model) {
                declarations.push(node);
            }
        }
        for service in self.schema.services() {
            declarations.push(Box::new(self.consumer(service)));
            declarations.push(Box::new(self.provider(service)));
        }
        declarations.push(Box::new(
            Const::new("$schema", reflect::render_compact(self.schema))
                .as_const()
                .prettier_ignore(),
        ));

        CodeFile::new()
            .imports(self.imports())
            .add_all(declarations)
            .render()
    }

    /// One type-only import per module, covering every external.
    fn imports(&self) -> Vec<Import> {
        let fallback = default_module(self.schema);
        let mut collector = ImportCollector::new();
        for external in self.schema.externals() {
            let module = external_module(external).unwrap_or(&fallback);
            collector.add(module, &external.name);
        }

        collector
            .iter()
            .map(|(module, symbols)| {
                symbols
                    .iter()
                    .fold(Import::new(module), |import, symbol| import.named(symbol))
                    .type_only()
            })
            .collect()
    }

    fn model(&self, model: &ModelDecl) -> Option<Box<dyn Renderable>> {
        let mapper = TypeScriptTypeMapper;
        let doc = annotations::doc(model.metadata());

        match model {
            ModelDecl::Struct(s) => {
                let mut interface = Interface::new(&s.name);
                for (name, field) in &s.fields {
                    let mut member = InterfaceField::new(name, mapper.map_type(&field.ty));
                    if field.ty.is_nullable() {
                        member = member.optional();
                    }
                    if let Some(doc) = annotations::doc(&field.metadata) {
                        member = member.doc(doc);
                    }
                    interface = interface.field_with(member);
                }
                if let Some(doc) = doc {
                    interface = interface.doc(doc);
                }
                Some(Box::new(interface))
            }
            ModelDecl::Enum(e) => {
                let mut node = e
                    .variants
                    .iter()
                    .fold(Enum::new(&e.name), |node, (name, value)| {
                        node.variant(name, value)
                    });
                if let Some(doc) = doc {
                    node = node.doc(doc);
                }
                Some(Box::new(node))
            }
            ModelDecl::Alias(a) => {
                let mut alias = TypeAlias::new(&a.name, alias_body(self.schema, &a.name, &a.inner));
                if let Some(doc) = doc {
                    alias = alias.doc(doc);
                }
                Some(Box::new(alias))
            }
            // imported, never re-declared
            ModelDecl::External(_) => None,
        }
    }

    fn signature(&self, service: &ServiceDecl, name: &str, method: &MethodDecl) -> Signature {
        let mapper = TypeScriptTypeMapper;
        let params = method.inputs.iter().map(|(input, ty)| {
            Param::new(TYPESCRIPT_NAMING.member_name(input), mapper.map_type(ty))
        });

        let signature = Signature::new(name, format!("Promise<{}>", mapper.map_type(&method.output)))
            .params(params);
        match annotations::method_doc(service, method) {
            Some(doc) => signature.doc(doc),
            None => signature,
        }
    }

    fn consumer(&self, service: &ServiceDecl) -> Class {
        let methods: Vec<String> = service.methods.keys().cloned().collect();
        let request = TYPESCRIPT_NAMING.unclaimed("request", &methods);
        let mut class = Class::new(format!("{}Consumer", service.name))
            .constructor_param(Param::new(format!("protected {request}"), REQUEST_TYPE));
        if let Some(doc) = annotations::doc(&service.metadata) {
            class = class.doc(doc);
        }

        for (name, method) in &service.methods {
            let call = format!(
                "return this.{request}({}, {});",
                string_literal(name),
                input_bag(method)
            );
            class = class.method(ClassMethod::new(self.signature(service, name, method)).line(call));
        }
        class
    }

    fn provider(&self, service: &ServiceDecl) -> Interface {
        let mut interface = Interface::new(format!("{}Provider", service.name));
        if let Some(doc) = annotations::doc(&service.metadata) {
            interface = interface.doc(doc);
        }

        for (name, method) in &service.methods {
            interface = interface.method(self.signature(service, name, method));
        }
        interface
    }
}

/// Right-hand side of an alias declaration.
pub(crate) fn alias_body(schema: &Schema, name: &str, inner: &TypeNode) -> String {
    if is_recursive_alias(schema, name) {
        RecursiveAliasMapper::new(schema, name).map_type(inner)
    } else {
        TypeScriptTypeMapper.map_type(inner)
    }
}

/// The object literal handed to `request`, keyed by the declared input names.
fn input_bag(method: &MethodDecl) -> String {
    if method.inputs.is_empty() {
        return "{}".to_string();
    }

    let entries = method
        .inputs
        .keys()
        .map(|input| {
            let binding = TYPESCRIPT_NAMING.member_name(input);
            if binding == *input {
                binding
            } else {
                format!("{input}: {binding}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {entries} }}")
}

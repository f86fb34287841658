//! The `<unit>.dart` library: data classes, enums, typedefs and `$schema`.

use hgen_codegen::{
    TypeMapper,
    annotations::{self, external_module},
    builder::Renderable,
    generation::ImportCollector,
    mappers::{DartRecursiveAliasMapper, DartTypeMapper},
    naming::DART_NAMING,
    recursion::is_recursive_alias,
    reflect,
};
use hgen_ir::{ModelDecl, Schema, TypeNode};

use super::external_dart::default_module;
use crate::{
    ast::{ClassField, Const, DataClass, Enum, Import, Part, Typedef},
    dart_file::DartFile,
};

/// Library json_serializable annotations come from.
pub const JSON_ANNOTATION: &str = "package:json_annotation/json_annotation.dart";

/// Members every Dart enum already has.
const ENUM_MEMBERS: &[&str] = &["index", "name", "values"];

/// The generated library of one unit.
///
/// Services have no Dart rendering; the library carries the models and
/// the runtime schema document.
pub struct UnitDart<'a> {
    schema: &'a Schema,
}

impl<'a> UnitDart<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn file_name(&self) -> String {
        format!("{}.dart", self.schema.name())
    }

    /// The part `build_runner` writes the serializers into.
    pub fn part_name(&self) -> String {
        format!("{}.g.dart", self.schema.name())
    }

    pub fn render(&self) -> String {
        let mut items: Vec<Box<dyn Renderable>> = self
            .schema
            .models()
            .filter_map(|model| self.model(model))
            .collect();
        items.push(Box::new(
            Const::string("$schema", &reflect::render_compact(self.schema))
                .doc("Runtime schema document of this unit, as JSON."),
        ));

        let mut file = DartFile::new().imports(self.imports());
        // json_serializable only writes the part for annotated classes
        if self
            .schema
            .models()
            .any(|model| matches!(model, ModelDecl::Struct(_)))
        {
            file = file.part(Part::new(self.part_name()));
        }
        file.add_all(items).render()
    }

    fn imports(&self) -> Vec<Import> {
        let mut imports = Vec::new();
        if self
            .schema
            .models()
            .any(|model| matches!(model, ModelDecl::Struct(_) | ModelDecl::Enum(_)))
        {
            imports.push(Import::new(JSON_ANNOTATION));
        }

        let fallback = default_module(self.schema);
        let mut collector = ImportCollector::new();
        for external in self.schema.externals() {
            let module = external_module(external).unwrap_or(&fallback);
            collector.add(module, &external.name);
        }
        imports.extend(
            collector
                .iter()
                .map(|(module, symbols)| Import::new(module).show(symbols.iter().cloned())),
        );
        imports
    }

    fn model(&self, model: &ModelDecl) -> Option<Box<dyn Renderable>> {
        let doc = annotations::doc(model.metadata());

        match model {
            ModelDecl::Struct(s) => {
                let mut class = DataClass::new(&s.name);
                for (name, field) in &s.fields {
                    let ident = DART_NAMING.member_name(name);
                    let mut member = ClassField::new(&ident, DartTypeMapper.map_type(&field.ty));
                    if ident != *name {
                        member = member.json_key(name);
                    }
                    if let Some(doc) = annotations::doc(&field.metadata) {
                        member = member.doc(doc);
                    }
                    class = class.field(member);
                }
                if let Some(doc) = doc {
                    class = class.doc(doc);
                }
                Some(Box::new(class))
            }
            ModelDecl::Enum(e) => {
                let mut node = Enum::new(&e.name);
                for (name, value) in &e.variants {
                    node = node.variant(enum_member(name), value);
                }
                if let Some(doc) = doc {
                    node = node.doc(doc);
                }
                Some(Box::new(node))
            }
            ModelDecl::Alias(a) => {
                let node = Typedef::new(&a.name, alias_body(self.schema, &a.name, &a.inner));
                Some(Box::new(match doc {
                    Some(doc) => node.doc(doc),
                    None => node,
                }))
            }
            // imported from their module
            ModelDecl::External(_) => None,
        }
    }
}

/// Right-hand side of a typedef.
pub(crate) fn alias_body(schema: &Schema, name: &str, inner: &TypeNode) -> String {
    if is_recursive_alias(schema, name) {
        DartRecursiveAliasMapper::new(schema).map_type(inner)
    } else {
        DartTypeMapper.map_type(inner)
    }
}

fn enum_member(name: &str) -> String {
    let ident = DART_NAMING.safe_name(name);
    if ENUM_MEMBERS.contains(&ident.as_str()) {
        (DART_NAMING.pad_member)(&ident)
    } else {
        ident
    }
}

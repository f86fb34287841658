//! The user-owned `<unit>.external.dart` stub.

use hgen_codegen::{
    annotations::{self, default_module_externals, external_module},
    generation::ImportCollector,
};
use hgen_ir::{ModelDecl, Schema};

use super::unit_dart::alias_body;
use crate::{
    ast::{Import, Typedef},
    dart_file::DartFile,
};

/// Library externals without a `module` are imported from.
pub fn default_module(schema: &Schema) -> String {
    format!("{}.external.dart", schema.name())
}

/// Starting point for the externals left to the default module.
///
/// Each external becomes a typedef of its declared representation, which
/// the user is free to replace with a real class.
pub struct ExternalDart<'a> {
    schema: &'a Schema,
}

impl<'a> ExternalDart<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn file_name(&self) -> String {
        default_module(self.schema)
    }

    /// Whether the unit needs the stub at all.
    pub fn is_needed(&self) -> bool {
        !default_module_externals(self.schema).is_empty()
    }

    pub fn render(&self) -> String {
        let typedefs: Vec<_> = default_module_externals(self.schema)
            .into_iter()
            .map(|external| {
                let node = Typedef::new(
                    &external.name,
                    alias_body(self.schema, &external.name, &external.representation),
                );
                match annotations::doc(&external.metadata) {
                    Some(doc) => node.doc(doc),
                    None => node,
                }
            })
            .collect();

        DartFile::new()
            .comment(format!(
                "Representations of the external types used by {}.dart.",
                self.schema.name()
            ))
            .comment("Created once if missing and never overwritten.")
            .imports(self.imports())
            .add_all(typedefs)
            .render()
    }

    fn imports(&self) -> Vec<Import> {
        let unit = format!("{}.dart", self.schema.name());
        let mut collector = ImportCollector::new();

        for external in default_module_externals(self.schema) {
            for name in external.representation.references() {
                match self.schema.model(name) {
                    Some(ModelDecl::External(other)) => {
                        // the others are declared in this file
                        if let Some(module) = external_module(other) {
                            collector.add(module, name);
                        }
                    }
                    Some(_) => collector.add(&unit, name),
                    None => {}
                }
            }
        }

        collector
            .iter()
            .map(|(module, symbols)| Import::new(module).show(symbols.iter().cloned()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use hgen_ir::SchemaBuilder;

    use super::*;

    fn build(content: &str) -> Schema {
        let ast = hgen_manifest::parse_str(content).expect("Failed to parse test schema");
        SchemaBuilder::new(&ast).build().expect("schema should build")
    }

    #[test]
    fn test_not_needed_without_default_module_externals() {
        let schema = build(
            r#"
            [models.Money]
            type = "external"
            inner = "string"
            metadata = { module = "package:money/money.dart" }
            "#,
        );

        assert!(!ExternalDart::new(&schema).is_needed());
    }

    #[test]
    fn test_representation_references_are_imported() {
        let schema = build(
            r#"
            [schema]
            name = "shop"

            [models.Currency]
            type = "enum"
            variants = ["EUR", "USD"]

            [models.Money]
            type = "external"
            inner = "Map<Currency, int64>"
            metadata = { doc = "Amounts per currency." }
            "#,
        );

        let stub = ExternalDart::new(&schema);
        assert!(stub.is_needed());
        assert_eq!(stub.file_name(), "shop.external.dart");
        assert_eq!(
            stub.render(),
            concat!(
                "// Representations of the external types used by shop.dart.\n",
                "// Created once if missing and never overwritten.\n",
                "\n",
                "import 'shop.dart' show Currency;\n",
                "\n",
                "/// Amounts per currency.\n",
                "typedef Money = Map<Currency, int>;\n",
            )
        );
    }
}

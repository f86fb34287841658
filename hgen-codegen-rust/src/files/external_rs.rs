//! The user-owned `<unit>_external.rs` stub.

use hgen_codegen::{
    annotations::{self, default_module_externals, external_module},
    generation::ImportCollector,
    recursion::is_recursive_alias,
};
use hgen_core::to_snake_case;
use hgen_ir::{ModelDecl, Schema};

use super::unit_rs::alias_item;
use crate::rust_file::{RustFile, Use};

/// Module name of the generated unit, e.g. `blog` or `order_book`.
pub fn unit_module(schema: &Schema) -> String {
    to_snake_case(schema.name())
}

/// Path externals without a `module` are re-exported from.
///
/// The stub is a sibling of the unit module, so both resolve through `super`.
pub fn default_module(schema: &Schema) -> String {
    format!("super::{}_external", unit_module(schema))
}

/// Starting point for the externals left to the default module.
pub struct ExternalRs<'a> {
    schema: &'a Schema,
}

impl<'a> ExternalRs<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn file_name(&self) -> String {
        format!("{}_external.rs", unit_module(self.schema))
    }

    pub fn is_needed(&self) -> bool {
        !default_module_externals(self.schema).is_empty()
    }

    pub fn render(&self) -> String {
        let externals = default_module_externals(self.schema);
        let serde = externals
            .iter()
            .any(|external| is_recursive_alias(self.schema, &external.name))
            .then(|| Use::new("serde").symbols(["Deserialize", "Serialize"]));

        let aliases = externals
            .into_iter()
            .map(|external| {
                alias_item(
                    self.schema,
                    &external.name,
                    &external.representation,
                    annotations::doc(&external.metadata),
                )
            })
            .collect::<Vec<_>>();

        RustFile::new()
            .inner_doc(format!(
                "Representations of the external types used by `{}.rs`.",
                unit_module(self.schema)
            ))
            .inner_doc("")
            .inner_doc("Created once if missing and never overwritten.")
            .use_stmts(serde)
            .use_stmts(self.uses())
            .add_all(aliases)
            .render()
    }

    fn uses(&self) -> Vec<Use> {
        let unit = format!("super::{}", unit_module(self.schema));
        let mut collector = ImportCollector::new();

        for external in default_module_externals(self.schema) {
            for name in external.representation.references() {
                match self.schema.model(name) {
                    Some(ModelDecl::External(other)) => {
                        // the rest are declared right here
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
            .map(|(module, symbols)| Use::new(module).symbols(symbols.iter().cloned()))
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
    fn test_unit_module_is_snake_case() {
        let schema = build(
            r#"
            [schema]
            name = "orderBook"
            "#,
        );

        assert_eq!(unit_module(&schema), "order_book");
        assert_eq!(default_module(&schema), "super::order_book_external");
        assert_eq!(ExternalRs::new(&schema).file_name(), "order_book_external.rs");
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

            [models.Decimal]
            type = "external"
            inner = "string"
            metadata = { module = "rust_decimal" }

            [models.Money]
            type = "external"
            inner = "Map<Currency, Decimal>"
            metadata = { doc = "Amounts per currency." }
            "#,
        );

        let stub = ExternalRs::new(&schema);
        assert!(stub.is_needed());
        assert_eq!(
            stub.render(),
            concat!(
                "//! Representations of the external types used by `shop.rs`.\n",
                "//!\n",
                "//! Created once if missing and never overwritten.\n",
                "\n",
                "use super::shop::Currency;\n",
                "use rust_decimal::Decimal;\n",
                "\n",
                "/// Amounts per currency.\n",
                "pub type Money = std::collections::BTreeMap<Currency, Decimal>;\n",
            )
        );
    }

    #[test]
    fn test_recursive_representation_becomes_newtype() {
        let schema = build(
            r#"
            [schema]
            name = "docs"

            [models.Json]
            type = "external"
            inner = "Map<string, Json>"
            "#,
        );

        assert_eq!(
            ExternalRs::new(&schema).render(),
            concat!(
                "//! Representations of the external types used by `docs.rs`.\n",
                "//!\n",
                "//! Created once if missing and never overwritten.\n",
                "\n",
                "use serde::{Deserialize, Serialize};\n",
                "\n",
                "#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]\n",
                "#[serde(transparent)]\n",
                "pub struct Json(pub std::collections::BTreeMap<String, Json>);\n",
            )
        );
    }
}

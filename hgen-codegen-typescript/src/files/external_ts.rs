//! The user-owned `<unit>.external.ts` stub.

use hgen_codegen::{
    annotations::{self, default_module_externals, external_module},
    generation::ImportCollector,
};
use hgen_ir::{ModelDecl, Schema};

use super::unit_ts::alias_body;
use crate::{
    ast::{Import, TypeAlias},
    code_file::CodeFile,
};

/// Module specifier externals without a `module` are imported from.
pub fn default_module(schema: &Schema) -> String {
    format!("./{}.external", schema.name())
}

/// Starting point for the externals left to the default module.
///
/// Each external becomes an alias of its declared representation, which
/// the user is free to replace with a real implementation.
pub struct ExternalTs<'a> {
    schema: &'a Schema,
}

impl<'a> ExternalTs<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn file_name(&self) -> String {
        format!("{}.external.ts", self.schema.name())
    }

    /// Whether the unit needs the stub at all.
    pub fn is_needed(&self) -> bool {
        !default_module_externals(self.schema).is_empty()
    }

    pub fn render(&self) -> String {
        let externals = default_module_externals(self.schema);

        let aliases: Vec<_> = externals
            .iter()
            .map(|external| {
                let alias = TypeAlias::new(
                    &external.name,
                    alias_body(self.schema, &external.name, &external.representation),
                );
                match annotations::doc(&external.metadata) {
                    Some(doc) => alias.doc(doc),
                    None => alias,
                }
            })
            .collect();

        CodeFile::new()
            .comment(format!(
                "Representations of the external types used by {}.ts.",
                self.schema.name()
            ))
            .comment("Created once if missing and never overwritten.")
            .imports(self.imports())
            .add_all(aliases)
            .render()
    }

    /// Imports for the names the representations refer to.
    fn imports(&self) -> Vec<Import> {
        let unit_module = format!("./{}", self.schema.name());
        let mut collector = ImportCollector::new();

        for external in default_module_externals(self.schema) {
            for name in external.representation.references() {
                match self.schema.model(name) {
                    // declared in this file
                    Some(ModelDecl::External(other)) if external_module(other).is_none() => {}
                    Some(ModelDecl::External(other)) => {
                        if let Some(module) = external_module(other) {
                            collector.add(module, name);
                        }
                    }
                    Some(_) => collector.add(&unit_module, name),
                    None => {}
                }
            }
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
}

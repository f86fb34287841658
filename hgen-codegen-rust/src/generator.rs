//! Rust code generator.

use std::path::Path;

use eyre::Result;
use hgen_codegen::{
    generation::{FileEntry, FileRegistry},
    language::{GenerateResult, LanguageCodegen, PreviewFile},
};
use hgen_ir::Schema;
use tracing::debug;

use crate::files::{ExternalRs, UnitRs};

/// Rust code generator for one unit.
pub struct Generator<'a> {
    schema: &'a Schema,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        self.registry().preview()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let result = self.registry().write_all(output_dir)?;
        debug!(
            unit = self.schema.name(),
            written = result.written.len(),
            unchanged = result.unchanged.len(),
            skipped = result.skipped.len(),
            "rust generated"
        );
        Ok(result)
    }
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    fn registry(&self) -> FileRegistry {
        let mut registry = FileRegistry::new();

        let unit = UnitRs::new(self.schema);
        registry.register(FileEntry::generated(unit.file_name(), unit.render()));

        let external = ExternalRs::new(self.schema);
        if external.is_needed() {
            registry.register(FileEntry::stub(external.file_name(), external.render()));
        }

        registry
    }
}

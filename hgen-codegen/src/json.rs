//! JSON target: the runtime schema document as a standalone file.

use std::path::Path;

use eyre::Result;
use hgen_ir::Schema;

use crate::{
    generation::{FileEntry, FileRegistry},
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    reflect,
};

/// Writes `<unit>.schema.json` for tooling that does not consume
/// generated code.
pub struct JsonGenerator<'a> {
    schema: &'a Schema,
}

impl<'a> JsonGenerator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    fn registry(&self) -> FileRegistry {
        let mut registry = FileRegistry::new();
        let mut body = reflect::render_pretty(self.schema);
        body.push('\n');
        registry.register(FileEntry::data(
            format!("{}.schema.{}", self.schema.name(), self.file_extension()),
            body,
        ));
        registry
    }
}

impl LanguageCodegen for JsonGenerator<'_> {
    fn language(&self) -> &'static str {
        "json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        self.registry().preview()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        self.registry().write_all(output_dir)
    }
}

#[cfg(test)]
mod tests {
    use hgen_ir::SchemaBuilder;
    use tempfile::TempDir;

    use super::*;

    fn build(content: &str) -> Schema {
        let ast = hgen_manifest::parse_str(content).expect("Failed to parse test schema");
        SchemaBuilder::new(&ast).build().expect("schema should build")
    }

    const BLOG: &str = r#"
        [schema]
        name = "blog"

        [models.Uuid]
        type = "alias"
        inner = "string"
    "#;

    #[test]
    fn test_preview_is_pretty_json_without_marker() {
        let schema = build(BLOG);
        let files = JsonGenerator::new(&schema).preview();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "blog.schema.json");
        assert_eq!(
            files[0].content,
            r#"{
  "version": 1,
  "models": {
    "Uuid": {
      "type": "alias",
      "inner": {
        "type": "string"
      },
      "metadata": {}
    }
  },
  "services": {}
}
"#
        );
    }

    #[test]
    fn test_generate_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let schema = build(BLOG);
        let generator = JsonGenerator::new(&schema);

        let first = generator.generate(temp.path()).unwrap();
        let second = generator.generate(temp.path()).unwrap();

        assert_eq!(first.written, vec!["blog.schema.json"]);
        assert_eq!(second.unchanged, vec!["blog.schema.json"]);
    }
}

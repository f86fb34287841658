//! DartFile abstraction for structured Dart library generation.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

use crate::ast::{Import, Part};

/// A structured representation of a Dart library.
///
/// Sections are rendered in order (leading comment, imports, parts, body)
/// with a blank line between sections and between body declarations.
#[derive(Default)]
pub struct DartFile {
    comment: Vec<String>,
    imports: Vec<Import>,
    parts: Vec<Part>,
    body: Vec<Vec<CodeFragment>>,
}

impl DartFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line to the leading `//` comment.
    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.comment.push(line.into());
        self
    }

    pub fn imports(mut self, imports: impl IntoIterator<Item = Import>) -> Self {
        self.imports.extend(imports);
        self
    }

    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Add body declarations.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new(Indent::DART);
        let mut sections = 0;

        if !self.comment.is_empty() {
            for line in &self.comment {
                builder.push_line(&format!("// {line}"));
            }
            sections += 1;
        }

        if !self.imports.is_empty() {
            if sections > 0 {
                builder.push_blank();
            }
            for import in &self.imports {
                builder.emit(import);
            }
            sections += 1;
        }

        if !self.parts.is_empty() {
            if sections > 0 {
                builder.push_blank();
            }
            for part in &self.parts {
                builder.emit(part);
            }
            sections += 1;
        }

        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 || sections > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Typedef;

    #[test]
    fn test_sections_are_separated() {
        let file = DartFile::new()
            .comment("Hand-written.")
            .imports([
                Import::new("package:json_annotation/json_annotation.dart"),
                Import::new("blog.dart").show(["Post"]),
            ])
            .part(Part::new("blog.g.dart"))
            .add_all([Typedef::new("Slug", "String"), Typedef::new("Rate", "double")]);

        assert_eq!(
            file.render(),
            concat!(
                "// Hand-written.\n",
                "\n",
                "import 'package:json_annotation/json_annotation.dart';\n",
                "import 'blog.dart' show Post;\n",
                "\n",
                "part 'blog.g.dart';\n",
                "\n",
                "typedef Slug = String;\n",
                "\n",
                "typedef Rate = double;\n",
            )
        );
    }

    #[test]
    fn test_body_only() {
        let file = DartFile::new().add_all([Typedef::new("A", "String")]);
        assert_eq!(file.render(), "typedef A = String;\n");
    }
}

//! CodeFile abstraction for structured TypeScript file generation.
//!
//! Provides a high-level API for generating TypeScript files with a
//! leading comment, organized imports and body declarations.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

use crate::ast::Import;

/// A structured representation of a TypeScript file.
///
/// Organizes code into three sections: leading comment, imports, body.
/// Each section is rendered in order with a blank line between sections
/// and between body declarations.
///
/// # Example
///
/// ```ignore
/// let file = CodeFile::new()
///     .import(Import::new("./blog.external").named("Instant").type_only())
///     .add(TypeAlias::new("Slug", "string"))
///     .render();
/// ```
#[derive(Default)]
pub struct CodeFile {
    comment: Vec<String>,
    imports: Vec<Import>,
    body: Vec<Vec<CodeFragment>>,
}

impl CodeFile {
    /// Create a new empty CodeFile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line to the leading `//` comment.
    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.comment.push(line.into());
        self
    }

    /// Add an import statement.
    pub fn import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    /// Add imports from an iterator.
    pub fn imports(mut self, imports: impl IntoIterator<Item = Import>) -> Self {
        self.imports.extend(imports);
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add multiple body elements.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    /// Render the file with TypeScript indentation (2 spaces).
    pub fn render(&self) -> String {
        self.render_with_indent(Indent::TYPESCRIPT)
    }

    /// Render the file with custom indentation.
    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);
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

    /// Check if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.comment.is_empty() && self.imports.is_empty() && self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeAlias;

    #[test]
    fn test_empty_file() {
        let file = CodeFile::new();
        assert!(file.is_empty());
        assert_eq!(file.render(), "");
    }

    #[test]
    fn test_imports_only() {
        let file = CodeFile::new().import(Import::new("./time").named("Instant"));
        assert_eq!(file.render(), "import { Instant } from \"./time\";\n");
    }

    #[test]
    fn test_sections_are_separated() {
        let file = CodeFile::new()
            .comment("Hand-written.")
            .import(Import::new("./blog").named("Post").type_only())
            .add(TypeAlias::new("Money", "string"))
            .add(TypeAlias::new("Rate", "number"));

        assert_eq!(
            file.render(),
            concat!(
                "// Hand-written.\n",
                "\n",
                "import type { Post } from \"./blog\";\n",
                "\n",
                "export type Money = string;\n",
                "\n",
                "export type Rate = number;\n",
            )
        );
    }

    #[test]
    fn test_body_without_imports() {
        let file = CodeFile::new()
            .add(TypeAlias::new("A", "string"))
            .add(TypeAlias::new("B", "number"));

        assert_eq!(file.render(), "export type A = string;\n\nexport type B = number;\n");
    }
}

//! RustFile abstraction for structured Rust file generation.
//!
//! Provides a high-level API for generating Rust files with inner docs,
//! organized use statements and body content.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

/// A Rust use statement.
#[derive(Debug, Clone)]
pub struct Use {
    module: String,
    symbols: Vec<String>,
    is_public: bool,
}

impl Use {
    /// Create a use statement for a module.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbols: Vec::new(),
            is_public: false,
        }
    }

    /// Add a symbol to import from the module.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    /// Add multiple symbols to import.
    pub fn symbols(mut self, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Re-export the symbols (`pub use`).
    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    /// Format the use statement as a string.
    fn format(&self) -> String {
        let vis = if self.is_public { "pub " } else { "" };
        if self.symbols.is_empty() {
            format!("{}use {};", vis, self.module)
        } else if self.symbols.len() == 1 {
            format!("{}use {}::{};", vis, self.module, self.symbols[0])
        } else {
            format!(
                "{}use {}::{{{}}};",
                vis,
                self.module,
                self.symbols.join(", ")
            )
        }
    }
}

impl Renderable for Use {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(self.format())]
    }
}

/// A structured representation of a Rust file.
///
/// Organizes code into inner docs, use groups and body sections. Each use
/// group is its own paragraph, e.g. private imports then re-exports.
///
/// # Example
///
/// ```ignore
/// let file = RustFile::new()
///     .use_stmt(Use::new("serde").symbols(["Deserialize", "Serialize"]))
///     .add(my_struct)
///     .add(my_impl)
///     .render();
/// ```
#[derive(Default)]
pub struct RustFile {
    inner_doc: Vec<String>,
    uses: Vec<Vec<Use>>,
    body: Vec<Vec<CodeFragment>>,
}

impl RustFile {
    /// Create a new empty RustFile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line of module documentation (`//!`).
    pub fn inner_doc(mut self, line: impl Into<String>) -> Self {
        self.inner_doc.push(line.into());
        self
    }

    /// Add a use statement to a group of its own.
    pub fn use_stmt(mut self, use_stmt: Use) -> Self {
        self.uses.push(vec![use_stmt]);
        self
    }

    /// Add a group of use statements; empty groups are dropped.
    pub fn use_stmts(mut self, uses: impl IntoIterator<Item = Use>) -> Self {
        let group: Vec<_> = uses.into_iter().collect();
        if !group.is_empty() {
            self.uses.push(group);
        }
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

    /// Render the file with Rust indentation (4 spaces).
    pub fn render(&self) -> String {
        self.render_with_indent(Indent::RUST)
    }

    /// Render the file with custom indentation.
    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);
        let mut paragraphs = 0;

        if !self.inner_doc.is_empty() {
            for line in &self.inner_doc {
                if line.is_empty() {
                    builder.push_line("//!");
                } else {
                    builder.push_line(&format!("//! {line}"));
                }
            }
            paragraphs += 1;
        }

        for group in &self.uses {
            if paragraphs > 0 {
                builder.push_blank();
            }
            for use_stmt in group {
                builder.emit(use_stmt);
            }
            paragraphs += 1;
        }

        for fragments in &self.body {
            if paragraphs > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
            paragraphs += 1;
        }

        builder.build()
    }

    /// Check if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.inner_doc.is_empty() && self.uses.is_empty() && self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeAlias;

    #[test]
    fn test_empty_file() {
        let file = RustFile::new();
        assert!(file.is_empty());
        assert_eq!(file.render(), "");
    }

    #[test]
    fn test_use_single_symbol() {
        let use_stmt = Use::new("super::blog_external").symbol("Instant").public();
        let mut builder = CodeBuilder::rust();
        builder.emit(&use_stmt);
        assert_eq!(builder.build(), "pub use super::blog_external::Instant;\n");
    }

    #[test]
    fn test_use_multiple_symbols() {
        let use_stmt = Use::new("serde").symbols(["Deserialize", "Serialize"]);
        let mut builder = CodeBuilder::rust();
        builder.emit(&use_stmt);
        assert_eq!(builder.build(), "use serde::{Deserialize, Serialize};\n");
    }

    #[test]
    fn test_paragraphs() {
        let file = RustFile::new()
            .inner_doc("Hand-written.")
            .use_stmt(Use::new("serde").symbol("Serialize"))
            .use_stmts(Vec::new())
            .use_stmts([Use::new("super::time").symbol("Instant").public()])
            .add(TypeAlias::new("Slug", "String"))
            .add(TypeAlias::new("Tag", "String"));

        assert_eq!(
            file.render(),
            concat!(
                "//! Hand-written.\n",
                "\n",
                "use serde::Serialize;\n",
                "\n",
                "pub use super::time::Instant;\n",
                "\n",
                "pub type Slug = String;\n",
                "\n",
                "pub type Tag = String;\n",
            )
        );
    }
}

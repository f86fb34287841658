//! Top-level Dart items: typedefs, constants and directives.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

use super::string_literal;

/// A type alias (`typedef Name = T;`).
#[derive(Debug, Clone)]
pub struct Typedef {
    name: String,
    ty: String,
    doc: Option<String>,
}

impl Typedef {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::new(Indent::DART);
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Typedef {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::rust_doc(doc));
        }
        fragments.push(CodeFragment::line(format!(
            "typedef {} = {};",
            self.name, self.ty
        )));
        fragments
    }
}

/// A top-level `String` constant.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    value: String,
    doc: Option<String>,
}

impl Const {
    /// A constant holding `text`, quoted as a Dart string literal.
    pub fn string(name: impl Into<String>, text: &str) -> Self {
        Self {
            name: name.into(),
            value: string_literal(text),
            doc: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::rust_doc(doc));
        }
        fragments.push(CodeFragment::line(format!(
            "const String {} = {};",
            self.name, self.value
        )));
        fragments
    }
}

/// An `import` directive, optionally limited to some names.
#[derive(Debug, Clone)]
pub struct Import {
    uri: String,
    show: Vec<String>,
}

impl Import {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            show: Vec::new(),
        }
    }

    /// Import only the listed names.
    pub fn show(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.show.extend(names.into_iter().map(Into::into));
        self
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let uri = string_literal(&self.uri);
        let line = if self.show.is_empty() {
            format!("import {uri};")
        } else {
            format!("import {uri} show {};", self.show.join(", "))
        };
        vec![CodeFragment::line(line)]
    }
}

/// A `part` directive.
#[derive(Debug, Clone)]
pub struct Part {
    uri: String,
}

impl Part {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl Renderable for Part {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(format!(
            "part {};",
            string_literal(&self.uri)
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(node: &impl Renderable) -> String {
        let mut builder = CodeBuilder::new(Indent::DART);
        builder.emit(node);
        builder.build()
    }

    #[test]
    fn test_typedef() {
        assert_eq!(
            Typedef::new("Tags", "Set<String>").doc("Labels.").build(),
            "/// Labels.\ntypedef Tags = Set<String>;\n"
        );
    }

    #[test]
    fn test_directives() {
        assert_eq!(
            render(&Import::new("package:json_annotation/json_annotation.dart")),
            "import 'package:json_annotation/json_annotation.dart';\n"
        );
        assert_eq!(
            render(&Import::new("blog.external.dart").show(["Instant", "Money"])),
            "import 'blog.external.dart' show Instant, Money;\n"
        );
        assert_eq!(render(&Part::new("blog.g.dart")), "part 'blog.g.dart';\n");
    }

    #[test]
    fn test_string_const_is_escaped() {
        let code = render(&Const::string("$schema", r#"{"url":"/a/$id"}"#));
        assert_eq!(code, "const String $schema = '{\"url\":\"/a/\\$id\"}';\n");
    }
}

//! Single-line Rust items: type aliases and constants.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A public type alias (`pub type Name = T;`).
#[derive(Debug, Clone)]
pub struct TypeAlias {
    name: String,
    ty: String,
    doc: Option<String>,
}

impl TypeAlias {
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
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for TypeAlias {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::rust_doc(doc));
        }
        fragments.push(CodeFragment::line(format!(
            "pub type {} = {};",
            self.name, self.ty
        )));
        fragments
    }
}

/// A public constant.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    ty: String,
    value: String,
    doc: Option<String>,
}

impl Const {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            value: value.into(),
            doc: None,
        }
    }

    /// A `&str` constant holding `text` verbatim as a raw string literal.
    pub fn raw_str(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, "&str", raw_string_literal(text))
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::rust_doc(doc));
        }
        fragments.push(CodeFragment::line(format!(
            "pub const {}: {} = {};",
            self.name, self.ty, self.value
        )));
        fragments
    }
}

/// Wrap `text` in a raw string literal with enough `#`s to hold it.
pub fn raw_string_literal(text: &str) -> String {
    let mut hashes = 1;
    while text.contains(&format!("\"{}", "#".repeat(hashes))) {
        hashes += 1;
    }
    let fence = "#".repeat(hashes);
    format!("r{fence}\"{text}\"{fence}")
}

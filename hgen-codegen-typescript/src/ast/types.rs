//! TypeScript type-level declarations: aliases and enums.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// An exported type alias (`export type Name = T;`).
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
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for TypeAlias {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::jsdoc(doc));
        }
        fragments.push(CodeFragment::line(format!(
            "export type {} = {};",
            self.name, self.ty
        )));
        fragments
    }
}

/// An exported string enum (`export enum Name { A = "a", }`).
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    variants: Vec<(String, String)>,
    doc: Option<String>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
            doc: None,
        }
    }

    /// Add a variant with its raw string value.
    pub fn variant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variants.push((name.into(), value.into()));
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::jsdoc(doc));
        }

        if self.variants.is_empty() {
            fragments.push(CodeFragment::line(format!("export enum {} {{}}", self.name)));
            return fragments;
        }

        let body = self
            .variants
            .iter()
            .map(|(name, value)| CodeFragment::line(format!("{name} = {},", string_literal(value))))
            .collect();
        fragments.push(CodeFragment::braced(
            format!("export enum {} {{", self.name),
            body,
        ));
        fragments
    }
}

/// Quote a string as a TypeScript literal.
///
/// A JSON string literal is a valid TypeScript string literal.
pub fn string_literal(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

//! Dart enums serialized through `json_annotation`.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

use super::string_literal;

/// A `@JsonEnum()` enum.
///
/// A variant whose wire value differs from its name carries a
/// `@JsonValue(..)`; the others serialize as their name.
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    variants: Vec<(String, Option<String>)>,
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

    /// Add a variant written as `value` on the wire.
    pub fn variant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        let value = (value != name).then_some(value);
        self.variants.push((name, value));
        self
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

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut body = Vec::new();
        for (name, value) in &self.variants {
            if let Some(value) = value {
                body.push(CodeFragment::line(format!(
                    "@JsonValue({})",
                    string_literal(value)
                )));
            }
            body.push(CodeFragment::line(format!("{name},")));
        }

        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::rust_doc(doc));
        }
        fragments.push(CodeFragment::line("@JsonEnum()"));
        fragments.push(CodeFragment::braced(format!("enum {} {{", self.name), body));
        fragments
    }
}

//! TypeScript interface builder.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::Signature;

/// A field in a TypeScript interface.
#[derive(Debug, Clone)]
pub struct InterfaceField {
    pub name: String,
    pub ty: String,
    pub optional: bool,
    pub doc: Option<String>,
}

impl InterfaceField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
            doc: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Builder for exported TypeScript interfaces.
///
/// Fields are rendered before method signatures.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    doc: Option<String>,
    fields: Vec<InterfaceField>,
    methods: Vec<Signature>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.fields.push(InterfaceField::new(name, ty));
        self
    }

    /// Add a field with full configuration.
    pub fn field_with(mut self, field: InterfaceField) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a method signature.
    pub fn method(mut self, signature: Signature) -> Self {
        self.methods.push(signature);
        self
    }

    /// Build the interface as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }

    fn body_fragments(&self) -> Vec<CodeFragment> {
        let mut body = Vec::new();
        for field in &self.fields {
            if let Some(doc) = &field.doc {
                body.push(CodeFragment::jsdoc(doc));
            }
            let optional = if field.optional { "?" } else { "" };
            body.push(CodeFragment::line(format!(
                "{}{}: {};",
                field.name, optional, field.ty
            )));
        }
        for method in &self.methods {
            if let Some(doc) = method.doc_comment() {
                body.push(CodeFragment::jsdoc(doc));
            }
            body.push(CodeFragment::line(format!("{};", method.render())));
        }
        body
    }
}

impl Renderable for Interface {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::jsdoc(doc));
        }

        if self.fields.is_empty() && self.methods.is_empty() {
            fragments.push(CodeFragment::line(format!(
                "export interface {} {{}}",
                self.name
            )));
        } else {
            fragments.push(CodeFragment::braced(
                format!("export interface {} {{", self.name),
                self.body_fragments(),
            ));
        }
        fragments
    }
}

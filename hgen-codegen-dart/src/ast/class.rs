//! Immutable data classes serialized through `json_serializable`.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

use super::string_literal;

/// A `final` field of a [`DataClass`].
#[derive(Debug, Clone)]
pub struct ClassField {
    name: String,
    ty: String,
    json_key: Option<String>,
    doc: Option<String>,
}

impl ClassField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            json_key: None,
            doc: None,
        }
    }

    /// Read and write the field under `key` instead of its own name.
    pub fn json_key(mut self, key: impl Into<String>) -> Self {
        self.json_key = Some(key.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Nullable fields may be left out of the constructor call.
    fn is_required(&self) -> bool {
        !(self.ty.ends_with('?') || self.ty == "Null")
    }
}

/// A `@JsonSerializable()` class with a const constructor taking every
/// field by name.
#[derive(Debug, Clone)]
pub struct DataClass {
    name: String,
    fields: Vec<ClassField>,
    doc: Option<String>,
}

impl DataClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            doc: None,
        }
    }

    pub fn field(mut self, field: ClassField) -> Self {
        self.fields.push(field);
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

    fn constructor(&self) -> CodeFragment {
        if self.fields.is_empty() {
            return CodeFragment::line(format!("const {}();", self.name));
        }

        let params = self
            .fields
            .iter()
            .map(|field| {
                let required = if field.is_required() { "required " } else { "" };
                CodeFragment::line(format!("{required}this.{},", field.name))
            })
            .collect();
        CodeFragment::block(
            format!("const {}({{", self.name),
            params,
            Some("});".to_string()),
        )
    }
}

impl Renderable for DataClass {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut body = Vec::new();
        for field in &self.fields {
            if let Some(doc) = &field.doc {
                body.push(CodeFragment::rust_doc(doc));
            }
            if let Some(key) = &field.json_key {
                body.push(CodeFragment::line(format!(
                    "@JsonKey(name: {})",
                    string_literal(key)
                )));
            }
            body.push(CodeFragment::line(format!("final {} {};", field.ty, field.name)));
        }
        if !body.is_empty() {
            body.push(CodeFragment::blank());
        }

        body.push(self.constructor());
        body.push(CodeFragment::blank());
        body.push(CodeFragment::line(format!(
            "factory {0}.fromJson(Map<String, dynamic> json) => _${0}FromJson(json);",
            self.name
        )));
        body.push(CodeFragment::blank());
        body.push(CodeFragment::line(format!(
            "Map<String, dynamic> toJson() => _${}ToJson(this);",
            self.name
        )));

        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::rust_doc(doc));
        }
        fragments.push(CodeFragment::line("@JsonSerializable()"));
        fragments.push(CodeFragment::braced(format!("class {} {{", self.name), body));
        fragments
    }
}

//! Rust struct builder.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A field in a Rust struct.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub attrs: Vec<String>,
    pub is_public: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            attrs: Vec::new(),
            is_public: true,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }
}

/// Builder for Rust structs.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    generics: Option<String>,
    doc: Option<String>,
    derives: Vec<String>,
    attrs: Vec<String>,
    fields: Vec<Field>,
    newtype: Option<String>,
    is_public: bool,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generics: None,
            doc: None,
            derives: Vec::new(),
            attrs: Vec::new(),
            fields: Vec::new(),
            newtype: None,
            is_public: true,
        }
    }

    /// Render as a tuple struct around a single public value,
    /// `pub struct Name(pub T);`. Named fields are ignored.
    pub fn newtype(mut self, ty: impl Into<String>) -> Self {
        self.newtype = Some(ty.into());
        self
    }

    /// Generic parameters without the angle brackets, e.g. `T: Transport`.
    pub fn generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn derives(mut self, derives: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.derives.extend(derives.into_iter().map(Into::into));
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    /// Build the struct as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }

    fn header(&self) -> String {
        let vis = if self.is_public { "pub " } else { "" };
        match &self.generics {
            Some(generics) => format!("{}struct {}<{}>", vis, self.name, generics),
            None => format!("{}struct {}", vis, self.name),
        }
    }

    /// Convert fields to code fragments.
    fn fields_to_fragments(&self) -> Vec<CodeFragment> {
        self.fields
            .iter()
            .flat_map(|field| {
                let mut fragments = Vec::new();
                let vis = if field.is_public { "pub " } else { "" };

                if let Some(doc) = &field.doc {
                    fragments.push(CodeFragment::RustDoc(doc.clone()));
                }

                for attr in &field.attrs {
                    fragments.push(CodeFragment::Line(format!("#[{}]", attr)));
                }

                fragments.push(CodeFragment::Line(format!(
                    "{}{}: {},",
                    vis, field.name, field.ty
                )));

                fragments
            })
            .collect()
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::RustDoc(doc.clone()));
        }

        if !self.derives.is_empty() {
            fragments.push(CodeFragment::Line(format!(
                "#[derive({})]",
                self.derives.join(", ")
            )));
        }

        for attr in &self.attrs {
            fragments.push(CodeFragment::Line(format!("#[{}]", attr)));
        }

        if let Some(ty) = &self.newtype {
            fragments.push(CodeFragment::Line(format!("{}(pub {});", self.header(), ty)));
        } else if self.fields.is_empty() {
            fragments.push(CodeFragment::Line(format!("{} {{}}", self.header())));
        } else {
            fragments.push(CodeFragment::braced(
                format!("{} {{", self.header()),
                self.fields_to_fragments(),
            ));
        }

        fragments
    }
}

//! Rust function builder.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A parameter in a Rust function.
///
/// A parameter with an empty type renders as its name alone, which is how
/// receivers such as `&self` are written.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// The `&self` receiver.
    pub fn self_ref() -> Self {
        Self::new("&self", "")
    }
}

/// Builder for Rust functions.
///
/// A function without body lines that is marked as a declaration renders
/// as a signature ending in `;`, the form used in trait definitions.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    is_public: bool,
    is_async: bool,
    is_declaration: bool,
    generics: Option<String>,
    params: Vec<Param>,
    return_type: Option<String>,
    where_clause: Vec<String>,
    body: Vec<String>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            is_public: true,
            is_async: false,
            is_declaration: false,
            generics: None,
            params: Vec::new(),
            return_type: None,
            where_clause: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn async_(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// Render as a trait item signature (private, no body).
    pub fn declaration(mut self) -> Self {
        self.is_declaration = true;
        self.is_public = false;
        self
    }

    /// Generic parameters without the angle brackets, e.g. `I, O`.
    pub fn generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a `where` predicate, e.g. `I: Serialize + Send`.
    pub fn where_(mut self, predicate: impl Into<String>) -> Self {
        self.where_clause.push(predicate.into());
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }

    fn signature(&self) -> String {
        let vis = if self.is_public { "pub " } else { "" };
        let async_kw = if self.is_async { "async " } else { "" };
        let name = match &self.generics {
            Some(generics) => format!("{}<{}>", self.name, generics),
            None => self.name.clone(),
        };

        let params_str = self
            .params
            .iter()
            .map(|p| {
                if p.ty.is_empty() {
                    p.name.clone()
                } else {
                    format!("{}: {}", p.name, p.ty)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        match &self.return_type {
            Some(ret) => format!(
                "{}{}fn {}({}) -> {}",
                vis, async_kw, name, params_str, ret
            ),
            None => format!("{}{}fn {}({})", vis, async_kw, name, params_str),
        }
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::RustDoc(doc.clone()));
        }

        let terminator = if self.is_declaration { ";" } else { " {" };
        if self.where_clause.is_empty() {
            fragments.push(CodeFragment::Line(format!(
                "{}{}",
                self.signature(),
                terminator
            )));
        } else {
            let last = self.where_clause.len() - 1;
            let predicates = self
                .where_clause
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let end = if self.is_declaration && i == last { ";" } else { "," };
                    CodeFragment::Line(format!("{p}{end}"))
                })
                .collect();
            fragments.push(CodeFragment::Line(self.signature()));
            fragments.push(CodeFragment::Line("where".to_string()));
            fragments.push(CodeFragment::indent(predicates));
            if !self.is_declaration {
                fragments.push(CodeFragment::Line("{".to_string()));
            }
        }

        if !self.is_declaration {
            fragments.push(CodeFragment::indent(
                self.body.iter().map(CodeFragment::line).collect(),
            ));
            fragments.push(CodeFragment::Line("}".to_string()));
        }

        fragments
    }
}

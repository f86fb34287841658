//! TypeScript class builder.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::{Param, Signature};

/// A class method: a signature and its body lines.
#[derive(Debug, Clone)]
pub struct ClassMethod {
    signature: Signature,
    body: Vec<String>,
}

impl ClassMethod {
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            body: Vec::new(),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }
}

impl Renderable for ClassMethod {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = self.signature.doc_comment() {
            fragments.push(CodeFragment::jsdoc(doc));
        }
        fragments.push(CodeFragment::braced(
            format!("{} {{", self.signature.render()),
            self.body.iter().map(CodeFragment::line).collect(),
        ));
        fragments
    }
}

/// Builder for exported TypeScript classes.
///
/// Constructor parameters are written with their modifier, e.g.
/// `protected request: ...`, and become parameter properties.
#[derive(Debug, Clone)]
pub struct Class {
    name: String,
    doc: Option<String>,
    constructor: Vec<Param>,
    methods: Vec<ClassMethod>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            constructor: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add a constructor parameter property.
    pub fn constructor_param(mut self, param: Param) -> Self {
        self.constructor.push(param);
        self
    }

    pub fn method(mut self, method: ClassMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }

    fn body_fragments(&self) -> Vec<CodeFragment> {
        let mut members = Vec::new();
        if !self.constructor.is_empty() {
            let params = self
                .constructor
                .iter()
                .map(|p| format!("{}: {}", p.name, p.ty))
                .collect::<Vec<_>>()
                .join(", ");
            members.push(vec![CodeFragment::line(format!(
                "constructor({params}) {{}}"
            ))]);
        }
        members.extend(self.methods.iter().map(Renderable::to_fragments));

        let mut body = Vec::new();
        for (i, member) in members.into_iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::blank());
            }
            body.extend(member);
        }
        body
    }
}

impl Renderable for Class {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::jsdoc(doc));
        }

        if self.constructor.is_empty() && self.methods.is_empty() {
            fragments.push(CodeFragment::line(format!("export class {} {{}}", self.name)));
        } else {
            fragments.push(CodeFragment::braced(
                format!("export class {} {{", self.name),
                self.body_fragments(),
            ));
        }
        fragments
    }
}

//! Rust trait definition builder.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::Fn;

/// Builder for public trait definitions.
///
/// Associated types are rendered first, then the method declarations
/// separated by blank lines.
#[derive(Debug, Clone)]
pub struct Trait {
    name: String,
    doc: Option<String>,
    associated_types: Vec<(String, Option<String>)>,
    methods: Vec<Fn>,
}

impl Trait {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            associated_types: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Declare an associated type, optionally documented.
    pub fn associated_type(mut self, name: impl Into<String>, doc: Option<&str>) -> Self {
        self.associated_types
            .push((name.into(), doc.map(str::to_string)));
        self
    }

    /// Add a method; it is rendered as a declaration.
    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method.declaration());
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }

    fn body_fragments(&self) -> Vec<CodeFragment> {
        let mut items: Vec<Vec<CodeFragment>> = Vec::new();

        if !self.associated_types.is_empty() {
            let mut types = Vec::new();
            for (name, doc) in &self.associated_types {
                if let Some(doc) = doc {
                    types.push(CodeFragment::rust_doc(doc));
                }
                types.push(CodeFragment::line(format!("type {name};")));
            }
            items.push(types);
        }
        items.extend(self.methods.iter().map(Renderable::to_fragments));

        let mut body = Vec::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::blank());
            }
            body.extend(item);
        }
        body
    }
}

impl Renderable for Trait {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::rust_doc(doc));
        }

        if self.associated_types.is_empty() && self.methods.is_empty() {
            fragments.push(CodeFragment::line(format!("pub trait {} {{}}", self.name)));
        } else {
            fragments.push(CodeFragment::braced(
                format!("pub trait {} {{", self.name),
                self.body_fragments(),
            ));
        }
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Param;

    #[test]
    fn test_trait_with_associated_type_and_methods() {
        let t = Trait::new("PostServiceProvider")
            .doc("Serves posts.")
            .associated_type("Error", None)
            .method(
                Fn::new("find_one")
                    .param(Param::self_ref())
                    .param(Param::new("slug", "String"))
                    .returns("Option<Post>"),
            )
            .build();

        assert_eq!(
            t,
            concat!(
                "/// Serves posts.\n",
                "pub trait PostServiceProvider {\n",
                "    type Error;\n",
                "\n",
                "    fn find_one(&self, slug: String) -> Option<Post>;\n",
                "}\n",
            )
        );
    }

    #[test]
    fn test_empty_trait() {
        assert_eq!(Trait::new("Marker").build(), "pub trait Marker {}\n");
    }
}

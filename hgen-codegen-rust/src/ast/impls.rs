//! Rust impl block builder.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::Fn;

/// Builder for Rust impl blocks.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    generics: Option<String>,
    trait_name: Option<String>,
    methods: Vec<Fn>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            generics: None,
            trait_name: None,
            methods: Vec::new(),
        }
    }

    /// Generic parameters of the impl, e.g. `T: Transport`.
    pub fn generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    /// Create an impl block for a trait.
    pub fn for_trait(mut self, trait_name: impl Into<String>) -> Self {
        self.trait_name = Some(trait_name.into());
        self
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method);
        self
    }

    /// Build the impl block as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }

    /// Format the impl header.
    fn format_header(&self) -> String {
        let generics = match &self.generics {
            Some(generics) => format!("<{generics}>"),
            None => String::new(),
        };
        match &self.trait_name {
            Some(trait_name) => format!(
                "impl{} {} for {} {{",
                generics, trait_name, self.type_name
            ),
            None => format!("impl{} {} {{", generics, self.type_name),
        }
    }

    /// Convert methods to code fragments.
    fn methods_to_fragments(&self) -> Vec<CodeFragment> {
        self.methods
            .iter()
            .enumerate()
            .flat_map(|(i, method)| {
                let mut fragments = Vec::new();
                if i > 0 {
                    fragments.push(CodeFragment::Blank);
                }
                fragments.extend(method.to_fragments());
                fragments
            })
            .collect()
    }
}

impl Renderable for Impl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::braced(
            self.format_header(),
            self.methods_to_fragments(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Param;

    #[test]
    fn test_empty_impl() {
        assert_eq!(Impl::new("Foo").build(), "impl Foo {\n}\n");
    }

    #[test]
    fn test_generic_impl_with_methods() {
        let i = Impl::new("PostServiceConsumer<T>")
            .generics("T: Transport")
            .method(
                Fn::new("new")
                    .param(Param::new("transport", "T"))
                    .returns("Self")
                    .body_line("Self { transport }"),
            )
            .method(Fn::new("transport").param(Param::self_ref()).returns("&T").body_line("&self.transport"))
            .build();

        assert_eq!(
            i,
            concat!(
                "impl<T: Transport> PostServiceConsumer<T> {\n",
                "    pub fn new(transport: T) -> Self {\n",
                "        Self { transport }\n",
                "    }\n",
                "\n",
                "    pub fn transport(&self) -> &T {\n",
                "        &self.transport\n",
                "    }\n",
                "}\n",
            )
        );
    }

    #[test]
    fn test_impl_for_trait() {
        let i = Impl::new("HttpTransport").for_trait("Transport").build();
        assert!(i.starts_with("impl Transport for HttpTransport {"));
    }
}

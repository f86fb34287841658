//! TypeScript const declaration builder.

use hgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// Builder for exported TypeScript const declarations.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    value: String,
    as_const: bool,
    prettier_ignore: bool,
}

impl Const {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            as_const: false,
            prettier_ignore: false,
        }
    }

    /// Narrow the value to its literal type (`as const`).
    pub fn as_const(mut self) -> Self {
        self.as_const = true;
        self
    }

    /// Keep formatters from reflowing the value.
    pub fn prettier_ignore(mut self) -> Self {
        self.prettier_ignore = true;
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if self.prettier_ignore {
            fragments.push(CodeFragment::line("// prettier-ignore"));
        }
        let suffix = if self.as_const { " as const" } else { "" };
        fragments.push(CodeFragment::line(format!(
            "export const {} = {}{};",
            self.name, self.value, suffix
        )));
        fragments
    }
}

//! Unified target dispatch.
//!
//! Centralizes target-specific generator creation.

use std::fmt;

use clap::ValueEnum;
use hgen_codegen::{JsonGenerator, language::LanguageCodegen};
use hgen_codegen_dart::Generator as DartGenerator;
use hgen_codegen_rust::Generator as RustGenerator;
use hgen_codegen_typescript::Generator as TypeScriptGenerator;
use hgen_ir::Schema;

/// An output target of `hgen generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// `<unit>.ts` and its externals stub
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    /// `<unit>.rs` and its externals stub
    #[value(alias = "rs")]
    Rust,
    /// `<unit>.dart` and its externals stub, models only
    Dart,
    /// `<unit>.schema.json`
    Json,
}

impl Target {
    /// Create the generator for one unit.
    pub fn generator<'a>(&self, schema: &'a Schema) -> Box<dyn LanguageCodegen + 'a> {
        match self {
            Target::TypeScript => Box::new(TypeScriptGenerator::new(schema)),
            Target::Rust => Box::new(RustGenerator::new(schema)),
            Target::Dart => Box::new(DartGenerator::new(schema)),
            Target::Json => Box::new(JsonGenerator::new(schema)),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::TypeScript => write!(f, "typescript"),
            Target::Rust => write!(f, "rust"),
            Target::Dart => write!(f, "dart"),
            Target::Json => write!(f, "json"),
        }
    }
}

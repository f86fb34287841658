//! TOML front end for the hgen code generator.
//!
//! Parses schema files into the unresolved [`SchemaAst`](hgen_ir::ast::SchemaAst),
//! reporting syntax problems as [`miette`] diagnostics that point into the
//! source.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod type_expr;
mod validate;

use std::path::Path;

pub use error::{Error, Result, SourceContext};
use hgen_ir::ast::SchemaAst;
pub use manifest::{
    Defaults, FieldSpec, Manifest, Method, Model, SchemaConfig, SchemaFile, Service, Variants,
    parse_manifest,
};
pub use type_expr::{TypeExprError, parse_type_expr};
pub use validate::ParseContext;

/// Parse a schema file from the given path into the unresolved AST
pub fn parse_file(path: impl AsRef<Path>) -> Result<SchemaAst> {
    SchemaFile::open(path).map(|file| file.ast().clone())
}

/// Parse a schema from a string (uses "schema.toml" as default filename)
pub fn parse_str(content: &str) -> Result<SchemaAst> {
    parse_str_with_filename(content, "schema.toml")
}

/// Parse a schema from a string with a custom filename for error reporting
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<SchemaAst> {
    parse_manifest(content, filename)?.to_ast(content, filename)
}

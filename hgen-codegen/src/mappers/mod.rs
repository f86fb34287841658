//! Language-specific type mappers.

mod dart;
mod rust;
mod typescript;

pub use dart::{DartRecursiveAliasMapper, DartTypeMapper};
pub use rust::RustTypeMapper;
pub use typescript::{RecursiveAliasMapper, TypeScriptTypeMapper};

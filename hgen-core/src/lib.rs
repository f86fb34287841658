//! Core utilities and types for the hgen code generator.
//!
//! This crate provides the file writing contract shared by every
//! generator and the identifier case utilities.

mod file;
mod utils;

// File operations
pub use file::{File, FileRules, GENERATED_HEADER, GeneratedFile, Overwrite, WriteResult};
// String utilities
pub use utils::{is_identifier, is_pascal_case, to_camel_case, to_pascal_case, to_snake_case};

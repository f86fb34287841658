//! Dart emitter for the hgen schema compiler.
//!
//! Turns a built [`Schema`](hgen_ir::Schema) into one Dart library per
//! unit, serialized through `json_serializable`.
//!
//! # Generated Output
//!
//! - `<unit>.dart` - a data class per struct, an enum per enum, a typedef
//!   per alias, and the `$schema` constant. The library declares
//!   `part '<unit>.g.dart';`, which `build_runner` fills in.
//! - `<unit>.external.dart` - stub for external types without a `module`
//!
//! Services are not rendered for Dart.

mod dart_file;
mod generator;

pub mod ast;
pub mod files;

pub use dart_file::DartFile;
pub use generator::Generator;
pub use hgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};

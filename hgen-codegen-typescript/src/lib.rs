//! TypeScript emitter for the hgen schema compiler.
//!
//! Turns a built [`Schema`](hgen_ir::Schema) into one TypeScript module per
//! unit.
//!
//! # Usage
//!
//! ```ignore
//! use hgen_codegen::LanguageCodegen;
//! use hgen_codegen_typescript::Generator;
//! use std::path::Path;
//!
//! let generator = Generator::new(&schema);
//!
//! // Preview files without writing
//! let files = generator.preview();
//!
//! // Generate files to disk
//! let result = generator.generate(Path::new("src/generated"))?;
//! ```
//!
//! # Generated Output
//!
//! - `<unit>.ts` - models, a `<Service>Consumer` class and a
//!   `<Service>Provider` interface per service, and the `$schema` constant
//! - `<unit>.external.ts` - stub for external types without a `module`

mod code_file;
mod generator;

pub mod ast;
pub mod files;

pub use code_file::CodeFile;
pub use generator::Generator;
pub use hgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};

//! Rust emitter for the hgen schema compiler.
//!
//! Turns a built [`Schema`](hgen_ir::Schema) into one Rust module per unit.
//! The generated code depends on `serde` with the `derive` feature.
//!
//! # Generated Output
//!
//! - `<unit>.rs` - models, the `Transport` trait, a `<Service>Consumer`
//!   and a `<Service>Provider` per service, and the `SCHEMA` constant
//! - `<unit>_external.rs` - stub for external types without a `module`
//!
//! Both files are meant to be declared as sibling modules:
//!
//! ```ignore
//! mod blog;
//! mod blog_external;
//! ```

mod generator;
mod recursion;
mod rust_file;

pub mod ast;
pub mod files;

pub use generator::Generator;
pub use hgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use rust_file::{RustFile, Use};

//! Compilation pipeline for code generation.
//!
//! The [`Pipeline`] turns one unit's unresolved AST into a validated
//! [`Schema`](hgen_ir::Schema) ready for the emitters:
//!
//! - Explicit phase boundaries (build → validate → user phases)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//!
//! # Example
//!
//! ```ignore
//! use hgen_codegen::pipeline::Pipeline;
//!
//! let mut ctx = Pipeline::new().run(ast)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{diag}");
//! }
//!
//! let schema = ctx.take_schema()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;

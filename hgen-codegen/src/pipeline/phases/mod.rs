//! Built-in pipeline phases.
//!
//! - [`BuildPhase`] - builds the validated schema from the AST
//! - [`ValidatePhase`] - runs lints over the schema

mod build;
mod validate;

pub use build::BuildPhase;
pub use validate::{
    EmptyServiceLint, GeneratedNamesLint, Lint, NamingLint, UnusedModelLint, ValidatePhase,
};

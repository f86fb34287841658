//! Shared code generation machinery for the hgen schema compiler.
//!
//! This crate sits between the IR and the language emitters: it runs the
//! compilation pipeline over one unit and provides the building blocks
//! every emitter uses.
//!
//! # Module Organization
//!
//! - [`annotations`] - Metadata keys the emitters read (`doc`, `module`)
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`generation`] - Output management (FileRegistry, ImportCollector)
//! - [`language`] - Language-specific abstractions (LanguageCodegen, TypeMapper)
//! - [`mappers`] - TypeMapper implementations for the built-in targets
//! - [`naming`] - Member naming and reserved words per target
//! - [`pipeline`] - Build and lint phases producing a validated schema
//! - [`recursion`] - Aliases that refer back to themselves
//! - [`reflect`] - Runtime schema document rendering
//! - [`json`] - The JSON target

pub mod annotations;
pub mod builder;
pub mod generation;
pub mod json;
pub mod language;
pub mod mappers;
pub mod naming;
pub mod pipeline;
pub mod recursion;
pub mod reflect;

pub use json::JsonGenerator;
pub use language::{GenerateResult, LanguageCodegen, PreviewFile, TypeMapper};

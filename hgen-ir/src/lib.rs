//! Schema intermediate representation for the hgen code generator.
//!
//! This crate owns everything between the front end and the emitters:
//! the type algebra, metadata and its merge policy, the resolver, the
//! schema builder and the runtime schema document.
//!
//! # Architecture
//!
//! ```text
//! schema.toml → hgen-manifest (parsing) → ast::SchemaAst
//!             → SchemaBuilder (register, construct, resolve, merge) → Schema
//!             → codegen
//! ```
//!
//! A [`Schema`] is immutable. It can be turned into a [`SchemaDocument`]
//! for embedding into generated code, and decoded back.

pub mod ast;
mod builder;
mod decl;
mod error;
mod metadata;
mod reflect;
mod resolve;
mod schema;
mod types;

pub use builder::SchemaBuilder;
pub use decl::{
    AliasDecl, EnumDecl, ExternalDecl, Field, MethodDecl, ModelDecl, ModelKind, ServiceDecl,
    StructDecl,
};
pub use error::{Error, Result};
pub use metadata::{MetaValue, Metadata, MetadataMerger};
pub use reflect::{
    SCHEMA_VERSION, SchemaDocument, ServiceTag, WireField, WireMethod, WireModel, WireService,
    WireType,
};
pub use resolve::Resolver;
pub use schema::Schema;
pub use types::{Primitive, TypeNode};

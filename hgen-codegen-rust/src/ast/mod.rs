//! Rust AST builders for generating structs, enums, traits, impls, and functions.
//!
//! These provide a high-level API for constructing Rust syntax,
//! which can then be rendered via CodeBuilder.

mod enums;
mod fns;
mod impls;
mod items;
mod structs;
mod traits;

pub use enums::{Enum, Variant};
pub use fns::{Fn, Param};
pub use impls::Impl;
pub use items::{Const, TypeAlias, raw_string_literal};
pub use structs::{Field, Struct};
pub use traits::Trait;

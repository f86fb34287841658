//! TypeScript AST builders for declarations, classes, imports and consts.
//!
//! These provide a high-level API for constructing TypeScript syntax,
//! which can then be rendered via CodeBuilder.

mod class;
mod consts;
mod imports;
mod interface;
mod signature;
mod types;

pub use class::{Class, ClassMethod};
pub use consts::Const;
pub use imports::Import;
pub use interface::{Interface, InterfaceField};
pub use signature::{Param, Signature};
pub use types::{Enum, TypeAlias, string_literal};

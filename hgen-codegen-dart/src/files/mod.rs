//! Dart file generators.

mod external_dart;
mod unit_dart;

pub use external_dart::{ExternalDart, default_module};
pub use unit_dart::{JSON_ANNOTATION, UnitDart};

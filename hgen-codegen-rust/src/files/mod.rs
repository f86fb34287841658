//! Rust file generators.

mod external_rs;
mod unit_rs;

pub use external_rs::{ExternalRs, default_module, unit_module};
pub use unit_rs::UnitRs;

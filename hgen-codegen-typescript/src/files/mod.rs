//! TypeScript file generators.

mod external_ts;
mod unit_ts;

pub use external_ts::{ExternalTs, default_module};
pub use unit_ts::{REQUEST_TYPE, UnitTs};

//! Built-in lints for schema validation.

mod empty_service;
mod generated_names;
mod naming;
mod unused_model;

pub use empty_service::EmptyServiceLint;
pub use generated_names::GeneratedNamesLint;
pub use naming::NamingLint;
pub use unused_model::UnusedModelLint;

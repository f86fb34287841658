//! Lint trait for schema validation.

use hgen_ir::Schema;

use crate::pipeline::Diagnostic;

/// A lint that checks a built schema for style and hygiene issues.
///
/// Everything a lint reports is advisory: correctness problems are
/// build errors and never reach the lints.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// A human-readable description of what this lint checks.
    fn description(&self) -> &'static str;

    /// Check the schema and add any diagnostics.
    fn check(&self, schema: &Schema, diagnostics: &mut Vec<Diagnostic>);
}

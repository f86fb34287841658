//! Lint for services without methods.

use hgen_ir::Schema;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about services that declare no methods.
///
/// Such a service still produces an empty consumer and provider.
pub struct EmptyServiceLint;

impl Lint for EmptyServiceLint {
    fn name(&self) -> &'static str {
        "empty-service"
    }

    fn description(&self) -> &'static str {
        "Detect services that declare no methods"
    }

    fn check(&self, schema: &Schema, diagnostics: &mut Vec<Diagnostic>) {
        for service in schema.services().filter(|s| s.methods.is_empty()) {
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!("service '{}' declares no methods", service.name),
                )
                .at(&service.name),
            );
        }
    }
}

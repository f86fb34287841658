//! Build phase - turns the AST into a validated schema.

use eyre::{Result, bail};
use hgen_ir::SchemaBuilder;
use tracing::debug;

use crate::pipeline::{CompilationContext, Diagnostic, Phase};

/// Phase that runs the schema builder.
///
/// A build error is recorded as an error diagnostic located at the
/// offending declaration and aborts the pipeline for this unit.
pub struct BuildPhase;

impl Phase for BuildPhase {
    fn name(&self) -> &'static str {
        "build"
    }

    fn description(&self) -> &'static str {
        "Register, resolve and freeze the schema"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        match SchemaBuilder::new(&ctx.ast).build() {
            Ok(schema) => {
                debug!(
                    unit = %schema.name(),
                    models = schema.models().count(),
                    services = schema.services().count(),
                    "schema built"
                );
                ctx.schema = Some(schema);
                Ok(())
            }
            Err(err) => {
                ctx.add_diagnostic(Diagnostic::error(self.name(), err.to_string()).at(err.subject()));
                bail!("unit '{}' failed to build: {err}", ctx.unit());
            }
        }
    }
}

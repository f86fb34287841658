//! Pipeline plugin trait for extensibility.

use eyre::Result;

use super::CompilationContext;

/// A plugin that can hook into the compilation pipeline.
///
/// Plugins receive callbacks before and after each phase runs, allowing
/// them to inspect or modify the compilation context. A hook that returns
/// an error aborts the pipeline.
///
/// # Example
///
/// ```
/// use eyre::Result;
/// use hgen_codegen::pipeline::{CompilationContext, Plugin};
///
/// /// Warns about units without a consumer or provider to emit.
/// struct RequireServices;
///
/// impl Plugin for RequireServices {
///     fn name(&self) -> &'static str {
///         "require-services"
///     }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
///         if phase == "build" && ctx.ast.services.is_empty() {
///             ctx.add_warning("require-services", "unit declares no services");
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}

//! Validate phase - runs lints on the built schema.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::Lint;
pub use lints::{EmptyServiceLint, GeneratedNamesLint, NamingLint, UnusedModelLint};
use tracing::warn;

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the schema using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(NamingLint),
                Box::new(UnusedModelLint),
                Box::new(EmptyServiceLint),
                Box::new(GeneratedNamesLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Lint the schema and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let Some(schema) = &ctx.schema else {
            bail!("unit '{}' has no schema to validate", ctx.unit());
        };

        let mut found = Vec::new();
        for lint in &self.lints {
            let start = found.len();
            lint.check(schema, &mut found);
            for diag in &found[start..] {
                if diag.severity.is_warning() {
                    warn!(
                        unit = %schema.name(),
                        lint = lint.name(),
                        location = diag.location.as_deref().unwrap_or_default(),
                        "{}",
                        diag.message
                    );
                }
            }
        }
        ctx.diagnostics.extend(found);

        // Fail if there are any errors (warnings are allowed)
        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}

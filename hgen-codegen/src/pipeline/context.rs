//! Compilation context passed through pipeline phases.

use eyre::{Result, eyre};
use hgen_ir::{Schema, ast::SchemaAst};

use super::diagnostic::{Diagnostic, Severity};

/// Context passed through all pipeline phases.
///
/// Carries one unit through compilation, accumulating the built schema
/// and diagnostics along the way.
#[derive(Debug)]
pub struct CompilationContext {
    /// The unresolved AST being compiled.
    pub ast: SchemaAst,
    /// The validated schema (populated by BuildPhase).
    pub schema: Option<Schema>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a new compilation context from an AST.
    pub fn new(ast: SchemaAst) -> Self {
        Self {
            ast,
            schema: None,
            diagnostics: Vec::new(),
        }
    }

    /// Name of the unit being compiled.
    pub fn unit(&self) -> &str {
        &self.ast.name
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Add an error diagnostic.
    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    /// Add a warning diagnostic.
    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    /// Add an info diagnostic.
    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a prepared diagnostic, e.g. one with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the schema out of the context.
    ///
    /// # Errors
    ///
    /// Fails if BuildPhase has not produced a schema.
    pub fn take_schema(&mut self) -> Result<Schema> {
        self.schema
            .take()
            .ok_or_else(|| eyre!("schema for unit '{}' has not been built", self.ast.name))
    }
}

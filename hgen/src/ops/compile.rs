//! Front end shared by every command: parse, build and lint one unit.

use std::path::{Path, PathBuf};

use hgen_codegen::pipeline::{CompilationContext, Diagnostic, Pipeline};
use hgen_ir::Schema;
use tracing::debug;

/// A unit that built successfully.
#[derive(Debug)]
pub struct CompiledUnit {
    pub path: PathBuf,
    pub schema: Schema,
    /// Lint warnings, already formatted.
    pub warnings: Vec<String>,
}

/// A unit that could not be built.
#[derive(Debug)]
pub struct FailedUnit {
    pub path: PathBuf,
    /// Rendered error, possibly spanning several lines.
    pub message: String,
    pub warnings: Vec<String>,
}

/// Parse, build and lint the schema file at `path`.
///
/// Manifest errors are rendered with their source snippet; build errors
/// with the diagnostics the pipeline collected before aborting.
pub fn compile(path: &Path) -> Result<CompiledUnit, FailedUnit> {
    let failed = |message: String, warnings: Vec<String>| FailedUnit {
        path: path.to_path_buf(),
        message,
        warnings,
    };

    let ast = hgen_manifest::parse_file(path)
        .map_err(|e| failed(format!("{:?}", miette::Report::new(*e)), Vec::new()))?;

    let mut ctx = CompilationContext::new(ast);
    let outcome = Pipeline::new().run_with_context(&mut ctx);
    let warnings: Vec<String> = ctx.warnings().map(describe).collect();

    if let Err(err) = outcome {
        let errors: Vec<String> = ctx.errors().map(describe).collect();
        let message = if errors.is_empty() {
            format!("{err:#}")
        } else {
            errors.join("\n")
        };
        return Err(failed(message, warnings));
    }

    let schema = ctx
        .take_schema()
        .map_err(|e| failed(format!("{e:#}"), warnings.clone()))?;
    debug!(unit = schema.name(), path = %path.display(), "unit compiled");

    Ok(CompiledUnit {
        path: path.to_path_buf(),
        schema,
        warnings,
    })
}

/// A diagnostic without its severity, which the report supplies.
fn describe(diagnostic: &Diagnostic) -> String {
    match &diagnostic.location {
        Some(location) => format!("{} (at {location})", diagnostic.message),
        None => diagnostic.message.clone(),
    }
}

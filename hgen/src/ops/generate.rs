//! Generate operation - code generation for every unit.

use std::path::{Path, PathBuf};

use eyre::WrapErr;
use hgen_codegen::language::GenerateResult;
use rayon::prelude::*;
use tracing::debug;

use super::compile::{CompiledUnit, compile};
use crate::{
    language::Target,
    reports::{GenerateReport, PreviewFile, UnitOutcome, UnitReport},
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory every unit writes into.
    pub output_dir: &'a Path,
    /// Targets to emit, in order.
    pub targets: &'a [Target],
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Units are independent: they compile and emit in parallel, and a failed
/// unit does not stop its siblings.
pub fn generate(paths: &[PathBuf], opts: &GenerateOptions) -> GenerateReport {
    let units = paths
        .par_iter()
        .map(|path| match compile(path) {
            Ok(unit) => emit(unit, opts),
            Err(failed) => UnitReport {
                name: None,
                path: failed.path,
                warnings: failed.warnings,
                outcome: UnitOutcome::Failed(failed.message),
            },
        })
        .collect();

    GenerateReport {
        dry_run: opts.dry_run,
        units,
    }
}

fn emit(unit: CompiledUnit, opts: &GenerateOptions) -> UnitReport {
    let outcome = if opts.dry_run {
        let files = opts
            .targets
            .iter()
            .flat_map(|target| target.generator(&unit.schema).preview())
            .map(|f| PreviewFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        UnitOutcome::Preview(files)
    } else {
        match write(&unit, opts) {
            Ok(result) => UnitOutcome::Written(result),
            Err(err) => UnitOutcome::Failed(format!("{err:#}")),
        }
    };

    UnitReport {
        name: Some(unit.schema.name().to_string()),
        path: unit.path,
        warnings: unit.warnings,
        outcome,
    }
}

fn write(unit: &CompiledUnit, opts: &GenerateOptions) -> eyre::Result<GenerateResult> {
    let mut result = GenerateResult::default();
    for target in opts.targets {
        let written = target
            .generator(&unit.schema)
            .generate(opts.output_dir)
            .wrap_err_with(|| format!("failed to generate {target} output"))?;
        debug!(unit = unit.schema.name(), %target, files = written.total(), "target done");
        result.merge(written);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const BLOG: &str = include_str!("../../../fixtures/blog.toml");

    fn options<'a>(output_dir: &'a Path, targets: &'a [Target], dry_run: bool) -> GenerateOptions<'a> {
        GenerateOptions {
            output_dir,
            targets,
            dry_run,
        }
    }

    #[test]
    fn test_failed_unit_does_not_stop_siblings() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("blog.toml");
        let bad = temp.path().join("broken.toml");
        std::fs::write(&good, BLOG).unwrap();
        std::fs::write(&bad, "[models.A]\ntype = \"alias\"\ninner = \"A\"\n").unwrap();

        let out = temp.path().join("out");
        let report = generate(
            &[bad.clone(), good.clone()],
            &options(&out, &[Target::TypeScript, Target::Json], false),
        );

        assert!(report.has_failures());
        assert_eq!(report.units[0].path, bad);
        assert!(matches!(&report.units[0].outcome, UnitOutcome::Failed(msg) if msg.contains("alias cycle")));

        let UnitOutcome::Written(result) = &report.units[1].outcome else {
            panic!("blog should have been generated");
        };
        assert_eq!(
            result.written,
            vec!["blog.ts", "blog.external.ts", "blog.schema.json"]
        );
        assert!(out.join("blog.schema.json").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blog.toml");
        std::fs::write(&path, BLOG).unwrap();

        let out = temp.path().join("out");
        let report = generate(&[path], &options(&out, &[Target::Rust, Target::Dart], true));

        assert!(!report.has_failures());
        let UnitOutcome::Preview(files) = &report.units[0].outcome else {
            panic!("expected a preview");
        };
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["blog.rs", "blog_external.rs", "blog.dart", "blog.external.dart"]
        );
        assert!(!out.exists());
    }
}

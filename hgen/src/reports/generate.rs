//! Generate command report data structures.

use std::path::PathBuf;

use hgen_codegen::language::GenerateResult;

use super::output::{Output, Report};

/// Report data from code generation across units.
#[derive(Debug)]
pub struct GenerateReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// One entry per schema file, in command-line order.
    pub units: Vec<UnitReport>,
}

/// What happened to one unit.
#[derive(Debug)]
pub struct UnitReport {
    /// Unit name, unknown when the file did not parse.
    pub name: Option<String>,
    /// Schema file path.
    pub path: PathBuf,
    /// Lint warnings.
    pub warnings: Vec<String>,
    pub outcome: UnitOutcome,
}

/// Result of generating one unit.
#[derive(Debug)]
pub enum UnitOutcome {
    /// Files were written to disk.
    Written(GenerateResult),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
    /// The unit did not build or could not be written.
    Failed(String),
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

impl GenerateReport {
    /// Whether any unit failed.
    pub fn has_failures(&self) -> bool {
        self.units
            .iter()
            .any(|unit| matches!(unit.outcome, UnitOutcome::Failed(_)))
    }

    fn failure_count(&self) -> usize {
        self.units
            .iter()
            .filter(|unit| matches!(unit.outcome, UnitOutcome::Failed(_)))
            .count()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        let mut files = 0;
        for unit in &self.units {
            files += unit.render(out);
        }

        let failed = self.failure_count();
        let verb = if self.dry_run { "would be generated" } else { "processed" };
        let summary = format!(
            "{} unit{}, {} file{} {}",
            self.units.len(),
            plural(self.units.len()),
            files,
            plural(files),
            verb
        );

        out.divider("Summary");
        if failed > 0 {
            out.preformatted(&format!("{summary}, {failed} failed"));
        } else {
            out.preformatted(&summary);
        }
    }
}

impl UnitReport {
    /// Render this unit and return the number of files it touched.
    fn render(&self, out: &mut dyn Output) -> usize {
        for warning in &self.warnings {
            out.warning(&format!("{}: {}", self.path.display(), warning));
        }

        match &self.outcome {
            UnitOutcome::Failed(message) => {
                out.error(&format!("{}\n{}", self.path.display(), message));
                0
            }
            UnitOutcome::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
                files.len()
            }
            UnitOutcome::Written(result) => {
                let name = self.name.as_deref().unwrap_or("unit");
                out.section(&format!("{} ({})", name, self.path.display()));
                for path in &result.written {
                    out.added_item(path);
                }
                for path in &result.unchanged {
                    out.list_item(&format!("{path} (unchanged)"));
                }
                for path in &result.skipped {
                    out.list_item(&format!("{path} (kept, user-owned)"));
                }
                out.newline();
                result.total()
            }
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_written_and_failed_units() {
        let report = GenerateReport {
            dry_run: false,
            units: vec![
                UnitReport {
                    name: Some("blog".into()),
                    path: "schemas/blog.toml".into(),
                    warnings: vec!["model 'Tag' is never used (at Tag)".into()],
                    outcome: UnitOutcome::Written(GenerateResult {
                        written: vec!["blog.ts".into()],
                        unchanged: vec![],
                        skipped: vec!["blog.external.ts".into()],
                    }),
                },
                UnitReport {
                    name: None,
                    path: "schemas/shop.toml".into(),
                    warnings: vec![],
                    outcome: UnitOutcome::Failed("alias cycle: A -> A".into()),
                },
            ],
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(report.has_failures());
        assert_eq!(
            out.lines,
            vec![
                "warning: schemas/blog.toml: model 'Tag' is never used (at Tag)",
                "blog (schemas/blog.toml):",
                "  + blog.ts",
                "  - blog.external.ts (kept, user-owned)",
                "",
                "error: schemas/shop.toml\nalias cycle: A -> A",
                "── Summary ──",
                "2 units, 2 files processed, 1 failed",
            ]
        );
    }

    #[test]
    fn test_preview_summary() {
        let report = GenerateReport {
            dry_run: true,
            units: vec![UnitReport {
                name: Some("blog".into()),
                path: "blog.toml".into(),
                warnings: vec![],
                outcome: UnitOutcome::Preview(vec![PreviewFile {
                    path: "blog.schema.json".into(),
                    content: "{}\n".into(),
                }]),
            }],
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(!report.has_failures());
        assert_eq!(
            out.lines.last().map(String::as_str),
            Some("1 unit, 1 file would be generated")
        );
    }
}

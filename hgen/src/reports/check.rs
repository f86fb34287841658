//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from schema validation.
#[derive(Debug)]
pub struct CheckReport {
    pub units: Vec<CheckedUnit>,
}

/// Validation result of one schema file.
#[derive(Debug)]
pub struct CheckedUnit {
    /// Path to the schema file.
    pub path: PathBuf,
    pub models: usize,
    pub services: usize,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Rendered error when the unit does not build.
    pub error: Option<String>,
}

impl CheckReport {
    /// Whether every unit passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.units.iter().all(|unit| unit.error.is_none())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for unit in &self.units {
            for warning in &unit.warnings {
                out.warning(&format!("{}: {}", unit.path.display(), warning));
            }

            match &unit.error {
                Some(error) => out.error(&format!("{}\n{}", unit.path.display(), error)),
                None => out.preformatted(&format!(
                    "✓ {} is valid ({} model{}, {} service{}, {} warning{})",
                    unit.path.display(),
                    unit.models,
                    plural(unit.models),
                    unit.services,
                    plural(unit.services),
                    unit.warnings.len(),
                    plural(unit.warnings.len()),
                )),
            }
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

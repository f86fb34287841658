//! Check operation - build and lint without writing.

use std::path::PathBuf;

use rayon::prelude::*;

use super::compile::compile;
use crate::reports::{CheckReport, CheckedUnit};

/// Execute the check operation on every unit.
pub fn check(paths: &[PathBuf]) -> CheckReport {
    let units = paths
        .par_iter()
        .map(|path| match compile(path) {
            Ok(unit) => CheckedUnit {
                path: unit.path,
                models: unit.schema.models().count(),
                services: unit.schema.services().count(),
                warnings: unit.warnings,
                error: None,
            },
            Err(failed) => CheckedUnit {
                path: failed.path,
                models: 0,
                services: 0,
                warnings: failed.warnings,
                error: Some(failed.message),
            },
        })
        .collect();

    CheckReport { units }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_counts_and_lints() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blog.toml");
        std::fs::write(
            &path,
            r#"
            [models.Post]
            type = "struct"
            fields = { Slug = "string" }

            [services.Posts.methods.get]
            output = "Post"
            "#,
        )
        .unwrap();

        let report = check(&[path]);
        let unit = &report.units[0];
        assert!(report.is_valid());
        assert_eq!((unit.models, unit.services), (1, 1));
        assert_eq!(unit.warnings.len(), 1);
        assert!(unit.warnings[0].contains("Slug"));
    }
}

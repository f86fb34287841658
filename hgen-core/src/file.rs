use std::{
    io::Write,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};
use tempfile::NamedTempFile;
use tracing::trace;

/// Marker written at the top of every machine-owned file.
pub const GENERATED_HEADER: &str = "// AUTOGENERATED FILE - DO NOT EDIT";

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    /// Render the file body, without the header
    fn render(&self) -> String;

    /// Render the complete file content, header included
    fn content(&self) -> String {
        with_header(self.rules().header, &self.render())
    }

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        write_with_rules(&self.path(base), &self.content(), &self.rules())
    }
}

fn with_header(header: Option<&str>, body: &str) -> String {
    match header {
        Some(header) => format!("{header}\n\n{body}"),
        None => body.to_string(),
    }
}

fn write_with_rules(path: &Path, content: &str, rules: &FileRules) -> Result<WriteResult> {
    match rules.overwrite {
        Overwrite::Always => {
            if std::fs::read_to_string(path).is_ok_and(|existing| existing == content) {
                trace!(path = %path.display(), "unchanged");
                return Ok(WriteResult::Unchanged);
            }
            write_file(path, content)?;
            Ok(WriteResult::Written)
        }
        Overwrite::IfMissing => {
            if path.exists() {
                Ok(WriteResult::Skipped)
            } else {
                write_file(path, content)?;
                Ok(WriteResult::Written)
            }
        }
    }
}

/// Replace `path` atomically: the content goes to a temporary file in the
/// same directory, which is then renamed over the target.
fn write_file(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .wrap_err_with(|| format!("failed to create directory {}", parent.display()))?;

    let mut temp = NamedTempFile::new_in(parent)
        .wrap_err_with(|| format!("failed to create temporary file in {}", parent.display()))?;
    temp.write_all(content.as_bytes())?;
    temp.persist(path)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    trace!(path = %path.display(), bytes = content.len(), "written");
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// Existing file already had the same content
    Unchanged,
    /// File was skipped (already exists)
    Skipped,
}

/// A file to be generated
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a machine-owned file: marker header, always overwritten.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Create a user-owned stub: no header, never overwritten.
    pub fn stub(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::stub(),
        }
    }

    /// Create a file with explicit rules.
    pub fn with_rules(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        rules: FileRules,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules,
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content, header included
    pub fn content(&self) -> String {
        with_header(self.rules.header, &self.content)
    }

    pub fn rules(&self) -> &FileRules {
        &self.rules
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its rules
    pub fn write(&self) -> Result<WriteResult> {
        write_with_rules(&self.path, &self.content(), &self.rules)
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone)]
pub struct FileRules {
    pub overwrite: Overwrite,
    pub header: Option<&'static str>,
}

impl FileRules {
    /// Rules for files the user is expected to edit.
    pub fn stub() -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
            header: None,
        }
    }

    /// Rules for machine-owned files whose format has no comment syntax.
    pub fn bare() -> Self {
        Self {
            overwrite: Overwrite::Always,
            header: None,
        }
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (generated code)
    Always,
    /// Only create if file doesn't exist (stubs)
    IfMissing,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            overwrite: Overwrite::Always,
            header: Some(GENERATED_HEADER),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Models;

    impl GeneratedFile for Models {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("models.ts")
        }

        fn render(&self) -> String {
            "export type Id = string;\n".to_string()
        }
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("test.txt");

        write_file(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_generated_file_starts_with_marker() {
        let temp = TempDir::new().unwrap();

        assert_eq!(Models.write(temp.path()).unwrap(), WriteResult::Written);

        let written = fs::read_to_string(temp.path().join("models.ts")).unwrap();
        assert_eq!(
            written,
            "// AUTOGENERATED FILE - DO NOT EDIT\n\nexport type Id = string;\n"
        );
    }

    #[test]
    fn test_file_write_always_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blog.ts");
        fs::write(&path, "hand edits").unwrap();

        let result = File::new(&path, "export {};\n").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "// AUTOGENERATED FILE - DO NOT EDIT\n\nexport {};\n"
        );
    }

    #[test]
    fn test_identical_content_is_not_rewritten() {
        let temp = TempDir::new().unwrap();
        let file = File::new(temp.path().join("blog.ts"), "export {};\n");

        assert_eq!(file.write().unwrap(), WriteResult::Written);
        assert_eq!(file.write().unwrap(), WriteResult::Unchanged);
    }

    #[test]
    fn test_stub_is_created_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blog.external.ts");

        let result = File::stub(&path, "export type Instant = string;\n")
            .write()
            .unwrap();
        assert_eq!(result, WriteResult::Written);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "export type Instant = string;\n"
        );

        fs::write(&path, "export type Instant = Date;\n").unwrap();
        let result = File::stub(&path, "export type Instant = string;\n")
            .write()
            .unwrap();
        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "export type Instant = Date;\n"
        );
    }

    #[test]
    fn test_bare_file_has_no_marker() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blog.schema.json");

        File::with_rules(&path, "{}\n", FileRules::bare())
            .write()
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }
}

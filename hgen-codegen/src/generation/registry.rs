//! File registration pattern for declarative code generation.
//!
//! Generators register every file of a unit once, then either preview
//! the registry or write it:
//!
//! ```ignore
//! let mut registry = FileRegistry::new();
//! registry.register(FileEntry::generated("blog.ts", source));
//! registry.register(FileEntry::stub("blog.external.ts", stub));
//! let result = registry.write_all(&output_dir)?;
//! ```

use std::path::Path;

use eyre::Result;
use hgen_core::{File, FileRules, WriteResult};
use tracing::trace;

use crate::language::{GenerateResult, PreviewFile};

/// Category of generated file, determining its write rules and order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileCategory {
    /// Machine-owned source: marker header, always overwritten.
    Generated,
    /// Machine-owned data in a format without comments, always overwritten.
    Data,
    /// User-owned stub, only written if missing.
    Stub,
}

impl FileCategory {
    /// Write rules for files of this category.
    pub fn rules(&self) -> FileRules {
        match self {
            FileCategory::Generated => FileRules::default(),
            FileCategory::Data => FileRules::bare(),
            FileCategory::Stub => FileRules::stub(),
        }
    }
}

/// An entry in the file registry representing a file to be generated.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Relative path from output directory.
    pub path: String,
    /// File body, without the header.
    pub body: String,
    pub category: FileCategory,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, body: impl Into<String>, category: FileCategory) -> Self {
        Self {
            path: path.into(),
            body: body.into(),
            category,
        }
    }

    /// Create a generated source file.
    pub fn generated(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(path, body, FileCategory::Generated)
    }

    /// Create a generated data file.
    pub fn data(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(path, body, FileCategory::Data)
    }

    /// Create a stub file.
    pub fn stub(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(path, body, FileCategory::Stub)
    }

    /// The file as it would be written below `base`.
    pub fn file(&self, base: &Path) -> File {
        File::with_rules(base.join(&self.path), &self.body, self.category.rules())
    }

    /// Full content, header included.
    pub fn content(&self) -> String {
        self.file(Path::new("")).content()
    }
}

/// Registry for collecting and managing generated files.
///
/// Entries are kept in category order, registration order within a
/// category.
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
}

impl FileRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file entry.
    pub fn register(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    /// Get all registered entries, sorted by category.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.category);
        sorted.into_iter()
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Preview all files with their full content.
    pub fn preview(&self) -> Vec<PreviewFile> {
        self.entries()
            .map(|e| PreviewFile {
                path: e.path.clone(),
                content: e.content(),
            })
            .collect()
    }

    /// Write all files to the output directory.
    pub fn write_all(&self, base: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();

        for entry in self.entries() {
            let outcome = entry.file(base).write()?;
            trace!(path = %entry.path, ?outcome, "emitted");
            match outcome {
                WriteResult::Written => result.written.push(entry.path.clone()),
                WriteResult::Unchanged => result.unchanged.push(entry.path.clone()),
                WriteResult::Skipped => result.skipped.push(entry.path.clone()),
            }
        }

        Ok(result)
    }
}

//! Language-agnostic code generation traits.

use std::path::Path;

use eyre::Result;
use hgen_ir::{Primitive, TypeNode};

/// Trait for language-specific code generators.
///
/// One generator instance covers one generation unit. Implement this
/// trait to add an emission target.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "rust", "typescript", "json")
    fn language(&self) -> &'static str;

    /// File extension of the main generated file (e.g., "rs", "ts")
    fn file_extension(&self) -> &'static str;

    /// Preview generated files without writing to disk
    fn preview(&self) -> Vec<PreviewFile>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateResult {
    /// Files that were written
    pub written: Vec<String>,
    /// Generated files whose content on disk was already up to date
    pub unchanged: Vec<String>,
    /// Stubs that were left alone because they already exist
    pub skipped: Vec<String>,
}

impl GenerateResult {
    /// Total number of files processed.
    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged.len() + self.skipped.len()
    }

    /// Fold another result into this one.
    pub fn merge(&mut self, other: GenerateResult) {
        self.written.extend(other.written);
        self.unchanged.extend(other.unchanged);
        self.skipped.extend(other.skipped);
    }
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content, header included
    pub content: String,
}

/// Trait for mapping type nodes to language-specific type strings.
///
/// Only the leaves and the composite constructors differ per language;
/// [`TypeMapper::map_type`] walks the tree.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Map a primitive kind
    fn map_primitive(&self, kind: Primitive) -> &'static str;

    /// Map an optional value
    fn map_nullable(&self, inner: &TypeNode) -> String;

    /// Map an ordered sequence
    fn map_list(&self, element: &TypeNode) -> String;

    /// Map an unordered collection of distinct values
    fn map_set(&self, element: &TypeNode) -> String;

    /// Map a keyed mapping
    fn map_map(&self, key: &TypeNode, value: &TypeNode) -> String;

    /// Map a named model (struct, enum, alias or external)
    fn map_named(&self, name: &str) -> String {
        name.to_string()
    }

    /// Map a whole type tree
    fn map_type(&self, node: &TypeNode) -> String {
        match node {
            TypeNode::Primitive(kind) => self.map_primitive(*kind).to_string(),
            TypeNode::Nullable(inner) => self.map_nullable(inner),
            TypeNode::List(element) => self.map_list(element),
            TypeNode::Set(element) => self.map_set(element),
            TypeNode::Map(key, value) => self.map_map(key, value),
            TypeNode::Reference(name)
            | TypeNode::Alias { name, .. }
            | TypeNode::External { name, .. } => self.map_named(name),
        }
    }
}

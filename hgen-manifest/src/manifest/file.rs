use std::path::{Path, PathBuf};

use hgen_ir::ast::SchemaAst;

use super::{Manifest, parse::parse_manifest};
use crate::Result;

/// A schema file with both raw content and its lowered AST.
#[derive(Debug, Clone)]
pub struct SchemaFile {
    path: PathBuf,
    manifest: Manifest,
    ast: SchemaAst,
}

impl SchemaFile {
    /// Open, parse and lower a schema file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        Self::from_content(path, content)
    }

    /// Parse and lower in-memory content as if read from `path`.
    pub fn from_content(path: impl Into<PathBuf>, content: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let content = content.into();
        let filename = path.display().to_string();
        let manifest = parse_manifest(&content, &filename)?;
        let ast = manifest.to_ast(&content, &filename)?;

        Ok(Self {
            path,
            manifest,
            ast,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Get the unresolved AST.
    pub fn ast(&self) -> &SchemaAst {
        &self.ast
    }

    /// Unit name.
    pub fn name(&self) -> &str {
        &self.ast.name
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_open_reads_and_lowers() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shop.toml");
        fs::write(
            &path,
            "[models.Item]\ntype = \"struct\"\nfields = { sku = \"string\" }\n",
        )
        .unwrap();

        let file = SchemaFile::open(&path).unwrap();

        assert_eq!(file.name(), "shop");
        assert_eq!(file.path(), path);
        assert_eq!(file.ast().models[0].name, "Item");
        assert!(file.manifest().services.is_empty());
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = SchemaFile::open(temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(*err, crate::Error::Io { .. }));
    }
}

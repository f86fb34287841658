//! Schema file types and parsing.
//!
//! A schema file is TOML. Tables keep their source order (`toml` is built
//! with `preserve_order`), which becomes declaration order in the IR.

mod file;
mod parse;

pub use file::SchemaFile;
use hgen_ir::Metadata;
use indexmap::IndexMap;
pub use parse::parse_manifest;
use serde::Deserialize;

/// Root of a schema file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Unit settings
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Schema-wide metadata defaults
    #[serde(default)]
    pub defaults: Defaults,

    /// Model declarations, keyed by name
    #[serde(default)]
    pub models: IndexMap<String, Model>,

    /// Service declarations, keyed by name
    #[serde(default)]
    pub services: IndexMap<String, Service>,
}

/// The `[schema]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Unit name; defaults to the file stem
    pub name: Option<String>,
}

/// The `[defaults]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    /// Layered under every struct field
    #[serde(default)]
    pub fields: Metadata,
    /// Layered under every service method
    #[serde(default)]
    pub methods: Metadata,
}

/// A `[models.<Name>]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Model {
    Struct {
        #[serde(default)]
        fields: IndexMap<String, FieldSpec>,
        #[serde(default)]
        field_defaults: Metadata,
        #[serde(default)]
        metadata: Metadata,
    },
    Enum {
        variants: Variants,
        #[serde(default)]
        metadata: Metadata,
    },
    Alias {
        inner: String,
        #[serde(default)]
        metadata: Metadata,
    },
    External {
        inner: String,
        #[serde(default)]
        metadata: Metadata,
    },
}

impl Model {
    /// Declaration-level metadata
    pub fn metadata(&self) -> &Metadata {
        match self {
            Model::Struct { metadata, .. }
            | Model::Enum { metadata, .. }
            | Model::Alias { metadata, .. }
            | Model::External { metadata, .. } => metadata,
        }
    }
}

/// A struct field: either a bare type expression or a table
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    /// `slug = "string"`
    Short(String),
    /// `title = { type = "string", metadata = { max = 120 } }`
    Full {
        #[serde(rename = "type")]
        ty: String,
        #[serde(default)]
        metadata: Metadata,
    },
}

impl FieldSpec {
    pub fn ty(&self) -> &str {
        match self {
            FieldSpec::Short(ty) | FieldSpec::Full { ty, .. } => ty,
        }
    }

    pub fn metadata(&self) -> Metadata {
        match self {
            FieldSpec::Short(_) => Metadata::new(),
            FieldSpec::Full { metadata, .. } => metadata.clone(),
        }
    }
}

/// Enum variants: a list of names, or a table of name to raw value
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Variants {
    List(Vec<String>),
    Table(IndexMap<String, String>),
}

/// A `[services.<Name>]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    #[serde(default)]
    pub methods: IndexMap<String, Method>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// A `[services.<Name>.methods.<name>]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Method {
    /// Input name to type expression
    #[serde(default)]
    pub inputs: IndexMap<String, String>,
    /// Output type expression; `unit` when omitted
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub metadata: Metadata,
}

fn default_output() -> String {
    "unit".to_string()
}

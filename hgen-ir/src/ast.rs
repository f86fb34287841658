//! Unresolved schema AST.
//!
//! This is the input contract of the [`SchemaBuilder`](crate::SchemaBuilder).
//! Front ends produce it; nothing here has been checked yet. Declarations
//! are kept in source order and may contain duplicates, which the builder
//! reports.

use std::fmt;

use crate::Metadata;

/// A raw type expression as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A lower-case identifier naming a primitive kind. Not validated yet.
    Primitive(String),
    /// Any other identifier.
    Reference(String),
    Nullable(Box<TypeExpr>),
    List(Box<TypeExpr>),
    Set(Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
}

impl TypeExpr {
    /// Classify a bare identifier: lower-case names are primitive kinds,
    /// everything else refers to a declaration.
    pub fn ident(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.starts_with(|c: char| c.is_ascii_lowercase()) {
            TypeExpr::Primitive(name)
        } else {
            TypeExpr::Reference(name)
        }
    }

    pub fn nullable(inner: TypeExpr) -> Self {
        TypeExpr::Nullable(Box::new(inner))
    }

    pub fn list(inner: TypeExpr) -> Self {
        TypeExpr::List(Box::new(inner))
    }

    pub fn set(inner: TypeExpr) -> Self {
        TypeExpr::Set(Box::new(inner))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map(Box::new(key), Box::new(value))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(name) | TypeExpr::Reference(name) => f.write_str(name),
            TypeExpr::Nullable(inner) => write!(f, "{inner}?"),
            TypeExpr::List(inner) => write!(f, "List<{inner}>"),
            TypeExpr::Set(inner) => write!(f, "Set<{inner}>"),
            TypeExpr::Map(key, value) => write!(f, "Map<{key}, {value}>"),
        }
    }
}

/// A whole schema file.
#[derive(Debug, Clone, Default)]
pub struct SchemaAst {
    /// Unit name, used for output file names.
    pub name: String,
    /// Schema-wide metadata defaults.
    pub defaults: DefaultsAst,
    /// Model declarations in source order.
    pub models: Vec<ModelAst>,
    /// Service declarations in source order.
    pub services: Vec<ServiceAst>,
}

/// Schema-wide metadata defaults, the least specific merge layer.
#[derive(Debug, Clone, Default)]
pub struct DefaultsAst {
    /// Applied to every struct field.
    pub fields: Metadata,
    /// Applied to every service method.
    pub methods: Metadata,
}

/// A top-level model declaration.
#[derive(Debug, Clone)]
pub struct ModelAst {
    pub name: String,
    pub kind: ModelKindAst,
    pub metadata: Metadata,
}

/// The body of a model declaration.
#[derive(Debug, Clone)]
pub enum ModelKindAst {
    Struct {
        fields: Vec<FieldAst>,
        /// Metadata layered under every field of this struct.
        field_defaults: Metadata,
    },
    Enum {
        variants: Vec<VariantAst>,
    },
    Alias {
        inner: TypeExpr,
    },
    External {
        representation: TypeExpr,
    },
}

#[derive(Debug, Clone)]
pub struct FieldAst {
    pub name: String,
    pub ty: TypeExpr,
    pub metadata: Metadata,
}

#[derive(Debug, Clone)]
pub struct VariantAst {
    pub name: String,
    /// Raw value; the variant name is used when absent.
    pub value: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ServiceAst {
    pub name: String,
    pub methods: Vec<MethodAst>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone)]
pub struct MethodAst {
    pub name: String,
    pub inputs: Vec<ParamAst>,
    pub output: TypeExpr,
    pub metadata: Metadata,
}

#[derive(Debug, Clone)]
pub struct ParamAst {
    pub name: String,
    pub ty: TypeExpr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_classifies_by_case() {
        assert_eq!(TypeExpr::ident("int64"), TypeExpr::Primitive("int64".into()));
        assert_eq!(TypeExpr::ident("Post"), TypeExpr::Reference("Post".into()));
        assert_eq!(TypeExpr::ident("_Raw"), TypeExpr::Reference("_Raw".into()));
    }

    #[test]
    fn test_display_uses_source_syntax() {
        let expr = TypeExpr::nullable(TypeExpr::map(
            TypeExpr::ident("string"),
            TypeExpr::list(TypeExpr::ident("Post")),
        ));
        assert_eq!(expr.to_string(), "Map<string, List<Post>>?");
    }
}

//! The type algebra: primitive kinds and recursive type nodes.

use std::{fmt, str::FromStr};

use crate::{Error, Metadata, Result, ast::TypeExpr};

/// Primitive (leaf) kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    Instant,
    Unit,
}

impl Primitive {
    /// All primitive kinds, in canonical order.
    pub const ALL: [Primitive; 8] = [
        Primitive::String,
        Primitive::Bool,
        Primitive::Int32,
        Primitive::Int64,
        Primitive::Float32,
        Primitive::Float64,
        Primitive::Instant,
        Primitive::Unit,
    ];

    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Bool => "bool",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::Instant => "instant",
            Primitive::Unit => "unit",
        }
    }

    /// Returns true if values of this kind can key a map.
    pub fn is_map_key(&self) -> bool {
        matches!(
            self,
            Primitive::String | Primitive::Int32 | Primitive::Int64
        )
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Primitive {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Primitive::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A node in the type algebra.
///
/// References are lookup keys into the schema namespace, never owned
/// values, so recursive data shapes stay finite. `Alias` and `External`
/// appear when a reference is expanded against its declaration.
///
/// Equality is structural: the metadata carried by `External` is ignored.
#[derive(Debug, Clone)]
pub enum TypeNode {
    Primitive(Primitive),
    Nullable(Box<TypeNode>),
    List(Box<TypeNode>),
    Set(Box<TypeNode>),
    Map(Box<TypeNode>, Box<TypeNode>),
    Reference(String),
    Alias {
        name: String,
        inner: Box<TypeNode>,
    },
    External {
        name: String,
        representation: Box<TypeNode>,
        metadata: Metadata,
    },
}

impl PartialEq for TypeNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeNode::Primitive(a), TypeNode::Primitive(b)) => a == b,
            (TypeNode::Nullable(a), TypeNode::Nullable(b))
            | (TypeNode::List(a), TypeNode::List(b))
            | (TypeNode::Set(a), TypeNode::Set(b)) => a == b,
            (TypeNode::Map(ak, av), TypeNode::Map(bk, bv)) => ak == bk && av == bv,
            (TypeNode::Reference(a), TypeNode::Reference(b)) => a == b,
            (
                TypeNode::Alias { name, inner },
                TypeNode::Alias {
                    name: other_name,
                    inner: other_inner,
                },
            ) => name == other_name && inner == other_inner,
            (
                TypeNode::External {
                    name,
                    representation,
                    ..
                },
                TypeNode::External {
                    name: other_name,
                    representation: other_representation,
                    ..
                },
            ) => name == other_name && representation == other_representation,
            _ => false,
        }
    }
}

impl Eq for TypeNode {}

impl TypeNode {
    pub fn primitive(kind: Primitive) -> Self {
        Self::Primitive(kind)
    }

    pub fn nullable(inner: TypeNode) -> Self {
        Self::Nullable(Box::new(inner))
    }

    pub fn list(inner: TypeNode) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn set(inner: TypeNode) -> Self {
        Self::Set(Box::new(inner))
    }

    pub fn map(key: TypeNode, value: TypeNode) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Build a type node from an unresolved type expression.
    ///
    /// References are kept as opaque names; `location` is only used to
    /// report unknown primitive kinds.
    pub fn from_expr(expr: &TypeExpr, location: &str) -> Result<Self> {
        Ok(match expr {
            TypeExpr::Primitive(kind) => {
                let kind = kind
                    .parse::<Primitive>()
                    .map_err(|kind| Error::UnknownPrimitiveKind {
                        kind,
                        location: location.to_string(),
                    })?;
                TypeNode::Primitive(kind)
            }
            TypeExpr::Reference(name) => TypeNode::Reference(name.clone()),
            TypeExpr::Nullable(inner) => TypeNode::nullable(Self::from_expr(inner, location)?),
            TypeExpr::List(inner) => TypeNode::list(Self::from_expr(inner, location)?),
            TypeExpr::Set(inner) => TypeNode::set(Self::from_expr(inner, location)?),
            TypeExpr::Map(key, value) => TypeNode::map(
                Self::from_expr(key, location)?,
                Self::from_expr(value, location)?,
            ),
        })
    }

    /// Short name of this node's kind, as used in the runtime schema.
    pub fn kind(&self) -> &'static str {
        match self {
            TypeNode::Primitive(p) => p.as_str(),
            TypeNode::Nullable(_) => "nullable",
            TypeNode::List(_) => "list",
            TypeNode::Set(_) => "set",
            TypeNode::Map(..) => "map",
            TypeNode::Reference(_) => "reference",
            TypeNode::Alias { .. } => "alias",
            TypeNode::External { .. } => "external",
        }
    }

    /// Returns true if this node denotes an optional value.
    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeNode::Nullable(_))
    }

    /// Visit every node of the tree, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TypeNode)) {
        visit(self);
        match self {
            TypeNode::Primitive(_) | TypeNode::Reference(_) => {}
            TypeNode::Nullable(inner) | TypeNode::List(inner) | TypeNode::Set(inner) => {
                inner.walk(visit)
            }
            TypeNode::Map(key, value) => {
                key.walk(visit);
                value.walk(visit);
            }
            TypeNode::Alias { inner, .. } => inner.walk(visit),
            TypeNode::External { representation, .. } => representation.walk(visit),
        }
    }

    /// Collect the names of all references in the tree, in visit order.
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |node| {
            if let TypeNode::Reference(name) = node {
                names.push(name.as_str());
            }
        });
        names
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Primitive(p) => write!(f, "{p}"),
            TypeNode::Nullable(inner) => write!(f, "{inner}?"),
            TypeNode::List(inner) => write!(f, "List<{inner}>"),
            TypeNode::Set(inner) => write!(f, "Set<{inner}>"),
            TypeNode::Map(key, value) => write!(f, "Map<{key}, {value}>"),
            TypeNode::Reference(name)
            | TypeNode::Alias { name, .. }
            | TypeNode::External { name, .. } => f.write_str(name),
        }
    }
}

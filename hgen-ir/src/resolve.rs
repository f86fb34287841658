//! Name resolution against the schema namespace.
//!
//! The resolver checks three things over every type tree of a unit:
//!
//! 1. every `reference` names a declared model,
//! 2. chains of alias-like declarations (aliases and externals naming
//!    one another directly) terminate,
//! 3. map keys are string, integer or enum shaped.
//!
//! Recursion through a composite (`List<Tree>`, `Node?`, a struct field)
//! is legal. Only a bare reference is followed when an alias is expanded
//! to its terminal shape, so only a chain of bare references can loop.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::trace;

use crate::{Error, ModelDecl, Result, ServiceDecl, TypeNode};

/// Read-only view of a unit's namespace.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    models: &'a IndexMap<String, ModelDecl>,
    services: &'a IndexMap<String, ServiceDecl>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        models: &'a IndexMap<String, ModelDecl>,
        services: &'a IndexMap<String, ServiceDecl>,
    ) -> Self {
        Self { models, services }
    }

    /// Look up a model declaration by name.
    pub fn lookup(&self, name: &str) -> Option<&'a ModelDecl> {
        self.models.get(name)
    }

    /// Run every check, stopping at the first error.
    pub fn check(&self) -> Result<()> {
        self.check_references()?;
        self.check_alias_cycles()?;
        self.check_map_keys()
    }

    /// Every type tree of the unit, with its dotted location.
    fn sites(&self) -> Vec<(String, &'a TypeNode)> {
        let models = self.models.values().flat_map(ModelDecl::type_sites);
        let services = self.services.values().flat_map(ServiceDecl::type_sites);
        models.chain(services).collect()
    }

    /// Fail on the first reference that does not name a model.
    ///
    /// Services live in the same namespace but are not types, so a
    /// reference naming a service dangles too.
    pub fn check_references(&self) -> Result<()> {
        for (location, ty) in self.sites() {
            for name in ty.references() {
                if self.lookup(name).is_none() {
                    return Err(Error::DanglingReference {
                        name: name.to_string(),
                        location,
                    });
                }
                trace!(%location, name, "resolved reference");
            }
        }
        Ok(())
    }

    /// Depth-first search over the alias graph.
    ///
    /// Nodes are aliases and externals; an edge goes to the alias or
    /// external the inner type names when the inner type is that bare
    /// reference. Revisiting a node on the current path is a cycle,
    /// reported with the first node repeated at the end.
    pub fn check_alias_cycles(&self) -> Result<()> {
        let mut done = HashSet::new();
        for model in self.models.values() {
            let mut path = Vec::new();
            self.visit(model, &mut path, &mut done)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        model: &'a ModelDecl,
        path: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> Result<()> {
        let inner = match model {
            ModelDecl::Alias(alias) => &alias.inner,
            ModelDecl::External(external) => &external.representation,
            ModelDecl::Struct(_) | ModelDecl::Enum(_) => return Ok(()),
        };
        let name = model.name();
        if done.contains(name) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|seen| *seen == name) {
            let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
            cycle.push(name.to_string());
            return Err(Error::AliasCycle { path: cycle });
        }

        path.push(name);
        if let TypeNode::Reference(target) = inner
            && let Some(next) = self.lookup(target)
        {
            self.visit(next, path, done)?;
        }
        path.pop();
        done.insert(name);
        Ok(())
    }

    /// Fail on the first map whose key is not string, integer or enum shaped.
    pub fn check_map_keys(&self) -> Result<()> {
        for (location, ty) in self.sites() {
            let mut invalid = None;
            ty.walk(&mut |node| {
                if let TypeNode::Map(key, _) = node
                    && invalid.is_none()
                    && !self.is_map_key(key)
                {
                    invalid = Some(key.to_string());
                }
            });
            if let Some(key) = invalid {
                return Err(Error::InvalidMapKey { key, location });
            }
        }
        Ok(())
    }

    fn is_map_key(&self, key: &TypeNode) -> bool {
        match self.terminal(key) {
            Ok(TypeNode::Primitive(kind)) => kind.is_map_key(),
            Ok(TypeNode::Reference(name)) => {
                matches!(self.lookup(name), Some(ModelDecl::Enum(_)))
            }
            _ => false,
        }
    }

    /// Follow aliases until the first non-alias node.
    ///
    /// References to structs, enums and externals are returned as is.
    pub fn terminal<'n>(&self, node: &'n TypeNode) -> Result<&'n TypeNode>
    where
        'a: 'n,
    {
        let mut current = node;
        let mut path: Vec<&str> = Vec::new();
        loop {
            current = match current {
                TypeNode::Alias { inner, .. } => inner,
                TypeNode::Reference(name) => match self.lookup(name) {
                    Some(ModelDecl::Alias(alias)) => {
                        if path.contains(&name.as_str()) {
                            let mut cycle: Vec<String> =
                                path.iter().map(|n| n.to_string()).collect();
                            cycle.push(name.clone());
                            return Err(Error::AliasCycle { path: cycle });
                        }
                        path.push(name);
                        &alias.inner
                    }
                    _ => return Ok(current),
                },
                _ => return Ok(current),
            };
        }
    }

    /// Eagerly expand references to aliases and externals.
    ///
    /// Every reference to an alias becomes an `alias` node wrapping its
    /// expanded inner type, every reference to an external becomes an
    /// `external` node. References to structs and enums stay references,
    /// and so does a reference back into an alias that is already being
    /// expanded further up the tree (`Tree = List<Tree>`).
    pub fn expand(&self, node: &TypeNode, location: &str) -> Result<TypeNode> {
        self.expand_with(node, location, &mut Vec::new(), &mut Vec::new())
    }

    /// `chain` holds the aliases entered through bare references since
    /// the last composite, `open` every alias entered on the way down.
    fn expand_with(
        &self,
        node: &TypeNode,
        location: &str,
        chain: &mut Vec<String>,
        open: &mut Vec<String>,
    ) -> Result<TypeNode> {
        Ok(match node {
            TypeNode::Primitive(_) => node.clone(),
            TypeNode::Nullable(inner) => {
                TypeNode::nullable(self.expand_with(inner, location, &mut Vec::new(), open)?)
            }
            TypeNode::List(inner) => {
                TypeNode::list(self.expand_with(inner, location, &mut Vec::new(), open)?)
            }
            TypeNode::Set(inner) => {
                TypeNode::set(self.expand_with(inner, location, &mut Vec::new(), open)?)
            }
            TypeNode::Map(key, value) => TypeNode::map(
                self.expand_with(key, location, &mut Vec::new(), open)?,
                self.expand_with(value, location, &mut Vec::new(), open)?,
            ),
            TypeNode::Alias { name, inner } => TypeNode::Alias {
                name: name.clone(),
                inner: Box::new(self.expand_with(inner, location, chain, open)?),
            },
            TypeNode::External {
                name,
                representation,
                metadata,
            } => TypeNode::External {
                name: name.clone(),
                representation: Box::new(self.expand_with(representation, location, chain, open)?),
                metadata: metadata.clone(),
            },
            TypeNode::Reference(name) => {
                let Some(model) = self.lookup(name) else {
                    return Err(Error::DanglingReference {
                        name: name.clone(),
                        location: location.to_string(),
                    });
                };
                let inner = match model {
                    ModelDecl::Alias(alias) => &alias.inner,
                    ModelDecl::External(external) => &external.representation,
                    ModelDecl::Struct(_) | ModelDecl::Enum(_) => return Ok(node.clone()),
                };
                if let Some(start) = chain.iter().position(|n| n == name) {
                    let mut cycle = chain[start..].to_vec();
                    cycle.push(name.clone());
                    return Err(Error::AliasCycle { path: cycle });
                }
                if open.contains(name) {
                    return Ok(node.clone());
                }

                chain.push(name.clone());
                open.push(name.clone());
                let expanded = Box::new(self.expand_with(inner, location, chain, open)?);
                open.pop();
                chain.pop();

                match model {
                    ModelDecl::External(external) => TypeNode::External {
                        name: name.clone(),
                        representation: expanded,
                        metadata: external.metadata.clone(),
                    },
                    _ => TypeNode::Alias {
                        name: name.clone(),
                        inner: expanded,
                    },
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AliasDecl, EnumDecl, ExternalDecl, Field, Metadata, Primitive, StructDecl};

    fn alias(name: &str, inner: TypeNode) -> (String, ModelDecl) {
        (
            name.to_string(),
            ModelDecl::Alias(AliasDecl {
                name: name.into(),
                inner,
                metadata: Metadata::new(),
            }),
        )
    }

    fn structure(name: &str, fields: &[(&str, TypeNode)]) -> (String, ModelDecl) {
        (
            name.to_string(),
            ModelDecl::Struct(StructDecl {
                name: name.into(),
                fields: fields
                    .iter()
                    .map(|(f, ty)| (f.to_string(), Field::new(ty.clone())))
                    .collect(),
                metadata: Metadata::new(),
            }),
        )
    }

    fn status() -> (String, ModelDecl) {
        (
            "Status".to_string(),
            ModelDecl::Enum(EnumDecl {
                name: "Status".into(),
                variants: [("Draft".to_string(), "draft".to_string())]
                    .into_iter()
                    .collect(),
                metadata: Metadata::new(),
            }),
        )
    }

    fn models(decls: Vec<(String, ModelDecl)>) -> IndexMap<String, ModelDecl> {
        decls.into_iter().collect()
    }

    #[test]
    fn test_self_referential_struct_resolves() {
        let models = models(vec![structure(
            "Node",
            &[("next", TypeNode::nullable(TypeNode::reference("Node")))],
        )]);
        let services = IndexMap::new();
        assert_eq!(Resolver::new(&models, &services).check(), Ok(()));
    }

    #[test]
    fn test_dangling_reference_names_location() {
        let models = models(vec![structure(
            "Post",
            &[("author", TypeNode::reference("Ghost"))],
        )]);
        let services = IndexMap::new();
        assert_eq!(
            Resolver::new(&models, &services).check(),
            Err(Error::DanglingReference {
                name: "Ghost".into(),
                location: "Post.author".into(),
            })
        );
    }

    #[test]
    fn test_two_alias_cycle_reports_full_chain() {
        let models = models(vec![
            alias("A", TypeNode::reference("B")),
            alias("B", TypeNode::reference("A")),
        ]);
        let services = IndexMap::new();
        assert_eq!(
            Resolver::new(&models, &services).check(),
            Err(Error::AliasCycle {
                path: vec!["A".into(), "B".into(), "A".into()],
            })
        );
    }

    #[test]
    fn test_alias_recursion_through_composites_resolves() {
        let models = models(vec![
            alias("Tree", TypeNode::list(TypeNode::reference("Tree"))),
            alias("Maybe", TypeNode::nullable(TypeNode::reference("Maybe"))),
            alias(
                "Json",
                TypeNode::map(
                    TypeNode::primitive(Primitive::String),
                    TypeNode::reference("Json"),
                ),
            ),
        ]);
        let services = IndexMap::new();
        assert_eq!(Resolver::new(&models, &services).check(), Ok(()));
    }

    #[test]
    fn test_alias_naming_itself_is_a_cycle() {
        let models = models(vec![alias("Loop", TypeNode::reference("Loop"))]);
        let services = IndexMap::new();
        assert_eq!(
            Resolver::new(&models, &services).check_alias_cycles(),
            Err(Error::AliasCycle {
                path: vec!["Loop".into(), "Loop".into()],
            })
        );
    }

    #[test]
    fn test_expand_stops_at_recursive_alias() {
        let models = models(vec![
            alias("Tree", TypeNode::list(TypeNode::reference("Tree"))),
            alias("Forest", TypeNode::reference("Tree")),
        ]);
        let services = IndexMap::new();
        let resolver = Resolver::new(&models, &services);

        assert_eq!(
            resolver.expand(&TypeNode::reference("Forest"), "Park.trees"),
            Ok(TypeNode::Alias {
                name: "Forest".into(),
                inner: Box::new(TypeNode::Alias {
                    name: "Tree".into(),
                    inner: Box::new(TypeNode::list(TypeNode::reference("Tree"))),
                }),
            })
        );
    }

    #[test]
    fn test_alias_through_struct_is_not_a_cycle() {
        let models = models(vec![
            alias("Children", TypeNode::list(TypeNode::reference("Node"))),
            structure("Node", &[("children", TypeNode::reference("Children"))]),
        ]);
        let services = IndexMap::new();
        assert_eq!(Resolver::new(&models, &services).check(), Ok(()));
    }

    #[test]
    fn test_map_keys_accept_enums_and_aliased_strings() {
        let models = models(vec![
            status(),
            alias("Slug", TypeNode::primitive(Primitive::String)),
            structure(
                "Stats",
                &[
                    (
                        "by_status",
                        TypeNode::map(
                            TypeNode::reference("Status"),
                            TypeNode::primitive(Primitive::Int64),
                        ),
                    ),
                    (
                        "by_slug",
                        TypeNode::map(
                            TypeNode::reference("Slug"),
                            TypeNode::primitive(Primitive::Int64),
                        ),
                    ),
                ],
            ),
        ]);
        let services = IndexMap::new();
        assert_eq!(Resolver::new(&models, &services).check(), Ok(()));
    }

    #[test]
    fn test_map_key_rejects_floats_and_structs() {
        let models = models(vec![
            structure("Point", &[]),
            structure(
                "Grid",
                &[(
                    "cells",
                    TypeNode::map(
                        TypeNode::reference("Point"),
                        TypeNode::primitive(Primitive::Bool),
                    ),
                )],
            ),
        ]);
        let services = IndexMap::new();
        assert_eq!(
            Resolver::new(&models, &services).check(),
            Err(Error::InvalidMapKey {
                key: "Point".into(),
                location: "Grid.cells".into(),
            })
        );

        let models = models_with_float_key();
        assert!(matches!(
            Resolver::new(&models, &services).check(),
            Err(Error::InvalidMapKey { .. })
        ));
    }

    fn models_with_float_key() -> IndexMap<String, ModelDecl> {
        models(vec![alias(
            "Weights",
            TypeNode::map(
                TypeNode::primitive(Primitive::Float64),
                TypeNode::primitive(Primitive::Float64),
            ),
        )])
    }

    #[test]
    fn test_expand_wraps_aliases_and_externals() {
        let models = models(vec![
            alias("UUID", TypeNode::primitive(Primitive::String)),
            alias("Ids", TypeNode::list(TypeNode::reference("UUID"))),
            (
                "Instant".to_string(),
                ModelDecl::External(ExternalDecl {
                    name: "Instant".into(),
                    representation: TypeNode::primitive(Primitive::String),
                    metadata: Metadata::new().with("module", "./time"),
                }),
            ),
            structure("Post", &[]),
        ]);
        let services = IndexMap::new();
        let resolver = Resolver::new(&models, &services);

        let expanded = resolver
            .expand(&TypeNode::reference("Ids"), "Feed.ids")
            .unwrap();
        assert_eq!(
            expanded,
            TypeNode::Alias {
                name: "Ids".into(),
                inner: Box::new(TypeNode::list(TypeNode::Alias {
                    name: "UUID".into(),
                    inner: Box::new(TypeNode::primitive(Primitive::String)),
                })),
            }
        );

        let expanded = resolver
            .expand(&TypeNode::reference("Instant"), "Post.created")
            .unwrap();
        let TypeNode::External { metadata, .. } = &expanded else {
            panic!("expected external, got {expanded:?}");
        };
        assert_eq!(metadata.get_str("module"), Some("./time"));

        assert_eq!(
            resolver.expand(&TypeNode::reference("Post"), "x").unwrap(),
            TypeNode::reference("Post")
        );
    }

    #[test]
    fn test_terminal_follows_alias_chain() {
        let models = models(vec![
            alias("A", TypeNode::reference("B")),
            alias("B", TypeNode::primitive(Primitive::Int32)),
        ]);
        let services = IndexMap::new();
        let resolver = Resolver::new(&models, &services);
        let reference = TypeNode::reference("A");
        assert_eq!(
            resolver.terminal(&reference),
            Ok(&TypeNode::primitive(Primitive::Int32))
        );
    }
}

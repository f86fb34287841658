//! The frozen, validated schema.

use indexmap::IndexMap;

use crate::{ExternalDecl, ModelDecl, Resolver, ServiceDecl};

/// A validated generation unit.
///
/// A `Schema` can only be obtained from the [`SchemaBuilder`](crate::SchemaBuilder)
/// or by decoding a [`SchemaDocument`](crate::SchemaDocument), so every
/// reference in it resolves and no alias chain loops. It is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    models: IndexMap<String, ModelDecl>,
    services: IndexMap<String, ServiceDecl>,
}

impl Schema {
    pub(crate) fn new(
        name: String,
        models: IndexMap<String, ModelDecl>,
        services: IndexMap<String, ServiceDecl>,
    ) -> Self {
        Self {
            name,
            models,
            services,
        }
    }

    /// Unit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Models in declaration order.
    pub fn models(&self) -> impl Iterator<Item = &ModelDecl> {
        self.models.values()
    }

    pub fn model(&self, name: &str) -> Option<&ModelDecl> {
        self.models.get(name)
    }

    /// Services in declaration order.
    pub fn services(&self) -> impl Iterator<Item = &ServiceDecl> {
        self.services.values()
    }

    pub fn service(&self, name: &str) -> Option<&ServiceDecl> {
        self.services.get(name)
    }

    /// External declarations in declaration order.
    pub fn externals(&self) -> impl Iterator<Item = &ExternalDecl> {
        self.models.values().filter_map(|model| match model {
            ModelDecl::External(external) => Some(external),
            _ => None,
        })
    }

    /// A resolver over this schema's namespace.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.models, &self.services)
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.services.is_empty()
    }
}

//! Metadata keys the emitters understand.
//!
//! Everything else in a declaration's metadata is carried into the runtime
//! schema document only.

use hgen_ir::{ExternalDecl, MethodDecl, Metadata, Schema, ServiceDecl};

/// Doc comment text for the annotated declaration.
pub const DOC: &str = "doc";

/// Module an external type is imported from.
pub const MODULE: &str = "module";

/// The `doc` string of a declaration, if any.
pub fn doc(metadata: &Metadata) -> Option<&str> {
    metadata.get_str(DOC)
}

/// The `doc` string of a method.
///
/// Method metadata inherits the service's metadata, so a `doc` equal to
/// the service's own is not repeated on the method.
pub fn method_doc<'a>(service: &ServiceDecl, method: &'a MethodDecl) -> Option<&'a str> {
    let own = doc(&method.metadata)?;
    match doc(&service.metadata) {
        Some(inherited) if inherited == own => None,
        _ => Some(own),
    }
}

/// The module an external declares, `None` if it uses the target's default.
pub fn external_module(external: &ExternalDecl) -> Option<&str> {
    external.metadata.get_str(MODULE)
}

/// Externals that are left to the target's default module, in declaration
/// order. Emitters write a user-owned stub for these.
pub fn default_module_externals(schema: &Schema) -> Vec<&ExternalDecl> {
    schema
        .externals()
        .filter(|external| external_module(external).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use hgen_ir::SchemaBuilder;

    use super::*;

    fn build(content: &str) -> Schema {
        let ast = hgen_manifest::parse_str(content).expect("Failed to parse test schema");
        SchemaBuilder::new(&ast).build().expect("schema should build")
    }

    #[test]
    fn test_method_doc_skips_inherited_service_doc() {
        let schema = build(
            r#"
            [services.PostService]
            metadata = { doc = "Posts." }

            [services.PostService.methods.list]
            output = "unit"

            [services.PostService.methods.findOne]
            inputs = { slug = "string" }
            metadata = { doc = "One post." }
            "#,
        );

        let service = schema.service("PostService").unwrap();
        assert_eq!(doc(&service.metadata), Some("Posts."));
        assert_eq!(method_doc(service, &service.methods["list"]), None);
        assert_eq!(
            method_doc(service, &service.methods["findOne"]),
            Some("One post.")
        );
    }

    #[test]
    fn test_default_module_externals() {
        let schema = build(
            r#"
            [models.Instant]
            type = "external"
            inner = "string"

            [models.Money]
            type = "external"
            inner = "string"
            metadata = { module = "./money" }
            "#,
        );

        let names: Vec<_> = default_module_externals(&schema)
            .iter()
            .map(|x| x.name.as_str())
            .collect();
        assert_eq!(names, vec!["Instant"]);
    }
}

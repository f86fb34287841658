//! Lint for declarations whose generated names collide.

use std::collections::{HashMap, HashSet};

use hgen_core::to_pascal_case;
use hgen_ir::{ModelDecl, Schema};

use super::super::Lint;
use crate::{naming::RUST_NAMING, pipeline::Diagnostic};

/// Lint that rejects schemas the emitters cannot render without clashes.
///
/// Distinct schema names can still meet after generation: `findOne` and
/// `find_one` are both `find_one` in Rust, and a model called `Transport`
/// or `PostServiceFindOneInputs` shadows a generated item. These are
/// errors, the unit is not emitted.
pub struct GeneratedNamesLint;

impl Lint for GeneratedNamesLint {
    fn name(&self) -> &'static str {
        "generated-names"
    }

    fn description(&self) -> &'static str {
        "Reject declarations whose generated names collide"
    }

    fn check(&self, schema: &Schema, diagnostics: &mut Vec<Diagnostic>) {
        for model in schema.models() {
            if let ModelDecl::Struct(decl) = model {
                check_members(decl.fields.keys(), "field", &decl.name, diagnostics);
            }
        }

        for service in schema.services() {
            check_members(service.methods.keys(), "method", &service.name, diagnostics);
            for (name, method) in &service.methods {
                let owner = format!("{}.{name}", service.name);
                check_members(method.inputs.keys(), "input", &owner, diagnostics);
            }

            if service.methods.contains_key("constructor") {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "method 'constructor' of '{}' cannot be a TypeScript class method",
                            service.name
                        ),
                    )
                    .at(format!("{}.constructor", service.name)),
                );
            }
        }

        check_types(schema, diagnostics);
    }
}

/// Members of one owner whose Rust spellings coincide.
///
/// Rust drops underscores when it changes case, so the escapes of the other
/// targets (`class_` in Dart, `_class` in TypeScript) always meet here too.
fn check_members<'a>(
    names: impl IntoIterator<Item = &'a String>,
    kind: &str,
    owner: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut claimed: HashMap<String, &str> = HashMap::new();
    for name in names {
        let rust_name = RUST_NAMING.member_name(name);
        if rust_name.is_empty() {
            diagnostics.push(
                Diagnostic::error(
                    "validate",
                    format!("{kind} '{name}' of '{owner}' has no Rust spelling"),
                )
                .at(format!("{owner}.{name}")),
            );
        } else if let Some(first) = claimed.get(&rust_name) {
            diagnostics.push(
                Diagnostic::error(
                    "validate",
                    format!(
                        "{kind}s '{first}' and '{name}' of '{owner}' both become `{rust_name}` in Rust"
                    ),
                )
                .at(format!("{owner}.{name}")),
            );
        } else {
            claimed.insert(rust_name, name);
        }
    }
}

/// Generated item names against model names and each other.
fn check_types(schema: &Schema, diagnostics: &mut Vec<Diagnostic>) {
    let mut claimed: HashMap<String, String> = schema
        .models()
        .map(|model| (model.name().to_string(), format!("model '{}'", model.name())))
        .collect();

    let mut claim = |name: String, origin: String, location: String| {
        if let Some(owner) = claimed.get(&name) {
            diagnostics.push(
                Diagnostic::error(
                    "validate",
                    format!("{origin} generates `{name}`, which {owner} already declares"),
                )
                .at(location),
            );
        } else {
            claimed.insert(name, origin);
        }
    };

    if schema.services().next().is_some() {
        claim(
            "Transport".to_string(),
            "the Rust transport trait".to_string(),
            "Transport".to_string(),
        );
    }

    for service in schema.services() {
        for suffix in ["Consumer", "Provider"] {
            claim(
                format!("{}{suffix}", service.name),
                format!("service '{}'", service.name),
                service.name.clone(),
            );
        }

        // methods that already collide as members are reported once
        let mut seen = HashSet::new();
        for name in service.methods.keys() {
            if !seen.insert(RUST_NAMING.member_name(name)) {
                continue;
            }
            let location = format!("{}.{name}", service.name);
            claim(
                format!("{}{}Inputs", service.name, to_pascal_case(name)),
                format!("method '{location}'"),
                location,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use hgen_ir::SchemaBuilder;

    use super::*;

    fn build(content: &str) -> Schema {
        let ast = hgen_manifest::parse_str(content).expect("Failed to parse test schema");
        SchemaBuilder::new(&ast).build().expect("schema should build")
    }

    fn check(content: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        GeneratedNamesLint.check(&build(content), &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_distinct_names_pass() {
        let diagnostics = check(
            r#"
            [models.Post]
            type = "struct"
            fields = { slug = "string", publishedAt = "string?" }

            [services.PostService.methods.findOne]
            inputs = { slug = "string" }
            output = "Post?"
            "#,
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_methods_meeting_in_snake_case() {
        let diagnostics = check(
            r#"
            [services.PostService.methods.findOne]
            inputs = { slug = "string" }

            [services.PostService.methods.find_one]
            inputs = { id = "int32" }
            "#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
        assert_eq!(
            diagnostics[0].message,
            "methods 'findOne' and 'find_one' of 'PostService' both become `find_one` in Rust"
        );
        assert_eq!(diagnostics[0].location.as_deref(), Some("PostService.find_one"));
    }

    #[test]
    fn test_fields_and_inputs_meeting_in_snake_case() {
        let diagnostics = check(
            r#"
            [models.Post]
            type = "struct"
            fields = { createdAt = "string", created_at = "string" }

            [services.Posts.methods.since]
            inputs = { fromDate = "string", from_date = "string" }
            output = "List<Post>"
            "#,
        );

        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "fields 'createdAt' and 'created_at' of 'Post' both become `created_at` in Rust",
                "inputs 'fromDate' and 'from_date' of 'Posts.since' both become `from_date` in Rust",
            ]
        );
    }

    #[test]
    fn test_models_shadowing_generated_items() {
        let diagnostics = check(
            r#"
            [models.Transport]
            type = "alias"
            inner = "string"

            [models.PostServiceFindOneInputs]
            type = "struct"
            fields = { slug = "string" }

            [models.PostServiceConsumer]
            type = "alias"
            inner = "string"

            [services.PostService.methods.findOne]
            inputs = { slug = "string" }
            "#,
        );

        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "the Rust transport trait generates `Transport`, which model 'Transport' already declares",
                "service 'PostService' generates `PostServiceConsumer`, which model 'PostServiceConsumer' already declares",
                "method 'PostService.findOne' generates `PostServiceFindOneInputs`, which model 'PostServiceFindOneInputs' already declares",
            ]
        );
        assert!(diagnostics.iter().all(|d| d.severity.is_error()));
    }

    #[test]
    fn test_transport_is_free_without_services() {
        let diagnostics = check(
            r#"
            [models.Transport]
            type = "enum"
            variants = ["Rail", "Road"]
            "#,
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_inputs_colliding_across_services() {
        let diagnostics = check(
            r#"
            [services.Post.methods.serviceFind]

            [services.PostService.methods.find]
            "#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "method 'PostService.find' generates `PostServiceFindInputs`, which method 'Post.serviceFind' already declares"
        );
        assert_eq!(diagnostics[0].location.as_deref(), Some("PostService.find"));
    }

    #[test]
    fn test_constructor_method() {
        let diagnostics = check(
            r#"
            [services.Widgets.methods.constructor]
            "#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "method 'constructor' of 'Widgets' cannot be a TypeScript class method"
        );
    }

    #[test]
    fn test_escaped_members_meeting_other_members() {
        let diagnostics = check(
            r#"
            [models.Style]
            type = "struct"
            fields = { class = "string", class_ = "string" }

            [services.Styles.methods.byClass]
            inputs = { class = "string", _class = "string" }

            [services.Styles.methods.reset]
            inputs = { _ = "bool" }
            "#,
        );

        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "fields 'class' and 'class_' of 'Style' both become `r#class` in Rust",
                "inputs 'class' and '_class' of 'Styles.byClass' both become `r#class` in Rust",
                "input '_' of 'Styles.reset' has no Rust spelling",
            ]
        );
    }
}

//! Lint for declaration naming conventions.

use hgen_core::is_pascal_case;
use hgen_ir::{ModelDecl, Schema};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about names that don't follow the usual casing.
///
/// Models and services are PascalCase (`Post`, `PostService`); fields,
/// methods and inputs start lower-case (`createdAt`, `findOne`).
pub struct NamingLint;

impl Lint for NamingLint {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn description(&self) -> &'static str {
        "Check declaration names follow PascalCase / camelCase conventions"
    }

    fn check(&self, schema: &Schema, diagnostics: &mut Vec<Diagnostic>) {
        for model in schema.models() {
            check_type_name(model.name(), "model", diagnostics);
            if let ModelDecl::Struct(decl) = model {
                for field in decl.fields.keys() {
                    check_member_name(field, "field", &format!("{}.{field}", decl.name), diagnostics);
                }
            }
        }

        for service in schema.services() {
            check_type_name(&service.name, "service", diagnostics);
            for (method_name, method) in &service.methods {
                let location = format!("{}.{method_name}", service.name);
                check_member_name(method_name, "method", &location, diagnostics);
                for input in method.inputs.keys() {
                    check_member_name(
                        input,
                        "input",
                        &format!("{location}.{input}"),
                        diagnostics,
                    );
                }
            }
        }
    }
}

fn starts_lower_case(s: &str) -> bool {
    !s.starts_with(|c: char| c.is_ascii_uppercase())
}

fn check_type_name(name: &str, kind: &str, diagnostics: &mut Vec<Diagnostic>) {
    if !is_pascal_case(name) {
        diagnostics.push(
            Diagnostic::warning(
                "validate",
                format!("{kind} '{name}' should use PascalCase (e.g., 'BlogPost' not 'blog_post')"),
            )
            .at(name),
        );
    }
}

fn check_member_name(name: &str, kind: &str, location: &str, diagnostics: &mut Vec<Diagnostic>) {
    if !starts_lower_case(name) {
        diagnostics.push(
            Diagnostic::warning(
                "validate",
                format!("{kind} '{name}' should start with a lower-case letter"),
            )
            .at(location),
        );
    }
}

//! Lint for models no service can reach.

use std::collections::HashSet;

use hgen_ir::Schema;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about models not used by any service method.
///
/// A model counts as used when a method input or output names it, or
/// when a used model names it. Units without services are pure model
/// libraries and are not checked.
pub struct UnusedModelLint;

impl Lint for UnusedModelLint {
    fn name(&self) -> &'static str {
        "unused-model"
    }

    fn description(&self) -> &'static str {
        "Detect models that no service method reaches"
    }

    fn check(&self, schema: &Schema, diagnostics: &mut Vec<Diagnostic>) {
        if schema.services().next().is_none() {
            return;
        }

        let reachable = reachable_models(schema);
        for model in schema.models() {
            if !reachable.contains(model.name()) {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "{} '{}' is not used by any service",
                            model.kind().as_str(),
                            model.name()
                        ),
                    )
                    .at(model.name()),
                );
            }
        }
    }
}

fn reachable_models(schema: &Schema) -> HashSet<&str> {
    let mut pending: Vec<&str> = schema
        .services()
        .flat_map(|service| service.type_sites())
        .flat_map(|(_, ty)| ty.references())
        .collect();

    let mut reachable = HashSet::new();
    while let Some(name) = pending.pop() {
        if !reachable.insert(name) {
            continue;
        }
        if let Some(model) = schema.model(name) {
            for (_, ty) in model.type_sites() {
                pending.extend(ty.references());
            }
        }
    }
    reachable
}

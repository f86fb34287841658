//! Rendering of the runtime schema document.
//!
//! Every target embeds the same document; rendering it in one place keeps
//! the bytes identical across targets and runs.

use hgen_ir::{Schema, SchemaDocument};

/// Render the runtime schema document on a single line.
pub fn render_compact(schema: &Schema) -> String {
    let document = SchemaDocument::from(schema);
    serde_json::to_string(&document)
        .unwrap_or_else(|err| unreachable!("schema documents always serialize: {err}"))
}

/// Render the runtime schema document with two-space indentation.
pub fn render_pretty(schema: &Schema) -> String {
    let document = SchemaDocument::from(schema);
    serde_json::to_string_pretty(&document)
        .unwrap_or_else(|err| unreachable!("schema documents always serialize: {err}"))
}

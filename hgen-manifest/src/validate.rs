//! Validation utilities for schema identifiers and type expressions

use std::sync::Arc;

use hgen_ir::ast::TypeExpr;
use miette::SourceSpan;

use crate::{Error, Result, error::SourceContext, type_expr::parse_type_expr};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the schema, making it easier to pass validation context through
/// nested declarations.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "blog.toml");
/// ctx.validate_name("Post", "model")?;
///
/// // For nested validation
/// let post = ctx.push("Post");
/// let ty = post.parse_type("author", "User?")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["PostService", "findOne"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Dotted location of a member of the current path.
    pub fn location(&self, member: &str) -> String {
        if self.path.is_empty() {
            member.to_string()
        } else {
            format!("{}.{member}", self.path_string())
        }
    }

    /// Get a context description for error messages.
    ///
    /// For example: "field in 'Post'" or just "model" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.src(), name)
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(&self, name: &str, kind: &str, reason: &str) -> Box<Error> {
        self.source.invalid_identifier_error(
            name,
            self.context_for(kind),
            reason,
            self.find_span(name),
        )
    }

    /// Create a validation error pointing at `name`.
    pub fn validation_error(&self, name: &str, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.source.named_source(),
            span: self.find_span(name),
            message: message.into(),
        })
    }

    /// Validate that a name is a valid identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self.invalid_identifier_error(name, kind, reason));
        }
        Ok(())
    }

    /// Parse the type expression written for `member` of the current path.
    ///
    /// Errors point into the quoted expression in the source when it can
    /// be found.
    pub fn parse_type(&self, member: &str, expr: &str) -> Result<TypeExpr> {
        parse_type_expr(expr).map_err(|err| {
            let span = find_string_span(self.src(), expr)
                .map(|start| SourceSpan::from((start + err.offset, 1)));
            self.source
                .invalid_type_error(expr, self.location(member), err.reason, span)
        })
    }
}

/// Find the span of a name in the TOML source
/// Searches for patterns like `.name]`, `.name.`, or `name =`
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    if name.is_empty() {
        return None;
    }

    // Search for common TOML patterns where the name appears
    let patterns = [
        format!(".{}]", name), // [models.Name]
        format!(".{}.", name), // [services.Name.methods]
        format!("{} =", name), // key = value
        format!("{}=", name),  // key=value
        format!("\"{}\"", name), // variants = ["Name"]
    ];

    for pattern in &patterns {
        if let Some(pos) = src.find(pattern) {
            let start = if pattern.starts_with(['.', '"']) {
                pos + 1
            } else {
                pos
            };
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    // Fallback: just find the name anywhere (less precise)
    src.find(name)
        .map(|pos| SourceSpan::from((pos, name.len())))
}

/// Find the offset of the first character of a quoted string in the source.
pub(crate) fn find_string_span(src: &str, value: &str) -> Option<usize> {
    src.find(&format!("\"{value}\""))
        .or_else(|| src.find(&format!("'{value}'")))
        .map(|pos| pos + 1)
}

/// Validate that a name is a plain identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    // First character must be a letter or underscore
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        None
    } else {
        Some("name must contain only letters, numbers, and underscores")
    }
}

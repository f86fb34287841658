//! Build errors for the schema IR.

use thiserror::Error;

/// Result type for IR construction.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that aborts building one generation unit.
///
/// Every variant names the declaration it was raised for, using dotted
/// locations such as `Post.author` or `PostService.findOne.output`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown primitive kind '{kind}' (at {location})")]
    UnknownPrimitiveKind { kind: String, location: String },

    #[error("'{name}' is declared more than once (first declared as {first})")]
    DuplicateName { name: String, first: &'static str },

    #[error("duplicate field '{field}' in struct '{owner}'")]
    DuplicateField { owner: String, field: String },

    #[error("duplicate variant '{variant}' in enum '{owner}'")]
    DuplicateVariant { owner: String, variant: String },

    #[error("variants '{first}' and '{second}' of enum '{owner}' share the value '{value}'")]
    DuplicateVariantValue {
        owner: String,
        value: String,
        first: String,
        second: String,
    },

    #[error("duplicate method '{method}' in service '{owner}'")]
    DuplicateMethod { owner: String, method: String },

    #[error("duplicate input '{input}' in method '{owner}'")]
    DuplicateInput { owner: String, input: String },

    #[error("reference to undeclared model '{name}' (at {location})")]
    DanglingReference { name: String, location: String },

    #[error("alias cycle: {}", path.join(" -> "))]
    AliasCycle { path: Vec<String> },

    #[error("map key must be a string, integer or enum, found {key} (at {location})")]
    InvalidMapKey { key: String, location: String },

    #[error("unsupported runtime schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

impl Error {
    /// The declaration name most directly responsible for this error.
    pub fn subject(&self) -> &str {
        match self {
            Error::UnknownPrimitiveKind { location, .. }
            | Error::DanglingReference { location, .. }
            | Error::InvalidMapKey { location, .. } => location,
            Error::DuplicateName { name, .. } => name,
            Error::DuplicateField { owner, .. }
            | Error::DuplicateVariant { owner, .. }
            | Error::DuplicateVariantValue { owner, .. }
            | Error::DuplicateMethod { owner, .. }
            | Error::DuplicateInput { owner, .. } => owner,
            Error::AliasCycle { path } => path.first().map(String::as_str).unwrap_or_default(),
            Error::UnsupportedVersion { .. } => "version",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_cycle_message_lists_full_chain() {
        let err = Error::AliasCycle {
            path: vec!["A".into(), "B".into(), "A".into()],
        };
        assert_eq!(err.to_string(), "alias cycle: A -> B -> A");
        assert_eq!(err.subject(), "A");
    }

    #[test]
    fn test_dangling_reference_names_location() {
        let err = Error::DanglingReference {
            name: "Ghost".into(),
            location: "Post.author".into(),
        };
        assert_eq!(
            err.to_string(),
            "reference to undeclared model 'Ghost' (at Post.author)"
        );
        assert_eq!(err.subject(), "Post.author");
    }
}

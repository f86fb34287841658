//! Dart AST builders for data classes, enums, typedefs and directives.
//!
//! These provide a high-level API for constructing Dart syntax, which can
//! then be rendered via CodeBuilder.

mod class;
mod enums;
mod items;

pub use class::{ClassField, DataClass};
pub use enums::Enum;
pub use items::{Const, Import, Part, Typedef};

/// Quote a string as a single-quoted Dart literal.
///
/// `$` is escaped too, it would start an interpolation.
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('\'');
    for c in value.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '\'' => literal.push_str("\\'"),
            '$' => literal.push_str("\\$"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c => literal.push(c),
        }
    }
    literal.push('\'');
    literal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("draft"), "'draft'");
        assert_eq!(string_literal("it's $5"), r"'it\'s \$5'");
        assert_eq!(string_literal("a\\b\nc"), r"'a\\b\nc'");
    }
}

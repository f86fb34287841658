//! Naming conventions for the emission targets.

use hgen_core::to_snake_case;

/// Language-specific naming conventions.
///
/// Defines how schema names map to member names and how reserved words
/// are escaped. Type names are emitted as declared.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a field, method or input name (e.g., "createdAt" -> "created_at")
    pub member_case: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "r#type" in Rust)
    pub escape_reserved: fn(&str) -> String,
    /// Move a generated member out of the way of a schema name
    pub pad_member: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Transform and make safe for use as a field, method or parameter.
    pub fn member_name(&self, name: &str) -> String {
        let transformed = (self.member_case)(name);
        self.safe_name(&transformed)
    }

    /// `preferred`, padded until no name in `taken` uses it.
    ///
    /// Generated members that share a scope with schema methods (the
    /// consumer's request hook, the Rust constructor) step aside this way.
    pub fn unclaimed(&self, preferred: &str, taken: &[String]) -> String {
        let mut name = preferred.to_string();
        while taken.contains(&name) {
            name = (self.pad_member)(&name);
        }
        name
    }
}

fn escape_rust_reserved(name: &str) -> String {
    // These four cannot be raw identifiers.
    match name {
        "self" | "Self" | "super" | "crate" => format!("{name}_"),
        _ => format!("r#{name}"),
    }
}

fn escape_with_underscore(name: &str) -> String {
    format!("_{name}")
}

fn pad_with_underscore(name: &str) -> String {
    format!("{name}_")
}

fn keep_case(name: &str) -> String {
    name.to_string()
}

/// Rust naming conventions.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    member_case: to_snake_case,
    reserved_words: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
        "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
        "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box",
        "do", "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual",
        "yield",
    ],
    escape_reserved: escape_rust_reserved,
    pad_member: pad_with_underscore,
};

/// TypeScript naming conventions.
///
/// Member names keep their schema spelling; reserved words only need
/// escaping where they are used as bindings (parameters).
pub const TYPESCRIPT_NAMING: NamingConvention = NamingConvention {
    member_case: keep_case,
    reserved_words: &[
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "implements",
        "interface",
        "let",
        "package",
        "private",
        "protected",
        "public",
        "static",
        "yield",
        "await",
    ],
    escape_reserved: escape_with_underscore,
    pad_member: escape_with_underscore,
};

/// Dart naming conventions.
///
/// Members keep their schema spelling. Besides the reserved words, the
/// members every object inherits and the generated `toJson` are escaped,
/// since a field of the same name would override them.
pub const DART_NAMING: NamingConvention = NamingConvention {
    member_case: keep_case,
    reserved_words: &[
        "assert",
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "default",
        "do",
        "else",
        "enum",
        "extends",
        "false",
        "final",
        "finally",
        "for",
        "if",
        "in",
        "is",
        "new",
        "null",
        "rethrow",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "var",
        "void",
        "while",
        "with",
        "hashCode",
        "runtimeType",
        "noSuchMethod",
        "toString",
        "toJson",
    ],
    // a leading underscore would make the member library-private
    escape_reserved: pad_with_underscore,
    pad_member: pad_with_underscore,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_member_names() {
        assert_eq!(RUST_NAMING.member_name("createdAt"), "created_at");
        assert_eq!(RUST_NAMING.member_name("type"), "r#type");
        assert_eq!(RUST_NAMING.member_name("self"), "self_");
        assert_eq!(RUST_NAMING.member_name("findOne"), "find_one");
    }

    #[test]
    fn test_typescript_member_names() {
        assert_eq!(TYPESCRIPT_NAMING.member_name("createdAt"), "createdAt");
        assert_eq!(TYPESCRIPT_NAMING.member_name("class"), "_class");
        assert!(!TYPESCRIPT_NAMING.is_reserved("type"));
    }

    #[test]
    fn test_unclaimed_members() {
        let taken = vec!["new".to_string(), "new_".to_string()];
        assert_eq!(RUST_NAMING.unclaimed("new", &taken), "new__");
        assert_eq!(RUST_NAMING.unclaimed("new", &[]), "new");

        let taken = vec!["request".to_string()];
        assert_eq!(TYPESCRIPT_NAMING.unclaimed("request", &taken), "_request");
    }

    #[test]
    fn test_dart_member_names() {
        assert_eq!(DART_NAMING.member_name("publishedAt"), "publishedAt");
        assert_eq!(DART_NAMING.member_name("class"), "class_");
        assert_eq!(DART_NAMING.member_name("hashCode"), "hashCode_");
    }
}

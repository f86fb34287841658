//! Parser for the string form of type expressions.
//!
//! ```text
//! type  := base "?"*
//! base  := "List" "<" type ">" | "Set" "<" type ">"
//!        | "Map" "<" type "," type ">" | ident
//! ```
//!
//! Whitespace is allowed between tokens. Repeated `?` collapse into a
//! single nullable wrapper.

use hgen_ir::ast::TypeExpr;

/// A syntax error in a type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExprError {
    /// Byte offset into the expression.
    pub offset: usize,
    pub reason: String,
}

/// Parse a type expression.
pub fn parse_type_expr(input: &str) -> Result<TypeExpr, TypeExprError> {
    let mut parser = Parser { input, pos: 0 };
    let expr = parser.parse_type()?;
    parser.skip_whitespace();
    if parser.pos < input.len() {
        return Err(parser.error(format!(
            "unexpected '{}' after type",
            &input[parser.pos..]
        )));
    }
    Ok(expr)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, reason: impl Into<String>) -> TypeExprError {
        TypeExprError {
            offset: self.pos,
            reason: reason.into(),
        }
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn eat(&mut self, token: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: char) -> Result<(), TypeExprError> {
        if self.eat(token) {
            Ok(())
        } else if self.rest().is_empty() {
            Err(self.error(format!("expected '{token}', found end of input")))
        } else {
            Err(self.error(format!("expected '{token}'")))
        }
    }

    fn ident(&mut self) -> Result<&str, TypeExprError> {
        self.skip_whitespace();
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(self.rest().len());
        let ident = &self.input[self.pos..self.pos + len];
        if ident.is_empty() {
            return Err(if self.rest().is_empty() {
                self.error("expected a type, found end of input")
            } else {
                self.error("expected a type name")
            });
        }
        if ident.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error("type names cannot start with a digit"));
        }
        self.pos += len;
        Ok(ident)
    }

    fn parse_type(&mut self) -> Result<TypeExpr, TypeExprError> {
        let base = self.parse_base()?;
        if self.eat('?') {
            while self.eat('?') {}
            return Ok(TypeExpr::nullable(base));
        }
        Ok(base)
    }

    fn parse_base(&mut self) -> Result<TypeExpr, TypeExprError> {
        let name = self.ident()?.to_string();
        let generic = matches!(name.as_str(), "List" | "Set" | "Map");
        if !generic || !self.eat('<') {
            return Ok(TypeExpr::ident(name));
        }

        let expr = match name.as_str() {
            "List" => TypeExpr::list(self.parse_type()?),
            "Set" => TypeExpr::set(self.parse_type()?),
            _ => {
                let key = self.parse_type()?;
                self.expect(',')?;
                let value = self.parse_type()?;
                TypeExpr::map(key, value)
            }
        };
        self.expect('>')?;
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitive_and_reference() {
        assert_eq!(
            parse_type_expr("string"),
            Ok(TypeExpr::Primitive("string".into()))
        );
        assert_eq!(
            parse_type_expr("Post"),
            Ok(TypeExpr::Reference("Post".into()))
        );
    }

    #[test]
    fn test_parse_nested_generics() {
        assert_eq!(
            parse_type_expr("Map<string, List<Post?>>?"),
            Ok(TypeExpr::nullable(TypeExpr::map(
                TypeExpr::ident("string"),
                TypeExpr::list(TypeExpr::nullable(TypeExpr::ident("Post"))),
            )))
        );
        assert_eq!(
            parse_type_expr(" Set < int64 > "),
            Ok(TypeExpr::set(TypeExpr::ident("int64")))
        );
    }

    #[test]
    fn test_repeated_question_marks_collapse() {
        assert_eq!(
            parse_type_expr("Post??"),
            Ok(TypeExpr::nullable(TypeExpr::ident("Post")))
        );
    }

    #[test]
    fn test_generic_name_without_arguments_is_a_reference() {
        assert_eq!(
            parse_type_expr("List"),
            Ok(TypeExpr::Reference("List".into()))
        );
    }

    #[test]
    fn test_unknown_primitive_is_left_to_the_type_algebra() {
        assert_eq!(
            parse_type_expr("strin"),
            Ok(TypeExpr::Primitive("strin".into()))
        );
    }

    #[test]
    fn test_errors_report_offset() {
        let err = parse_type_expr("List<string").unwrap_err();
        assert_eq!(err.offset, 11);
        assert_eq!(err.reason, "expected '>', found end of input");

        let err = parse_type_expr("Map<string>").unwrap_err();
        assert_eq!(err.offset, 10);
        assert_eq!(err.reason, "expected ','");

        let err = parse_type_expr("Post Extra").unwrap_err();
        assert_eq!(err.reason, "unexpected 'Extra' after type");

        assert!(parse_type_expr("").is_err());
        assert!(parse_type_expr("9lives").is_err());
    }
}

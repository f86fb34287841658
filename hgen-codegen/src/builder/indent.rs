//! Indentation configuration for code generation.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation, as rustfmt lays it out.
    pub const RUST: Self = Self::Spaces(4);

    /// 2-space indentation, as prettier lays it out.
    pub const TYPESCRIPT: Self = Self::Spaces(2);

    /// 2-space indentation, as `dart format` lays it out.
    pub const DART: Self = Self::Spaces(2);

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        const SPACES: &str = "        ";
        match self {
            Self::Spaces(width @ 1..=8) => &SPACES[..*width as usize],
            // Fallback to 4 whitespaces
            Self::Spaces(_) => &SPACES[..4],
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::RUST
    }
}

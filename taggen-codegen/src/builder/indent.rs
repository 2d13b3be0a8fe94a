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
    /// Indentation of generated type modules unless configured otherwise.
    pub const JAVASCRIPT: Self = Self::Spaces(4);

    /// Map the `emit.indent` setting to an indent; `0` selects tabs.
    pub fn from_width(width: u8) -> Self {
        match width {
            0 => Self::Tab,
            n => Self::Spaces(n),
        }
    }

    /// The text of one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(n) => " ".repeat(usize::from(*n)),
            Self::Tab => "\t".to_string(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::JAVASCRIPT
    }
}

//! Lexing and lenient parsing of definition files.

mod lexer;
mod parser;
mod token;

pub use lexer::tokenize;
pub use parser::parse_module;
pub use token::{Span, Token, TokenKind};

/// A lexing or parsing failure, located in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

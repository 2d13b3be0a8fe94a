use miette::SourceSpan;

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from((span.start, span.end.saturating_sub(span.start)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifiers and keywords alike.
    Ident(String),
    /// String literal with escapes already decoded.
    Str(String),
    Num(f64),
    /// Template literal. `cooked` is `None` when it has substitutions.
    Template { cooked: Option<String> },
    Regex { pattern: String, flags: String },
    Punct(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A line terminator separates this token from the previous one.
    pub newline_before: bool,
}

impl Token {
    pub fn is_punct(&self, p: &str) -> bool {
        matches!(&self.kind, TokenKind::Punct(q) if *q == p)
    }

    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(n) if n == name)
    }

    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Whether an expression may end with this token.
    pub(crate) fn can_end_expression(&self) -> bool {
        match &self.kind {
            TokenKind::Ident(name) => !OPERATOR_KEYWORDS.contains(&name.as_str()),
            TokenKind::Str(_)
            | TokenKind::Num(_)
            | TokenKind::Template { .. }
            | TokenKind::Regex { .. } => true,
            TokenKind::Punct(p) => matches!(*p, ")" | "]" | "}" | "++" | "--"),
        }
    }

    /// Whether this token, at the start of a line, continues the previous
    /// expression rather than starting a new statement.
    pub(crate) fn continues_expression(&self) -> bool {
        match &self.kind {
            TokenKind::Punct(p) => !matches!(*p, "++" | "--" | "!" | "~" | "{" | "}" | ")" | "]" | ";"),
            TokenKind::Template { .. } => true,
            _ => false,
        }
    }
}

/// Keywords after which an expression cannot end.
const OPERATOR_KEYWORDS: &[&str] = &[
    "await", "case", "class", "const", "delete", "do", "else", "export", "extends", "function",
    "import", "in", "instanceof", "let", "new", "return", "throw", "typeof", "var", "void", "yield",
];

/// Keywords after which a `/` starts a regular expression.
pub(crate) const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "await", "case", "delete", "do", "else", "in", "instanceof", "new", "return", "throw",
    "typeof", "void", "yield",
];

/// Punctuators, longest first so the lexer takes the longest match.
pub(crate) const PUNCTUATORS: &[&str] = &[
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "**", "<<", ">>", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-",
    "*", "/", "%", "&", "|", "^", "!", "~", "?", ":", "=", ".", "@", "#",
];

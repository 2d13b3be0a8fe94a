//! Tokenizer for the subset of JavaScript found in definition files.
//!
//! Everything is tokenized, including code the parser later skips, so that
//! strings, comments, templates and regular expressions never confuse the
//! statement skipper.

use super::{
    SyntaxError,
    token::{PUNCTUATORS, REGEX_PREFIX_KEYWORDS, Span, Token, TokenKind},
};

type LexResult<T> = std::result::Result<T, SyntaxError>;

/// Tokenize JavaScript source.
pub fn tokenize(src: &str) -> LexResult<Vec<Token>> {
    Lexer::new(src).run()
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    tokens: Vec<Token>,
    newline_before: bool,
    regex_allowed: bool,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            tokens: Vec::new(),
            newline_before: false,
            regex_allowed: true,
        }
    }

    fn run(mut self) -> LexResult<Vec<Token>> {
        if self.src.starts_with("#!") {
            self.skip_line();
        }

        loop {
            self.skip_trivia()?;
            if self.peek().is_none() {
                break;
            }
            let start = self.pos;
            let kind = self.next_kind()?;
            self.note(&kind);
            self.tokens.push(Token {
                kind,
                span: Span::new(start, self.pos),
                newline_before: std::mem::take(&mut self.newline_before),
            });
        }

        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn error(&self, message: impl Into<String>, start: usize) -> SyntaxError {
        SyntaxError::new(message, Span::new(start, self.pos.max(start + 1).min(self.src.len())))
    }

    /// Track whether a `/` after `kind` would begin a regular expression.
    fn note(&mut self, kind: &TokenKind) {
        self.regex_allowed = match kind {
            TokenKind::Ident(name) => REGEX_PREFIX_KEYWORDS.contains(&name.as_str()),
            TokenKind::Punct(p) => !matches!(*p, ")" | "]" | "}"),
            _ => false,
        };
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if is_line_terminator(c) {
                break;
            }
            self.bump();
        }
    }

    fn skip_trivia(&mut self) -> LexResult<()> {
        loop {
            match self.peek() {
                Some(c) if is_line_terminator(c) => {
                    self.newline_before = true;
                    self.bump();
                }
                Some(c) if c.is_whitespace() || c == '\u{feff}' => {
                    self.bump();
                }
                Some('/') if self.peek_at(1) == Some('/') => self.skip_line(),
                Some('/') if self.peek_at(1) == Some('*') => {
                    let start = self.pos;
                    let Some(end) = self.rest()[2..].find("*/") else {
                        self.pos = self.src.len();
                        return Err(self.error("unterminated comment", start));
                    };
                    let body = &self.rest()[2..2 + end];
                    if body.chars().any(is_line_terminator) {
                        self.newline_before = true;
                    }
                    self.pos += end + 4;
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_kind(&mut self) -> LexResult<TokenKind> {
        let start = self.pos;
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.string(quote),
            Some('`') => self.template(),
            Some(c) if is_ident_start(c) => Ok(self.ident()),
            Some(c) if c.is_ascii_digit() => self.number(),
            Some('.') if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => self.number(),
            Some('/') if self.regex_allowed => self.regex(),
            Some(_) => self.punct(),
            None => Err(self.error("unexpected end of input", start)),
        }
    }

    fn ident(&mut self) -> TokenKind {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        TokenKind::Ident(self.src[start..self.pos].to_string())
    }

    fn number(&mut self) -> LexResult<TokenKind> {
        let start = self.pos;
        let radix = match (self.peek(), self.peek_at(1)) {
            (Some('0'), Some('x' | 'X')) => 16,
            (Some('0'), Some('o' | 'O')) => 8,
            (Some('0'), Some('b' | 'B')) => 2,
            _ => 10,
        };

        let value = if radix == 10 {
            self.eat_digits();
            if self.peek() == Some('.') {
                self.bump();
                self.eat_digits();
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                self.eat_digits();
            }
            let text: String = self.src[start..self.pos].chars().filter(|c| *c != '_').collect();
            let text = if text.starts_with('.') { format!("0{text}") } else { text };
            text.parse::<f64>()
                .map_err(|_| self.error(format!("invalid number '{text}'"), start))?
        } else {
            self.pos += 2;
            let digits_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit() || c == '_') {
                self.bump();
            }
            let digits: String = self.src[digits_start..self.pos]
                .chars()
                .filter(|c| *c != '_')
                .collect();
            u128::from_str_radix(&digits, radix)
                .map_err(|_| self.error("invalid numeric literal", start))? as f64
        };

        // BigInt suffix.
        if self.peek() == Some('n') {
            self.bump();
        }
        if self.peek().is_some_and(is_ident_start) {
            return Err(self.error("identifier starts immediately after numeric literal", start));
        }
        Ok(TokenKind::Num(value))
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.bump();
        }
    }

    fn string(&mut self, quote: char) -> LexResult<TokenKind> {
        let start = self.pos;
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(TokenKind::Str(value)),
                Some('\\') => self.escape(&mut value, start)?,
                Some(c) if c == '\n' || c == '\r' => {
                    return Err(self.error("unterminated string literal", start));
                }
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated string literal", start)),
            }
        }
    }

    /// Decode one escape sequence; the backslash is already consumed.
    fn escape(&mut self, out: &mut String, start: usize) -> LexResult<()> {
        let Some(c) = self.bump() else {
            return Err(self.error("unterminated escape sequence", start));
        };
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !self.peek().is_some_and(|d| d.is_ascii_digit()) => out.push('\0'),
            'x' => {
                let code = self.hex_digits(2, start)?;
                out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            'u' => {
                let code = if self.peek() == Some('{') {
                    self.bump();
                    let digits_start = self.pos;
                    while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        self.bump();
                    }
                    let code = u32::from_str_radix(&self.src[digits_start..self.pos], 16)
                        .map_err(|_| self.error("invalid unicode escape", start))?;
                    if self.bump() != Some('}') {
                        return Err(self.error("invalid unicode escape", start));
                    }
                    code
                } else {
                    self.hex_digits(4, start)?
                };
                out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            '\r' => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            c if is_line_terminator(c) => {}
            c => out.push(c),
        }
        Ok(())
    }

    fn hex_digits(&mut self, count: usize, start: usize) -> LexResult<u32> {
        let digits_start = self.pos;
        for _ in 0..count {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.bump();
                }
                _ => return Err(self.error("invalid hexadecimal escape", start)),
            }
        }
        u32::from_str_radix(&self.src[digits_start..self.pos], 16)
            .map_err(|_| self.error("invalid hexadecimal escape", start))
    }

    fn template(&mut self) -> LexResult<TokenKind> {
        let start = self.pos;
        self.bump();
        let mut cooked = String::new();
        let mut substituted = false;
        loop {
            match self.bump() {
                Some('`') => break,
                Some('\\') => self.escape(&mut cooked, start)?,
                Some('$') if self.peek() == Some('{') => {
                    self.bump();
                    substituted = true;
                    self.skip_substitution(start)?;
                }
                Some(c) => cooked.push(c),
                None => return Err(self.error("unterminated template literal", start)),
            }
        }
        Ok(TokenKind::Template {
            cooked: (!substituted).then_some(cooked),
        })
    }

    /// Lex through a `${ ... }` substitution, discarding its tokens.
    fn skip_substitution(&mut self, template_start: usize) -> LexResult<()> {
        self.regex_allowed = true;
        let mut depth = 1usize;
        loop {
            self.skip_trivia()?;
            if self.peek().is_none() {
                return Err(self.error("unterminated template literal", template_start));
            }
            let kind = self.next_kind()?;
            self.note(&kind);
            match kind {
                TokenKind::Punct("{") => depth += 1,
                TokenKind::Punct("}") => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    fn regex(&mut self) -> LexResult<TokenKind> {
        let start = self.pos;
        self.bump();
        let mut in_class = false;
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(c) if !is_line_terminator(c) => {}
                    _ => return Err(self.error("unterminated regular expression", start)),
                },
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some(c) if !is_line_terminator(c) => {}
                _ => return Err(self.error("unterminated regular expression", start)),
            }
        }
        let pattern = self.src[start + 1..self.pos - 1].to_string();
        let flags_start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        Ok(TokenKind::Regex {
            pattern,
            flags: self.src[flags_start..self.pos].to_string(),
        })
    }

    fn punct(&mut self) -> LexResult<TokenKind> {
        let start = self.pos;
        let rest = self.rest();
        match PUNCTUATORS.iter().find(|p| rest.starts_with(**p)) {
            Some(p) => {
                self.pos += p.len();
                Ok(TokenKind::Punct(p))
            }
            None => {
                let c = self.peek().unwrap_or_default();
                self.bump();
                Err(self.error(format!("unexpected character '{c}'"), start))
            }
        }
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric() || c == '\u{200c}' || c == '\u{200d}'
}

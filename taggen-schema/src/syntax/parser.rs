//! Lenient statement parser.
//!
//! Recognises imports, exports, variable declarators and `A.b = ...`
//! assignments at the top level. Every other statement is skipped with
//! bracket balancing and a newline heuristic for omitted semicolons.

use super::{Span, SyntaxError, Token, TokenKind};
use crate::{
    ast::{
        Assignment, Binding, ExportSpecifier, Expr, ImportDecl, ImportKind, ImportSpecifier, Item,
        Module, Property,
    },
    value::format_number,
};

type ParseResult<T> = std::result::Result<T, SyntaxError>;

/// Parse a token stream produced by [`tokenize`](super::tokenize) from `src`.
pub fn parse_module(src: &str, tokens: &[Token]) -> ParseResult<Module> {
    Parser {
        src,
        tokens,
        pos: 0,
    }
    .module()
}

/// Where an expression ends at bracket depth zero.
#[derive(Debug, Clone, Copy)]
struct Stop {
    comma: bool,
    asi: bool,
}

const STATEMENT: Stop = Stop {
    comma: false,
    asi: true,
};
const DECLARATOR: Stop = Stop {
    comma: true,
    asi: true,
};
const ELEMENT: Stop = Stop {
    comma: true,
    asi: false,
};

/// Identifiers that start an expression outside the literal subset.
const NON_VALUE_KEYWORDS: &[&str] = &[
    "async", "await", "class", "delete", "function", "import", "new", "super", "this", "typeof",
    "void", "yield",
];

struct Parser<'a> {
    src: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn at_punct(&self, p: &str) -> bool {
        self.peek().is_some_and(|t| t.is_punct(p))
    }

    fn at_ident(&self, name: &str) -> bool {
        self.peek().is_some_and(|t| t.is_ident(name))
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        let found = self.at_punct(p);
        if found {
            self.pos += 1;
        }
        found
    }

    fn eat_ident(&mut self, name: &str) -> bool {
        let found = self.at_ident(name);
        if found {
            self.pos += 1;
        }
        found
    }

    fn error_here(&self, message: impl Into<String>) -> SyntaxError {
        let span = match self.peek() {
            Some(token) => token.span,
            None => Span::new(self.src.len(), self.src.len()),
        };
        SyntaxError::new(message, span)
    }

    fn expect_punct(&mut self, p: &str, context: &str) -> ParseResult<()> {
        if self.eat_punct(p) {
            Ok(())
        } else {
            Err(self.error_here(format!("expected '{p}' in {context}")))
        }
    }

    fn expect_ident(&mut self, context: &str) -> ParseResult<String> {
        match self.peek().and_then(Token::ident) {
            Some(name) => {
                self.pos += 1;
                Ok(name.to_string())
            }
            None => Err(self.error_here(format!("expected an identifier in {context}"))),
        }
    }

    /// An identifier or string, as allowed for module export names.
    fn expect_name(&mut self, context: &str) -> ParseResult<String> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Ident(name) | TokenKind::Str(name)) => {
                self.pos += 1;
                Ok(name.clone())
            }
            _ => Err(self.error_here(format!("expected a name in {context}"))),
        }
    }

    fn expect_string(&mut self, context: &str) -> ParseResult<String> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Str(value)) => {
                self.pos += 1;
                Ok(value.clone())
            }
            _ => Err(self.error_here(format!("expected a module specifier in {context}"))),
        }
    }

    /// Source text covering tokens `from..to`.
    fn text(&self, from: usize, to: usize) -> String {
        if from >= to {
            return String::new();
        }
        self.src[self.tokens[from].span.start..self.tokens[to - 1].span.end].to_string()
    }

    fn span(&self, from: usize, to: usize) -> Span {
        match (self.tokens.get(from), to.checked_sub(1).and_then(|i| self.tokens.get(i))) {
            (Some(first), Some(last)) if from < to => first.span.to(last.span),
            (Some(first), _) => first.span,
            _ => Span::new(self.src.len(), self.src.len()),
        }
    }

    fn module(mut self) -> ParseResult<Module> {
        let mut items = Vec::new();

        while let Some(token) = self.peek() {
            let start = self.pos;
            match token.ident() {
                _ if token.is_punct(";") => self.pos += 1,
                Some("import") if !self.is_import_expression() => {
                    items.push(Item::Import(self.import()?));
                }
                Some("export") => self.export(&mut items)?,
                Some("const" | "let" | "var") => self.declarators(false, &mut items)?,
                Some("function" | "class") => items.extend(self.declaration(false)?),
                Some("async") if self.peek_at(1).is_some_and(|t| t.is_ident("function")) => {
                    items.extend(self.declaration(false)?);
                }
                Some(_) if self.at_assignment() => items.push(Item::Assignment(self.assignment()?)),
                _ => self.skip_statement()?,
            }
            if self.pos == start {
                self.pos += 1;
            }
        }

        Ok(Module { items })
    }

    /// `import(...)` and `import.meta` are expressions, not declarations.
    fn is_import_expression(&self) -> bool {
        self.peek_at(1)
            .is_some_and(|t| t.is_punct("(") || t.is_punct("."))
    }

    fn import(&mut self) -> ParseResult<ImportDecl> {
        let start = self.pos;
        self.pos += 1;

        if let Some(Token {
            kind: TokenKind::Str(source),
            ..
        }) = self.peek()
        {
            self.pos += 1;
            self.skip_import_attributes()?;
            let span = self.span(start, self.pos);
            self.eat_punct(";");
            return Ok(ImportDecl {
                source: source.clone(),
                specifiers: Vec::new(),
                span,
            });
        }

        let mut specifiers = Vec::new();
        let mut more = true;
        if let Some(name) = self.peek().and_then(Token::ident) {
            self.pos += 1;
            specifiers.push(ImportSpecifier {
                kind: ImportKind::Default,
                imported_name: "default".to_string(),
                local_name: name.to_string(),
            });
            more = self.eat_punct(",");
        }

        if more {
            if self.eat_punct("*") {
                if !self.eat_ident("as") {
                    return Err(self.error_here("expected 'as' after '*' in import"));
                }
                let local_name = self.expect_ident("namespace import")?;
                specifiers.push(ImportSpecifier {
                    kind: ImportKind::Namespace,
                    imported_name: "*".to_string(),
                    local_name,
                });
            } else if self.eat_punct("{") {
                while !self.eat_punct("}") {
                    let imported_name = self.expect_name("import specifier")?;
                    let local_name = if self.eat_ident("as") {
                        self.expect_ident("import specifier")?
                    } else {
                        imported_name.clone()
                    };
                    specifiers.push(ImportSpecifier {
                        kind: ImportKind::Named,
                        imported_name,
                        local_name,
                    });
                    if !self.eat_punct(",") {
                        self.expect_punct("}", "import specifiers")?;
                        break;
                    }
                }
            } else {
                return Err(self.error_here("expected import specifiers"));
            }
        }

        if !self.eat_ident("from") {
            return Err(self.error_here("expected 'from' in import declaration"));
        }
        let source = self.expect_string("import declaration")?;
        self.skip_import_attributes()?;
        let span = self.span(start, self.pos);
        self.eat_punct(";");

        Ok(ImportDecl {
            source,
            specifiers,
            span,
        })
    }

    fn skip_import_attributes(&mut self) -> ParseResult<()> {
        let attributes = (self.at_ident("with") || self.at_ident("assert"))
            && self.peek().is_some_and(|t| !t.newline_before)
            && self.peek_at(1).is_some_and(|t| t.is_punct("{"));
        if attributes {
            self.pos += 1;
            self.skip_balanced()?;
        }
        Ok(())
    }

    fn export(&mut self, items: &mut Vec<Item>) -> ParseResult<()> {
        let start = self.pos;
        self.pos += 1;
        let Some(token) = self.peek() else {
            return Err(self.error_here("expected a declaration after 'export'"));
        };

        match token.ident() {
            Some("const" | "let" | "var") => self.declarators(true, items)?,
            Some("function" | "class" | "async") => items.extend(self.declaration(true)?),
            Some("default") => {
                self.pos += 1;
                let expr = self.expression(STATEMENT)?;
                self.eat_punct(";");
                items.push(Item::ExportDefault(expr));
            }
            _ if token.is_punct("{") => {
                self.pos += 1;
                let mut specifiers = Vec::new();
                while !self.eat_punct("}") {
                    let local = self.expect_name("export specifier")?;
                    let exported = if self.eat_ident("as") {
                        self.expect_name("export specifier")?
                    } else {
                        local.clone()
                    };
                    specifiers.push(ExportSpecifier { local, exported });
                    if !self.eat_punct(",") {
                        self.expect_punct("}", "export specifiers")?;
                        break;
                    }
                }
                let source = if self.eat_ident("from") {
                    let source = self.expect_string("export declaration")?;
                    self.skip_import_attributes()?;
                    Some(source)
                } else {
                    None
                };
                let span = self.span(start, self.pos);
                self.eat_punct(";");
                items.push(Item::ExportList {
                    specifiers,
                    source,
                    span,
                });
            }
            _ if token.is_punct("*") => {
                self.pos += 1;
                let alias = if self.eat_ident("as") {
                    Some(self.expect_name("export declaration")?)
                } else {
                    None
                };
                if !self.eat_ident("from") {
                    return Err(self.error_here("expected 'from' in export declaration"));
                }
                let source = self.expect_string("export declaration")?;
                self.skip_import_attributes()?;
                let span = self.span(start, self.pos);
                self.eat_punct(";");
                items.push(Item::ExportAll {
                    source,
                    alias,
                    span,
                });
            }
            _ => return Err(self.error_here("unsupported export form")),
        }
        Ok(())
    }

    fn declarators(&mut self, exported: bool, items: &mut Vec<Item>) -> ParseResult<()> {
        self.pos += 1;
        loop {
            let start = self.pos;
            let Some(token) = self.peek() else {
                return Err(self.error_here("expected a binding name"));
            };
            match &token.kind {
                TokenKind::Ident(name) => {
                    self.pos += 1;
                    let init = if self.eat_punct("=") {
                        Some(self.expression(DECLARATOR)?)
                    } else {
                        None
                    };
                    items.push(Item::Binding(Binding {
                        name: name.clone(),
                        init,
                        exported,
                        span: self.span(start, self.pos),
                    }));
                }
                TokenKind::Punct("{" | "[") => {
                    // Destructuring binds nothing a definition can use.
                    self.skip_balanced()?;
                    if self.eat_punct("=") {
                        self.expression(DECLARATOR)?;
                    }
                }
                _ => return Err(self.error_here("expected a binding name")),
            }
            if !self.eat_punct(",") {
                break;
            }
        }
        self.eat_punct(";");
        Ok(())
    }

    /// `function NAME ...` or `class NAME ...`. Anonymous forms yield nothing.
    fn declaration(&mut self, exported: bool) -> ParseResult<Option<Item>> {
        let mut i = self.pos;
        if self.tokens[i].is_ident("async") {
            i += 1;
        }
        i += 1;
        if self.tokens.get(i).is_some_and(|t| t.is_punct("*")) {
            i += 1;
        }
        let name = self
            .tokens
            .get(i)
            .and_then(Token::ident)
            .filter(|name| *name != "extends")
            .map(str::to_string);

        self.skip_statement()?;
        Ok(name.map(|name| Item::Declaration { name, exported }))
    }

    fn at_assignment(&self) -> bool {
        let ident = |n: usize| self.peek_at(n).and_then(Token::ident).is_some();
        ident(0)
            && self.peek_at(1).is_some_and(|t| t.is_punct("."))
            && ident(2)
            && self.peek_at(3).is_some_and(|t| t.is_punct("="))
    }

    fn assignment(&mut self) -> ParseResult<Assignment> {
        let start = self.pos;
        let object = self.expect_ident("assignment")?;
        self.pos += 1;
        let property = self.expect_ident("assignment")?;
        self.pos += 1;

        let rhs = self.pos;
        let is_function = self.looks_like_function();
        self.skip_expression(STATEMENT)?;
        if self.pos == rhs {
            return Err(self.error_here("expected an expression after '='"));
        }
        let source = self.text(rhs, self.pos);
        let span = self.span(start, self.pos);
        self.eat_punct(";");

        Ok(Assignment {
            object,
            property,
            source,
            is_function,
            span,
        })
    }

    /// Whether the expression at the cursor is a function or arrow function.
    fn looks_like_function(&self) -> bool {
        let Some(first) = self.peek() else {
            return false;
        };
        let arrow_at = |n: usize| self.peek_at(n).is_some_and(|t| t.is_punct("=>"));

        match first.ident() {
            Some("function") => true,
            Some("async") => match self.peek_at(1) {
                Some(next) if next.is_ident("function") => true,
                Some(next) if next.ident().is_some() => arrow_at(2),
                Some(next) if next.is_punct("(") => self
                    .closing_paren(self.pos + 1)
                    .is_some_and(|end| arrow_at(end + 1 - self.pos)),
                _ => false,
            },
            Some(_) => arrow_at(1),
            None if first.is_punct("(") => self
                .closing_paren(self.pos)
                .is_some_and(|end| arrow_at(end + 1 - self.pos)),
            None => false,
        }
    }

    /// Index of the `)` matching the `(` at token index `open`.
    fn closing_paren(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            if token.is_punct("(") {
                depth += 1;
            } else if token.is_punct(")") {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    fn skip_statement(&mut self) -> ParseResult<()> {
        self.skip_expression(STATEMENT)?;
        self.eat_punct(";");
        Ok(())
    }

    /// Skip one bracketed group starting at the cursor.
    fn skip_balanced(&mut self) -> ParseResult<()> {
        let mut stack: Vec<(&'static str, Span)> = Vec::new();
        loop {
            let Some(token) = self.bump() else {
                let (closer, span) = stack.last().copied().unwrap_or(("}", Span::default()));
                return Err(SyntaxError::new(format!("unclosed bracket, expected '{closer}'"), span));
            };
            match &token.kind {
                TokenKind::Punct(p) if matches!(*p, "(" | "[" | "{") => {
                    stack.push((closer(p), token.span));
                }
                TokenKind::Punct(p) if matches!(*p, ")" | "]" | "}") => {
                    if stack.pop().map(|(c, _)| c) != Some(*p) {
                        return Err(SyntaxError::new(format!("unexpected '{p}'"), token.span));
                    }
                }
                _ => {}
            }
            if stack.is_empty() {
                return Ok(());
            }
        }
    }

    /// Advance past one expression without interpreting it.
    fn skip_expression(&mut self, stop: Stop) -> ParseResult<()> {
        let mut stack: Vec<(&'static str, Span)> = Vec::new();
        let mut previous: Option<&Token> = None;

        while let Some(token) = self.peek() {
            if stack.is_empty() {
                let ends_line = stop.asi
                    && token.newline_before
                    && previous.is_some_and(Token::can_end_expression)
                    && !token.continues_expression();
                if ends_line || is_terminator(token, stop) {
                    break;
                }
            }
            match &token.kind {
                TokenKind::Punct(p) if matches!(*p, "(" | "[" | "{") => {
                    stack.push((closer(p), token.span));
                }
                TokenKind::Punct(p) if matches!(*p, ")" | "]" | "}") => {
                    if stack.pop().map(|(c, _)| c) != Some(*p) {
                        return Err(SyntaxError::new(format!("unexpected '{p}'"), token.span));
                    }
                }
                _ => {}
            }
            previous = Some(token);
            self.pos += 1;
        }

        match stack.last() {
            Some((closer, span)) => Err(SyntaxError::new(
                format!("unclosed bracket, expected '{closer}'"),
                *span,
            )),
            None => Ok(()),
        }
    }

    fn at_end_of_expression(&self, stop: Stop) -> bool {
        match self.peek() {
            None => true,
            Some(token) => {
                is_terminator(token, stop)
                    || (stop.asi && token.newline_before && !token.continues_expression())
            }
        }
    }

    /// Parse an expression, falling back to its source text when it is not a
    /// literal, identifier, member chain, object or array.
    fn expression(&mut self, stop: Stop) -> ParseResult<Expr> {
        let start = self.pos;
        if let Some(expr) = self.simple_expression()?
            && self.at_end_of_expression(stop)
        {
            return Ok(expr);
        }

        self.pos = start;
        self.skip_expression(stop)?;
        if self.pos == start {
            return Err(self.error_here("expected an expression"));
        }
        Ok(Expr::Opaque(self.text(start, self.pos)))
    }

    fn simple_expression(&mut self) -> ParseResult<Option<Expr>> {
        let Some(token) = self.peek() else {
            return Ok(None);
        };

        let expr = match &token.kind {
            TokenKind::Str(value) => Expr::Str(value.clone()),
            TokenKind::Num(value) => Expr::Num(*value),
            TokenKind::Template {
                cooked: Some(value),
            } => Expr::Str(value.clone()),
            TokenKind::Regex { pattern, flags } => Expr::Regex {
                pattern: pattern.clone(),
                flags: flags.clone(),
            },
            TokenKind::Punct("-") => match self.peek_at(1).map(|t| &t.kind) {
                Some(TokenKind::Num(value)) => {
                    self.pos += 2;
                    return Ok(Some(Expr::Num(-value)));
                }
                _ => return Ok(None),
            },
            TokenKind::Punct("{") => return self.object(),
            TokenKind::Punct("[") => return self.array(),
            TokenKind::Ident(name) => match name.as_str() {
                "true" => Expr::Bool(true),
                "false" => Expr::Bool(false),
                "null" => Expr::Null,
                "undefined" => Expr::Undefined,
                keyword if NON_VALUE_KEYWORDS.contains(&keyword) => return Ok(None),
                _ => return Ok(self.member_chain()),
            },
            _ => return Ok(None),
        };
        self.pos += 1;
        Ok(Some(expr))
    }

    /// `a`, `a.b`, `a?.b` and `a['b']` chains.
    fn member_chain(&mut self) -> Option<Expr> {
        let head = self.bump()?;
        let mut expr = Expr::Ident {
            name: head.ident()?.to_string(),
            span: head.span,
        };

        loop {
            let property = if self.at_punct(".") || self.at_punct("?.") {
                match self.peek_at(1) {
                    Some(next) => next.ident().map(|name| (name.to_string(), next.span, 2)),
                    None => None,
                }
            } else if self.at_punct("[")
                && self.peek_at(2).is_some_and(|t| t.is_punct("]"))
            {
                match self.peek_at(1) {
                    Some(Token {
                        kind: TokenKind::Str(name),
                        span,
                        ..
                    }) => Some((name.clone(), *span, 3)),
                    _ => None,
                }
            } else {
                break;
            };

            let (property, span, width) = property?;
            self.pos += width;
            expr = Expr::Member {
                object: Box::new(expr),
                property,
                span: head.span.to(span),
            };
        }

        Some(expr)
    }

    fn object(&mut self) -> ParseResult<Option<Expr>> {
        self.pos += 1;
        let mut properties = Vec::new();

        loop {
            if self.eat_punct("}") {
                break;
            }
            let Some(token) = self.peek() else {
                return Ok(None);
            };
            let start = self.pos;

            if token.is_punct("...") {
                self.pos += 1;
                properties.push(Property::Spread(self.expression(ELEMENT)?));
            } else {
                let key = match &token.kind {
                    TokenKind::Ident(key) | TokenKind::Str(key) => Some(key.clone()),
                    TokenKind::Num(value) => Some(format_number(*value)),
                    _ => None,
                };
                let accessor = matches!(token.ident(), Some("get" | "set" | "async"))
                    && self.peek_at(1).is_some_and(|t| {
                        !(t.is_punct(":") || t.is_punct(",") || t.is_punct("}") || t.is_punct("("))
                    });

                match key {
                    Some(key) if !accessor => {
                        self.pos += 1;
                        if self.eat_punct(":") {
                            let value = self.expression(ELEMENT)?;
                            properties.push(Property::KeyValue {
                                key,
                                value,
                                span: token.span,
                            });
                        } else if token.ident().is_some()
                            && (self.at_punct(",") || self.at_punct("}"))
                        {
                            properties.push(Property::KeyValue {
                                value: Expr::Ident {
                                    name: key.clone(),
                                    span: token.span,
                                },
                                key,
                                span: token.span,
                            });
                        } else if self.at_punct("(") {
                            self.pos = start;
                            self.skip_expression(ELEMENT)?;
                            properties.push(Property::Opaque(self.text(start, self.pos)));
                        } else {
                            return Ok(None);
                        }
                    }
                    _ if accessor || token.is_punct("[") || token.is_punct("*") => {
                        self.skip_expression(ELEMENT)?;
                        properties.push(Property::Opaque(self.text(start, self.pos)));
                    }
                    _ => return Ok(None),
                }
            }

            if !self.eat_punct(",") && !self.at_punct("}") {
                return Ok(None);
            }
        }

        Ok(Some(Expr::Object(properties)))
    }

    fn array(&mut self) -> ParseResult<Option<Expr>> {
        self.pos += 1;
        let mut elements = Vec::new();

        loop {
            if self.eat_punct("]") {
                break;
            }
            if self.eat_punct(",") {
                elements.push(Expr::Undefined);
                continue;
            }
            if self.peek().is_none() || self.at_punct("...") {
                return Ok(None);
            }
            elements.push(self.expression(ELEMENT)?);
            if !self.eat_punct(",") && !self.at_punct("]") {
                return Ok(None);
            }
        }

        Ok(Some(Expr::Array(elements)))
    }
}

fn is_terminator(token: &Token, stop: Stop) -> bool {
    token.is_punct(";")
        || (stop.comma && token.is_punct(","))
        || token.is_punct(")")
        || token.is_punct("]")
        || token.is_punct("}")
}

fn closer(open: &str) -> &'static str {
    match open {
        "(" => ")",
        "[" => "]",
        _ => "}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenize;

    fn parse(src: &str) -> Module {
        let tokens = tokenize(src).unwrap();
        parse_module(src, &tokens).unwrap()
    }

    fn parse_err(src: &str) -> SyntaxError {
        let tokens = tokenize(src).unwrap();
        parse_module(src, &tokens).unwrap_err()
    }

    fn binding<'m>(module: &'m Module, name: &str) -> &'m Binding {
        module.bindings().find(|b| b.name == name).unwrap()
    }

    #[test]
    fn test_import_forms() {
        let module = parse(
            "import Default, { a, b as c } from './x.js'\n\
             import * as ns from \"pkg\";\n\
             import './side-effect.js'\n\
             import { FieldTypes } from '@graffio/types-generation' with { type: 'json' }\n",
        );
        let imports: Vec<_> = module.imports().collect();
        assert_eq!(imports.len(), 4);

        let first = &imports[0];
        assert_eq!(first.source, "./x.js");
        let locals: Vec<_> = first.specifiers.iter().map(|s| s.local_name.as_str()).collect();
        assert_eq!(locals, vec!["Default", "a", "c"]);
        assert_eq!(first.specifiers[0].kind, ImportKind::Default);
        assert_eq!(first.specifiers[2].imported_name, "b");

        assert_eq!(imports[1].specifiers[0].kind, ImportKind::Namespace);
        assert_eq!(imports[1].specifiers[0].local_name, "ns");
        assert!(imports[2].specifiers.is_empty());
        assert_eq!(imports[3].source, "@graffio/types-generation");
    }

    #[test]
    fn test_dynamic_import_is_skipped() {
        let module = parse("const m = import('./x.js')\nexport const A = 1\n");
        assert_eq!(module.imports().count(), 0);
        assert!(matches!(binding(&module, "m").init, Some(Expr::Opaque(_))));
    }

    #[test]
    fn test_exported_object_literal() {
        let module = parse(
            "export const Coord = {\n    kind: 'tagged',\n    fields: { x: 'Number', 'y': /\\d+/g },\n}\n",
        );
        let coord = binding(&module, "Coord");
        assert!(coord.exported);

        let Some(Expr::Object(props)) = &coord.init else {
            panic!("expected object literal");
        };
        assert_eq!(props.len(), 2);
        let Property::KeyValue { key, value, .. } = &props[1] else {
            panic!("expected key/value");
        };
        assert_eq!(key, "fields");
        let Expr::Object(fields) = value else {
            panic!("expected nested object");
        };
        assert!(matches!(
            &fields[1],
            Property::KeyValue { key, value: Expr::Regex { flags, .. }, .. } if key == "y" && flags == "g"
        ));
    }

    #[test]
    fn test_shorthand_spread_and_methods() {
        let module = parse("const A = { b, ...c, d() { return 1 }, [e]: 2, get f() { return 3 } }");
        let Some(Expr::Object(props)) = &binding(&module, "A").init else {
            panic!("expected object literal");
        };
        assert!(matches!(&props[0], Property::KeyValue { key, value: Expr::Ident { name, .. }, .. } if key == "b" && name == "b"));
        assert!(matches!(&props[1], Property::Spread(Expr::Ident { name, .. }) if name == "c"));
        assert!(matches!(&props[2], Property::Opaque(text) if text == "d() { return 1 }"));
        assert!(matches!(&props[3], Property::Opaque(text) if text == "[e]: 2"));
        assert!(matches!(&props[4], Property::Opaque(text) if text.starts_with("get f()")));
    }

    #[test]
    fn test_member_chains() {
        let module = parse("const a = FieldTypes.accountId\nconst b = ns['Coord'].x\n");
        let Some(Expr::Member { object, property, .. }) = &binding(&module, "a").init else {
            panic!("expected member expression");
        };
        assert_eq!(property, "accountId");
        assert!(matches!(object.as_ref(), Expr::Ident { name, .. } if name == "FieldTypes"));

        let Some(Expr::Member { object, property, .. }) = &binding(&module, "b").init else {
            panic!("expected member expression");
        };
        assert_eq!(property, "x");
        assert!(matches!(object.as_ref(), Expr::Member { property, .. } if property == "Coord"));
    }

    #[test]
    fn test_non_literal_initializers_are_opaque() {
        let module = parse("const a = f(1, 2)\nconst b = x + 1\nconst c = -4\nlet d = `t`, e = [1, 'two']\n");
        assert!(matches!(&binding(&module, "a").init, Some(Expr::Opaque(t)) if t == "f(1, 2)"));
        assert!(matches!(&binding(&module, "b").init, Some(Expr::Opaque(t)) if t == "x + 1"));
        assert_eq!(binding(&module, "c").init, Some(Expr::Num(-4.0)));
        assert_eq!(binding(&module, "d").init, Some(Expr::Str("t".to_string())));
        let Some(Expr::Array(items)) = &binding(&module, "e").init else {
            panic!("expected array");
        };
        assert_eq!(items, &vec![Expr::Num(1.0), Expr::Str("two".to_string())]);
    }

    #[test]
    fn test_assignments() {
        let module = parse(
            "export const Coord = { kind: 'tagged', fields: { x: 'Number' } }\n\
             Coord.double = coord => Coord(coord.x * 2)\n\
             Coord.origin = Coord(0)\n\
             Coord.sum = function (a, b) {\n    return a.x + b.x\n}\n\
             Coord.parse = async (text) => JSON.parse(text);\n",
        );
        let assignments: Vec<_> = module.assignments().collect();
        assert_eq!(assignments.len(), 4);

        assert_eq!(assignments[0].property, "double");
        assert_eq!(assignments[0].source, "coord => Coord(coord.x * 2)");
        assert!(assignments[0].is_function);
        assert!(!assignments[1].is_function);
        assert_eq!(
            assignments[2].source,
            "function (a, b) {\n    return a.x + b.x\n}"
        );
        assert!(assignments[3].is_function);
        assert_eq!(assignments[3].source, "async (text) => JSON.parse(text)");
    }

    #[test]
    fn test_export_lists_and_declarations() {
        let module = parse(
            "function helper() {}\n\
             export { helper as h, Coord }\n\
             export { Shape } from './shape.js'\n\
             export * from './all.js'\n\
             export class Thing extends Base {}\n\
             export default { a: 1 }\n",
        );
        let kinds: Vec<_> = module
            .items
            .iter()
            .map(|item| match item {
                Item::Declaration { name, exported } => format!("decl {name} {exported}"),
                Item::ExportList { specifiers, source, .. } => format!(
                    "list {} {:?}",
                    specifiers
                        .iter()
                        .map(|s| format!("{}>{}", s.local, s.exported))
                        .collect::<Vec<_>>()
                        .join(","),
                    source
                ),
                Item::ExportAll { source, .. } => format!("all {source}"),
                Item::ExportDefault(_) => "default".to_string(),
                other => format!("{other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "decl helper false",
                "list helper>h,Coord>Coord None",
                "list Shape>Shape Some(\"./shape.js\")",
                "all ./all.js",
                "decl Thing true",
                "default",
            ]
        );
    }

    #[test]
    fn test_statements_are_skipped_across_lines() {
        let module = parse(
            "if (x) {\n    y()\n} else {\n    z()\n}\n\
             console.log('a / b', /re/)\n\
             const after = 'kept'\n",
        );
        assert_eq!(binding(&module, "after").init, Some(Expr::Str("kept".to_string())));
    }

    #[test]
    fn test_continued_lines_stay_in_one_statement() {
        let module = parse("const total = a\n    + b\n    .c\nconst next = 1\n");
        assert!(matches!(&binding(&module, "total").init, Some(Expr::Opaque(t)) if t.contains(".c")));
        assert_eq!(binding(&module, "next").init, Some(Expr::Num(1.0)));
    }

    #[test]
    fn test_unbalanced_brackets_error() {
        let err = parse_err("const a = { b: [1, 2 }\n");
        assert!(err.message.contains("unexpected '}'"), "{}", err.message);
    }

    #[test]
    fn test_unclosed_bracket_error() {
        let err = parse_err("export const Coord = {\n    kind: 'tagged',\n");
        assert!(err.message.contains("unclosed"), "{}", err.message);
        assert_eq!(err.span.start, 21);
    }

    #[test]
    fn test_malformed_import_error() {
        let err = parse_err("import { a from './x.js'\n");
        assert!(err.message.contains("import"), "{}", err.message);
    }
}

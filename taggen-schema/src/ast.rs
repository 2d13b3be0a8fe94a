//! Syntax tree for the statements a definition file is made of.
//!
//! Only the top-level shapes that matter for type definitions are modelled.
//! Anything else is skipped by the parser or kept as [`Expr::Opaque`] text.

use serde::Serialize;

use crate::syntax::Span;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub items: Vec<Item>,
}

impl Module {
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Import(decl) => Some(decl),
            _ => None,
        })
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.items.iter().filter_map(|item| match item {
            Item::Binding(binding) => Some(binding),
            _ => None,
        })
    }

    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.items.iter().filter_map(|item| match item {
            Item::Assignment(assignment) => Some(assignment),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Import(ImportDecl),
    /// `const`/`let`/`var` declarator, exported or not.
    Binding(Binding),
    /// `function NAME` or `class NAME`.
    Declaration { name: String, exported: bool },
    /// `export { a, b as c }`, optionally re-exported `from` a module.
    ExportList {
        specifiers: Vec<ExportSpecifier>,
        source: Option<String>,
        span: Span,
    },
    /// `export * from '...'` or `export * as ns from '...'`.
    ExportAll {
        source: String,
        alias: Option<String>,
        span: Span,
    },
    ExportDefault(Expr),
    /// `Object.property = ...` at the top level.
    Assignment(Assignment),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub source: String,
    pub specifiers: Vec<ImportSpecifier>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportKind {
    Default,
    Named,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpecifier {
    pub kind: ImportKind,
    /// `default` for default imports, `*` for namespace imports.
    pub imported_name: String,
    pub local_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub init: Option<Expr>,
    pub exported: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub object: String,
    pub property: String,
    /// The right-hand side exactly as written.
    pub source: String,
    pub is_function: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
    Undefined,
    Regex {
        pattern: String,
        flags: String,
    },
    Ident {
        name: String,
        span: Span,
    },
    Member {
        object: Box<Expr>,
        property: String,
        span: Span,
    },
    Object(Vec<Property>),
    Array(Vec<Expr>),
    /// Source text of an expression outside the understood subset.
    Opaque(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    KeyValue { key: String, value: Expr, span: Span },
    Spread(Expr),
    /// Methods, accessors and computed keys.
    Opaque(String),
}

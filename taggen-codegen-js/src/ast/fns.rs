//! JavaScript function builders.

use taggen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use crate::naming::is_identifier;

/// A `function` declaration, or an anonymous `function` expression.
#[derive(Debug, Clone)]
pub struct Fn {
    name: Option<String>,
    params: Vec<String>,
    body: Vec<CodeFragment>,
}

impl Fn {
    /// `function name(...) { ... }`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    /// `function (...) { ... }`, for use as a value.
    pub fn anonymous() -> Self {
        Self {
            name: None,
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    pub fn params(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.params.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    /// Add any renderable node to the function body.
    pub fn body(mut self, node: impl Renderable) -> Self {
        self.body.extend(node.to_fragments());
        self
    }

    pub fn blank(mut self) -> Self {
        self.body.push(CodeFragment::blank());
        self
    }

    fn signature(&self) -> String {
        match &self.name {
            Some(name) => format!("function {}({}) {{", name, self.params.join(", ")),
            None => format!("function ({}) {{", self.params.join(", ")),
        }
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::javascript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::braced(self.signature(), self.body.clone(), "}")]
    }
}

/// An arrow function, either with a block body or a single expression.
#[derive(Debug, Clone)]
pub struct ArrowFn {
    params: Vec<String>,
    body: ArrowBody,
}

#[derive(Debug, Clone)]
enum ArrowBody {
    Expr(String),
    Block(Vec<CodeFragment>),
}

impl ArrowFn {
    /// `(params) => expr`
    pub fn expr(params: &[&str], expr: impl Into<String>) -> Self {
        Self {
            params: params.iter().map(|p| p.to_string()).collect(),
            body: ArrowBody::Expr(expr.into()),
        }
    }

    /// `(params) => { ... }`, filled with [`ArrowFn::body_line`].
    pub fn block(params: &[&str]) -> Self {
        Self {
            params: params.iter().map(|p| p.to_string()).collect(),
            body: ArrowBody::Block(Vec::new()),
        }
    }

    /// Add a line to a block body. Expression bodies are left as they are.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        if let ArrowBody::Block(body) = &mut self.body {
            body.push(CodeFragment::line(line));
        }
        self
    }

    fn head(&self) -> String {
        match self.params.as_slice() {
            [single] if is_identifier(single) => format!("{} =>", single),
            params => format!("({}) =>", params.join(", ")),
        }
    }
}

impl Renderable for ArrowFn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match &self.body {
            ArrowBody::Expr(expr) => vec![CodeFragment::line(format!("{} {}", self.head(), expr))],
            ArrowBody::Block(body) => vec![CodeFragment::braced(
                format!("{} {{", self.head()),
                body.clone(),
                "}",
            )],
        }
    }
}

//! Indentation-aware text buffer.

use super::{CodeFragment, Indent, Renderable};

/// Turns [`CodeFragment`]s into indented source text.
///
/// ```
/// use taggen_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::javascript();
/// builder.emit(&CodeFragment::braced(
///     "function Coord(x, y) {",
///     vec![CodeFragment::line("return { x, y }")],
///     "}",
/// ));
///
/// assert_eq!(builder.build(), "function Coord(x, y) {\n    return { x, y }\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    depth: usize,
    unit: String,
    out: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            depth: 0,
            unit: indent.unit(),
            out: String::new(),
        }
    }

    pub fn javascript() -> Self {
        Self::new(Indent::JAVASCRIPT)
    }

    /// Append `text` as one line at the current depth.
    pub fn push_line(&mut self, text: &str) -> &mut Self {
        for _ in 0..self.depth {
            self.out.push_str(&self.unit);
        }
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    /// Blank lines carry no indentation.
    pub fn push_blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// Render every fragment of `node` at the current depth.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.write(&fragment);
        }
        self
    }

    pub fn build(self) -> String {
        self.out
    }

    fn write(&mut self, fragment: &CodeFragment) {
        match fragment {
            CodeFragment::Line(text) => {
                self.push_line(text);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(header);
                self.nested(body);
                if let Some(close) = close {
                    self.push_line(close);
                }
            }
            CodeFragment::Indent(body) => self.nested(body),
            CodeFragment::Sequence(items) => items.iter().for_each(|f| self.write(f)),
            CodeFragment::Verbatim(text) => {
                self.out.push_str(text);
                if !text.is_empty() && !text.ends_with('\n') {
                    self.out.push('\n');
                }
            }
        }
    }

    fn nested(&mut self, body: &[CodeFragment]) {
        self.depth += 1;
        body.iter().for_each(|f| self.write(f));
        self.depth -= 1;
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::javascript()
    }
}

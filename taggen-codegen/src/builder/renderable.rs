//! Fragments: generated code before indentation is applied.
//!
//! Syntax nodes implement [`Renderable`]; [`CodeBuilder`](super::CodeBuilder)
//! lays the fragments out.

#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    Line(String),
    Blank,
    /// A header line, a body one level deeper and an optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// One level deeper, without header or close.
    Indent(Vec<CodeFragment>),
    Sequence(Vec<CodeFragment>),
    /// Source text written exactly as given: no indentation, no
    /// normalization. A trailing newline is added when missing.
    Verbatim(String),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn blank() -> Self {
        Self::Blank
    }

    pub fn braced(header: impl Into<String>, body: Vec<CodeFragment>, close: &str) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close: Some(close.to_string()),
        }
    }

    pub fn indent(fragments: Vec<CodeFragment>) -> Self {
        Self::Indent(fragments)
    }

    pub fn verbatim(text: impl Into<String>) -> Self {
        Self::Verbatim(text.into())
    }

    /// One `Line` per line of `text`. Leading whitespace stays part of the
    /// line; whitespace-only lines become `Blank`.
    pub fn lines(text: &str) -> Vec<Self> {
        text.lines()
            .map(|line| match line.trim() {
                "" => Self::Blank,
                _ => Self::line(line),
            })
            .collect()
    }
}

/// A syntax node that can be laid out by a [`CodeBuilder`](super::CodeBuilder).
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}

impl Renderable for CodeFragment {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![self.clone()]
    }
}

impl Renderable for Vec<CodeFragment> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.clone()
    }
}

impl Renderable for [CodeFragment] {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_turn_whitespace_only_lines_into_blanks() {
        let fragments = CodeFragment::lines("a()\n   \n    b()");
        assert_eq!(
            fragments,
            vec![
                CodeFragment::line("a()"),
                CodeFragment::Blank,
                CodeFragment::line("    b()"),
            ]
        );
    }

    #[test]
    fn test_slices_render_their_fragments() {
        let body = [CodeFragment::line("return 1"), CodeFragment::blank()];
        assert_eq!(body[..].to_fragments(), body.to_vec());
    }
}

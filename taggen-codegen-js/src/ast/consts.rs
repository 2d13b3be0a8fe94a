//! `const` declarations and member assignments.

use taggen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::prefixed;

/// `const name = value`, or `target = value` for an assignment.
#[derive(Debug, Clone)]
pub struct Const {
    target: String,
    value: Vec<CodeFragment>,
    declare: bool,
}

impl Const {
    pub fn new(name: impl Into<String>, value: impl Renderable) -> Self {
        Self {
            target: name.into(),
            value: value.to_fragments(),
            declare: true,
        }
    }

    /// Assign to an existing binding or member: `Coord.is = ...`.
    pub fn assign(target: impl Into<String>, value: impl Renderable) -> Self {
        Self {
            declare: false,
            ..Self::new(target, value)
        }
    }

    /// Render the statement as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::javascript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let keyword = if self.declare { "const " } else { "" };
        prefixed(
            &format!("{}{} = ", keyword, self.target),
            self.value.clone(),
        )
    }
}

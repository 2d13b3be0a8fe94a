//! JavaScript export statement builder.

use taggen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use crate::naming::js_string;

/// Builder for `export { ... }` statements, optionally re-exporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Export {
    from: Option<String>,
    named: Vec<String>,
}

impl Export {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-export from another module.
    pub fn from(mut self, module: impl Into<String>) -> Self {
        self.from = Some(module.into());
        self
    }

    /// Export a named binding.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    fn statement(&self) -> Option<String> {
        match (&self.from, self.named.is_empty()) {
            (Some(from), true) => Some(format!("export * from {}", js_string(from))),
            (Some(from), false) => Some(format!(
                "export {{ {} }} from {}",
                self.named.join(", "),
                js_string(from)
            )),
            (None, false) => Some(format!("export {{ {} }}", self.named.join(", "))),
            (None, true) => None,
        }
    }

    /// Build the export as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::javascript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Export {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.statement().map(CodeFragment::line).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_named() {
        let e = Export::new().named("Coord").build();
        assert_eq!(e, "export { Coord }\n");
    }

    #[test]
    fn test_re_export_all() {
        let e = Export::new().from("./coord.js").build();
        assert_eq!(e, "export * from './coord.js'\n");
    }

    #[test]
    fn test_re_export_named() {
        let e = Export::new().from("./shape.js").named("Shape").build();
        assert_eq!(e, "export { Shape } from './shape.js'\n");
    }

    #[test]
    fn test_empty_export_renders_nothing() {
        assert_eq!(Export::new().build(), "");
    }
}

//! JavaScript import declaration builder.

use taggen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use crate::naming::js_string;

/// Builder for `import` declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    from: String,
    default: Option<String>,
    namespace: Option<String>,
    /// `(imported, local)` pairs.
    named: Vec<(String, String)>,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            default: None,
            namespace: None,
            named: Vec::new(),
        }
    }

    /// Import the default export.
    pub fn default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Import the whole module as `* as name`.
    pub fn namespace(mut self, name: impl Into<String>) -> Self {
        self.namespace = Some(name.into());
        self
    }

    /// Import a named export under its own name.
    pub fn named(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.named_as(name.clone(), name)
    }

    /// Import a named export under a local alias (`a as b`).
    pub fn named_as(mut self, imported: impl Into<String>, local: impl Into<String>) -> Self {
        self.named.push((imported.into(), local.into()));
        self
    }

    pub fn source(&self) -> &str {
        &self.from
    }

    /// Local names this import binds.
    pub fn locals(&self) -> impl Iterator<Item = &str> {
        self.default
            .iter()
            .chain(self.namespace.iter())
            .map(String::as_str)
            .chain(self.named.iter().map(|(_, local)| local.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.namespace.is_none() && self.named.is_empty()
    }

    fn statement(&self) -> String {
        let mut clauses = Vec::new();
        if let Some(default) = &self.default {
            clauses.push(default.clone());
        }
        if let Some(namespace) = &self.namespace {
            clauses.push(format!("* as {}", namespace));
        }
        if !self.named.is_empty() {
            let named = self
                .named
                .iter()
                .map(|(imported, local)| {
                    if imported == local {
                        local.clone()
                    } else {
                        format!("{} as {}", imported, local)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            clauses.push(format!("{{ {} }}", named));
        }

        if clauses.is_empty() {
            format!("import {}", js_string(&self.from))
        } else {
            format!("import {} from {}", clauses.join(", "), js_string(&self.from))
        }
    }

    /// Build the import as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::javascript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.statement())]
    }
}

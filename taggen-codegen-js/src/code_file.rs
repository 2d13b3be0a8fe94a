//! Structured JavaScript module: imports, body sections, exports.

use taggen_codegen::{CodeBuilder, CodeFragment, Indent, Renderable};

use crate::{
    ast::{Export, Import},
    format::format,
};

/// A JavaScript module, rendered as imports, then body sections separated
/// by blank lines, then exports.
///
/// ```ignore
/// let file = CodeFile::new()
///     .import(Import::new("./coord.js").named("Coord"))
///     .add(RawCode::new("const origin = Coord(0, 0)"))
///     .export(Export::new().named("origin"))
///     .render();
/// ```
#[derive(Debug, Default)]
pub struct CodeFile {
    imports: Vec<Import>,
    body: Vec<Vec<CodeFragment>>,
    exports: Vec<Export>,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    pub fn imports(mut self, imports: impl IntoIterator<Item = Import>) -> Self {
        self.imports.extend(imports);
        self
    }

    /// Add a body section.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add one body section per node.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        self.body.extend(nodes.into_iter().map(|node| node.to_fragments()));
        self
    }

    pub fn export(mut self, export: Export) -> Self {
        self.exports.push(export);
        self
    }

    pub fn render(&self) -> String {
        self.render_with_indent(Indent::JAVASCRIPT)
    }

    /// Imports, each body section and exports, separated by blank lines.
    pub fn render_with_indent(&self, indent: Indent) -> String {
        let imports: Vec<_> = self.imports.iter().flat_map(Renderable::to_fragments).collect();
        let exports: Vec<_> = self.exports.iter().flat_map(Renderable::to_fragments).collect();

        let sections = std::iter::once(&imports)
            .chain(&self.body)
            .chain(std::iter::once(&exports))
            .filter(|section| !section.is_empty());
        layout(indent, sections)
    }

    /// The body sections alone, for deciding which imports are referenced.
    pub fn render_body(&self) -> String {
        layout(Indent::JAVASCRIPT, &self.body)
    }
}

/// Sections joined by single blank lines.
///
/// Generated fragments are normalized with [`format`]. Verbatim fragments
/// at the top level of a section are copied untouched.
fn layout<'a>(
    indent: Indent,
    sections: impl IntoIterator<Item = &'a Vec<CodeFragment>>,
) -> String {
    let mut out = String::new();
    for section in sections {
        let text = render_section(indent, section);
        if text.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&text);
    }
    out
}

fn render_section(indent: Indent, section: &[CodeFragment]) -> String {
    let mut out = String::new();
    let mut generated = CodeBuilder::new(indent);
    for fragment in section {
        if let CodeFragment::Verbatim(text) = fragment {
            let pending = std::mem::replace(&mut generated, CodeBuilder::new(indent));
            out.push_str(&format(&pending.build()));
            out.push_str(text);
            if !text.ends_with('\n') {
                out.push('\n');
            }
        } else {
            generated.emit(fragment);
        }
    }
    out.push_str(&format(&generated.build()));
    out
}

/// Source text copied into the module exactly as written.
///
/// Used for functions attached in the definition file, whose template
/// literals may depend on trailing spaces and blank lines.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.0.trim().is_empty() {
            return Vec::new();
        }
        vec![CodeFragment::verbatim(self.0.as_str())]
    }
}

//! The module generated for one definition file.

use std::path::{Path, PathBuf};

use taggen_codegen::{Indent, TypeAnalysis};
use taggen_core::{Config, GeneratedFile};
use taggen_schema::{ParseResult, TypeDefinition};

use crate::{
    ast::Export,
    code_file::CodeFile,
    emit::{emit, module_imports},
    runtime::helpers_for,
};

/// A generated type module: imports, runtime helpers, the type, its
/// attached functions and a single named export.
#[derive(Debug)]
pub struct TypeModule {
    file_name: String,
    banner: Option<String>,
    indent: Indent,
    file: CodeFile,
}

impl TypeModule {
    pub fn new(
        parsed: &ParseResult,
        definition: &TypeDefinition,
        analysis: &TypeAnalysis,
        config: &Config,
        file_name: impl Into<String>,
    ) -> Self {
        let body = CodeFile::new()
            .add_all(helpers_for(analysis))
            .add_all(emit(definition, analysis, &parsed.functions, &config.emit));
        let imports = module_imports(
            &parsed.imports,
            analysis,
            &config.imports,
            &body.render_body(),
        );
        let file = body
            .imports(imports)
            .export(Export::new().named(definition.name()));

        let banner = config.emit.header.then(|| {
            let source = parsed
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| parsed.path.display().to_string());
            format!("// Auto-generated by taggen from {}. Do not edit.\n", source)
        });

        Self {
            file_name: file_name.into(),
            banner,
            indent: Indent::from_width(config.emit.indent),
            file,
        }
    }
}

impl GeneratedFile for TypeModule {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.file_name)
    }

    fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    fn render(&self) -> String {
        self.file.render_with_indent(self.indent)
    }
}

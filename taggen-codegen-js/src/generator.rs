//! JavaScript generator for one compiled definition.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use taggen_codegen::{
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    pipeline::CompilationContext,
};
use taggen_core::{Config, GeneratedFile};

use crate::files::TypeModule;

/// Writes the module for one definition to an output path.
#[derive(Debug)]
pub struct Generator {
    module: TypeModule,
    output_dir: PathBuf,
    output: PathBuf,
}

impl LanguageCodegen for Generator {
    fn preview(&self) -> Vec<PreviewFile> {
        vec![PreviewFile {
            path: self.output.clone(),
            content: self.module.contents(),
        }]
    }

    fn generate(&self) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();
        let written = self.module.write(&self.output_dir)?;
        result.record(&self.output, written);
        Ok(result)
    }
}

impl Generator {
    /// Build the module from a context the pipeline has analyzed.
    pub fn from_context(
        ctx: &CompilationContext,
        config: &Config,
        output: impl AsRef<Path>,
    ) -> Result<Self> {
        let output = output.as_ref();
        let file_name = output
            .file_name()
            .ok_or_else(|| eyre!("output path '{}' has no file name", output.display()))?
            .to_string_lossy()
            .into_owned();
        let output_dir = output.parent().map(Path::to_path_buf).unwrap_or_default();

        let module = TypeModule::new(
            &ctx.parsed,
            &ctx.definition,
            ctx.analysis()?,
            config,
            file_name,
        );
        Ok(Self {
            module,
            output_dir,
            output: output.to_path_buf(),
        })
    }

    /// The module as it will be written.
    pub fn contents(&self) -> String {
        self.module.contents()
    }
}

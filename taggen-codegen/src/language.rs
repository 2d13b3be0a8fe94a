//! What the CLI needs from a target language generator.

use std::path::{Path, PathBuf};

use eyre::Result;
use taggen_core::WriteResult;

pub trait LanguageCodegen {
    /// Every file as it would be written, without touching the disk.
    fn preview(&self) -> Vec<PreviewFile>;

    fn generate(&self) -> Result<GenerateResult>;
}

/// Paths touched by [`LanguageCodegen::generate`].
#[derive(Debug, Default)]
pub struct GenerateResult {
    pub written: Vec<PathBuf>,
    /// Already identical on disk, so left alone.
    pub unchanged: Vec<PathBuf>,
}

impl GenerateResult {
    pub fn record(&mut self, path: &Path, result: WriteResult) {
        let list = match result {
            WriteResult::Written => &mut self.written,
            WriteResult::Unchanged => &mut self.unchanged,
        };
        list.push(path.to_path_buf());
    }
}

#[derive(Debug)]
pub struct PreviewFile {
    pub path: PathBuf,
    pub content: String,
}

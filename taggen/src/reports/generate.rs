//! Generate command report data structures.

use std::path::PathBuf;

use taggen_codegen::PreviewFile;

use super::output::{Output, Report};

/// Report data from generating one module.
#[derive(Debug)]
pub struct GenerateReport {
    /// Definition file that was read.
    pub input: PathBuf,
    /// Module path.
    pub output: PathBuf,
    pub type_name: String,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    pub result: GenerationResult,
    /// Where pipeline snapshots went, if visualization was enabled.
    pub snapshot_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum GenerationResult {
    /// The module was written, or already matched what is on disk.
    Written { unchanged: bool },
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        if let Some(dir) = &self.snapshot_dir {
            out.key_value("Pipeline snapshots written to", &dir.display().to_string());
        }

        match &self.result {
            GenerationResult::Written { unchanged } => {
                let label = if *unchanged { "Unchanged" } else { "Generated" };
                out.key_value(
                    label,
                    &format!(
                        "{} ({} -> {})",
                        self.type_name,
                        self.input.display(),
                        self.output.display()
                    ),
                );
            }
            GenerationResult::Preview(files) => render_preview(out, files),
        }
    }
}

fn render_preview(out: &mut dyn Output, files: &[PreviewFile]) {
    for file in files {
        out.divider(&file.path.display().to_string());
        out.preformatted(&file.content);
    }

    out.divider("Summary");
    let plural = if files.len() == 1 { "" } else { "s" };
    out.preformatted(&format!("{} file{} would be generated", files.len(), plural));
}

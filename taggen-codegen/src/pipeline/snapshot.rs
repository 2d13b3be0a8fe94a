//! Captures the compilation context after each phase, for `--visualize`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use serde::Serialize;
use taggen_schema::{FunctionInfo, ImportInfo, TypeDefinition};

use super::{CompilationContext, Diagnostic, Plugin};
use crate::analysis::TypeAnalysis;

#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,
    pub definition: TypeDefinition,
    pub imports: Vec<ImportInfo>,
    pub functions: Vec<FunctionInfo>,
    /// Available from the "analyze" phase on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<TypeAnalysis>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Writes a [`PhaseSnapshot`] as `<phase>.json` into its output directory
/// after every phase.
pub struct SnapshotPlugin {
    output_dir: PathBuf,
}

impl SnapshotPlugin {
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl PhaseSnapshot {
    fn capture(phase: &str, ctx: &CompilationContext) -> Self {
        Self {
            phase: phase.to_string(),
            definition: ctx.definition.clone(),
            imports: ctx.parsed.imports.clone(),
            functions: ctx.parsed.functions.clone(),
            analysis: ctx.analysis.clone(),
            diagnostics: ctx.diagnostics.clone(),
        }
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create snapshot directory '{}'", dir.display()))?;
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(dir.join(format!("{}.json", snapshot.phase)), json)?;
    Ok(())
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        write_snapshot(&self.output_dir, &PhaseSnapshot::capture(phase, ctx))
    }
}

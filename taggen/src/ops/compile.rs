//! Loading and compiling one definition file.

use std::path::Path;

use eyre::{Context, Result};
use taggen_codegen::pipeline::{CompilationContext, Diagnostic, Pipeline, Severity, SnapshotPlugin};
use taggen_core::Config;
use taggen_schema::{ParseResult, TypeDefinition, parse_file};

/// Parse and validate a `.type.js` file.
pub fn load(input: &Path, config: &Config) -> taggen_schema::Result<(ParseResult, TypeDefinition)> {
    let parsed = parse_file(input, &config.imports)?;
    let definition = parsed.validate()?;
    Ok((parsed, definition))
}

/// Run the pipeline, snapshotting every phase into `visualize` when given.
pub fn compile(
    parsed: ParseResult,
    definition: TypeDefinition,
    visualize: Option<&Path>,
) -> Result<CompilationContext> {
    let mut pipeline = Pipeline::new();
    if let Some(dir) = visualize {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }
    pipeline.run(parsed, definition).wrap_err("Pipeline failed")
}

/// Messages of every diagnostic with the given severity, locations included.
pub fn messages(ctx: &CompilationContext, severity: Severity) -> Vec<String> {
    ctx.diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .map(describe)
        .collect()
}

fn describe(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}

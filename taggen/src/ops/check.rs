//! Check operation - definition validation.

use eyre::Result;
use taggen_codegen::pipeline::Severity;
use taggen_schema::{ParseResult, TypeDefinition};

use super::compile::{compile, messages};
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline over a validated definition and returns its
/// diagnostics along with the constructors it would generate.
pub fn check(parsed: ParseResult, definition: TypeDefinition) -> Result<CheckReport> {
    let input = parsed.path.clone();
    let ctx = compile(parsed, definition, None)?;

    let analysis = ctx.analysis()?;
    let constructors = analysis
        .constructors
        .iter()
        .map(|c| c.signature())
        .collect();

    Ok(CheckReport {
        input,
        type_name: analysis.type_name.clone(),
        kind: if analysis.is_sum { "taggedSum" } else { "tagged" },
        constructors,
        functions: analysis.functions.clone(),
        errors: messages(&ctx, Severity::Error),
        warnings: messages(&ctx, Severity::Warning),
        infos: messages(&ctx, Severity::Info),
    })
}

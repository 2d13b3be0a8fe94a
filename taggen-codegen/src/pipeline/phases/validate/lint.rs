use taggen_schema::{FunctionInfo, TypeDefinition};

use crate::pipeline::Diagnostic;

/// A check over a validated definition for things the schema accepts but
/// that are likely mistakes.
pub trait Lint: Send + Sync {
    /// Kebab-case identifier, e.g. `field-shadowing`.
    fn name(&self) -> &'static str;

    fn check(
        &self,
        definition: &TypeDefinition,
        functions: &[FunctionInfo],
        diagnostics: &mut Vec<Diagnostic>,
    );
}

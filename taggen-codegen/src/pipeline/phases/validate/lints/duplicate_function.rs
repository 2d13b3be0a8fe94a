//! Lint for helpers assigned more than once.

use std::collections::HashSet;

use taggen_schema::{FunctionInfo, TypeDefinition};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Warns when the same helper is assigned twice. Both assignments are
/// copied into the output in order, so the last one wins.
pub struct DuplicateFunctionLint;

impl Lint for DuplicateFunctionLint {
    fn name(&self) -> &'static str {
        "duplicate-function"
    }

    fn check(
        &self,
        _definition: &TypeDefinition,
        functions: &[FunctionInfo],
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        for function in functions {
            let name = function.function_name.as_str();
            if !seen.insert(name) && reported.insert(name) {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "{}.{} is assigned more than once; the last assignment wins",
                            function.type_name, name
                        ),
                    )
                    .at(format!("{}.{}", function.type_name, name)),
                );
            }
        }
    }
}

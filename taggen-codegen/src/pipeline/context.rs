//! State threaded through the pipeline phases.

use eyre::{Result, eyre};
use taggen_schema::{ParseResult, TypeDefinition};

use super::diagnostic::{Diagnostic, Severity};
use crate::analysis::TypeAnalysis;

/// One definition file's compilation, filled in phase by phase.
#[derive(Debug)]
pub struct CompilationContext {
    /// Imports, attached functions and source of the definition file.
    pub parsed: ParseResult,
    /// Phases read the definition but never change it.
    pub definition: TypeDefinition,
    /// Set by the analyze phase.
    pub analysis: Option<TypeAnalysis>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(parsed: ParseResult, definition: TypeDefinition) -> Self {
        Self {
            parsed,
            definition,
            analysis: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        self.definition.name()
    }

    /// Number of diagnostics raised with `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn analysis(&self) -> Result<&TypeAnalysis> {
        self.analysis
            .as_ref()
            .ok_or_else(|| eyre!("{} has not been analyzed yet", self.type_name()))
    }
}

#[cfg(test)]
mod tests {
    use taggen_core::ImportConfig;
    use taggen_schema::parse_str;

    use super::*;

    fn coord() -> CompilationContext {
        let parsed = parse_str(
            "export const Coord = { kind: 'tagged', fields: { x: 'Number', y: 'Number' } }\n",
            &ImportConfig::default(),
        )
        .unwrap();
        let definition = parsed.validate().unwrap();
        CompilationContext::new(parsed, definition)
    }

    #[test]
    fn test_analysis_is_missing_until_analyzed() {
        let ctx = coord();

        assert_eq!(ctx.type_name(), "Coord");
        let err = ctx.analysis().unwrap_err();
        assert_eq!(err.to_string(), "Coord has not been analyzed yet");
    }

    #[test]
    fn test_count_by_severity() {
        let mut ctx = coord();
        ctx.diagnostics.extend([
            Diagnostic::warning("validate", "type name should be PascalCase"),
            Diagnostic::warning("validate", "field hides toString"),
            Diagnostic::info("analyze", "2 constructors"),
        ]);

        assert_eq!(ctx.count(Severity::Warning), 2);
        assert_eq!(ctx.count(Severity::Info), 1);
        assert_eq!(ctx.count(Severity::Error), 0);
    }
}

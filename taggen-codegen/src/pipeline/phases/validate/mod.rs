//! Validate phase - runs lints on the definition.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::Lint;
pub use lints::{DuplicateFunctionLint, FieldShadowingLint, FunctionOverrideLint, TypeNamingLint};

use crate::pipeline::{CompilationContext, Phase, Severity};

/// Runs every configured lint. Warnings pass; any error diagnostic fails the
/// phase.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// The phase with the built-in lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(TypeNamingLint),
                Box::new(FieldShadowingLint),
                Box::new(FunctionOverrideLint),
                Box::new(DuplicateFunctionLint),
            ],
        }
    }

}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        for lint in &self.lints {
            lint.check(&ctx.definition, &ctx.parsed.functions, &mut ctx.diagnostics);
        }

        let errors = ctx.count(Severity::Error);
        if errors > 0 {
            bail!("{} failed validation with {} error(s)", ctx.type_name(), errors);
        }

        Ok(())
    }
}

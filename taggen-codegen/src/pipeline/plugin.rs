//! Hooks around pipeline phases.

use eyre::Result;

use super::CompilationContext;

/// Receives a callback before and after every phase.
///
/// Returning an error from either hook aborts the pipeline.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}

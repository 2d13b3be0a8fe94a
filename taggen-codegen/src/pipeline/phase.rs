use eyre::Result;

use super::CompilationContext;

/// A step of the compilation pipeline.
///
/// The built-in steps are `validate` (lints) and `analyze`. Phases added
/// with [`Pipeline::phase`](super::Pipeline::phase) run after them and may
/// rely on the analysis being present.
pub trait Phase: Send + Sync {
    /// Used in plugin hooks and as the snapshot file name.
    fn name(&self) -> &'static str;

    /// Fails only when compilation can't go on; anything else becomes a
    /// diagnostic on `ctx`.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}

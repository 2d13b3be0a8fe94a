//! Pipeline orchestrator.

use eyre::Result;
use taggen_schema::{ParseResult, TypeDefinition};

use super::{
    CompilationContext, Phase, Plugin,
    phases::{AnalyzePhase, ValidatePhase},
};

/// Runs the built-in phases, then any added ones, with plugin hooks around
/// each.
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::with_output_dir(".taggen/debug"))
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(parsed, definition)?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Compile one validated definition.
    ///
    /// # Errors
    ///
    /// Returns an error if a phase fails fatally or a lint reports an error.
    pub fn run(&self, parsed: ParseResult, definition: TypeDefinition) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(parsed, definition);

        self.run_phase(&self.validate, &mut ctx)?;
        self.run_phase(&AnalyzePhase, &mut ctx)?;
        for phase in &self.phases {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use taggen_core::ImportConfig;
    use taggen_schema::parse_str;

    use super::*;
    use crate::pipeline::Diagnostic;

    struct RecordingPlugin {
        before: Arc<Mutex<Vec<String>>>,
        after: Arc<AtomicUsize>,
    }

    impl Plugin for RecordingPlugin {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn on_before_phase(&self, phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before.lock().unwrap().push(phase.to_string());
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct NotePhase;

    impl Phase for NotePhase {
        fn name(&self) -> &'static str {
            "note"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            let count = ctx.analysis()?.constructors.len();
            ctx.diagnostics
                .push(Diagnostic::info("note", format!("{} constructor(s)", count)));
            Ok(())
        }
    }

    fn parse(src: &str) -> (ParseResult, TypeDefinition) {
        let parsed = parse_str(src, &ImportConfig::default()).unwrap();
        let definition = parsed.validate().unwrap();
        (parsed, definition)
    }

    const SHAPE: &str = "export const Shape = {\n\
        kind: 'taggedSum',\n\
        variants: { Square: { side: 'Number' }, Circle: { radius: 'Number' } },\n\
    }\n";

    #[test]
    fn test_pipeline_populates_analysis() {
        let (parsed, definition) = parse(SHAPE);
        let ctx = Pipeline::new().run(parsed, definition).unwrap();

        assert_eq!(ctx.analysis().unwrap().constructors.len(), 2);
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_plugin_hooks_wrap_every_phase() {
        let before = Arc::new(Mutex::new(Vec::new()));
        let after = Arc::new(AtomicUsize::new(0));
        let plugin = RecordingPlugin {
            before: before.clone(),
            after: after.clone(),
        };

        let (parsed, definition) = parse(SHAPE);
        let ctx = Pipeline::new()
            .plugin(plugin)
            .phase(NotePhase)
            .run(parsed, definition)
            .unwrap();

        assert_eq!(*before.lock().unwrap(), vec!["validate", "analyze", "note"]);
        assert_eq!(after.load(Ordering::SeqCst), 3);
        assert_eq!(ctx.diagnostics[0].message, "2 constructor(s)");
    }
}

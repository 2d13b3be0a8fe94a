//! Analyze phase - computes shared data from the definition.

use eyre::Result;

use crate::{
    analysis::TypeAnalysis,
    pipeline::{CompilationContext, Phase},
};

pub struct AnalyzePhase;

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        ctx.analysis = Some(TypeAnalysis::new(&ctx.definition, &ctx.parsed.functions));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use taggen_core::ImportConfig;
    use taggen_schema::parse_str;

    use super::*;

    #[test]
    fn test_analyze_phase() {
        let parsed = parse_str(
            "export const Money = { kind: 'tagged', fields: { amount: 'Number', currency: /^[A-Z]{3}$/ } }\n",
            &ImportConfig::default(),
        )
        .unwrap();
        let definition = parsed.validate().unwrap();
        let mut ctx = CompilationContext::new(parsed, definition);

        AnalyzePhase.run(&mut ctx).unwrap();

        let analysis = ctx.analysis().unwrap();
        assert_eq!(analysis.type_name, "Money");
        assert_eq!(analysis.constructors[0].signature(), "Money(amount, currency)");
    }
}

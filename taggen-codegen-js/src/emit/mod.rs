//! JavaScript for validated type definitions.

mod fields;
mod imports;
mod tagged;
mod tagged_sum;

pub use imports::module_imports;
pub use tagged::emit_tagged;
pub use tagged_sum::emit_tagged_sum;
use taggen_codegen::{CodeFragment, Renderable, TypeAnalysis};
use taggen_core::EmitConfig;
use taggen_schema::{FunctionInfo, TypeDefinition};

use crate::code_file::RawCode;

/// Body sections for a definition, followed by one section per attached
/// helper function.
pub fn emit(
    definition: &TypeDefinition,
    analysis: &TypeAnalysis,
    functions: &[FunctionInfo],
    config: &EmitConfig,
) -> Vec<Vec<CodeFragment>> {
    let constructors = analysis
        .constructors
        .iter()
        .zip(definition.field_maps().into_iter().map(|(_, fields)| fields));

    let mut sections = match definition {
        TypeDefinition::Tagged { .. } => constructors
            .flat_map(|(constructor, fields)| emit_tagged(constructor, fields))
            .collect(),
        TypeDefinition::TaggedSum { .. } => emit_tagged_sum(analysis, constructors, config.firestore),
    };

    sections.extend(functions.iter().map(|function| {
        RawCode::new(format!(
            "{}.{} = {}",
            function.type_name, function.function_name, function.source_code
        ))
        .to_fragments()
    }));
    sections
}

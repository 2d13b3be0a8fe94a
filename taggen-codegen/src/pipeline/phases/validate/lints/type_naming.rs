//! Lint for type, variant and referenced type naming conventions.

use taggen_core::{is_pascal_case, to_pascal_case};
use taggen_schema::{FunctionInfo, TypeDefinition};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Warns about type, variant and referenced type names that aren't
/// PascalCase.
///
/// Generated constructors are called like classes (`Coord(1, 2)`,
/// `Shape.Square(...)`), and the barrel file finds modules by the kebab-case
/// form of the type name.
pub struct TypeNamingLint;

impl Lint for TypeNamingLint {
    fn name(&self) -> &'static str {
        "type-naming"
    }

    fn check(
        &self,
        definition: &TypeDefinition,
        _functions: &[FunctionInfo],
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let type_name = definition.name();
        check_name("type", type_name, type_name.to_string(), diagnostics);

        if let TypeDefinition::TaggedSum { variants, .. } = definition {
            for variant in variants.keys() {
                let location = format!("{}.variants.{}", type_name, variant);
                check_name("variant", variant, location, diagnostics);
            }
        }

        let is_sum = matches!(definition, TypeDefinition::TaggedSum { .. });
        for (owner, fields) in definition.field_maps() {
            for (field, field_type) in fields {
                let Some(referenced) = field_type.kind.referenced_type() else {
                    continue;
                };
                let location = if is_sum {
                    format!("{}.variants.{}.{}", type_name, owner, field)
                } else {
                    format!("{}.fields.{}", owner, field)
                };
                check_name("referenced type", referenced, location, diagnostics);
            }
        }
    }
}

fn check_name(kind: &str, name: &str, location: String, diagnostics: &mut Vec<Diagnostic>) {
    if is_pascal_case(name) {
        return;
    }
    diagnostics.push(
        Diagnostic::warning(
            "validate",
            format!(
                "{} name '{}' should be PascalCase (e.g., '{}')",
                kind,
                name,
                to_pascal_case(name)
            ),
        )
        .at(location),
    );
}

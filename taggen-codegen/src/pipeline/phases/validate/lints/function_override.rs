//! Lint for helper functions that replace generated statics.

use taggen_schema::{FunctionInfo, TypeDefinition};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Statics of a generated tagged constructor. `name` and `length` are
/// read-only on functions, so assigning them throws in module code.
const TAGGED_STATICS: &[&str] = &[
    "prototype",
    "toString",
    "is",
    "from",
    "_from",
    "name",
    "length",
];

/// Statics of a generated sum type object.
const SUM_STATICS: &[&str] = &[
    "prototype",
    "toString",
    "is",
    "from",
    "_toFirestore",
    "_fromFirestore",
];

/// Warns when a helper attached in the definition file replaces something
/// the generator emits, such as `Coord.from` or a variant constructor.
pub struct FunctionOverrideLint;

impl Lint for FunctionOverrideLint {
    fn name(&self) -> &'static str {
        "function-override"
    }

    fn check(
        &self,
        definition: &TypeDefinition,
        functions: &[FunctionInfo],
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for function in functions {
            let name = function.function_name.as_str();
            let replaces = match definition {
                TypeDefinition::Tagged { .. } => {
                    TAGGED_STATICS.contains(&name).then_some("generated static")
                }
                TypeDefinition::TaggedSum { variants, .. } => {
                    if variants.contains_key(name) {
                        Some("variant constructor")
                    } else {
                        SUM_STATICS.contains(&name).then_some("generated static")
                    }
                }
            };

            if let Some(what) = replaces {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "{}.{} replaces the {} of the same name",
                            function.type_name, name, what
                        ),
                    )
                    .at(format!("{}.{}", function.type_name, name)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use taggen_core::ImportConfig;
    use taggen_schema::parse_str;

    use super::*;

    fn lint(src: &str) -> Vec<Diagnostic> {
        let parsed = parse_str(src, &ImportConfig::default()).unwrap();
        let definition = parsed.validate().unwrap();
        let mut diagnostics = Vec::new();
        FunctionOverrideLint.check(&definition, &parsed.functions, &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_tagged_from_override() {
        let diagnostics = lint(
            "export const Coord = { kind: 'tagged', fields: { x: 'Number' } }\n\
             Coord.from = o => Coord(o.x)\n\
             Coord.double = c => Coord(c.x * 2)\n",
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Coord.from replaces the generated static of the same name"
        );
    }

    #[test]
    fn test_function_named_after_variant() {
        let diagnostics = lint(
            "export const Shape = { kind: 'taggedSum', variants: { Square: { side: 'Number' } } }\n\
             Shape.Square = side => side\n",
        );

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("variant constructor"));
        assert_eq!(diagnostics[0].location.as_deref(), Some("Shape.Square"));
    }

    #[test]
    fn test_name_is_read_only_on_constructors() {
        let diagnostics = lint(
            "export const Coord = { kind: 'tagged', fields: {} }\nCoord.name = () => 'coord'\n",
        );
        assert_eq!(diagnostics.len(), 1);
    }
}

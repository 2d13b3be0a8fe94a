//! Lint for fields that hide generated instance members.

use taggen_schema::{FunctionInfo, TypeDefinition};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Members every generated instance inherits from its prototype.
const INSTANCE_MEMBERS: &[&str] = &["toString", "toJSON", "constructor", "__proto__"];

/// Warns when a field is named after a generated instance member.
///
/// Fields are stored as own properties, so such a field hides the inherited
/// member on every instance (`match` only matters for sum types).
pub struct FieldShadowingLint;

impl Lint for FieldShadowingLint {
    fn name(&self) -> &'static str {
        "field-shadowing"
    }

    fn check(
        &self,
        definition: &TypeDefinition,
        _functions: &[FunctionInfo],
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let is_sum = matches!(definition, TypeDefinition::TaggedSum { .. });

        for (owner, fields) in definition.field_maps() {
            let prefix = if is_sum {
                format!("{}.variants.{}", definition.name(), owner)
            } else {
                format!("{}.fields", owner)
            };

            for field in fields.keys() {
                let shadows =
                    INSTANCE_MEMBERS.contains(&field.as_str()) || (is_sum && field == "match");
                if shadows {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!(
                                "field '{}' of {} hides the generated '{}' member of its instances",
                                field, owner, field
                            ),
                        )
                        .at(format!("{}.{}", prefix, field)),
                    );
                }
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
        FieldShadowingLint.check(&definition, &parsed.functions, &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_tagged_field_named_to_string() {
        let diagnostics = lint(
            "export const Label = { kind: 'tagged', fields: { toString: 'String', match: 'String' } }\n",
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].location.as_deref(),
            Some("Label.fields.toString")
        );
    }

    #[test]
    fn test_match_field_in_sum_variant() {
        let diagnostics = lint(
            "export const Rule = { kind: 'taggedSum', variants: { Exact: { match: 'String' }, Any: {} } }\n",
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].location.as_deref(),
            Some("Rule.variants.Exact.match")
        );
        assert!(diagnostics[0].message.contains("'match'"));
    }

    #[test]
    fn test_ordinary_fields_pass() {
        let diagnostics =
            lint("export const Coord = { kind: 'tagged', fields: { x: 'Number', y: 'Number' } }\n");
        assert!(diagnostics.is_empty());
    }
}

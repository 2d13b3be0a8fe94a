//! Per-field pieces of constructors: validation calls, instance
//! assignments, `from` arguments and the `toString` template.

use taggen_codegen::{CodeFragment, ConstructorInfo};
use taggen_schema::{Element, FieldKind, FieldMap, FieldType, Primitive};

use crate::{naming::js_string, runtime::Helper};

/// The validator call for one field, or `None` for `Any`.
pub fn validation(name: &str, field: &FieldType) -> Option<String> {
    let optional = field.optional;
    let field_name = js_string(name);
    let line = match &field.kind {
        FieldKind::Primitive { primitive } => {
            let helper = match primitive {
                Primitive::String => Helper::String,
                Primitive::Number => Helper::Number,
                Primitive::Boolean => Helper::Boolean,
                Primitive::Object => Helper::Object,
                Primitive::Any => return None,
            };
            format!(
                "{}(constructorName, {}, {}, {})",
                helper.name(),
                field_name,
                optional,
                name
            )
        }
        FieldKind::Pattern { pattern } => format!(
            "{}(constructorName, {}, {}, {}, {})",
            Helper::Regex.name(),
            field_name,
            optional,
            pattern,
            name
        ),
        FieldKind::Array { depth, element } => {
            let leaf = match element {
                Element::Primitive(primitive) => js_string(primitive.as_str()),
                Element::Reference(type_name) => type_name.clone(),
            };
            format!(
                "{}(constructorName, {}, {}, {}, {}, {})",
                Helper::Array.name(),
                field_name,
                optional,
                depth,
                leaf,
                name
            )
        }
        FieldKind::Reference { name: type_name } => format!(
            "{}(constructorName, {}, {}, {}, {})",
            Helper::Tag.name(),
            field_name,
            optional,
            type_name,
            name
        ),
    };
    Some(line)
}

/// Expression reading a field out of a plain object `o` in `from`.
/// Fields holding other generated types are hydrated.
pub fn from_argument(name: &str, field: &FieldType) -> String {
    let read = format!("o.{}", name);
    match &field.kind {
        FieldKind::Reference { name: type_name } => {
            format!("{}({}, 0, {})", Helper::Hydrate.name(), type_name, read)
        }
        FieldKind::Array {
            depth,
            element: Element::Reference(type_name),
        } => format!("{}({}, {}, {})", Helper::Hydrate.name(), type_name, depth, read),
        _ => read,
    }
}

/// Body of a validating constructor that builds its instance from
/// `prototype`.
pub fn constructor_body(
    constructor: &ConstructorInfo,
    fields: &FieldMap,
    prototype: &str,
) -> Vec<CodeFragment> {
    let mut checks = Vec::new();
    if constructor.checks_arity() {
        checks.push(CodeFragment::line(format!(
            "{}(constructorName, {}, arguments)",
            Helper::ArgumentCount.name(),
            fields.len()
        )));
    }
    checks.extend(
        fields
            .iter()
            .filter_map(|(name, field)| validation(name, field))
            .map(CodeFragment::line),
    );

    let mut body = Vec::new();
    if !checks.is_empty() {
        body.push(CodeFragment::line(format!(
            "const constructorName = {}",
            js_string(&constructor.signature())
        )));
        body.extend(checks);
        body.push(CodeFragment::blank());
    }

    body.push(CodeFragment::line(format!(
        "const result = Object.create({})",
        prototype
    )));
    for (name, field) in fields {
        let assign = format!("result.{0} = {0}", name);
        body.push(CodeFragment::line(if field.optional {
            format!("if ({} != null) {}", name, assign)
        } else {
            assign
        }));
    }
    body.push(CodeFragment::line("return result"));
    body
}

/// `return \`Shape.Square(${_toString(this.topLeft)}, ...)\``
pub fn to_string_return(constructor: &ConstructorInfo) -> String {
    let args = constructor
        .fields
        .iter()
        .map(|name| format!("${{{}(this.{})}}", Helper::ToString.name(), name))
        .collect::<Vec<_>>()
        .join(", ");
    format!("return `{}({})`", constructor.qualified_name, args)
}

/// `o => Coord(o.x, _hydrate(Money, 0, o.price))`
pub fn from_call(constructor: &ConstructorInfo, fields: &FieldMap) -> String {
    let args = fields
        .iter()
        .map(|(name, field)| from_argument(name, field))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", constructor.qualified_name, args)
}

#[cfg(test)]
mod tests {
    use taggen_schema::{Pattern, RegexLiteral, SymbolicRef};

    use super::*;

    fn field(kind: FieldKind, optional: bool) -> FieldType {
        FieldType { kind, optional }
    }

    #[test]
    fn test_primitive_validation() {
        let f = field(
            FieldKind::Primitive {
                primitive: Primitive::Number,
            },
            false,
        );
        assert_eq!(
            validation("x", &f).unwrap(),
            "validateNumber(constructorName, 'x', false, x)"
        );
    }

    #[test]
    fn test_any_is_not_validated() {
        let f = field(
            FieldKind::Primitive {
                primitive: Primitive::Any,
            },
            false,
        );
        assert!(validation("payload", &f).is_none());
    }

    #[test]
    fn test_pattern_validation() {
        let literal = field(
            FieldKind::Pattern {
                pattern: Pattern::Literal(RegexLiteral::new("^[a-z]+$", "i")),
            },
            true,
        );
        assert_eq!(
            validation("slug", &literal).unwrap(),
            "validateRegex(constructorName, 'slug', true, /^[a-z]+$/i, slug)"
        );

        let symbolic = field(
            FieldKind::Pattern {
                pattern: Pattern::Symbolic(SymbolicRef {
                    object: "FieldTypes".to_string(),
                    property: "accountId".to_string(),
                }),
            },
            false,
        );
        assert_eq!(
            validation("id", &symbolic).unwrap(),
            "validateRegex(constructorName, 'id', false, FieldTypes.accountId, id)"
        );
    }

    #[test]
    fn test_array_validation_and_hydration() {
        let numbers = field(
            FieldKind::Array {
                depth: 2,
                element: Element::Primitive(Primitive::Number),
            },
            false,
        );
        assert_eq!(
            validation("grid", &numbers).unwrap(),
            "validateArray(constructorName, 'grid', false, 2, 'Number', grid)"
        );
        assert_eq!(from_argument("grid", &numbers), "o.grid");

        let coords = field(
            FieldKind::Array {
                depth: 1,
                element: Element::Reference("Coord".to_string()),
            },
            true,
        );
        assert_eq!(
            validation("points", &coords).unwrap(),
            "validateArray(constructorName, 'points', true, 1, Coord, points)"
        );
        assert_eq!(from_argument("points", &coords), "_hydrate(Coord, 1, o.points)");
    }

    #[test]
    fn test_reference_validation() {
        let f = field(
            FieldKind::Reference {
                name: "Coord".to_string(),
            },
            false,
        );
        assert_eq!(
            validation("centre", &f).unwrap(),
            "validateTag(constructorName, 'centre', false, Coord, centre)"
        );
        assert_eq!(from_argument("centre", &f), "_hydrate(Coord, 0, o.centre)");
    }
}

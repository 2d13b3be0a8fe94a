//! Validation of raw definitions into [`TypeDefinition`]s.

use indexmap::IndexMap;
use miette::SourceSpan;

use crate::{
    Error, Result,
    definition::{Element, FieldKind, FieldMap, FieldType, Pattern, Primitive, TypeDefinition},
    error::SourceContext,
    parse::RawDefinition,
    value::Value,
};

/// Validation context that carries source information and the path through
/// the definition being validated.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(&source);
/// let fields = ctx.push("Coord").push("fields");
/// return Err(fields.error_at("x", "unknown type"));
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: &'a SourceContext,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            source,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: self.source,
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Find the span of a name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Error located at `name`, reported under this context's path.
    pub fn error_at(&self, name: &str, message: impl Into<String>) -> Box<Error> {
        self.source
            .validation_error(self.path_string(), message, self.find_span(name))
    }

    /// Validate that a name can be used as a JavaScript binding.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_reserved_word(name) {
            return Err(self.error_at(
                name,
                format!("{kind} name '{name}' is a JavaScript reserved word"),
            ));
        }
        if let Some(reason) = validate_identifier(name) {
            return Err(self.error_at(name, format!("invalid {kind} name '{name}': {reason}")));
        }
        Ok(())
    }
}

/// Validate a raw definition.
pub fn validate(raw: &RawDefinition, source: &SourceContext) -> Result<TypeDefinition> {
    let props = &raw.properties;
    let root = ParseContext::new(source);

    let name = match props.get("name") {
        None => raw.export_name.as_str(),
        Some(Value::String(name)) if !name.is_empty() => name.as_str(),
        Some(other) => {
            return Err(root.push(&raw.export_name).push("name").error_at(
                "name",
                format!("expected a non-empty string, found {}", other.describe()),
            ));
        }
    };
    let ctx = root.push(name);
    ctx.validate_name(name, "type")?;

    match props.get("kind") {
        Some(Value::String(kind)) if kind == "tagged" => {
            let fields = require_object(&ctx, props, "fields")?;
            let fields = validate_field_map(&ctx.push("fields"), fields)?;
            Ok(TypeDefinition::Tagged {
                name: name.to_string(),
                fields,
            })
        }
        Some(Value::String(kind)) if kind == "taggedSum" => {
            let variants_ctx = ctx.push("variants");
            let raw_variants = require_object(&ctx, props, "variants")?;
            if raw_variants.is_empty() {
                return Err(variants_ctx.error_at(
                    "variants",
                    "a sum type needs at least one variant",
                ));
            }

            let mut variants = IndexMap::new();
            for (variant, value) in raw_variants {
                variants_ctx.validate_name(variant, "variant")?;
                if SUM_TYPE_MEMBERS.contains(&variant.as_str()) {
                    return Err(variants_ctx.error_at(
                        variant,
                        format!("variant name '{variant}' collides with a member of the sum type"),
                    ));
                }
                let variant_ctx = variants_ctx.push(variant);
                let Some(fields) = value.as_object() else {
                    return Err(variant_ctx.error_at(
                        variant,
                        format!("expected an object of fields, found {}", value.describe()),
                    ));
                };
                variants.insert(variant.clone(), validate_field_map(&variant_ctx, fields)?);
            }

            Ok(TypeDefinition::TaggedSum {
                name: name.to_string(),
                variants,
            })
        }
        Some(other) => Err(ctx.push("kind").error_at(
            "kind",
            format!("expected 'tagged' or 'taggedSum', found {}", other.describe()),
        )),
        None => Err(ctx.push("kind").error_at(
            name,
            "missing kind, expected 'tagged' or 'taggedSum'",
        )),
    }
}

/// Names a sum type object defines itself.
const SUM_TYPE_MEMBERS: &[&str] = &[
    "is",
    "from",
    "toString",
    "prototype",
    "_from",
    "_toFirestore",
    "_fromFirestore",
];

fn require_object<'v>(
    ctx: &ParseContext<'_>,
    props: &'v IndexMap<String, Value>,
    key: &str,
) -> Result<&'v IndexMap<String, Value>> {
    match props.get(key) {
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(ctx.push(key).error_at(
            key,
            format!("expected an object, found {}", other.describe()),
        )),
        None => Err(ctx.push(key).error_at(key, format!("missing {key} object"))),
    }
}

fn validate_field_map(ctx: &ParseContext<'_>, raw: &IndexMap<String, Value>) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    for (name, value) in raw {
        ctx.validate_name(name, "field")?;
        let field = field_type(value)
            .map_err(|message| ctx.push(name).error_at(name, message))?;
        fields.insert(name.clone(), field);
    }
    Ok(fields)
}

/// Interpret one field type value.
fn field_type(value: &Value) -> std::result::Result<FieldType, String> {
    match value {
        Value::String(text) | Value::Identifier(text) => parse_type_string(text),
        Value::Regex(re) => Ok(FieldType::required(FieldKind::Pattern {
            pattern: Pattern::Literal(re.clone()),
        })),
        Value::Symbolic(sym) => Ok(FieldType::required(FieldKind::Pattern {
            pattern: Pattern::Symbolic(sym.clone()),
        })),
        Value::Object(map) => object_field_type(map),
        other => Err(format!(
            "expected a type name, regular expression or type definition, found {}",
            other.describe()
        )),
    }
}

fn object_field_type(map: &IndexMap<String, Value>) -> std::result::Result<FieldType, String> {
    // An imported definition used as a field type.
    if map.contains_key("kind")
        && let Some(Value::String(name)) = map.get("name")
    {
        return Ok(FieldType::required(FieldKind::Reference { name: name.clone() }));
    }

    let optional = match map.get("optional") {
        None => false,
        Some(Value::Bool(optional)) => *optional,
        Some(other) => {
            return Err(format!(
                "expected 'optional' to be a boolean, found {}",
                other.describe()
            ));
        }
    };

    let mut field = match (map.get("pattern"), map.get("type")) {
        (Some(Value::Regex(re)), None) => FieldType::required(FieldKind::Pattern {
            pattern: Pattern::Literal(re.clone()),
        }),
        (Some(Value::Symbolic(sym)), None) => FieldType::required(FieldKind::Pattern {
            pattern: Pattern::Symbolic(sym.clone()),
        }),
        (Some(other), None) => {
            return Err(format!(
                "expected 'pattern' to be a regular expression, found {}",
                other.describe()
            ));
        }
        (None, Some(Value::String(text))) => parse_type_string(text)?,
        (None, Some(other)) => {
            return Err(format!(
                "expected 'type' to be a type name, found {}",
                other.describe()
            ));
        }
        (Some(_), Some(_)) => return Err("give either 'pattern' or 'type', not both".to_string()),
        (None, None) => {
            return Err(
                "an object field type needs a 'pattern' or 'type', or must be a type definition"
                    .to_string(),
            );
        }
    };
    field.optional |= optional;
    Ok(field)
}

/// Parse `Name`, `Name?`, `[Name]`, `[[Name]]?` and so on.
pub fn parse_type_string(text: &str) -> std::result::Result<FieldType, String> {
    let (body, optional) = match text.strip_suffix('?') {
        Some(body) => (body, true),
        None => (text, false),
    };

    let depth = body.chars().take_while(|c| *c == '[').count();
    let closing = body.chars().rev().take_while(|c| *c == ']').count();
    if depth != closing {
        return Err(format!("unbalanced brackets in type '{text}'"));
    }
    let inner = &body[depth..body.len() - closing];
    if let Some(reason) = validate_identifier(inner) {
        return Err(format!("invalid type '{text}': {reason}"));
    }
    if let Some(primitive) = miscased_primitive(inner) {
        let suggestion = format!(
            "{}{}{}{}",
            &body[..depth],
            primitive.as_str(),
            &body[body.len() - closing..],
            if optional { "?" } else { "" }
        );
        return Err(format!("unknown type '{text}'; did you mean '{suggestion}'?"));
    }

    let kind = match (depth, Primitive::from_name(inner)) {
        (0, Some(primitive)) => FieldKind::Primitive { primitive },
        (0, None) => FieldKind::Reference {
            name: inner.to_string(),
        },
        (depth, Some(primitive)) => FieldKind::Array {
            depth,
            element: Element::Primitive(primitive),
        },
        (depth, None) => FieldKind::Array {
            depth,
            element: Element::Reference(inner.to_string()),
        },
    };
    Ok(FieldType { kind, optional })
}

/// A primitive spelled with the wrong case, such as `string`.
fn miscased_primitive(name: &str) -> Option<Primitive> {
    ["String", "Number", "Boolean", "Object", "Any"]
        .into_iter()
        .find(|primitive| *primitive != name && primitive.eq_ignore_ascii_case(name))
        .and_then(Primitive::from_name)
}

/// JavaScript reserved words, including strict-mode and module reservations.
pub(crate) const JS_RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
    // Not keywords, but cannot be rebound in strict code
    "arguments", "eval", "undefined",
];

pub(crate) fn is_reserved_word(name: &str) -> bool {
    JS_RESERVED_WORDS.contains(&name)
}

/// Find the span of a name in JavaScript source.
///
/// Prefers object keys (`name:`, `'name':`) and declarations over a bare
/// occurrence of the text.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    if name.is_empty() {
        return None;
    }

    let patterns = [
        (format!("{name}:"), 0),
        (format!("{name} :"), 0),
        (format!("'{name}'"), 1),
        (format!("\"{name}\""), 1),
        (format!("const {name} "), 6),
    ];
    for (pattern, offset) in &patterns {
        let mut from = 0;
        while let Some(pos) = src[from..].find(pattern.as_str()) {
            let start = from + pos;
            if *offset > 0 || !is_word_char_before(src, start) {
                return Some(SourceSpan::from((start + offset, name.len())));
            }
            from = start + pattern.len();
        }
    }

    src.find(name).map(|pos| SourceSpan::from((pos, name.len())))
}

fn is_word_char_before(src: &str, pos: usize) -> bool {
    src[..pos]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Check that a name is a plain JavaScript identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        Some(_) => return Some("name must start with a letter, underscore or dollar sign"),
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        return Some("name must contain only letters, digits, underscores and dollar signs");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{syntax::Span, value::RegexLiteral};

    fn raw(export_name: &str, properties: IndexMap<String, Value>) -> RawDefinition {
        RawDefinition {
            export_name: export_name.to_string(),
            properties,
            span: Span::default(),
        }
    }

    fn object(entries: Vec<(&str, Value)>) -> Value {
        Value::Object(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    fn string(s: &str) -> Value {
        Value::String(s.to_string())
    }

    fn tagged(fields: Vec<(&str, Value)>) -> IndexMap<String, Value> {
        let Value::Object(map) = object(vec![("kind", string("tagged")), ("fields", object(fields))])
        else {
            unreachable!()
        };
        map
    }

    fn source() -> SourceContext {
        SourceContext::new("export const Coord = {}", "coord.type.js")
    }

    fn validate_err(definition: &RawDefinition) -> String {
        validate(definition, &source()).unwrap_err().to_string()
    }

    #[test]
    fn test_parse_type_string() {
        let field = parse_type_string("Number").unwrap();
        assert_eq!(
            field,
            FieldType::required(FieldKind::Primitive {
                primitive: Primitive::Number
            })
        );

        let field = parse_type_string("[[Coord]]?").unwrap();
        assert!(field.optional);
        assert_eq!(
            field.kind,
            FieldKind::Array {
                depth: 2,
                element: Element::Reference("Coord".to_string())
            }
        );

        assert_eq!(
            parse_type_string("Shape").unwrap().kind,
            FieldKind::Reference {
                name: "Shape".to_string()
            }
        );
    }

    #[test]
    fn test_parse_type_string_errors() {
        assert!(parse_type_string("[Number").unwrap_err().contains("unbalanced"));
        assert!(parse_type_string("[]").unwrap_err().contains("empty"));
        assert!(parse_type_string("Num ber").is_err());
        assert!(parse_type_string("").is_err());
    }

    #[test]
    fn test_miscased_primitives_are_rejected() {
        let err = parse_type_string("string").unwrap_err();
        assert_eq!(err, "unknown type 'string'; did you mean 'String'?");

        let err = parse_type_string("[[number]]?").unwrap_err();
        assert!(err.contains("did you mean '[[Number]]?'"));

        assert!(matches!(
            parse_type_string("Strings").unwrap().kind,
            FieldKind::Reference { .. }
        ));
    }

    #[test]
    fn test_tagged_definition() {
        let definition = raw(
            "Coord",
            tagged(vec![
                ("x", string("Number")),
                ("id", Value::Regex(RegexLiteral::new("^\\d+$", ""))),
                ("label", string("String?")),
            ]),
        );
        let TypeDefinition::Tagged { name, fields } = validate(&definition, &source()).unwrap() else {
            panic!("expected tagged");
        };
        assert_eq!(name, "Coord");
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["x", "id", "label"]);
        assert!(fields["label"].optional);
        assert!(matches!(fields["id"].kind, FieldKind::Pattern { .. }));
    }

    #[test]
    fn test_explicit_name_wins() {
        let mut props = tagged(vec![("x", string("Number"))]);
        props.insert("name".to_string(), string("Point"));
        let definition = raw("Coord", props);
        assert_eq!(validate(&definition, &source()).unwrap().name(), "Point");
    }

    #[test]
    fn test_pattern_object_and_reference_object() {
        let coord = object(vec![("name", string("Coord")), ("kind", string("tagged"))]);
        let definition = raw(
            "Shape",
            tagged(vec![
                (
                    "id",
                    object(vec![
                        ("pattern", Value::Regex(RegexLiteral::new("^a", ""))),
                        ("optional", Value::Bool(true)),
                    ]),
                ),
                ("centre", coord),
            ]),
        );
        let TypeDefinition::Tagged { fields, .. } = validate(&definition, &source()).unwrap() else {
            panic!("expected tagged");
        };
        assert!(fields["id"].optional);
        assert_eq!(
            fields["centre"].kind,
            FieldKind::Reference {
                name: "Coord".to_string()
            }
        );
    }

    #[test]
    fn test_tagged_sum_definition() {
        let definition = raw(
            "Shape",
            [
                ("kind".to_string(), string("taggedSum")),
                (
                    "variants".to_string(),
                    object(vec![
                        ("Square", object(vec![("side", string("Number"))])),
                        ("Empty", object(vec![])),
                    ]),
                ),
            ]
            .into_iter()
            .collect(),
        );
        let TypeDefinition::TaggedSum { variants, .. } = validate(&definition, &source()).unwrap()
        else {
            panic!("expected taggedSum");
        };
        assert_eq!(variants.keys().collect::<Vec<_>>(), vec!["Square", "Empty"]);
        assert!(variants["Empty"].is_empty());
    }

    #[test]
    fn test_unknown_kind() {
        let definition = raw(
            "Coord",
            [("kind".to_string(), string("record"))].into_iter().collect(),
        );
        let message = validate_err(&definition);
        assert!(message.starts_with("Coord.kind:"), "{message}");
        assert!(message.contains("'record'"), "{message}");
    }

    #[test]
    fn test_missing_fields() {
        let definition = raw(
            "Coord",
            [("kind".to_string(), string("tagged"))].into_iter().collect(),
        );
        assert_eq!(validate_err(&definition), "Coord.fields: missing fields object");
    }

    #[test]
    fn test_empty_sum_is_rejected() {
        let definition = raw(
            "Shape",
            [
                ("kind".to_string(), string("taggedSum")),
                ("variants".to_string(), object(vec![])),
            ]
            .into_iter()
            .collect(),
        );
        assert!(validate_err(&definition).contains("at least one variant"));
    }

    #[test]
    fn test_invalid_field_type_names_the_path() {
        let definition = raw("Coord", tagged(vec![("x", Value::Number(1.0))]));
        let message = validate_err(&definition);
        assert!(message.starts_with("Coord.fields.x:"), "{message}");
        assert!(message.contains("the number 1"), "{message}");
    }

    #[test]
    fn test_reserved_field_name() {
        let definition = raw("Coord", tagged(vec![("class", string("String"))]));
        assert!(validate_err(&definition).contains("reserved word"));
    }

    #[test]
    fn test_variant_colliding_with_sum_members() {
        let definition = raw(
            "Shape",
            [
                ("kind".to_string(), string("taggedSum")),
                ("variants".to_string(), object(vec![("from", object(vec![]))])),
            ]
            .into_iter()
            .collect(),
        );
        assert!(validate_err(&definition).contains("collides"));
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("coord").is_none());
        assert!(validate_identifier("$ref").is_none());
        assert!(validate_identifier("_x1").is_none());
        assert!(validate_identifier("1x").is_some());
        assert!(validate_identifier("a-b").is_some());
        assert!(validate_identifier("").is_some());
    }

    #[test]
    fn test_find_name_span_prefers_keys() {
        let src = "const Coordinates = 1\nexport const Coord = {\n    fields: { x: 'Number' },\n}";
        let span = find_name_span(src, "x").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "x");
        assert_eq!(span.offset(), src.find("x:").unwrap());

        let span = find_name_span(src, "Coord").unwrap();
        assert_eq!(span.offset(), src.find("Coord =").unwrap());
    }

    #[test]
    fn test_parse_context_push() {
        let source = source();
        let ctx = ParseContext::new(&source);
        let nested = ctx.push("Shape").push("variants").push("Square");
        assert_eq!(nested.path_string(), "Shape.variants.Square");
    }
}

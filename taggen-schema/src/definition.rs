//! Validated type definitions.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::value::{RegexLiteral, SymbolicRef};

/// Ordered field name to field type mapping. Order is constructor parameter
/// order.
pub type FieldMap = IndexMap<String, FieldType>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeDefinition {
    /// A single-constructor record.
    Tagged { name: String, fields: FieldMap },
    /// A closed union of named variants.
    TaggedSum {
        name: String,
        variants: IndexMap<String, FieldMap>,
    },
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Tagged { name, .. } | TypeDefinition::TaggedSum { name, .. } => name,
        }
    }

    /// Every field map in the definition, with its owning constructor name.
    pub fn field_maps(&self) -> Vec<(&str, &FieldMap)> {
        match self {
            TypeDefinition::Tagged { name, fields } => vec![(name.as_str(), fields)],
            TypeDefinition::TaggedSum { variants, .. } => variants
                .iter()
                .map(|(variant, fields)| (variant.as_str(), fields))
                .collect(),
        }
    }

    /// Names of other types this definition's fields refer to, in first-use
    /// order, without duplicates.
    pub fn referenced_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (_, fields) in self.field_maps() {
            for field in fields.values() {
                if let Some(name) = field.kind.referenced_type()
                    && name != self.name()
                    && !names.contains(&name)
                {
                    names.push(name);
                }
            }
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldType {
    #[serde(flatten)]
    pub kind: FieldKind,
    pub optional: bool,
}

impl FieldType {
    pub fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            optional: false,
        }
    }

    pub fn optional(kind: FieldKind) -> Self {
        Self {
            kind,
            optional: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    Primitive { primitive: Primitive },
    Pattern { pattern: Pattern },
    /// `depth` levels of arrays around an element type.
    Array { depth: usize, element: Element },
    /// Another tagged or taggedSum type.
    Reference { name: String },
}

impl FieldKind {
    pub fn referenced_type(&self) -> Option<&str> {
        match self {
            FieldKind::Reference { name }
            | FieldKind::Array {
                element: Element::Reference(name),
                ..
            } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Object,
    Any,
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(Primitive::String),
            "Number" => Some(Primitive::Number),
            "Boolean" => Some(Primitive::Boolean),
            "Object" => Some(Primitive::Object),
            "Any" => Some(Primitive::Any),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "String",
            Primitive::Number => "Number",
            Primitive::Boolean => "Boolean",
            Primitive::Object => "Object",
            Primitive::Any => "Any",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Pattern {
    Literal(RegexLiteral),
    /// Kept as a reference to an imported constant.
    Symbolic(SymbolicRef),
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(re) => re.fmt(f),
            Pattern::Symbolic(sym) => sym.fmt(f),
        }
    }
}

/// Innermost element of an array field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Element {
    Primitive(Primitive),
    Reference(String),
}

impl Element {
    pub fn name(&self) -> &str {
        match self {
            Element::Primitive(p) => p.as_str(),
            Element::Reference(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(name: &str) -> FieldType {
        FieldType::required(FieldKind::Reference {
            name: name.to_string(),
        })
    }

    #[test]
    fn test_referenced_types_in_first_use_order() {
        let mut circle = FieldMap::new();
        circle.insert("centre".to_string(), reference("Coord"));
        circle.insert(
            "radius".to_string(),
            FieldType::required(FieldKind::Primitive {
                primitive: Primitive::Number,
            }),
        );
        let mut path = FieldMap::new();
        path.insert(
            "points".to_string(),
            FieldType::optional(FieldKind::Array {
                depth: 2,
                element: Element::Reference("Coord".to_string()),
            }),
        );
        path.insert("parent".to_string(), reference("Shape"));
        path.insert("style".to_string(), reference("Style"));

        let mut variants = IndexMap::new();
        variants.insert("Circle".to_string(), circle);
        variants.insert("Path".to_string(), path);
        let shape = TypeDefinition::TaggedSum {
            name: "Shape".to_string(),
            variants,
        };

        assert_eq!(shape.referenced_types(), vec!["Coord", "Style"]);
    }

    #[test]
    fn test_serializes_field_types() {
        let field = FieldType::optional(FieldKind::Array {
            depth: 1,
            element: Element::Primitive(Primitive::Number),
        });
        assert_eq!(
            serde_json::to_string(&field).unwrap(),
            r#"{"type":"array","depth":1,"element":{"primitive":"Number"},"optional":true}"#
        );
    }
}

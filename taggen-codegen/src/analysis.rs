//! Facts about a validated definition that emitters need more than once.

use std::collections::BTreeSet;

use serde::Serialize;
use taggen_schema::{FieldKind, FieldMap, FunctionInfo, Primitive, TypeDefinition};

/// A runtime check an emitted constructor performs on one field. Array
/// checks cover their element type themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Check {
    String,
    Number,
    Boolean,
    Object,
    Pattern,
    /// Membership in another generated type.
    Tag,
    Array,
}

impl Check {
    /// The check a field needs, if any. `Any` fields are never checked.
    pub fn for_field(kind: &FieldKind) -> Option<Self> {
        match kind {
            FieldKind::Primitive { primitive } => Self::for_primitive(*primitive),
            FieldKind::Pattern { .. } => Some(Check::Pattern),
            FieldKind::Array { .. } => Some(Check::Array),
            FieldKind::Reference { .. } => Some(Check::Tag),
        }
    }

    fn for_primitive(primitive: Primitive) -> Option<Self> {
        match primitive {
            Primitive::String => Some(Check::String),
            Primitive::Number => Some(Check::Number),
            Primitive::Boolean => Some(Check::Boolean),
            Primitive::Object => Some(Check::Object),
            Primitive::Any => None,
        }
    }
}

/// One constructor of a type: the type itself for `tagged`, each variant
/// for `taggedSum`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorInfo {
    /// `Coord`, or the variant name `Square`.
    pub name: String,
    /// `Coord`, or `Shape.Square`.
    pub qualified_name: String,
    pub fields: Vec<String>,
    /// Number of non-optional fields.
    pub required: usize,
}

impl ConstructorInfo {
    fn new(name: &str, qualified_name: String, fields: &FieldMap) -> Self {
        Self {
            name: name.to_string(),
            qualified_name,
            fields: fields.keys().cloned().collect(),
            required: fields.values().filter(|f| !f.optional).count(),
        }
    }

    /// Call signature used in runtime error messages: `Shape.Square(topLeft, bottomRight)`.
    pub fn signature(&self) -> String {
        format!("{}({})", self.qualified_name, self.fields.join(", "))
    }

    /// A variant without fields, emitted as a singleton.
    pub fn is_unit(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the emitted constructor enforces its argument count.
    pub fn checks_arity(&self) -> bool {
        self.required > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAnalysis {
    pub type_name: String,
    pub is_sum: bool,
    pub constructors: Vec<ConstructorInfo>,
    /// Other generated types named by fields, in first-use order.
    pub referenced_types: Vec<String>,
    /// Every runtime check some constructor performs.
    pub checks: BTreeSet<Check>,
    /// Whether `from` has to coerce plain objects into referenced types.
    pub hydrates: bool,
    /// Helper functions attached in the definition file, in source order.
    pub functions: Vec<String>,
}

impl TypeAnalysis {
    pub fn new(definition: &TypeDefinition, functions: &[FunctionInfo]) -> Self {
        let (is_sum, constructors) = match definition {
            TypeDefinition::Tagged { name, fields } => {
                (false, vec![ConstructorInfo::new(name, name.clone(), fields)])
            }
            TypeDefinition::TaggedSum { name, variants } => (
                true,
                variants
                    .iter()
                    .map(|(variant, fields)| {
                        ConstructorInfo::new(variant, format!("{}.{}", name, variant), fields)
                    })
                    .collect(),
            ),
        };

        let field_kinds = definition
            .field_maps()
            .into_iter()
            .flat_map(|(_, fields)| fields.values().map(|field| &field.kind));

        let mut checks = BTreeSet::new();
        let mut hydrates = false;
        for kind in field_kinds {
            if let Some(check) = Check::for_field(kind) {
                checks.insert(check);
            }
            hydrates |= kind.referenced_type().is_some();
        }

        let mut function_names: Vec<String> = Vec::new();
        for function in functions {
            if !function_names.contains(&function.function_name) {
                function_names.push(function.function_name.clone());
            }
        }

        Self {
            type_name: definition.name().to_string(),
            is_sum,
            referenced_types: definition
                .referenced_types()
                .into_iter()
                .map(str::to_string)
                .collect(),
            constructors,
            checks,
            hydrates,
            functions: function_names,
        }
    }

    /// Whether any constructor enforces its argument count.
    pub fn checks_arity(&self) -> bool {
        self.constructors.iter().any(ConstructorInfo::checks_arity)
    }

    pub fn uses(&self, check: Check) -> bool {
        self.checks.contains(&check)
    }

    pub fn constructor(&self, name: &str) -> Option<&ConstructorInfo> {
        self.constructors.iter().find(|c| c.name == name)
    }
}

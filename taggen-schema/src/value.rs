//! Resolved values of definition-file expressions.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// A regular expression literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegexLiteral {
    pub pattern: String,
    pub flags: String,
}

impl RegexLiteral {
    pub fn new(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            flags: flags.into(),
        }
    }
}

impl fmt::Display for RegexLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.flags)
    }
}

/// A member expression kept as written, e.g. `FieldTypes.accountId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolicRef {
    pub object: String,
    pub property: String,
}

impl fmt::Display for SymbolicRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.object, self.property)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
    Undefined,
    Regex(RegexLiteral),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
    Symbolic(SymbolicRef),
    /// A name that does not resolve to a value here, such as a type imported
    /// from a package or a function declared in the module.
    Identifier(String),
    /// Source text of an expression outside the understood subset.
    Opaque(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::String(s) => format!("the string '{s}'"),
            Value::Number(n) => format!("the number {}", format_number(*n)),
            Value::Bool(b) => format!("the boolean {b}"),
            Value::Null => "null".to_string(),
            Value::Undefined => "undefined".to_string(),
            Value::Regex(re) => format!("the regular expression {re}"),
            Value::Array(_) => "an array".to_string(),
            Value::Object(_) => "an object".to_string(),
            Value::Symbolic(sym) => format!("'{sym}'"),
            Value::Identifier(name) => format!("the identifier '{name}'"),
            Value::Opaque(text) => format!("the expression '{}'", abbreviate(text)),
        }
    }
}

/// Render a number the way JavaScript prints it for integral and simple
/// fractional values.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn abbreviate(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.len() < text.len() || line.chars().count() > 40 {
        let short: String = line.chars().take(40).collect();
        format!("{short}...")
    } else {
        line.to_string()
    }
}

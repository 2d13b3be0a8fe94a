//! JavaScript object literal builder.

use taggen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::{prefixed, suffixed};
use crate::naming::property_key;

/// A property in an object literal. The value is any rendered expression.
#[derive(Debug, Clone)]
struct Property {
    key: String,
    value: Vec<CodeFragment>,
}

/// Builder for object literals.
///
/// Keys that are not identifiers are quoted, so `'@@typeName'` can be
/// passed as is. An [inline](JsObject::inline) object with single-line
/// values renders on one line.
#[derive(Debug, Clone, Default)]
pub struct JsObject {
    properties: Vec<Property>,
    inline: bool,
}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render on one line when every value fits on one.
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    /// Add a property holding any renderable value: a nested object, a
    /// function, an arrow function.
    pub fn property(mut self, key: impl Into<String>, value: impl Renderable) -> Self {
        self.properties.push(Property {
            key: key.into(),
            value: value.to_fragments(),
        });
        self
    }

    /// Property descriptor `{ value: <value> }`, as passed to `Object.create`.
    pub fn descriptor(self, key: impl Into<String>, value: impl Renderable) -> Self {
        self.property(key, JsObject::new().inline().property("value", value))
    }

    /// Wrap the literal in a call: `Object.create(Proto, { ... })`.
    pub fn wrapped(&self, open: &str, close: &str) -> Vec<CodeFragment> {
        suffixed(prefixed(open, self.to_fragments()), close)
    }

    fn inline_text(&self) -> Option<String> {
        let parts = self
            .properties
            .iter()
            .map(|prop| match prop.value.as_slice() {
                [CodeFragment::Line(value)] => {
                    Some(format!("{}: {}", property_key(&prop.key), value))
                }
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Some(format!("{{ {} }}", parts.join(", ")))
    }

    /// Build the object as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::javascript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for JsObject {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.properties.is_empty() {
            return vec![CodeFragment::line("{}")];
        }
        if self.inline
            && let Some(text) = self.inline_text()
        {
            return vec![CodeFragment::line(text)];
        }

        let body = self
            .properties
            .iter()
            .flat_map(|prop| {
                let key = format!("{}: ", property_key(&prop.key));
                suffixed(prefixed(&key, prop.value.clone()), ",")
            })
            .collect();
        vec![CodeFragment::braced("{", body, "}")]
    }
}

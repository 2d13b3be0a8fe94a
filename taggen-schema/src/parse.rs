//! Parsing a `.type.js` file into a raw definition with its imports and
//! attached functions.

use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use indexmap::IndexMap;
use serde::Serialize;
use taggen_core::ImportConfig;

use crate::{
    Error, Result,
    ast::{Expr, ImportSpecifier},
    definition::TypeDefinition,
    error::SourceContext,
    resolve::{ModuleScope, Resolver},
    syntax::Span,
    validate::validate,
    value::Value,
};

/// One import declaration of the definition file, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportInfo {
    pub source: String,
    pub specifiers: Vec<ImportSpecifier>,
}

/// A function assigned onto the definition, e.g. `Coord.add = (a, b) => ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub type_name: String,
    pub function_name: String,
    /// Right-hand side verbatim.
    pub source_code: String,
}

/// The exported definition object, with every value resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDefinition {
    /// Name of the exported binding.
    pub export_name: String,
    pub properties: IndexMap<String, Value>,
    #[serde(skip)]
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub path: PathBuf,
    pub definition: RawDefinition,
    pub imports: Vec<ImportInfo>,
    pub functions: Vec<FunctionInfo>,
    #[serde(skip)]
    pub source: SourceContext,
}

impl ParseResult {
    /// Validate the raw definition against the file it came from.
    pub fn validate(&self) -> Result<TypeDefinition> {
        validate(&self.definition, &self.source)
    }
}

/// Parse a definition file from the given path
pub fn parse_file(path: impl AsRef<Path>, config: &ImportConfig) -> Result<ParseResult> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    parse_str_with_filename(&content, path, config)
}

/// Parse definition source (uses "definition.type.js" as default filename)
pub fn parse_str(content: &str, config: &ImportConfig) -> Result<ParseResult> {
    parse_str_with_filename(content, "definition.type.js", config)
}

/// Parse definition source with a path for error reporting. Relative imports
/// are resolved against the path's directory.
pub fn parse_str_with_filename(
    content: &str,
    path: impl AsRef<Path>,
    config: &ImportConfig,
) -> Result<ParseResult> {
    let path = path.as_ref();
    let source = SourceContext::new(content, path.display().to_string());
    let scope = Rc::new(ModuleScope::parse(path.to_path_buf(), source.clone())?);

    let candidates: Vec<_> = scope
        .module
        .bindings()
        .filter(|binding| binding.exported && matches!(binding.init, Some(Expr::Object(_))))
        .collect();
    let binding = match candidates.as_slice() {
        [] => return Err(source.missing_definition()),
        [binding] => *binding,
        [first, second, ..] => return Err(source.multiple_definitions(first.span, second.span)),
    };

    let mut resolver = Resolver::new(config);
    resolver.register(Rc::clone(&scope));
    let properties = match &binding.init {
        Some(init) => match resolver.resolve_expr(&scope, init)? {
            Value::Object(properties) => properties,
            _ => IndexMap::new(),
        },
        None => IndexMap::new(),
    };

    let imports = scope
        .module
        .imports()
        .map(|decl| ImportInfo {
            source: decl.source.clone(),
            specifiers: decl.specifiers.clone(),
        })
        .collect();

    let functions = scope
        .module
        .assignments()
        .filter(|assignment| assignment.object == binding.name && assignment.is_function)
        .map(|assignment| FunctionInfo {
            type_name: assignment.object.clone(),
            function_name: assignment.property.clone(),
            source_code: assignment.source.clone(),
        })
        .collect();

    Ok(ParseResult {
        path: path.to_path_buf(),
        definition: RawDefinition {
            export_name: binding.name.clone(),
            properties,
            span: binding.span,
        },
        imports,
        functions,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::ImportKind, definition::FieldKind};

    fn parse(src: &str) -> Result<ParseResult> {
        parse_str(src, &ImportConfig::default())
    }

    #[test]
    fn test_parse_tagged_file() {
        let result = parse(
            "import { FieldTypes } from '@graffio/types-generation'\n\
             import { Money } from '@app/money'\n\
             \n\
             // A position on the canvas\n\
             export const Coord = {\n\
                 kind: 'tagged',\n\
                 fields: { x: 'Number', y: 'Number', id: FieldTypes.coordId },\n\
             }\n\
             \n\
             Coord.add = (a, b) => Coord(a.x + b.x, a.y + b.y)\n\
             Coord.origin = Coord(0, 0, 'origin')\n",
        )
        .unwrap();

        assert_eq!(result.definition.export_name, "Coord");
        assert_eq!(result.imports.len(), 2);
        assert_eq!(result.imports[0].specifiers[0].kind, ImportKind::Named);
        assert_eq!(
            result.functions,
            vec![FunctionInfo {
                type_name: "Coord".to_string(),
                function_name: "add".to_string(),
                source_code: "(a, b) => Coord(a.x + b.x, a.y + b.y)".to_string(),
            }]
        );

        let TypeDefinition::Tagged { fields, .. } = result.validate().unwrap() else {
            panic!("expected tagged");
        };
        assert!(matches!(fields["id"].kind, FieldKind::Pattern { .. }));
    }

    #[test]
    fn test_missing_definition() {
        let err = parse("export const VERSION = 3\n").unwrap_err();
        assert!(matches!(*err, Error::MissingDefinition { .. }));
    }

    #[test]
    fn test_multiple_definitions() {
        let err = parse(
            "export const A = { kind: 'tagged', fields: {} }\nexport const B = { kind: 'tagged', fields: {} }\n",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::MultipleDefinitions { .. }));
    }

    #[test]
    fn test_unexported_objects_are_not_definitions() {
        let result = parse(
            "const shared = { x: 'Number' }\nexport const Coord = { kind: 'tagged', fields: shared }\n",
        )
        .unwrap();
        assert_eq!(result.definition.export_name, "Coord");
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_syntax_error_is_reported_with_filename() {
        let err = parse_str_with_filename(
            "export const Coord = { kind: 'tagged', ",
            "coord.type.js",
            &ImportConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Syntax { .. }));
    }

    #[test]
    fn test_lex_error() {
        let err = parse("export const Coord = { kind: 'tagged }\n").unwrap_err();
        assert!(matches!(*err, Error::Lex { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_file("does/not/exist.type.js", &ImportConfig::default()).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}

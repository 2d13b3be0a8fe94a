//! Turns definition-file expressions into [`Value`]s.
//!
//! Identifiers resolve against the module's own bindings first, then its
//! imports. Relative imports are loaded from disk, parsed, and resolved
//! through their exports; imports from packages are left as identifiers.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    rc::Rc,
};

use indexmap::IndexMap;
use taggen_core::ImportConfig;

use crate::{
    Result,
    ast::{Expr, ImportKind, Item, Module, Property},
    error::SourceContext,
    syntax::{Span, parse_module, tokenize},
    value::{RegexLiteral, SymbolicRef, Value},
};

/// What a name is bound to inside one module.
#[derive(Debug, Clone)]
enum Bound {
    Value(Option<Expr>),
    Import {
        source: String,
        kind: ImportKind,
        imported: String,
        span: Span,
    },
    /// A function or class declaration.
    Declared,
}

#[derive(Debug, Clone)]
enum Export {
    Local(String),
    Default(Expr),
    ReExport {
        source: String,
        imported: String,
        span: Span,
    },
    Namespace {
        source: String,
        span: Span,
    },
}

/// A parsed module with its binding and export tables.
#[derive(Debug)]
pub(crate) struct ModuleScope {
    pub(crate) path: PathBuf,
    pub(crate) context: SourceContext,
    pub(crate) module: Module,
    bindings: HashMap<String, Bound>,
    exports: IndexMap<String, Export>,
    star_exports: Vec<(String, Span)>,
}

impl ModuleScope {
    pub(crate) fn parse(path: PathBuf, context: SourceContext) -> Result<Self> {
        let tokens = tokenize(context.src()).map_err(|e| context.lex_error(e))?;
        let module = parse_module(context.src(), &tokens).map_err(|e| context.syntax_error(e))?;
        Ok(Self::new(path, context, module))
    }

    fn new(path: PathBuf, context: SourceContext, module: Module) -> Self {
        let mut bindings = HashMap::new();
        let mut exports = IndexMap::new();
        let mut star_exports = Vec::new();

        for item in &module.items {
            match item {
                Item::Import(decl) => {
                    for spec in &decl.specifiers {
                        bindings.insert(
                            spec.local_name.clone(),
                            Bound::Import {
                                source: decl.source.clone(),
                                kind: spec.kind,
                                imported: spec.imported_name.clone(),
                                span: decl.span,
                            },
                        );
                    }
                }
                Item::Binding(binding) => {
                    bindings.insert(binding.name.clone(), Bound::Value(binding.init.clone()));
                    if binding.exported {
                        exports.insert(binding.name.clone(), Export::Local(binding.name.clone()));
                    }
                }
                Item::Declaration { name, exported } => {
                    bindings.insert(name.clone(), Bound::Declared);
                    if *exported {
                        exports.insert(name.clone(), Export::Local(name.clone()));
                    }
                }
                Item::ExportList {
                    specifiers,
                    source,
                    span,
                } => {
                    for spec in specifiers {
                        let export = match source {
                            Some(source) => Export::ReExport {
                                source: source.clone(),
                                imported: spec.local.clone(),
                                span: *span,
                            },
                            None => Export::Local(spec.local.clone()),
                        };
                        exports.insert(spec.exported.clone(), export);
                    }
                }
                Item::ExportAll {
                    source,
                    alias: Some(alias),
                    span,
                } => {
                    exports.insert(
                        alias.clone(),
                        Export::Namespace {
                            source: source.clone(),
                            span: *span,
                        },
                    );
                }
                Item::ExportAll {
                    source,
                    alias: None,
                    span,
                } => star_exports.push((source.clone(), *span)),
                Item::ExportDefault(expr) => {
                    exports.insert("default".to_string(), Export::Default(expr.clone()));
                }
                Item::Assignment(_) => {}
            }
        }

        Self {
            path,
            context,
            module,
            bindings,
            exports,
            star_exports,
        }
    }

    fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

pub(crate) struct Resolver<'c> {
    config: &'c ImportConfig,
    modules: HashMap<PathBuf, Rc<ModuleScope>>,
    /// Names currently being resolved, per module. Re-entering one means the
    /// modules reference each other, and the name is left as an identifier.
    active: HashSet<(PathBuf, String)>,
}

impl<'c> Resolver<'c> {
    pub(crate) fn new(config: &'c ImportConfig) -> Self {
        Self {
            config,
            modules: HashMap::new(),
            active: HashSet::new(),
        }
    }

    /// Make an already parsed module available to imports that point at it.
    pub(crate) fn register(&mut self, scope: Rc<ModuleScope>) {
        let key = cache_key(&scope.path);
        self.modules.insert(key, scope);
    }

    pub(crate) fn resolve_expr(&mut self, scope: &Rc<ModuleScope>, expr: &Expr) -> Result<Value> {
        Ok(match expr {
            Expr::Str(s) => Value::String(s.clone()),
            Expr::Num(n) => Value::Number(*n),
            Expr::Bool(b) => Value::Bool(*b),
            Expr::Null => Value::Null,
            Expr::Undefined => Value::Undefined,
            Expr::Regex { pattern, flags } => Value::Regex(RegexLiteral::new(pattern, flags)),
            Expr::Ident { name, .. } => self.resolve_name(scope, name)?,
            Expr::Member {
                object,
                property,
                span,
            } => {
                if let Expr::Ident { name, .. } = object.as_ref()
                    && self.config.is_symbolic(name)
                {
                    return Ok(Value::Symbolic(SymbolicRef {
                        object: name.clone(),
                        property: property.clone(),
                    }));
                }
                match self.resolve_expr(scope, object)? {
                    Value::Object(mut map) => map.shift_remove(property).unwrap_or(Value::Undefined),
                    _ => {
                        let context = &scope.context;
                        return Err(context.unresolvable_member(
                            context.slice(*span),
                            root_name(object),
                            *span,
                        ));
                    }
                }
            }
            Expr::Object(properties) => {
                let mut map = IndexMap::new();
                let mut explicit = HashSet::new();
                for property in properties {
                    match property {
                        Property::KeyValue { key, value, span } => {
                            if !explicit.insert(key.as_str()) {
                                return Err(scope.context.duplicate_key(key, *span));
                            }
                            let value = self.resolve_expr(scope, value)?;
                            map.insert(key.clone(), value);
                        }
                        Property::Spread(inner) => {
                            if let Value::Object(entries) = self.resolve_expr(scope, inner)? {
                                map.extend(entries);
                            }
                        }
                        Property::Opaque(_) => {}
                    }
                }
                Value::Object(map)
            }
            Expr::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.resolve_expr(scope, item))
                    .collect::<Result<_>>()?,
            ),
            Expr::Opaque(text) => Value::Opaque(text.clone()),
        })
    }

    fn resolve_name(&mut self, scope: &Rc<ModuleScope>, name: &str) -> Result<Value> {
        let Some(bound) = scope.bindings.get(name) else {
            return Ok(Value::Identifier(name.to_string()));
        };
        let key = (scope.path.clone(), name.to_string());
        if !self.active.insert(key.clone()) {
            return Ok(Value::Identifier(name.to_string()));
        }

        let result = match bound {
            Bound::Value(Some(expr)) => self.resolve_expr(scope, expr),
            Bound::Value(None) => Ok(Value::Undefined),
            Bound::Declared => Ok(Value::Identifier(name.to_string())),
            Bound::Import {
                source,
                kind,
                imported,
                span,
            } => self.resolve_import(scope, name, source, *kind, imported, *span),
        };

        self.active.remove(&key);
        result
    }

    fn resolve_import(
        &mut self,
        scope: &Rc<ModuleScope>,
        local: &str,
        source: &str,
        kind: ImportKind,
        imported: &str,
        span: Span,
    ) -> Result<Value> {
        if !is_relative(source) {
            return Ok(Value::Identifier(local.to_string()));
        }

        let target = self.load(scope, source, span)?;
        let value = match kind {
            ImportKind::Namespace => self.namespace(&target)?,
            ImportKind::Default | ImportKind::Named => self
                .resolve_export(&target, imported)?
                .ok_or_else(|| scope.context.missing_export(source, imported, span))?,
        };

        // Pass-through names are referred to by their local binding here.
        Ok(match value {
            Value::Identifier(_) => Value::Identifier(local.to_string()),
            other => other,
        })
    }

    fn resolve_export(&mut self, target: &Rc<ModuleScope>, name: &str) -> Result<Option<Value>> {
        let key = (target.path.clone(), format!("export {name}"));
        if !self.active.insert(key.clone()) {
            return Ok(None);
        }
        let result = self.find_export(target, name);
        self.active.remove(&key);

        Ok(result?.map(|value| name_definition(value, name)))
    }

    fn find_export(&mut self, target: &Rc<ModuleScope>, name: &str) -> Result<Option<Value>> {
        let Some(export) = target.exports.get(name) else {
            for (source, span) in &target.star_exports {
                let module = self.load(target, source, *span)?;
                if let Some(value) = self.resolve_export(&module, name)? {
                    return Ok(Some(value));
                }
            }
            return Ok(None);
        };

        let value = match export {
            Export::Local(local) => self.resolve_name(target, local)?,
            Export::Default(expr) => self.resolve_expr(target, expr)?,
            Export::ReExport {
                source,
                imported,
                span,
            } => {
                let module = self.load(target, source, *span)?;
                self.resolve_export(&module, imported)?
                    .ok_or_else(|| target.context.missing_export(source, imported, *span))?
            }
            Export::Namespace { source, span } => {
                let module = self.load(target, source, *span)?;
                self.namespace(&module)?
            }
        };
        Ok(Some(value))
    }

    /// All exports of a module as one object, for `import * as ns`.
    fn namespace(&mut self, target: &Rc<ModuleScope>) -> Result<Value> {
        let mut map = IndexMap::new();
        for name in target.exports.keys() {
            if let Some(value) = self.resolve_export(target, name)? {
                map.insert(name.clone(), value);
            }
        }
        for (source, span) in &target.star_exports {
            let module = self.load(target, source, *span)?;
            if let Value::Object(entries) = self.namespace(&module)? {
                for (name, value) in entries {
                    if name != "default" && !map.contains_key(&name) {
                        map.insert(name, value);
                    }
                }
            }
        }
        Ok(Value::Object(map))
    }

    fn load(&mut self, from: &ModuleScope, source: &str, span: Span) -> Result<Rc<ModuleScope>> {
        let mut path = from.directory().join(source);
        if path.extension().is_none() && !path.is_file() {
            path.set_extension("js");
        }
        let key = cache_key(&path);
        if let Some(scope) = self.modules.get(&key) {
            return Ok(Rc::clone(scope));
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| from.context.unresolved_import(source, span, e))?;
        let context = SourceContext::new(content, path.display().to_string());
        let scope = Rc::new(ModuleScope::parse(path, context)?);
        self.modules.insert(key, Rc::clone(&scope));
        Ok(scope)
    }
}

fn cache_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Whether an import source names a file rather than a package.
pub(crate) fn is_relative(source: &str) -> bool {
    source.starts_with("./")
        || source.starts_with("../")
        || source.starts_with('/')
        || source == "."
        || source == ".."
}

/// Definitions written without a `name` take the name they are exported as.
fn name_definition(value: Value, export_name: &str) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("kind") && !map.contains_key("name") => {
            map.insert("name".to_string(), Value::String(export_name.to_string()));
            Value::Object(map)
        }
        other => other,
    }
}

fn root_name(expr: &Expr) -> String {
    match expr {
        Expr::Ident { name, .. } => name.clone(),
        Expr::Member { object, .. } => root_name(object),
        _ => "expression".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::Error;

    fn scope(path: &Path, src: &str) -> Rc<ModuleScope> {
        let context = SourceContext::new(src, path.display().to_string());
        Rc::new(ModuleScope::parse(path.to_path_buf(), context).unwrap())
    }

    fn resolve(scope: &Rc<ModuleScope>, name: &str) -> Result<Value> {
        let config = ImportConfig::default();
        let mut resolver = Resolver::new(&config);
        resolver.register(Rc::clone(scope));
        resolver.resolve_name(scope, name)
    }

    #[test]
    fn test_local_constants() {
        let scope = scope(
            Path::new("a.type.js"),
            "const Id = /^[a-z]+$/\nconst Fields = { id: Id, count: 'Number' }\nexport const A = { fields: Fields }\n",
        );
        let value = resolve(&scope, "A").unwrap();
        let fields = value.as_object().unwrap()["fields"].as_object().unwrap();
        assert_eq!(fields["id"], Value::Regex(RegexLiteral::new("^[a-z]+$", "")));
        assert_eq!(fields["count"], Value::String("Number".to_string()));
    }

    #[test]
    fn test_symbolic_members_are_preserved() {
        let scope = scope(
            Path::new("a.type.js"),
            "import { FieldTypes } from '@graffio/types-generation'\nexport const A = { id: FieldTypes.accountId }\n",
        );
        let value = resolve(&scope, "A").unwrap();
        assert_eq!(
            value.as_object().unwrap()["id"],
            Value::Symbolic(SymbolicRef {
                object: "FieldTypes".to_string(),
                property: "accountId".to_string(),
            })
        );
    }

    #[test]
    fn test_package_imports_pass_through() {
        let scope = scope(
            Path::new("a.type.js"),
            "import { Money } from '@app/money'\nexport const A = { amount: Money }\n",
        );
        let value = resolve(&scope, "A").unwrap();
        assert_eq!(
            value.as_object().unwrap()["amount"],
            Value::Identifier("Money".to_string())
        );
    }

    #[test]
    fn test_member_of_local_object() {
        let scope = scope(
            Path::new("a.type.js"),
            "const Patterns = { id: /^\\d+$/ }\nexport const A = { id: Patterns.id, other: Patterns.missing }\n",
        );
        let value = resolve(&scope, "A").unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map["id"], Value::Regex(RegexLiteral::new("^\\d+$", "")));
        assert_eq!(map["other"], Value::Undefined);
    }

    #[test]
    fn test_member_of_non_object_fails() {
        let scope = scope(
            Path::new("a.type.js"),
            "const Name = 'x'\nexport const A = { id: Name.length }\n",
        );
        let err = resolve(&scope, "A").unwrap_err();
        assert!(matches!(*err, Error::UnresolvableMember { .. }));
        assert!(err.to_string().contains("Name.length"));
    }

    #[test]
    fn test_duplicate_keys_fail() {
        let scope = scope(Path::new("a.type.js"), "export const A = { x: 1, x: 2 }\n");
        let err = resolve(&scope, "A").unwrap_err();
        assert!(matches!(*err, Error::DuplicateKey { ref key, .. } if key == "x"));
    }

    #[test]
    fn test_spread_can_be_overridden() {
        let scope = scope(
            Path::new("a.type.js"),
            "const Base = { x: 'Number', y: 'Number' }\nexport const A = { ...Base, y: 'String' }\n",
        );
        let value = resolve(&scope, "A").unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(map["y"], Value::String("String".to_string()));
    }

    #[test]
    fn test_relative_imports_are_loaded() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("patterns.js"),
            "export const Patterns = { email: /@/ }\nconst Zip = /^\\d{5}$/\nexport { Zip as ZipCode }\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("coord.type.js"),
            "export const Coord = { kind: 'tagged', fields: { x: 'Number' } }\n",
        )
        .unwrap();

        let path = temp.path().join("user.type.js");
        let scope = scope(
            &path,
            "import { Patterns, ZipCode } from './patterns.js'\n\
             import * as P from './patterns'\n\
             import { Coord as Position } from './coord.type.js'\n\
             export const User = { email: Patterns.email, zip: ZipCode, alt: P.Patterns.email, at: Position }\n",
        );
        let value = resolve(&scope, "User").unwrap();
        let map = value.as_object().unwrap();

        assert_eq!(map["email"], Value::Regex(RegexLiteral::new("@", "")));
        assert_eq!(map["zip"], Value::Regex(RegexLiteral::new("^\\d{5}$", "")));
        assert_eq!(map["alt"], Value::Regex(RegexLiteral::new("@", "")));
        let at = map["at"].as_object().unwrap();
        assert_eq!(at["kind"], Value::String("tagged".to_string()));
        assert_eq!(at["name"], Value::String("Coord".to_string()));
    }

    #[test]
    fn test_missing_relative_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.type.js");
        let scope = scope(&path, "import { X } from './nope.js'\nexport const A = { x: X }\n");
        let err = resolve(&scope, "A").unwrap_err();
        assert!(matches!(*err, Error::UnresolvedImport { ref module, .. } if module == "./nope.js"));
    }

    #[test]
    fn test_missing_export_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.js"), "export const Y = 1\n").unwrap();
        let path = temp.path().join("a.type.js");
        let scope = scope(&path, "import { X } from './b.js'\nexport const A = { x: X }\n");
        let err = resolve(&scope, "A").unwrap_err();
        assert!(matches!(*err, Error::MissingExport { ref name, .. } if name == "X"));
    }

    #[test]
    fn test_circular_imports_terminate() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("tree.type.js"),
            "import { Forest } from './forest.type.js'\nexport const Tree = { kind: 'tagged', fields: { forest: Forest } }\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("forest.type.js"),
            "import { Tree } from './tree.type.js'\nexport const Forest = { kind: 'tagged', fields: { trees: Tree } }\n",
        )
        .unwrap();

        let path = temp.path().join("tree.type.js");
        let src = fs::read_to_string(&path).unwrap();
        let scope = scope(&path, &src);
        let value = resolve(&scope, "Tree").unwrap();

        let forest = value.as_object().unwrap()["fields"].as_object().unwrap()["forest"]
            .as_object()
            .unwrap();
        assert_eq!(forest["name"], Value::String("Forest".to_string()));
        let trees = &forest["fields"].as_object().unwrap()["trees"];
        assert_eq!(trees, &Value::Identifier("Tree".to_string()));
    }

    #[test]
    fn test_is_relative() {
        assert!(is_relative("./coord.js"));
        assert!(is_relative("../shared/patterns.js"));
        assert!(!is_relative("@graffio/types-generation"));
        assert!(!is_relative("lodash"));
    }
}

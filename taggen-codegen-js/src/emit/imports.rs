//! Re-emitting a definition file's imports into its generated module.

use taggen_codegen::TypeAnalysis;
use taggen_core::ImportConfig;
use taggen_schema::{ImportInfo, ImportKind};

use crate::{
    ast::Import,
    naming::{free_identifiers, module_path},
};

/// Imports the generated module needs, given its rendered `body`.
///
/// Specifiers the body never mentions are dropped, as is the type's own
/// name. Imports from internal sources only keep symbolic tables. Sources
/// ending in the definition suffix point at the generated `.js` module.
/// Referenced types nothing imports are imported from their kebab-case
/// module when `auto_import` is on.
pub fn module_imports(
    imports: &[ImportInfo],
    analysis: &TypeAnalysis,
    config: &ImportConfig,
    body: &str,
) -> Vec<Import> {
    let used = free_identifiers(body);
    let mut result: Vec<Import> = imports
        .iter()
        .filter_map(|info| {
            let internal = config.is_internal(&info.source);
            let kept = info.specifiers.iter().filter(|specifier| {
                let local = specifier.local_name.as_str();
                local != analysis.type_name
                    && used.contains(local)
                    && (!internal || config.is_symbolic(local))
            });

            let import = kept.fold(
                Import::new(rewrite_source(&info.source, &config.type_suffix)),
                |import, specifier| match specifier.kind {
                    ImportKind::Default => import.default(&specifier.local_name),
                    ImportKind::Namespace => import.namespace(&specifier.local_name),
                    ImportKind::Named => {
                        import.named_as(&specifier.imported_name, &specifier.local_name)
                    }
                },
            );
            (!import.is_empty()).then_some(import)
        })
        .collect();

    if config.auto_import {
        let missing: Vec<&String> = analysis
            .referenced_types
            .iter()
            .filter(|name| !result.iter().any(|import| import.locals().any(|l| l == name.as_str())))
            .collect();
        result.extend(
            missing
                .into_iter()
                .map(|name| Import::new(module_path(name)).named(name)),
        );
    }
    result
}

fn rewrite_source(source: &str, type_suffix: &str) -> String {
    match source.strip_suffix(type_suffix) {
        Some(stem) if !type_suffix.is_empty() => format!("{}.js", stem),
        _ => source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use taggen_schema::ImportSpecifier;

    use super::*;

    fn named(name: &str) -> ImportSpecifier {
        ImportSpecifier {
            kind: ImportKind::Named,
            imported_name: name.to_string(),
            local_name: name.to_string(),
        }
    }

    fn analysis(type_name: &str, referenced: &[&str]) -> TypeAnalysis {
        TypeAnalysis {
            type_name: type_name.to_string(),
            is_sum: false,
            constructors: Vec::new(),
            referenced_types: referenced.iter().map(|s| s.to_string()).collect(),
            checks: Default::default(),
            hydrates: false,
            functions: Vec::new(),
        }
    }

    fn render(imports: &[Import]) -> Vec<String> {
        imports.iter().map(|i| i.build().trim_end().to_string()).collect()
    }

    #[test]
    fn test_internal_source_keeps_symbolic_tables_only() {
        let imports = vec![ImportInfo {
            source: "@graffio/types-generation".to_string(),
            specifiers: vec![named("FieldTypes"), named("tagged")],
        }];
        let body = "validateRegex(constructorName, 'id', false, FieldTypes.id, id)\ntagged\n";

        let result = module_imports(&imports, &analysis("Account", &[]), &ImportConfig::default(), body);

        assert_eq!(
            render(&result),
            vec!["import { FieldTypes } from '@graffio/types-generation'"]
        );
    }

    #[test]
    fn test_unused_and_self_imports_are_dropped() {
        let imports = vec![
            ImportInfo {
                source: "./coord.type.js".to_string(),
                specifiers: vec![named("Coord")],
            },
            ImportInfo {
                source: "ramda".to_string(),
                specifiers: vec![named("equals"), named("map")],
            },
            ImportInfo {
                source: "./polyfill.js".to_string(),
                specifiers: Vec::new(),
            },
        ];
        let body = "Coord.is(v)\nShape.area = s => map(f, s)\n";

        let result = module_imports(&imports, &analysis("Coord", &[]), &ImportConfig::default(), body);

        assert_eq!(render(&result), vec!["import { map } from 'ramda'"]);
    }

    #[test]
    fn test_type_suffix_is_rewritten() {
        let imports = vec![ImportInfo {
            source: "./coord.type.js".to_string(),
            specifiers: vec![named("Coord")],
        }];
        let result = module_imports(
            &imports,
            &analysis("Shape", &["Coord"]),
            &ImportConfig::default(),
            "validateTag(constructorName, 'centre', false, Coord, centre)",
        );
        assert_eq!(render(&result), vec!["import { Coord } from './coord.js'"]);
    }

    #[test]
    fn test_referenced_types_are_auto_imported() {
        let result = module_imports(
            &[],
            &analysis("Order", &["LineItem", "Money"]),
            &ImportConfig::default(),
            "LineItem Money",
        );
        assert_eq!(
            render(&result),
            vec![
                "import { LineItem } from './line-item.js'",
                "import { Money } from './money.js'"
            ]
        );

        let config = ImportConfig {
            auto_import: false,
            ..ImportConfig::default()
        };
        assert!(module_imports(&[], &analysis("Order", &["Money"]), &config, "Money").is_empty());
    }

    #[test]
    fn test_aliases_and_namespaces_are_preserved() {
        let imports = vec![ImportInfo {
            source: "./geometry.js".to_string(),
            specifiers: vec![
                ImportSpecifier {
                    kind: ImportKind::Namespace,
                    imported_name: "*".to_string(),
                    local_name: "G".to_string(),
                },
            ],
        }];
        let result = module_imports(
            &imports,
            &analysis("Shape", &[]),
            &ImportConfig::default(),
            "Shape.area = s => G.area(s)",
        );
        assert_eq!(render(&result), vec!["import * as G from './geometry.js'"]);
    }
}

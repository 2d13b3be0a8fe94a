//! Generate operation - one definition to one module.

use std::path::Path;

use eyre::{Context, Result};
use taggen_codegen::{LanguageCodegen, pipeline::Severity};
use taggen_codegen_js::Generator;
use taggen_core::Config;
use taggen_schema::{ParseResult, TypeDefinition};

use super::compile::{compile, messages};
use crate::reports::{GenerateReport, GenerationResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Module path to write.
    pub output: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Directory for per-phase snapshots.
    pub visualize: Option<&'a Path>,
}

/// Compile a validated definition and write (or preview) its module.
pub fn generate_type_file(
    parsed: ParseResult,
    definition: TypeDefinition,
    config: &Config,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let input = parsed.path.clone();
    let ctx = compile(parsed, definition, opts.visualize)?;
    let warnings = messages(&ctx, Severity::Warning);

    let generator = Generator::from_context(&ctx, config, opts.output)?;
    let result = if opts.dry_run {
        GenerationResult::Preview(generator.preview())
    } else {
        let written = generator
            .generate()
            .wrap_err_with(|| format!("Failed to write '{}'", opts.output.display()))?;
        GenerationResult::Written {
            unchanged: written.written.is_empty(),
        }
    };

    Ok(GenerateReport {
        input,
        output: opts.output.to_path_buf(),
        type_name: ctx.type_name().to_string(),
        warnings,
        result,
        snapshot_dir: opts.visualize.map(Path::to_path_buf),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::ops::load;

    const COORD: &str = "export const Coord = { kind: 'tagged', fields: { x: 'Number', y: 'Number' } }\n";

    #[test]
    fn test_generate_writes_then_reports_unchanged() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("coord.type.js");
        fs::write(&input, COORD).unwrap();
        let output = temp.path().join("out/coord.js");
        let config = Config::default();

        let run = || {
            let (parsed, definition) = load(&input, &config).unwrap();
            let opts = GenerateOptions {
                output: &output,
                dry_run: false,
                visualize: None,
            };
            generate_type_file(parsed, definition, &config, opts).unwrap()
        };

        let first = run();
        assert_eq!(first.type_name, "Coord");
        assert!(matches!(first.result, GenerationResult::Written { unchanged: false }));
        assert!(fs::read_to_string(&output).unwrap().contains("function Coord(x, y)"));

        let second = run();
        assert!(matches!(second.result, GenerationResult::Written { unchanged: true }));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("coord.type.js");
        fs::write(&input, COORD).unwrap();
        let output = temp.path().join("coord.js");
        let config = Config::default();

        let (parsed, definition) = load(&input, &config).unwrap();
        let opts = GenerateOptions {
            output: &output,
            dry_run: true,
            visualize: None,
        };
        let report = generate_type_file(parsed, definition, &config, opts).unwrap();

        let GenerationResult::Preview(files) = &report.result else {
            panic!("expected preview");
        };
        assert_eq!(files.len(), 1);
        assert!(files[0].content.contains("Coord.from = Coord._from"));
        assert!(!output.exists());
    }

    #[test]
    fn test_visualize_writes_phase_snapshots() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("coord.type.js");
        fs::write(&input, COORD).unwrap();
        let debug = temp.path().join("debug");
        let config = Config::default();

        let (parsed, definition) = load(&input, &config).unwrap();
        let opts = GenerateOptions {
            output: &temp.path().join("coord.js"),
            dry_run: false,
            visualize: Some(&debug),
        };
        let report = generate_type_file(parsed, definition, &config, opts).unwrap();

        assert_eq!(report.snapshot_dir.as_deref(), Some(debug.as_path()));
        assert!(debug.join("validate.json").is_file());
        assert!(debug.join("analyze.json").is_file());
    }
}

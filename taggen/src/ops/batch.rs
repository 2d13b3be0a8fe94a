//! Batch operation - every definition in a directory.

use std::path::{Path, PathBuf};

use eyre::{Context, Result, eyre};
use rayon::prelude::*;
use taggen_codegen::{LanguageCodegen, pipeline::Severity};
use taggen_codegen_js::Generator;
use taggen_core::{Config, module_stem};

use super::{
    compile::{compile, load, messages},
    index::generate_index_file,
};
use crate::reports::{BatchEntry, BatchReport, EntryStatus};

/// Options for the batch operation.
pub struct BatchOptions<'a> {
    /// Directory searched for definition files (not recursive).
    pub input_dir: &'a Path,
    /// Directory generated modules are written into.
    pub output_dir: &'a Path,
    /// Whether to write the index file afterwards.
    pub index: bool,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Generate every definition file in `input_dir`.
///
/// Files are compiled in parallel. A failing file is recorded in the report
/// and the rest still run.
pub fn generate_type_files(config: &Config, opts: BatchOptions) -> Result<BatchReport> {
    let inputs = find_definitions(opts.input_dir, &config.imports.type_suffix)?;

    let entries: Vec<BatchEntry> = inputs
        .par_iter()
        .map(|input| generate_one(input, config, &opts))
        .collect();

    let index = if opts.index {
        Some(generate_index_file(opts.output_dir, config, opts.dry_run)?)
    } else {
        None
    };

    Ok(BatchReport {
        input_dir: opts.input_dir.to_path_buf(),
        entries,
        index,
    })
}

/// Definition files directly inside `dir`, sorted by path.
fn find_definitions(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        glob::Pattern::escape(suffix)
    );
    let mut paths = glob::glob(&pattern)
        .wrap_err_with(|| format!("Invalid search pattern '{}'", pattern))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .wrap_err_with(|| format!("Failed to read '{}'", dir.display()))?;
    paths.sort();
    Ok(paths)
}

fn generate_one(input: &Path, config: &Config, opts: &BatchOptions) -> BatchEntry {
    let mut entry = BatchEntry {
        input: input.to_path_buf(),
        output: None,
        warnings: Vec::new(),
        status: EntryStatus::Unchanged,
    };

    let (parsed, definition) = match load(input, config) {
        Ok(loaded) => loaded,
        Err(e) => {
            entry.status = EntryStatus::Failed(format!("{:?}", miette::Report::new(*e)));
            return entry;
        }
    };

    let generated = module_stem(input)
        .ok_or_else(|| eyre!("'{}' has no module name", input.display()))
        .map(|stem| opts.output_dir.join(format!("{}.js", stem)))
        .and_then(|output| {
            let ctx = compile(parsed, definition, None)?;
            entry.warnings = messages(&ctx, Severity::Warning);
            let generator = Generator::from_context(&ctx, config, &output)?;
            let status = if opts.dry_run {
                EntryStatus::Previewed(generator.contents())
            } else {
                let result = generator
                    .generate()
                    .wrap_err_with(|| format!("Failed to write '{}'", output.display()))?;
                if result.written.is_empty() {
                    EntryStatus::Unchanged
                } else {
                    EntryStatus::Written
                }
            };
            Ok((output, status))
        });

    match generated {
        Ok((output, status)) => {
            entry.output = Some(output);
            entry.status = status;
        }
        Err(e) => entry.status = EntryStatus::Failed(format!("{:#}", e)),
    }
    entry
}

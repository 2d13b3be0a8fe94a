//! Index operation - the barrel file for a directory of generated modules.

use std::path::Path;

use eyre::{Context, Result};
use taggen_codegen_js::IndexFile;
use taggen_core::{Config, GeneratedFile, WriteResult};

use crate::reports::{IndexReport, IndexResult};

/// Scan `dir` and write (or preview) its index file.
///
/// A missing or empty directory is not an error; the report says there was
/// nothing to index.
pub fn generate_index_file(dir: &Path, config: &Config, dry_run: bool) -> Result<IndexReport> {
    let path = dir.join(&config.index.file_name);
    let index = IndexFile::scan(dir, &config.index)
        .wrap_err_with(|| format!("Failed to index '{}'", dir.display()))?;

    let Some(mut index) = index else {
        return Ok(IndexReport {
            path,
            result: IndexResult::Empty,
        });
    };
    if config.emit.header {
        index = index.with_banner();
    }

    let exports = index
        .entries()
        .iter()
        .map(|entry| format!("{} from {}", entry.export_name, entry.module))
        .collect();
    let result = if dry_run {
        IndexResult::Preview {
            exports,
            content: index.contents(),
        }
    } else {
        let written = index
            .write(dir)
            .wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
        IndexResult::Written {
            exports,
            unchanged: matches!(written, WriteResult::Unchanged),
        }
    };

    Ok(IndexReport { path, result })
}

//! The barrel file re-exporting every generated type in a directory.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use eyre::{Context, Result, eyre};
use regex::Regex;
use taggen_core::{GeneratedFile, IndexConfig};

use crate::{ast::Export, code_file::CodeFile};

/// One re-exported module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub export_name: String,
    /// `./coord.js`
    pub module: String,
}

#[derive(Debug)]
pub struct IndexFile {
    file_name: String,
    entries: Vec<IndexEntry>,
    banner: Option<String>,
}

fn export_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?m)^export\s*\{\s*([A-Za-z_$][\w$]*)\s*\}|^export\s+(?:const|function|class)\s+([A-Za-z_$][\w$]*)",
        )
        .unwrap()
    })
}

/// Name of the first top-level export in a module's source.
pub fn find_export(source: &str) -> Option<&str> {
    let captures = export_regex().captures(source)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|m| m.as_str())
}

impl IndexFile {
    /// Scan `dir` for generated modules.
    ///
    /// Returns `None` when the directory is missing or holds nothing to
    /// re-export. Every candidate must have a top-level named export.
    pub fn scan(dir: &Path, config: &IndexConfig) -> Result<Option<Self>> {
        if !dir.is_dir() {
            return Ok(None);
        }

        let mut entries = Vec::new();
        let listing =
            fs::read_dir(dir).wrap_err_with(|| format!("failed to read '{}'", dir.display()))?;
        for entry in listing {
            let path = entry
                .wrap_err_with(|| format!("failed to read '{}'", dir.display()))?
                .path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !path.is_file() || !file_name.ends_with(".js") || config.is_excluded(file_name) {
                continue;
            }

            let source = fs::read_to_string(&path)
                .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
            let export_name = find_export(&source)
                .ok_or_else(|| eyre!("no top-level export found in '{}'", path.display()))?;
            entries.push(IndexEntry {
                export_name: export_name.to_string(),
                module: format!("./{}", file_name),
            });
        }

        if entries.is_empty() {
            return Ok(None);
        }
        entries.sort_by(|a, b| {
            a.export_name
                .cmp(&b.export_name)
                .then_with(|| a.module.cmp(&b.module))
        });

        Ok(Some(Self {
            file_name: config.file_name.clone(),
            entries,
            banner: None,
        }))
    }

    /// Prefix the file with a "do not edit" banner.
    pub fn with_banner(mut self) -> Self {
        self.banner = Some("// Auto-generated by taggen. Do not edit.\n".to_string());
        self
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }
}

impl GeneratedFile for IndexFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.file_name)
    }

    fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    fn render(&self) -> String {
        self.entries
            .iter()
            .fold(CodeFile::new(), |file, entry| {
                file.export(
                    Export::new()
                        .from(entry.module.as_str())
                        .named(entry.export_name.as_str()),
                )
            })
            .render()
    }
}

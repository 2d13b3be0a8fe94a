//! Writing generated modules to disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};

/// A file taggen generates.
///
/// Writes are skipped when the file on disk already holds the same
/// contents, so regenerating an unchanged definition leaves timestamps
/// alone.
pub trait GeneratedFile {
    /// Where the file goes under `base`.
    fn path(&self, base: &Path) -> PathBuf;

    /// Comment written above the rendered content, separated by a blank line.
    fn banner(&self) -> Option<&str> {
        None
    }

    fn render(&self) -> String;

    /// Everything written to disk, banner included.
    fn contents(&self) -> String {
        match self.banner() {
            Some(banner) => format!("{}\n{}", banner, self.render()),
            None => self.render(),
        }
    }

    fn write(&self, base: &Path) -> Result<WriteResult> {
        write_if_changed(&self.path(base), &self.contents())
    }
}

/// Outcome of [`write_if_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// The file already had identical content.
    Unchanged,
}

/// Write `contents` to `path`, creating parent directories, unless the
/// file already holds exactly that.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<WriteResult> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == contents) {
        return Ok(WriteResult::Unchanged);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    fs::write(path, contents).wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(WriteResult::Written)
}

//! `taggen.toml` configuration.
//!
//! Every key is optional. A missing file yields [`Config::default`].

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name looked up by [`Config::discover`].
pub const CONFIG_FILE_NAME: &str = "taggen.toml";

/// Root of `taggen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Settings for emitted type modules.
    pub emit: EmitConfig,
    /// How definition-file imports are resolved and re-emitted.
    pub imports: ImportConfig,
    /// Settings for the barrel file.
    pub index: IndexConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
    /// Spaces per indentation level.
    pub indent: u8,
    /// Emit `_toFirestore`/`_fromFirestore` dispatch on sum types.
    pub firestore: bool,
    /// Prefix every module with a "generated, do not edit" banner.
    pub header: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            firestore: true,
            header: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Import sources that only matter to the definition file and are dropped
    /// from generated modules.
    pub internal: Vec<String>,
    /// Identifiers whose member expressions stay symbolic (`FieldTypes.id`).
    pub symbolic: Vec<String>,
    /// Import referenced types the definition did not import itself.
    pub auto_import: bool,
    /// Suffix of definition files, rewritten to `.js` in emitted imports.
    pub type_suffix: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            internal: vec!["@graffio/types-generation".to_string()],
            symbolic: vec!["FieldTypes".to_string()],
            auto_import: true,
            type_suffix: ".type.js".to_string(),
        }
    }
}

impl ImportConfig {
    /// Whether member expressions on `name` must be preserved symbolically.
    pub fn is_symbolic(&self, name: &str) -> bool {
        self.symbolic.iter().any(|s| s == name)
    }

    /// Whether an import source is internal to definition files.
    pub fn is_internal(&self, source: &str) -> bool {
        self.internal.iter().any(|s| s == source)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Name of the barrel file written into the output directory.
    pub file_name: String,
    /// File name suffixes never re-exported from the barrel.
    pub exclude: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            file_name: "index.js".to_string(),
            exclude: vec![
                ".test.js".to_string(),
                ".spec.js".to_string(),
                ".tap.js".to_string(),
            ],
        }
    }
}

impl IndexConfig {
    /// Whether a file name is excluded from the barrel.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        file_name == self.file_name || self.exclude.iter().any(|s| file_name.ends_with(s.as_str()))
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).wrap_err("invalid taggen configuration")
    }

    /// Load configuration from an explicit path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        Self::from_toml(&content).wrap_err_with(|| format!("in '{}'", path.display()))
    }

    /// Load `taggen.toml` from `dir` or the nearest ancestor that has one.
    ///
    /// Returns the default configuration when none is found.
    pub fn discover(dir: impl AsRef<Path>) -> Result<(Self, Option<PathBuf>)> {
        for ancestor in dir.as_ref().ancestors() {
            let candidate = ancestor.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                let config = Self::open(&candidate)?;
                return Ok((config, Some(candidate)));
            }
        }
        Ok((Self::default(), None))
    }
}

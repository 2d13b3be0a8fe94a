//! Core utilities and types for the taggen type generator.
//!
//! This crate provides the pieces shared by every other taggen crate:
//! writing generated files, naming conventions, and the `taggen.toml`
//! configuration.

mod config;
mod file;
mod utils;

// Configuration
pub use config::{CONFIG_FILE_NAME, Config, EmitConfig, ImportConfig, IndexConfig};
// File operations
pub use file::{GeneratedFile, WriteResult, write_if_changed};
// String utilities
pub use utils::{is_pascal_case, module_stem, to_kebab_case, to_pascal_case};

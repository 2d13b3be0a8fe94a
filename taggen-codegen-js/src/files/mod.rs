//! Files written by the JavaScript generator.

mod index_file;
mod type_module;

pub use index_file::{IndexEntry, IndexFile, find_export};
pub use type_module::TypeModule;

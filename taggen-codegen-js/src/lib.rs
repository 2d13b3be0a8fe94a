//! JavaScript emitter for taggen.
//!
//! Turns a compiled type definition into a self-contained ES module: a
//! validating constructor (or one per variant), `is`/`from`/`toString`
//! statics, instance `toString`/`toJSON`, `match` for sum types, and only the
//! runtime helpers those need. Also writes the barrel file that re-exports
//! every generated module in a directory.
//!
//! ```ignore
//! use taggen_codegen::{LanguageCodegen, pipeline::Pipeline};
//! use taggen_codegen_js::Generator;
//!
//! let parsed = taggen_schema::parse_file("coord.type.js", &config.imports)?;
//! let definition = parsed.validate()?;
//! let ctx = Pipeline::new().run(parsed, definition)?;
//! Generator::from_context(&ctx, &config, "generated/coord.js")?.generate()?;
//! ```

mod code_file;
mod format;
mod generator;
mod naming;
mod runtime;

pub mod ast;
pub mod emit;
pub mod files;

pub use code_file::{CodeFile, RawCode};
pub use files::{IndexEntry, IndexFile, TypeModule, find_export};
pub use format::format;
pub use generator::Generator;
pub use naming::{js_string, module_path};
pub use runtime::{Helper, helpers_for};
pub use taggen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};

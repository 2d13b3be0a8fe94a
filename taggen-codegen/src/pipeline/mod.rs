//! Compilation pipeline for one definition file.
//!
//! A [`Pipeline`] takes a parsed and validated definition through its
//! phases (lint, then analyze), calling [`Plugin`] hooks around each phase
//! and collecting [`Diagnostic`]s in a shared [`CompilationContext`].
//!
//! ```ignore
//! use taggen_codegen::pipeline::{Pipeline, Severity};
//!
//! let parsed = parse_file("coord.type.js", &config.imports)?;
//! let definition = parsed.validate()?;
//! let ctx = Pipeline::new().run(parsed, definition)?;
//!
//! for diag in ctx.diagnostics.iter().filter(|d| d.severity == Severity::Warning) {
//!     eprintln!("warning: {}", diag.message);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};

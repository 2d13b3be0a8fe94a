//! Language-independent code generation for taggen.
//!
//! - [`builder`] - indented text building (`CodeBuilder`, `CodeFragment`)
//! - [`pipeline`] - phases, plugins and diagnostics run over one definition
//! - [`TypeAnalysis`] - constructor and runtime-check facts for emitters
//! - [`language`] - the trait a target language generator implements
//! - [`testing`] - test utilities (feature-gated)

mod analysis;
pub mod builder;
pub mod language;
pub mod pipeline;

pub use analysis::{Check, ConstructorInfo, TypeAnalysis};
pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use language::{GenerateResult, LanguageCodegen, PreviewFile};

#[cfg(any(test, feature = "testing"))]
pub mod testing;

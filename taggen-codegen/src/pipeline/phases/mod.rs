//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs lints over the definition
//! - [`AnalyzePhase`] - computes the [`TypeAnalysis`](crate::TypeAnalysis)

mod analyze;
mod validate;

pub use analyze::AnalyzePhase;
pub use validate::{
    DuplicateFunctionLint, FieldShadowingLint, FunctionOverrideLint, Lint,
    TypeNamingLint, ValidatePhase,
};

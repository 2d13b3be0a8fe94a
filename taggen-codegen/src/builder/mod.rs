//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - indentation-aware text buffer
//! - [`CodeFragment`] - intermediate representation for code pieces
//! - [`Renderable`] - trait for nodes that produce fragments
//! - [`Indent`] - indentation configuration

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};

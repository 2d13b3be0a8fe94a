//! Core operations.
//!
//! This module contains the business logic for taggen commands,
//! separated from CLI argument parsing and output rendering.

pub mod batch;
pub mod check;
pub mod compile;
pub mod generate;
pub mod index;

pub use batch::{BatchOptions, generate_type_files};
pub use check::check;
pub use compile::load;
pub use generate::{GenerateOptions, generate_type_file};
pub use index::generate_index_file;

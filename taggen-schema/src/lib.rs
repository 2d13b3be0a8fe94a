//! Reading `.type.js` definition files.
//!
//! A definition file is a JavaScript module exporting one object literal
//! that describes a `tagged` or `taggedSum` type. This crate tokenizes and
//! parses the module, resolves identifiers through local constants and
//! relative imports, and validates the result into a [`TypeDefinition`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod ast;
mod definition;
mod error;
mod parse;
mod resolve;
pub mod syntax;
mod validate;
mod value;

pub use ast::{ImportKind, ImportSpecifier};
pub use definition::{Element, FieldKind, FieldMap, FieldType, Pattern, Primitive, TypeDefinition};
pub use error::{Error, Result, SourceContext};
pub use parse::{
    FunctionInfo, ImportInfo, ParseResult, RawDefinition, parse_file, parse_str,
    parse_str_with_filename,
};
pub use validate::{ParseContext, parse_type_string, validate};
pub use value::{RegexLiteral, SymbolicRef, Value, format_number};

//! Built-in lints for definitions.

mod duplicate_function;
mod field_shadowing;
mod function_override;
mod type_naming;

pub use duplicate_function::DuplicateFunctionLint;
pub use field_shadowing::FieldShadowingLint;
pub use function_override::FunctionOverrideLint;
pub use type_naming::TypeNamingLint;

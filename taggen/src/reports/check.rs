//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from definition validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Definition file that was checked.
    pub input: PathBuf,
    pub type_name: String,
    /// `tagged` or `taggedSum`.
    pub kind: &'static str,
    /// Constructor signatures, e.g. `Shape.Square(topLeft, bottomRight)`.
    pub constructors: Vec<String>,
    /// Functions attached to the type.
    pub functions: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.is_valid() {
            return;
        }

        if !self.warnings.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.input.display()));
        out.newline();
        out.key_value(&self.type_name, self.kind);
        out.section("Constructors");
        for constructor in &self.constructors {
            out.list_item(constructor);
        }
        if !self.functions.is_empty() {
            out.section("Functions");
            for function in &self.functions {
                out.list_item(function);
            }
        }
    }
}

//! JavaScript syntax builders for declarations, functions, objects, imports
//! and exports.
//!
//! Each builder implements [`Renderable`](taggen_codegen::Renderable), so
//! builders nest: an object property can hold a function whose body holds
//! another object.

mod consts;
mod exports;
mod fns;
mod imports;
mod objects;

pub use consts::Const;
pub use exports::Export;
pub use fns::{ArrowFn, Fn};
pub use imports::Import;
pub use objects::JsObject;
use taggen_codegen::CodeFragment;

/// Prepend `prefix` to the first line of a rendered expression.
pub(crate) fn prefixed(prefix: &str, mut fragments: Vec<CodeFragment>) -> Vec<CodeFragment> {
    match fragments.first_mut() {
        Some(CodeFragment::Line(line)) => line.insert_str(0, prefix),
        Some(CodeFragment::Block { header, .. }) => header.insert_str(0, prefix),
        Some(CodeFragment::Sequence(inner)) => {
            let taken = std::mem::take(inner);
            *inner = prefixed(prefix, taken);
        }
        _ => fragments.insert(0, CodeFragment::line(prefix.trim_end())),
    }
    fragments
}

/// Append `suffix` to the last line of a rendered expression.
pub(crate) fn suffixed(mut fragments: Vec<CodeFragment>, suffix: &str) -> Vec<CodeFragment> {
    match fragments.last_mut() {
        Some(CodeFragment::Line(line)) => line.push_str(suffix),
        Some(CodeFragment::Block {
            close: Some(close), ..
        }) => close.push_str(suffix),
        Some(CodeFragment::Sequence(inner)) => {
            let taken = std::mem::take(inner);
            *inner = suffixed(taken, suffix);
        }
        _ => fragments.push(CodeFragment::line(suffix)),
    }
    fragments
}

#[cfg(test)]
mod tests {
    use taggen_codegen::CodeBuilder;

    use super::*;

    fn render(fragments: Vec<CodeFragment>) -> String {
        let mut builder = CodeBuilder::javascript();
        builder.emit(&fragments);
        builder.build()
    }

    #[test]
    fn test_prefix_and_suffix_block() {
        let block = vec![CodeFragment::braced(
            "{",
            vec![CodeFragment::line("a: 1,")],
            "}",
        )];
        let code = render(suffixed(prefixed("const x = ", block), ")"));
        assert_eq!(code, "const x = {\n    a: 1,\n})\n");
    }

    #[test]
    fn test_prefix_line() {
        let code = render(prefixed("return ", vec![CodeFragment::line("42")]));
        assert_eq!(code, "return 42\n");
    }
}

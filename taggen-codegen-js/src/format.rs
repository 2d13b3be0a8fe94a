//! Whitespace normalization of generated code.
//!
//! Applied per section by [`CodeFile`](crate::CodeFile); verbatim source
//! copied from definition files is never passed through it.

/// Trim trailing whitespace, drop leading blank lines, collapse runs of
/// blank lines to one, and end with exactly one newline.
pub fn format(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut pending_blank = false;

    for line in source.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_normalizes_blank_lines() {
        let source = "\n\nconst a = 1   \n\n\n\nconst b = 2\r\n\n";
        assert_eq!(format(source), "const a = 1\n\nconst b = 2\n");
    }

    #[test]
    fn test_format_keeps_indentation() {
        assert_eq!(format("if (x) {\n\ty()\n}"), "if (x) {\n\ty()\n}\n");
    }

    #[test]
    fn test_format_is_idempotent() {
        let once = format("a\n\n\nb  \n");
        assert_eq!(format(&once), once);
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format("\n \n"), "");
    }
}

//! Index command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct IndexReport {
    /// Path of the index file.
    pub path: PathBuf,
    pub result: IndexResult,
}

#[derive(Debug)]
pub enum IndexResult {
    /// Missing or empty directory; nothing was written.
    Empty,
    Written {
        /// `Coord from ./coord.js`
        exports: Vec<String>,
        unchanged: bool,
    },
    Preview {
        exports: Vec<String>,
        content: String,
    },
}

impl Report for IndexReport {
    fn render(&self, out: &mut dyn Output) {
        let path = self.path.display().to_string();
        match &self.result {
            IndexResult::Empty => {
                let dir = self.path.parent().unwrap_or(&self.path);
                out.preformatted(&format!(
                    "No generated types in {}; skipping index",
                    dir.display()
                ));
            }
            IndexResult::Written { exports, unchanged: true } => {
                out.key_value("Unchanged", &format!("{} ({} types)", path, exports.len()));
            }
            IndexResult::Written { exports, .. } => {
                out.section(&format!("Generated {}", path));
                for export in exports {
                    out.added_item(export);
                }
            }
            IndexResult::Preview { exports, content } => {
                out.divider(&path);
                out.preformatted(content);
                out.preformatted(&format!("{} types would be indexed", exports.len()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_written_index_lists_exports() {
        let mut out = BufferOutput::default();
        IndexReport {
            path: PathBuf::from("out/index.js"),
            result: IndexResult::Written {
                exports: vec!["Coord from ./coord.js".to_string()],
                unchanged: false,
            },
        }
        .render(&mut out);

        assert_eq!(
            out.lines,
            vec!["Generated out/index.js:", "  + Coord from ./coord.js"]
        );
    }

    #[test]
    fn test_empty_directory_is_informational() {
        let mut out = BufferOutput::default();
        IndexReport {
            path: PathBuf::from("out/index.js"),
            result: IndexResult::Empty,
        }
        .render(&mut out);

        assert!(out.warnings.is_empty());
        assert_eq!(out.lines, vec!["No generated types in out; skipping index"]);
    }
}

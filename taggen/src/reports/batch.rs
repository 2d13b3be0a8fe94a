//! Batch command report data structures.

use std::path::PathBuf;

use super::{
    IndexReport,
    output::{Output, Report},
};

#[derive(Debug)]
pub struct BatchReport {
    pub input_dir: PathBuf,
    /// One entry per definition file, sorted by path.
    pub entries: Vec<BatchEntry>,
    /// Present when the index was requested.
    pub index: Option<IndexReport>,
}

#[derive(Debug)]
pub struct BatchEntry {
    pub input: PathBuf,
    /// Unknown when the file failed before an output path was chosen.
    pub output: Option<PathBuf>,
    pub warnings: Vec<String>,
    pub status: EntryStatus,
}

#[derive(Debug)]
pub enum EntryStatus {
    Written,
    Unchanged,
    /// Dry-run contents.
    Previewed(String),
    /// Rendered error.
    Failed(String),
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry.status, EntryStatus::Failed(_)))
    }

    fn count(&self, status: fn(&EntryStatus) -> bool) -> usize {
        self.entries.iter().filter(|entry| status(&entry.status)).count()
    }
}

impl Report for BatchReport {
    fn render(&self, out: &mut dyn Output) {
        if self.entries.is_empty() {
            out.preformatted(&format!(
                "No definition files found in {}",
                self.input_dir.display()
            ));
        }

        for entry in &self.entries {
            let input = entry.input.display();
            for warning in &entry.warnings {
                out.warning(&format!("{}: {}", input, warning));
            }

            let output = entry
                .output
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            match &entry.status {
                EntryStatus::Written => out.added_item(&format!("{} -> {}", input, output)),
                EntryStatus::Unchanged => {
                    out.list_item(&format!("{} -> {} (unchanged)", input, output))
                }
                EntryStatus::Previewed(content) => {
                    out.divider(&output);
                    out.preformatted(content);
                }
                EntryStatus::Failed(message) => {
                    out.warning(&format!("failed to generate {}\n{}", input, message))
                }
            }
        }

        out.newline();
        out.preformatted(&format!(
            "{} generated, {} unchanged, {} previewed, {} failed",
            self.count(|s| matches!(s, EntryStatus::Written)),
            self.count(|s| matches!(s, EntryStatus::Unchanged)),
            self.count(|s| matches!(s, EntryStatus::Previewed(_))),
            self.count(|s| matches!(s, EntryStatus::Failed(_))),
        ));

        if let Some(index) = &self.index {
            out.newline();
            index.render(out);
        }
    }
}

//! Report data structures for commands.
//!
//! Operations build reports; commands render them to the terminal.

mod batch;
mod check;
mod generate;
mod index;
mod output;

pub use batch::{BatchEntry, BatchReport, EntryStatus};
pub use check::CheckReport;
pub use generate::{GenerateReport, GenerationResult};
pub use index::{IndexReport, IndexResult};
pub use output::{Report, TerminalOutput};

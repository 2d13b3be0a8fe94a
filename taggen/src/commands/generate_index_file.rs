use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::GlobalArgs;
use crate::{ops, reports::Report};

#[derive(Args)]
pub struct GenerateIndexFileCommand {
    /// Directory holding the generated modules
    pub dir: PathBuf,

    /// Preview the index without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateIndexFileCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let report = ops::generate_index_file(&self.dir, &config, self.dry_run)?;
        report.render(&mut global.output());
        Ok(())
    }
}

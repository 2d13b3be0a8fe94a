use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{GlobalArgs, UnwrapOrExit};
use crate::{ops, reports::Report};

#[derive(Args)]
pub struct CheckCommand {
    /// Definition file to validate
    pub input: PathBuf,
}

impl CheckCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let (parsed, definition) = ops::load(&self.input, &config).unwrap_or_exit();

        let report = ops::check(parsed, definition)?;
        report.render(&mut global.output());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}

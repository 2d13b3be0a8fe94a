use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{GlobalArgs, UnwrapOrExit};
use crate::{
    ops::{self, GenerateOptions},
    reports::Report,
};

#[derive(Args)]
pub struct GenerateTypeFileCommand {
    /// Definition file to read (e.g. coord.type.js)
    pub input: PathBuf,

    /// Module to write (e.g. src/types/coord.js)
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON snapshot of each compilation phase into this directory
    #[arg(long, value_name = "DIR")]
    pub visualize: Option<PathBuf>,
}

impl GenerateTypeFileCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let (parsed, definition) = ops::load(&self.input, &config).unwrap_or_exit();

        let report = ops::generate_type_file(
            parsed,
            definition,
            &config,
            GenerateOptions {
                output: &self.output,
                dry_run: self.dry_run,
                visualize: self.visualize.as_deref(),
            },
        )?;
        report.render(&mut global.output());
        Ok(())
    }
}

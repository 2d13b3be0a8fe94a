use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::GlobalArgs;
use crate::{
    ops::{self, BatchOptions},
    reports::Report,
};

#[derive(Args)]
pub struct GenerateTypeFilesCommand {
    /// Directory holding the .type.js definitions
    pub input_dir: PathBuf,

    /// Directory to write the generated modules into
    pub output_dir: PathBuf,

    /// Also write the index file into the output directory
    #[arg(long)]
    pub index: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateTypeFilesCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let report = ops::generate_type_files(
            &config,
            BatchOptions {
                input_dir: &self.input_dir,
                output_dir: &self.output_dir,
                index: self.index,
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut global.output());

        if report.has_failures() {
            std::process::exit(1);
        }
        Ok(())
    }
}

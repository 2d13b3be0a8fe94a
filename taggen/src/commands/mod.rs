mod check;
mod completions;
mod generate_index_file;
mod generate_type_file;
mod generate_type_files;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::{Context, Result};
use generate_index_file::GenerateIndexFileCommand;
use generate_type_file::GenerateTypeFileCommand;
use generate_type_files::GenerateTypeFilesCommand;
use taggen_core::Config;

use crate::reports::TerminalOutput;

/// Extension trait for exiting on schema errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for taggen_schema::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "taggen")]
#[command(version)]
#[command(about = "Generate JavaScript tagged types from .type.js definitions")]
pub(crate) struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::GenerateTypeFile(cmd) => cmd.run(&self.global),
            Commands::GenerateIndexFile(cmd) => cmd.run(&self.global),
            Commands::GenerateTypeFiles(cmd) => cmd.run(&self.global),
            Commands::Check(cmd) => cmd.run(&self.global),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the module for one .type.js definition
    GenerateTypeFile(GenerateTypeFileCommand),

    /// Write an index.js re-exporting every generated type in a directory
    GenerateIndexFile(GenerateIndexFileCommand),

    /// Generate a module for every definition in a directory
    GenerateTypeFiles(GenerateTypeFilesCommand),

    /// Validate a definition without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Flags accepted by every subcommand.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to taggen.toml (defaults to the nearest one above the working directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

impl GlobalArgs {
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::open(path),
            None => {
                let cwd = std::env::current_dir().wrap_err("failed to read working directory")?;
                Config::discover(cwd).map(|(config, _)| config)
            }
        }
    }

    pub fn output(&self) -> TerminalOutput {
        TerminalOutput::new(self.quiet)
    }
}

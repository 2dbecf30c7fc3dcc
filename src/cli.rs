//! CLI argument parsing for the converter.
use clap::Parser;
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "epoi-convert",
    version,
    about = "Renumber program assets into NN_name slots and copy them to a new directory",
    after_help = "Examples:\n  epoi-convert example/source example/converted\n  epoi-convert example/source example/converted --dry-run --json"
)]
pub struct RootArgs {
    /// Directory containing program.txt and its .bmp assets
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory receiving the rewritten program and renamed assets
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Print the name mapping without writing anything (OUTPUT_DIR is not touched)
    #[arg(long)]
    pub dry_run: bool,

    /// Emit a machine-readable JSON report instead of the status line
    #[arg(long)]
    pub json: bool,

    /// Log each slot assignment and copied asset
    #[arg(long)]
    pub verbose: bool,
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tasktree", about = concat!("tasktree v", env!("CARGO_PKG_VERSION"), " - an editable task tree in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Task tree JSON file (defaults to the built-in demo project)
    #[arg(long, global = true, value_name = "FILE")]
    pub tasks: Option<PathBuf>,

    /// Config file (defaults to ./tasktree.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write tracing output here instead of $TMPDIR/tasktree.log
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Write column changes back to the config file's [[columns]]
    #[arg(long)]
    pub persist_columns: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the table as text and exit
    Print(PrintArgs),
}

#[derive(Args)]
pub struct PrintArgs {
    /// Expand every task that has sub-tasks
    #[arg(long)]
    pub expand_all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Table width in terminal cells
    #[arg(long, default_value_t = 120)]
    pub width: u16,
}

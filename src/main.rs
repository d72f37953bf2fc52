use clap::Parser;
use tasktree::cli::commands::Cli;
use tasktree::cli::handlers;
use tasktree::logging;

fn main() {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    if let Err(e) = logging::init(&log_path) {
        eprintln!("warning: logging disabled ({}): {}", log_path.display(), e);
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tasktree starting");

    if let Err(e) = handlers::dispatch(cli) {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

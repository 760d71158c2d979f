//! Logsweep - retention-based cleanup for CloudWatch log groups.

use clap::Parser;
use logsweep_cli::{Cli, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries progress and the summary.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let formatter = Formatter::new(cli.format, !cli.no_color);
    let mut store = cli.store();
    let mut stdout = std::io::stdout().lock();

    if let Err(e) = logsweep_cli::execute(&cli, &mut store, &formatter, &mut stdout) {
        let code = e.exit_code();
        eprintln!("{}", formatter.fatal(&e.to_string(), code));
        std::process::exit(code);
    }
}

use clap::Parser;
use lbconv::cli::{Cli, Commands};
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect(args) => lbconv::cli::inspect::run(args)?,
        Commands::Validate(args) => lbconv::cli::validate::run(args)?,
        Commands::Completions(args) => lbconv::cli::completions::run(args)?,
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "lbconv=info",
        2 => "lbconv=debug",
        _ => "lbconv=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

//! # cirrus CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Cirrus compute stack CLI.
///
/// Validates container volume mount specs against a pod's disk inventory
/// or against the disks of a pod creation request.
#[derive(Parser, Debug)]
#[command(name = "cirrus", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate and normalize a volume mount spec.
    Validate(cirrus_cli::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => cirrus_cli::validate::run(args),
    }
}

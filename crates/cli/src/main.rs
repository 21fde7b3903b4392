use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "crucible")]
#[command(about = "Build OCI runtime specs for supervised jobs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the runtime spec (config.json) for a job
    Spec(commands::spec::SpecArgs),

    /// Show version information
    Version(commands::version::VersionArgs),
}

fn main() {
    // stdout carries the spec, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Spec(args) => commands::spec::run(args)?,
        Commands::Version(args) => commands::version::run(args),
    }

    Ok(())
}

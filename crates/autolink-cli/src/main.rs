mod cli;
mod config;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings.as_path();

    match cli.command {
        Commands::Scan(args) => cli::scan::run(args, settings).await,
        Commands::ScanSelection(args) => cli::scan::run_selection(args, settings).await,
        Commands::Alias(cmd) => cli::alias::run(cmd, settings).await,
        Commands::Glossary(cmd) => cli::glossary::run(cmd, settings).await,
        Commands::Config(cmd) => cli::config_cmd::run(cmd, settings).await,
        Commands::Watch(args) => cli::watch::run(args, settings).await,
    }
}

//! Chronicler CLI - fetch articles, extract structured records, ask
//! grounded questions.

use chronicler_cli::cli::CliFormat;
use chronicler_cli::{commands, Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr; RUST_LOG controls verbosity
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> chronicler_cli::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };

    let format = cli.format.unwrap_or(CliFormat::Table);
    let formatter = Formatter::new(format, !cli.no_color);

    match cli.command {
        Command::Harvest(args) => commands::execute_harvest(args, &config, &formatter).await,
        Command::Ask(args) => commands::execute_ask(args, &config, &formatter).await,
        Command::Topics(args) => commands::execute_topics(args, &formatter),
    }
}

//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chronicler - extract structured knowledge from articles and ask
/// grounded questions about it.
#[derive(Debug, Parser)]
#[command(name = "chronicler")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (topic ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch articles, extract records, and write them to a file
    Harvest(HarvestArgs),

    /// Answer questions grounded in previously harvested records
    Ask(AskArgs),

    /// List the topics in a records file
    Topics(TopicsArgs),
}

/// Arguments for the harvest command.
#[derive(Debug, Parser)]
pub struct HarvestArgs {
    /// Article URLs to process
    pub urls: Vec<String>,

    /// File with one URL per line (blank lines and # comments ignored)
    #[arg(long)]
    pub urls_file: Option<PathBuf>,

    /// Where to write the extracted records
    #[arg(short, long, default_value = "records.json")]
    pub output: PathBuf,

    /// Model override for this run
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Questions to answer
    pub questions: Vec<String>,

    /// Records file produced by harvest
    #[arg(short, long, default_value = "records.json")]
    pub records: PathBuf,

    /// Model override for this run
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the topics command.
#[derive(Debug, Parser)]
pub struct TopicsArgs {
    /// Records file produced by harvest
    #[arg(short, long, default_value = "records.json")]
    pub records: PathBuf,
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "odb",
    about = "Inventory the loose objects of a git repository",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output on stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Indent JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode every loose object of a repository
    Scan(ScanArgs),
    /// Decode a single loose object file
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ScanArgs {
    /// Repository root (work tree or bare)
    #[arg(default_value = ".")]
    pub repo: PathBuf,
    /// Record undecodable objects and continue instead of stopping
    #[arg(short, long)]
    pub keep_going: bool,
    /// Reject header types other than blob, tree, commit and tag
    #[arg(long)]
    pub strict_types: bool,
    /// Only output objects of this type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Path to a compressed object file
    pub path: PathBuf,
    /// Reject header types other than blob, tree, commit and tag
    #[arg(long)]
    pub strict_types: bool,
}

//! CLI argument parsing.
//!
//! The CLI only gathers inputs; batching and reconciliation live in their own
//! modules and take plain data.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "scry-check",
    version,
    about = "Check that every card in a list is matched by a Scryfall search",
    after_help = "Examples:\n  scry-check check --query 'f:pauper' --cards deck.txt\n  cat deck.txt | scry-check check --query 'id<=g' --json\n  scry-check batches --query 't:land' --cards lands.txt",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Check(CheckArgs),
    Batches(BatchesArgs),
}

/// Inputs shared by every command.
#[derive(Args, Debug)]
pub struct CardInputArgs {
    /// Base search query; must not contain a name filter
    #[arg(long, short = 'q', value_name = "QUERY")]
    pub query: String,

    /// Card list file, one card per line (reads stdin when omitted)
    #[arg(long, value_name = "PATH")]
    pub cards: Option<PathBuf>,

    /// Emit debug logs on stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Check command inputs.
#[derive(Parser, Debug)]
#[command(about = "Run the search and report matched and missing cards")]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: CardInputArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,

    /// Search endpoint URL (overrides config file and SCRY_CHECK_ENDPOINT)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// JSON config file with endpoint, user_agent, and timeout_secs
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Batches command inputs.
#[derive(Parser, Debug)]
#[command(about = "Print the encoded search queries without sending them")]
pub struct BatchesArgs {
    #[command(flatten)]
    pub input: CardInputArgs,
}

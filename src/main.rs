use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use tracing_subscriber::EnvFilter;

mod batch;
mod card_list;
mod cli;
mod config;
mod reconcile;
mod report;
mod scryfall;

use card_list::{parse_card_list, CardList};
use cli::{BatchesArgs, CardInputArgs, CheckArgs, Command, RootArgs};
use config::ConfigOverrides;
use scryfall::ScryfallClient;

fn main() -> Result<()> {
    let args = RootArgs::parse();

    match args.command {
        Command::Check(args) => cmd_check(args),
        Command::Batches(args) => cmd_batches(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "scry_check=debug"
    } else {
        "scry_check=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_card_list(input: &CardInputArgs) -> Result<CardList> {
    let bytes = match &input.cards {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("read card list {}", path.display()))?
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("read card list from stdin")?;
            bytes
        }
    };
    // Invalid UTF-8 only spoils the names it appears in.
    let text = String::from_utf8_lossy(&bytes);
    let cards = parse_card_list(&text);
    if cards.is_empty() {
        tracing::warn!("card list has no card names");
    }
    tracing::debug!(cards = cards.len(), "parsed card list");
    Ok(cards)
}

fn cmd_check(args: CheckArgs) -> Result<()> {
    init_tracing(args.input.verbose);
    let overrides = ConfigOverrides {
        endpoint: args.endpoint.clone(),
        timeout_secs: args.timeout_secs,
    };
    let config = config::resolve_from_env(&overrides, args.config.as_deref())?;
    tracing::debug!(endpoint = %config.endpoint, "resolved search config");

    let cards = read_card_list(&args.input)?;
    let client = ScryfallClient::new(&config);
    let report = reconcile::check_cards(&cards, &args.input.query, &client);

    if report.has_failures() {
        eprintln!("{}", report::QUERY_ERROR_MESSAGE);
    }
    if args.json {
        println!("{}", report.to_json());
    } else {
        println!("{report}");
    }
    Ok(())
}

fn cmd_batches(args: BatchesArgs) -> Result<()> {
    init_tracing(args.input.verbose);
    let cards = read_card_list(&args.input)?;
    for query in batch::build_batches(&args.input.query, cards.names()) {
        println!("{query}");
    }
    Ok(())
}

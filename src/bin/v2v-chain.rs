#![forbid(unsafe_code)]
//! Interactive V2V communication ledger

use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;
use v2vchain::cli::Session;
use v2vchain::config::{load_config_from, DEFAULT_CONFIG_PATH};
use v2vchain::Ledger;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Leading zero hex characters required of mined blocks
    #[arg(long)]
    difficulty: Option<u32>,
    /// Print the chain as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config_from(&cli.config)?;
    if let Some(difficulty) = cli.difficulty {
        config.ledger.difficulty = difficulty;
        config.validate()?;
    }

    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_writer(io::stderr)
        .init();
    info!(
        "Starting V2VChain (difficulty = {}, config = {})",
        config.ledger.difficulty,
        cli.config.display()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        Ledger::new(config.ledger.difficulty),
        stdin.lock(),
        stdout.lock(),
    )
    .with_json(cli.json);
    session.run()?;

    Ok(())
}

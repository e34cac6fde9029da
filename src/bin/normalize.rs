//! Normalize a raw match statistics payload into canonical records.
//!
//! Usage:
//!   normalize --home Arsenal --away Chelsea --input match.json
//!   curl ... | normalize --home Arsenal --away Chelsea --league "Premier League" --pretty

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use value_hunter::{MatchContext, NormalizerConfig, normalize_json};

#[derive(Parser)]
#[command(name = "normalize")]
#[command(about = "Normalize a football statistics payload into home, away and H2H records")]
struct Cli {
    /// JSON payload to read; stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    home: String,
    #[arg(long)]
    away: String,
    #[arg(long, default_value = "")]
    league: String,
    #[arg(long)]
    league_id: Option<u32>,
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let raw = read_payload(cli.input.as_ref())?;
    let ctx = MatchContext::new(cli.home, cli.away).with_league(cli.league, cli.league_id);
    let config = NormalizerConfig::from_env();

    let normalized = normalize_json(&raw, &ctx, &config)?;
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&normalized)
    } else {
        serde_json::to_string(&normalized)
    }
    .context("serialize normalized records")?;
    println!("{rendered}");
    Ok(())
}

fn read_payload(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed reading {}", path.display())),
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed reading stdin")?;
            Ok(raw)
        }
    }
}

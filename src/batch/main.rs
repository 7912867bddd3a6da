//! Batch postal code lookup.
//!
//! Reads one address per line from the input file and appends
//! `address;postal_code` records to a new output file.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use postal_lookup::driver::{run_batch, BatchOptions};
use postal_lookup::normalize::AddressNormalizer;
use postal_lookup::{Config, GeocodeClient, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "postal-codes")]
#[command(about = "Look up postal codes for a file of Canadian addresses")]
#[command(after_help = "Example: postal-codes address_list.txt address_list_output.txt")]
struct Args {
    /// Text file with one address per line
    input: PathBuf,

    /// File to create with `address;result` lines (must not exist)
    output: PathBuf,

    /// Google Maps API key (overrides the config file)
    #[arg(long)]
    api_key: Option<String>,

    /// TOML config file with a [geocoder] section
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How failures are written
    #[arg(long, value_enum, default_value_t = OutputFormat::Legacy)]
    format: OutputFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Postal code batch lookup");
    info!("Input: {}", args.input.display());
    info!("Output: {}", args.output.display());

    let geocoder = Config::resolve(args.config.as_deref(), args.api_key)?;
    let client = GeocodeClient::new(&geocoder).context("Failed to create geocoding client")?;

    let options = BatchOptions {
        format: args.format,
        progress: std::io::stderr().is_terminal(),
    };

    run_batch(
        &args.input,
        &args.output,
        &client,
        &AddressNormalizer::new(),
        &options,
    )
    .await?;

    Ok(())
}

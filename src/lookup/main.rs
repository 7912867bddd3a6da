//! Single-address postal code lookup.
//!
//! Example:
//!   postal-code schwartz+montreal
//!   H2W 1X9

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use postal_lookup::geocode::lookup_postal_code;
use postal_lookup::{Config, GeocodeClient, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "postal-code")]
#[command(about = "Look up the postal code of a Canadian address")]
#[command(after_help = "Addresses cannot contain spaces; join words with '+'.\n\
    Prints -1 when no postal code was found and -2 when the request was rejected.\n\n\
    Example: postal-code schwartz+montreal")]
struct Args {
    /// Address with words joined by '+'
    address: String,

    /// Google Maps API key (overrides the config file)
    #[arg(long)]
    api_key: Option<String>,

    /// TOML config file with a [geocoder] section
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How failures are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Legacy)]
    format: OutputFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries only the result
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let geocoder = Config::resolve(args.config.as_deref(), args.api_key)?;
    let client = GeocodeClient::new(&geocoder).context("Failed to create geocoding client")?;

    let outcome = lookup_postal_code(&client, &args.address).await;
    println!("{}", outcome.render(args.format));

    Ok(())
}

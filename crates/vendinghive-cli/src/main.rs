use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use vendinghive_locator::{GeocodeClient, LocatorConfig, PlaceFinder};

#[derive(Debug, Parser)]
#[command(name = "vendinghive-cli")]
#[command(about = "VendingHive location discovery command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check whether a US ZIP code resolves with the geocoder.
    Validate {
        /// 5-digit US ZIP code.
        #[arg(long)]
        zip: String,
    },
    /// Find candidate vending-machine venues around a ZIP code.
    Find {
        /// 5-digit US ZIP code to anchor the search.
        #[arg(long)]
        zip: String,
        /// Machine type, e.g. "Claw Machine" or "Snack & Drink Machines".
        /// Unknown types use the default venue taxonomy.
        #[arg(long)]
        machine_type: String,
        /// Search radius in miles.
        #[arg(long, default_value_t = 5)]
        radius: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = LocatorConfig::from_env();

    match cli.command {
        Commands::Validate { zip } => {
            check_zip_shape(&zip)?;
            let geocoder = GeocodeClient::new(&config).context("failed to build geocode client")?;
            if geocoder.validate_zip(&zip).await {
                println!("ZIP {zip} is valid");
            } else {
                bail!("ZIP {zip} could not be validated");
            }
        }
        Commands::Find {
            zip,
            machine_type,
            radius,
        } => {
            check_zip_shape(&zip)?;
            let geocoder = GeocodeClient::new(&config).context("failed to build geocode client")?;
            let Some(coord) = geocoder.zip_coordinates(&zip).await else {
                bail!("ZIP {zip} could not be resolved to coordinates");
            };
            tracing::info!(zip, lat = coord.lat, lon = coord.lon, "resolved search anchor");

            let finder = PlaceFinder::new(&config).context("failed to build place finder")?;
            let venues = finder.find_places(coord, &machine_type, radius).await;
            println!("{}", serde_json::to_string_pretty(&venues)?);
        }
    }

    Ok(())
}

/// Local shape check before spending a geocoder call: exactly 5 ASCII
/// digits.
fn check_zip_shape(zip: &str) -> anyhow::Result<()> {
    if zip.len() == 5 && zip.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        bail!("\"{zip}\" is not a 5-digit US ZIP code")
    }
}

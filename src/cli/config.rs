//! Init and config CLI commands

use std::str::FromStr;

use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::{Settings, TripPaths};
use crate::error::{TripError, TripResult};
use crate::models::ExchangeRate;
use crate::storage::Storage;

/// Arguments for `tripsplit config`
#[derive(Args)]
pub struct ConfigArgs {
    /// Set the exchange rate (secondary units per primary unit)
    #[arg(long)]
    pub rate: Option<String>,
}

/// Create the data directory, config file and empty data files
pub fn handle_init_command(
    paths: &TripPaths,
    storage: &Storage,
    settings: &Settings,
) -> TripResult<()> {
    let already = paths.is_initialized();

    paths.ensure_directories()?;
    settings.save(paths)?;
    storage.save_all()?;

    if already {
        println!("Trip already initialized at: {}", paths.base_dir().display());
    } else {
        info!(path = %paths.base_dir().display(), "initialized trip");
        println!("Initialized trip at: {}", paths.base_dir().display());
        println!();
        println!("Next steps:");
        println!("  tripsplit member add <id> <name>");
        println!("  tripsplit expense add --title <title> --payer <member> --item 'label=amount'");
        println!("  tripsplit settle");
    }
    Ok(())
}

/// Show paths and settings, optionally updating the exchange rate
pub fn handle_config_command(
    paths: &TripPaths,
    settings: &mut Settings,
    args: ConfigArgs,
) -> TripResult<()> {
    if let Some(rate) = args.rate {
        let value = Decimal::from_str(rate.trim())
            .map_err(|e| TripError::Validation(format!("Invalid rate '{}': {}", rate, e)))?;
        settings.exchange_rate = ExchangeRate::new(value)?;
        settings.save(paths)?;
        info!(rate = %value, "updated exchange rate");
        println!("Exchange rate set to {}", value);
        println!();
    }

    println!("tripsplit Configuration");
    println!("=======================");
    println!("Config file:    {}", paths.settings_file().display());
    println!("Data directory: {}", paths.data_dir().display());
    println!();
    println!("Settings:");
    println!(
        "  Primary currency:   {} ({})",
        settings.primary.code, settings.primary.symbol
    );
    println!(
        "  Secondary currency: {} ({})",
        settings.secondary.code, settings.secondary.symbol
    );
    println!(
        "  Exchange rate:      1 {} = {} {}",
        settings.primary.code,
        settings.exchange_rate.value(),
        settings.secondary.code
    );
    println!("  Log level:          {}", settings.log_level);
    Ok(())
}

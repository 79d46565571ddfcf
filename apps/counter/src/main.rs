//! # Cellshop Counter Entry Point
//!
//! Command line front end for the billing counter.
//!
//! ```text
//! cellshop-counter summary  bill.json            → draft + totals (JSON)
//! cellshop-counter checkout bill.json            → sales service request (JSON)
//! cellshop-counter low-stock stock.json --seen seen.json
//! cellshop-counter config                        → effective configuration
//! ```
//!
//! `-` reads the document from stdin.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use cellshop_core::stock::StockItem;
use cellshop_counter::bill_file::{load_bill, BillFile};
use cellshop_counter::commands;
use cellshop_counter::{init_tracing, ConfigState, DraftState};
use clap::Parser;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

/// Billing counter for a mobile phone shop.
#[derive(Parser, Debug)]
#[command(name = "cellshop-counter", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Compute the totals of a bill file.
    Summary {
        /// Bill JSON file, or `-` for stdin
        bill: PathBuf,
    },
    /// Print the sales service request for a bill file.
    Checkout {
        /// Bill JSON file, or `-` for stdin
        bill: PathBuf,
    },
    /// List low-stock alerts for a stock file.
    LowStock {
        /// Stock JSON file (array of items), or `-` for stdin
        stock: PathBuf,
        /// JSON array of identifiers already seen
        #[arg(long)]
        seen: Option<PathBuf>,
    },
    /// Print the effective configuration.
    Config,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = ConfigState::try_from_env()?;
    info!(shop = %config.shop_name, "Cellshop counter starting");

    match cli.command {
        Commands::Summary { bill } => {
            let draft = DraftState::default();
            let report = load_bill(&draft, &config, read_json::<BillFile>(&bill)?)?;
            print_json(&report)
        }
        Commands::Checkout { bill } => {
            let draft = DraftState::default();
            let report = load_bill(&draft, &config, read_json::<BillFile>(&bill)?)?;
            if !report.rejected_rows.is_empty() {
                anyhow::bail!(
                    "{} row(s) could not be added to the bill; run `summary` for details",
                    report.rejected_rows.len()
                );
            }
            print_json(&commands::checkout::checkout(&draft)?)
        }
        Commands::LowStock { stock, seen } => {
            let items: Vec<StockItem> = read_json(&stock)?;
            let seen: Vec<String> = match seen {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            print_json(&commands::stock::low_stock(&config, seen, &items))
        }
        Commands::Config => print_json(&commands::config::get_config(&config)),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let mut raw = String::new();
    if path == Path::new("-") {
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("reading stdin")?;
    } else {
        raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
    }

    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

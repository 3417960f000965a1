use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use funding_splits::{
    csv::{parse_payout_mods_csv, parse_splits_csv, parse_ticket_mods_csv, splits_to_csv},
    distributions::{adjusted_split_percents, split_amount_after_fee, total_splits_percentage, validate_splits},
    AllocationConfig, Amount, FeePercent,
};

#[derive(Parser)]
#[command(name = "splits")]
#[command(about = "Inspect, price and rebalance payout split CSV files", version)]
struct Cli {
    /// TOML file with display precision and protocol fee
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Splits,
    PayoutMods,
    TicketMods,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a CSV file
    Check {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value = "splits")]
        kind: Kind,
    },

    /// Show each split's payout after the protocol fee
    Payouts {
        file: PathBuf,

        /// Distribution limit
        #[arg(short, long)]
        limit: String,

        /// Protocol fee as a percentage, overrides the config
        #[arg(long)]
        fee: Option<f64>,
    },

    /// Re-derive split percents for a new distribution limit
    Rebalance {
        file: PathBuf,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AllocationConfig::load(path)?,
        None => AllocationConfig::default(),
    };

    let output = match cli.command {
        Commands::Check { file, kind } => check(&read(&file)?, kind)?,
        Commands::Payouts { file, limit, fee } => {
            let limit: Amount = limit.parse().context("invalid --limit")?;
            let fee = match fee {
                Some(pct) => FeePercent::from_percentage(pct).context("invalid --fee")?,
                None => config.fee_percentage,
            };
            payouts(&read(&file)?, limit, fee, config.display_precision)?
        }
        Commands::Rebalance { file, from, to } => {
            let from: Amount = from.parse().context("invalid --from")?;
            let to: Amount = to.parse().context("invalid --to")?;
            rebalance(&read(&file)?, from, to)?
        }
    };
    println!("{}", output);

    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Parse and validate records, summarising count and allocation
fn check(content: &str, kind: Kind) -> Result<String> {
    let (count, total) = match kind {
        Kind::Splits => {
            let splits = parse_splits_csv(content)?;
            validate_splits(&splits)?;
            (splits.len(), total_splits_percentage(&splits))
        }
        Kind::PayoutMods => {
            let mods = parse_payout_mods_csv(content)?;
            validate_splits(&mods)?;
            (mods.len(), total_splits_percentage(&mods))
        }
        Kind::TicketMods => {
            let mods = parse_ticket_mods_csv(content)?;
            validate_splits(&mods)?;
            (mods.len(), total_splits_percentage(&mods))
        }
    };
    Ok(format!("{} records, {}% allocated", count, total))
}

/// One tab-separated line per split: recipient, percent, payout after fee
fn payouts(content: &str, limit: Amount, fee: FeePercent, precision: u32) -> Result<String> {
    let splits = parse_splits_csv(content)?;
    info!("pricing {} splits against {} at {} fee", splits.len(), limit, fee);

    let mut lines = Vec::with_capacity(splits.len());
    for split in &splits {
        let payout = match split_amount_after_fee(split, limit, fee)? {
            Some(amount) => amount.round_dp(precision)?.to_string(),
            None => "-".to_string(),
        };
        let recipient = match (&split.beneficiary, split.project_id) {
            (_, Some(project)) if split.is_project_split() => format!("project #{}", project),
            (Some(address), _) => address.to_string(),
            _ => "project owner".to_string(),
        };
        lines.push(format!("{}\t{}\t{}", recipient, split.percent, payout));
    }
    Ok(lines.join("\n"))
}

/// Splits CSV with percents re-derived for the new limit
fn rebalance(content: &str, from: Amount, to: Amount) -> Result<String> {
    let splits = parse_splits_csv(content)?;
    let adjusted = adjusted_split_percents(&splits, from, to)?;
    validate_splits(&adjusted)?;
    Ok(splits_to_csv(&adjusted))
}

use clap::{Parser, Subcommand};

pub mod commands;
pub mod display;

#[derive(Parser)]
#[command(name = "adaswap")]
#[command(about = "Wallet balance and swap tool for Cardano via the Minswap aggregator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the wallet's aggregated per-asset balance
    Balance(BalanceArgs),

    /// Get a swap estimate from the aggregator without executing
    Quote(QuoteArgs),

    /// Execute a swap through the aggregator
    Swap(SwapArgs),

    /// Merge fragmented UTXOs back into a minimal set
    Consolidate(ConsolidateArgs),
}

#[derive(Parser)]
pub struct BalanceArgs {
    /// Also list the contributing UTXOs
    #[arg(short, long)]
    pub detailed: bool,
}

#[derive(Parser)]
pub struct QuoteArgs {
    /// Input asset: ADA/lovelace, a known symbol, or policy[.]name hex
    #[arg(value_parser = parse_token)]
    pub token_in: String,

    /// Output asset
    #[arg(value_parser = parse_token)]
    pub token_out: String,

    /// Amount in smallest units (lovelace for ADA)
    #[arg(value_parser = parse_amount)]
    pub amount: String,

    /// Slippage tolerance in percent (defaults to config, 0.5 = 0.5%)
    #[arg(short, long)]
    pub slippage: Option<f64>,
}

#[derive(Parser)]
pub struct SwapArgs {
    /// Input asset: ADA/lovelace, a known symbol, or policy[.]name hex
    #[arg(value_parser = parse_token)]
    pub token_in: String,

    /// Output asset
    #[arg(value_parser = parse_token)]
    pub token_out: String,

    /// Amount in smallest units (lovelace for ADA)
    #[arg(value_parser = parse_amount)]
    pub amount: String,

    /// Slippage tolerance in percent (defaults to config, 0.5 = 0.5%)
    #[arg(short, long)]
    pub slippage: Option<f64>,

    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Parser)]
pub struct ConsolidateArgs {
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

fn parse_token(s: &str) -> Result<String, String> {
    crate::utils::parse_token_identifier(s)
        .ok_or_else(|| format!("Invalid token identifier: {}", s))
}

fn parse_amount(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(format!(
            "Amount must be a whole number in smallest units, got `{}`",
            s
        ))
    }
}

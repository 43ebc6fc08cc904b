use crate::balance::BalanceMap;
use crate::core::{explorer_url, ConsolidationOutcome, SwapOutcome, SwapQuote, LOVELACE};
use crate::utils::{group_digits, lovelace_to_ada};
use colored::*;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;

/// Display helper for balances and swap results
pub struct SwapDisplay;

impl SwapDisplay {
    /// Display the aggregated per-asset balance
    pub fn display_balances(balances: &BalanceMap) {
        println!("\n{}", style("--- Wallet Balances ---").bold().underlined());

        if balances.is_empty() {
            println!("{}", "No UTXOs found. Balance is 0 ADA.".yellow());
            return;
        }

        if let Some(lovelace) = balances.get(LOVELACE) {
            match lovelace_to_ada(lovelace) {
                Some(ada) => {
                    println!("{} {} ₳", "ADA:".bold().cyan(), format_ada(&ada).bold())
                }
                None => println!("{} {} lovelace", "ADA:".bold().cyan(), lovelace),
            }
        }

        for (asset, amount) in balances {
            if asset == LOVELACE {
                continue;
            }
            println!(
                "Asset [{}]: {}",
                style(asset).dim(),
                group_digits(&amount.to_string())
            );
        }

        println!("{}", style("-----------------------").dim());
    }

    /// Display a received estimate
    pub fn display_quote(quote: &SwapQuote) {
        println!("\n{}", style("📊 Aggregator Estimate").bold().underlined());

        println!(
            "  {} {} → {}",
            group_digits(&quote.request.amount),
            quote.request.token_in.bold(),
            quote.request.token_out.bold()
        );

        if let Some(amount_out) = quote.amount_out() {
            println!("  Expected Output: {}", format_json_amount(amount_out).green());
        }

        if let Some(min_out) = quote.min_amount_out() {
            println!(
                "  Min Output: {} ({}% slippage)",
                format_json_amount(min_out),
                quote.request.slippage
            );
        }

        if let Some(impact) = quote.data.get("price_impact").and_then(|v| v.as_f64()) {
            println!("  Price Impact: {:.4}%", impact);
        }
    }

    /// Display the confirmation summary before executing a swap
    pub fn display_swap_confirmation(quote: &SwapQuote) {
        println!("\n{}", style("⚠️  Swap Summary").bold().yellow());
        println!(
            "  Sell: {} {}",
            group_digits(&quote.request.amount).bold(),
            quote.request.token_in
        );
        if let Some(amount_out) = quote.amount_out() {
            println!(
                "  Receive (est.): {} {}",
                format_json_amount(amount_out).bold(),
                quote.request.token_out
            );
        }
        println!("  Slippage: {}%", quote.request.slippage);
    }

    /// Display the result of a submitted swap
    pub fn display_swap_result(outcome: &SwapOutcome, network: &str) {
        println!("\n{}", "✅ Swap Transaction Submitted!".green().bold());
        println!("  Tx Id: {}", outcome.tx_id.bold());
        println!(
            "\n{}",
            style(format!(
                "View on Explorer: {}/transaction/{}",
                explorer_url(network),
                outcome.tx_id
            ))
            .dim()
        );
    }

    /// Display the outcome of a consolidation run
    pub fn display_consolidation(outcome: &ConsolidationOutcome, network: &str) {
        match outcome {
            ConsolidationOutcome::NoOp { utxo_count } => {
                println!(
                    "{}",
                    format!(
                        "✅ Wallet is already consolidated ({} UTXOs). No action needed.",
                        utxo_count
                    )
                    .green()
                );
            }
            ConsolidationOutcome::Submitted {
                tx_id,
                merged_inputs,
            } => {
                println!(
                    "\n{}",
                    "✅ Consolidation Transaction Submitted!".green().bold()
                );
                println!("  Merged {} UTXOs", merged_inputs);
                println!("  Tx Id: {}", tx_id.bold());
                println!(
                    "\n{}",
                    style(format!(
                        "View on Explorer: {}/transaction/{}",
                        explorer_url(network),
                        tx_id
                    ))
                    .dim()
                );
                println!(
                    "{}",
                    style(
                        "⏳ Allow a few minutes for confirmation, then check the balance again."
                    )
                    .dim()
                );
            }
        }
    }

    /// Create a progress bar for operations
    pub fn create_progress_bar(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        pb
    }
}

fn format_ada(ada: &Decimal) -> String {
    let s = ada.to_string();
    match s.split_once('.') {
        Some((int, frac)) => format!("{}.{}", group_digits(int), frac),
        None => group_digits(&s),
    }
}

fn format_json_amount(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) if s.chars().all(|c| c.is_ascii_digit()) => group_digits(s),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => group_digits(&n.to_string()),
        other => other.to_string(),
    }
}

use crate::balance::BalanceAggregator;
use crate::cli::{display::SwapDisplay, BalanceArgs};
use crate::core::{Config, RawAmount, SwapResult};
use crate::wallet::{BridgeWallet, WalletProvider};
use colored::*;
use console::style;
use log::info;

pub async fn execute(args: BalanceArgs, config: Config) -> SwapResult<()> {
    println!("{}", "💰 Cardano Wallet Balance".bold().cyan());

    let pb = SwapDisplay::create_progress_bar("Fetching wallet UTXOs...");

    let wallet = BridgeWallet::from_config(&config);
    let utxos = wallet.unspent_outputs().await?;
    info!("Found {} UTXOs", utxos.len());

    pb.set_message("Aggregating balances...");
    let aggregator = BalanceAggregator::from_config(&config);
    let balances = aggregator.aggregate(&utxos)?;

    pb.finish_and_clear();

    println!("Found {} UTXOs.", utxos.len());

    if args.detailed {
        for utxo in &utxos {
            let lovelace = match &utxo.assets.lovelace {
                Some(RawAmount::Integer(n)) => n.to_string(),
                Some(RawAmount::Text(s)) => s.clone(),
                None => "0".to_string(),
            };
            println!(
                "  {} {} lovelace",
                style(&utxo.reference).dim(),
                lovelace
            );
        }
    }

    SwapDisplay::display_balances(&balances);

    Ok(())
}

use crate::cli::{display::SwapDisplay, ConsolidateArgs};
use crate::core::{Config, SwapResult};
use crate::transaction::Consolidator;
use crate::wallet::BridgeWallet;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm};

pub async fn execute(args: ConsolidateArgs, config: Config) -> SwapResult<()> {
    println!("{}", "🔄 UTXO Consolidation".bold().cyan());
    println!("Sweeps every UTXO back to the wallet, merging fragments into change.");

    let proceed = if args.yes {
        true
    } else {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Consolidate all UTXOs now?")
            .default(false)
            .interact()
            .unwrap_or(false)
    };

    if !proceed {
        println!("{}", "❌ Consolidation cancelled".yellow());
        return Ok(());
    }

    let pb = SwapDisplay::create_progress_bar("Consolidating...");

    let wallet = BridgeWallet::from_config(&config);
    let consolidator = Consolidator::new(wallet);

    match consolidator.consolidate().await {
        Ok(outcome) => {
            pb.finish_and_clear();
            SwapDisplay::display_consolidation(&outcome, &config.network);
            Ok(())
        }
        Err(e) => {
            pb.finish_and_clear();
            println!("{} {}", "❌ Consolidation failed:".red().bold(), e);
            Err(e)
        }
    }
}

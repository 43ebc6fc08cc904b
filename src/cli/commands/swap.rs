use crate::cli::{display::SwapDisplay, SwapArgs};
use crate::core::{Config, SwapError, SwapResult};
use crate::transaction::SwapOrchestrator;
use crate::wallet::BridgeWallet;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm};
use log::info;

pub async fn execute(args: SwapArgs, config: Config) -> SwapResult<()> {
    println!("{}", "🚀 Minswap Aggregator Swap".bold().cyan());

    if args.token_in == args.token_out {
        println!("{}", "❌ Cannot swap token to itself".red().bold());
        return Ok(());
    }

    let slippage = args.slippage.unwrap_or(config.default_slippage_pct);
    if slippage <= 0.0 || slippage > config.max_slippage_pct {
        return Err(SwapError::InvalidSlippage(format!(
            "{}% is outside (0, {}%]",
            slippage, config.max_slippage_pct
        )));
    }

    let pb = SwapDisplay::create_progress_bar("Requesting estimate from aggregator...");

    let wallet = BridgeWallet::from_config(&config);
    let mut orchestrator = SwapOrchestrator::from_config(&config, wallet);

    let quote = orchestrator
        .quote(&args.token_in, &args.token_out, &args.amount, slippage)
        .await;

    pb.finish_and_clear();

    let quote = match quote {
        Ok(q) => q,
        Err(e) => {
            println!("{} {}", "❌ Quote failed:".red().bold(), e);
            return Err(e);
        }
    };

    SwapDisplay::display_swap_confirmation(&quote);

    let proceed = if args.yes {
        true
    } else {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Do you want to proceed with this swap?")
            .default(false)
            .interact()
            .unwrap_or(false)
    };

    if !proceed {
        println!("{}", "❌ Swap cancelled".yellow());
        return Ok(());
    }

    info!(
        "Executing swap {} {} -> {}",
        quote.request.amount, quote.request.token_in, quote.request.token_out
    );

    let pb = SwapDisplay::create_progress_bar("Building, signing and submitting...");

    match orchestrator.execute(&quote).await {
        Ok(outcome) => {
            pb.finish_and_clear();
            SwapDisplay::display_swap_result(&outcome, &config.network);
            Ok(())
        }
        Err(e) => {
            pb.finish_and_clear();
            println!("{} {}", "❌ Swap failed:".red().bold(), e);
            Err(e)
        }
    }
}

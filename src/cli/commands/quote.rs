use crate::cli::{display::SwapDisplay, QuoteArgs};
use crate::core::{Config, SwapError, SwapResult};
use crate::transaction::SwapOrchestrator;
use crate::wallet::BridgeWallet;
use colored::*;
use console::style;
use log::info;

pub async fn execute(args: QuoteArgs, config: Config) -> SwapResult<()> {
    println!("{}", "🚀 Minswap Aggregator Quote".bold().cyan());

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

    info!(
        "Getting estimate for {} -> {} (amount: {}, slippage: {}%)",
        args.token_in, args.token_out, args.amount, slippage
    );

    let pb = SwapDisplay::create_progress_bar("Requesting estimate from aggregator...");

    let wallet = BridgeWallet::from_config(&config);
    let mut orchestrator = SwapOrchestrator::from_config(&config, wallet);

    let quote = orchestrator
        .quote(&args.token_in, &args.token_out, &args.amount, slippage)
        .await;

    pb.finish_and_clear();

    match quote {
        Ok(quote) => {
            SwapDisplay::display_quote(&quote);
            println!(
                "{}",
                style("💡 Tip: run the swap command with the same arguments to execute").dim()
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌ Quote failed:".red().bold(), e);
            Err(e)
        }
    }
}

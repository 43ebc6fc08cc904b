use adaswap::cli::{Cli, Commands};
use adaswap::core::{Config, SwapError};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), SwapError> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    config.validate()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Balance(args) => {
            adaswap::cli::commands::balance::execute(args, config).await?;
        }
        Commands::Quote(args) => {
            adaswap::cli::commands::quote::execute(args, config).await?;
        }
        Commands::Swap(args) => {
            adaswap::cli::commands::swap::execute(args, config).await?;
        }
        Commands::Consolidate(args) => {
            adaswap::cli::commands::consolidate::execute(args, config).await?;
        }
    }

    Ok(())
}

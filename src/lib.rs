pub mod aggregator;
pub mod balance;
pub mod cli;
pub mod core;
pub mod transaction;
pub mod utils;
pub mod wallet;

// Re-export commonly used types
pub use aggregator::AggregatorClient;
pub use balance::{BalanceAggregator, BalanceMap};
pub use core::{
    Config, ConsolidationOutcome, SwapError, SwapOutcome, SwapQuote, SwapResult, SwapState,
    UnspentOutput,
};
pub use transaction::{Consolidator, SwapOrchestrator};
pub use wallet::{BridgeWallet, SweepBuilder, WalletProvider};

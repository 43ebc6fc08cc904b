use std::collections::HashMap;

// Canonical key for the chain's base unit
pub const LOVELACE: &str = "lovelace";
pub const LOVELACE_PER_ADA: u64 = 1_000_000;

// Minswap Aggregator (Mainnet)
pub const MINSWAP_AGGREGATOR_URL: &str = "https://agg-api.minswap.org";

// Wallet bridge daemon
pub const DEFAULT_WALLET_URL: &str = "http://127.0.0.1:8090";

// HTTP Configuration
pub const DEFAULT_HTTP_TIMEOUT: u64 = 30;

// Swap Configuration (percent, 0.5 == 0.5%)
pub const DEFAULT_SLIPPAGE_PCT: f64 = 0.5;
pub const MAX_SLIPPAGE_PCT: f64 = 10.0;

// A policy id is a 28-byte script hash, hex-encoded
pub const POLICY_ID_HEX_LEN: usize = 56;

// Consolidation needs at least two inputs to merge anything
pub const MIN_CONSOLIDATION_INPUTS: usize = 2;

// Common token identifiers (Mainnet), policy id + token name hex
pub const MIN_ASSET_ID: &str = "29d222ce763455e3d7a09a665ce554f00ac89d2e99a1a83d267170c64d494e";

lazy_static::lazy_static! {
    pub static ref KNOWN_TOKENS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("ADA", LOVELACE);
        m.insert("LOVELACE", LOVELACE);
        m.insert("MIN", MIN_ASSET_ID);
        m
    };
}

/// Explorer base URL for the given network.
pub fn explorer_url(network: &str) -> &'static str {
    match network {
        "preprod" => "https://preprod.cardanoscan.io",
        "preview" => "https://preview.cardanoscan.io",
        _ => "https://cardanoscan.io",
    }
}

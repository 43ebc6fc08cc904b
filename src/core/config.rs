use crate::core::{constants::*, error::SwapResult, SwapError};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub wallet_url: String,
    pub aggregator_url: String,
    pub network: String,
    pub timeout_secs: u64,
    pub default_slippage_pct: f64,
    pub max_slippage_pct: f64,
    pub strict_token_names: bool,
}

impl Config {
    pub fn from_env() -> SwapResult<Self> {
        let wallet_url =
            env::var("WALLET_URL").unwrap_or_else(|_| DEFAULT_WALLET_URL.to_string());

        let aggregator_url =
            env::var("AGGREGATOR_URL").unwrap_or_else(|_| MINSWAP_AGGREGATOR_URL.to_string());

        let network = env::var("CARDANO_NETWORK").unwrap_or_else(|_| "mainnet".to_string());

        Ok(Self {
            wallet_url,
            aggregator_url,
            network,
            timeout_secs: env::var("TIMEOUT_SECS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(DEFAULT_HTTP_TIMEOUT),
            default_slippage_pct: env::var("DEFAULT_SLIPPAGE_PCT")
                .unwrap_or_default()
                .parse()
                .unwrap_or(DEFAULT_SLIPPAGE_PCT),
            max_slippage_pct: env::var("MAX_SLIPPAGE_PCT")
                .unwrap_or_default()
                .parse()
                .unwrap_or(MAX_SLIPPAGE_PCT),
            strict_token_names: env::var("STRICT_TOKEN_NAMES")
                .unwrap_or_default()
                .parse()
                .unwrap_or(false),
        })
    }

    pub fn validate(&self) -> SwapResult<()> {
        if self.wallet_url.is_empty() {
            return Err(SwapError::ConfigError(
                "Wallet URL cannot be empty".to_string(),
            ));
        }

        if self.aggregator_url.is_empty() {
            return Err(SwapError::ConfigError(
                "Aggregator URL cannot be empty".to_string(),
            ));
        }

        if self.max_slippage_pct > 100.0 {
            return Err(SwapError::ConfigError(
                "Max slippage cannot exceed 100%".to_string(),
            ));
        }

        if self.default_slippage_pct > self.max_slippage_pct {
            return Err(SwapError::ConfigError(
                "Default slippage cannot exceed max slippage".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(SwapError::ConfigError(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wallet_url: DEFAULT_WALLET_URL.to_string(),
            aggregator_url: MINSWAP_AGGREGATOR_URL.to_string(),
            network: "mainnet".to_string(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT,
            default_slippage_pct: DEFAULT_SLIPPAGE_PCT,
            max_slippage_pct: MAX_SLIPPAGE_PCT,
            strict_token_names: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_excessive_slippage() {
        let config = Config {
            max_slippage_pct: 150.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SwapError::ConfigError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_default_above_max() {
        let config = Config {
            default_slippage_pct: 5.0,
            max_slippage_pct: 1.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}

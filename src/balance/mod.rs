use crate::core::{Config, SwapResult, UnspentOutput, LOVELACE};
use log::debug;
use num_bigint::BigUint;
use num_traits::Zero;
use std::collections::BTreeMap;

/// Canonical asset id -> total quantity across the aggregated outputs.
/// Write-once per aggregation pass, read-only once returned.
pub type BalanceMap = BTreeMap<String, BigUint>;

/// Canonical asset id: the literal `"lovelace"`, or policy id + token name
/// hex with no separator.
pub fn asset_id(policy_id: &str, token_name_hex: &str) -> String {
    format!("{}{}", policy_id, token_name_hex)
}

/// Folds a wallet's UTXO set into a per-asset balance. Pure: no side
/// effects, fresh map per pass.
#[derive(Debug, Clone)]
pub struct BalanceAggregator {
    strict_token_names: bool,
}

impl BalanceAggregator {
    pub fn new() -> Self {
        Self {
            strict_token_names: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            strict_token_names: config.strict_token_names,
        }
    }

    pub fn with_strict_names(strict: bool) -> Self {
        Self {
            strict_token_names: strict,
        }
    }

    pub fn aggregate(&self, outputs: &[UnspentOutput]) -> SwapResult<BalanceMap> {
        let mut balances = BalanceMap::new();

        for output in outputs {
            let assets = &output.assets;

            if let Some(lovelace) = &assets.lovelace {
                let amount = lovelace.to_biguint()?;
                *balances
                    .entry(LOVELACE.to_string())
                    .or_insert_with(BigUint::zero) += amount;
            }

            if let Some(policy_map) = assets.multi_asset.as_ref().and_then(|m| m.map.as_ref()) {
                for (policy_id, tokens) in policy_map.entries() {
                    for (token_name, raw_amount) in tokens.entries() {
                        let name_hex = token_name.normalize(self.strict_token_names)?;
                        let amount = raw_amount.to_biguint()?;
                        *balances
                            .entry(asset_id(policy_id, &name_hex))
                            .or_insert_with(BigUint::zero) += amount;
                    }
                }
            }
        }

        debug!(
            "Aggregated {} outputs into {} asset balances",
            outputs.len(),
            balances.len()
        );

        Ok(balances)
    }
}

impl Default for BalanceAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SwapError;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn output(raw: Value) -> UnspentOutput {
        serde_json::from_value(raw).unwrap()
    }

    fn lovelace_output(reference: &str, amount: u64) -> UnspentOutput {
        output(json!({
            "reference": reference,
            "assets": {"lovelace": amount.to_string()}
        }))
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        let balances = BalanceAggregator::new().aggregate(&[]).unwrap();
        assert!(balances.is_empty());
    }

    #[test]
    fn test_lovelace_sums_across_outputs() {
        let outputs = vec![
            lovelace_output("tx0#0", 2_000_000),
            lovelace_output("tx1#0", 2_000_000),
        ];

        let balances = BalanceAggregator::new().aggregate(&outputs).unwrap();

        assert_eq!(balances.len(), 1);
        assert_eq!(balances["lovelace"], BigUint::from(4_000_000u64));
    }

    #[test]
    fn test_wrapped_byte_name_composes_asset_id() {
        let outputs = vec![output(json!({
            "reference": "tx0#0",
            "assets": {
                "multiAsset": {
                    "map": [["abc123", [[{"bytes": [0x41, 0x42]}, "5"]]]]
                }
            }
        }))];

        let balances = BalanceAggregator::new().aggregate(&outputs).unwrap();

        assert_eq!(balances.len(), 1);
        assert_eq!(balances["abc1234142"], BigUint::from(5u64));
    }

    #[test]
    fn test_differently_encoded_names_collapse_to_one_asset() {
        // Same underlying bytes "MIN" in all three encodings.
        let outputs = vec![
            output(json!({
                "reference": "tx0#0",
                "assets": {"multiAsset": {"map": {"policy0": {"4d494e": "1"}}}}
            })),
            output(json!({
                "reference": "tx1#0",
                "assets": {"multiAsset": {"map": [["policy0", [[[0x4d, 0x49, 0x4e], "2"]]]]}}
            })),
            output(json!({
                "reference": "tx2#0",
                "assets": {"multiAsset": {"map": [["policy0", [[{"bytes": [0x4d, 0x49, 0x4e]}, "3"]]]]}}
            })),
        ];

        let balances = BalanceAggregator::new().aggregate(&outputs).unwrap();

        assert_eq!(balances.len(), 1);
        assert_eq!(balances["policy04d494e"], BigUint::from(6u64));
    }

    #[test]
    fn test_both_map_shapes_aggregate_identically() {
        let as_object = vec![output(json!({
            "reference": "tx0#0",
            "assets": {"multiAsset": {"map": {"p1": {"aa": "7", "bb": "9"}}}}
        }))];
        let as_entries = vec![output(json!({
            "reference": "tx0#0",
            "assets": {"multiAsset": {"map": [["p1", [["aa", "7"], ["bb", "9"]]]]}}
        }))];

        let aggregator = BalanceAggregator::new();
        assert_eq!(
            aggregator.aggregate(&as_object).unwrap(),
            aggregator.aggregate(&as_entries).unwrap()
        );
    }

    #[test]
    fn test_mixed_lovelace_and_tokens() {
        let outputs = vec![
            output(json!({
                "reference": "tx0#0",
                "assets": {
                    "lovelace": 1_500_000,
                    "multiAsset": {"map": {"p1": {"aa": "10"}}}
                }
            })),
            output(json!({
                "reference": "tx1#0",
                "assets": {
                    "lovelace": "500000",
                    "multiAsset": {"map": {"p1": {"aa": 5}}}
                }
            })),
        ];

        let balances = BalanceAggregator::new().aggregate(&outputs).unwrap();

        assert_eq!(balances["lovelace"], BigUint::from(2_000_000u64));
        assert_eq!(balances["p1aa"], BigUint::from(15u64));
    }

    #[test]
    fn test_malformed_amount_is_a_parse_error() {
        let outputs = vec![output(json!({
            "reference": "tx0#0",
            "assets": {"multiAsset": {"map": {"p1": {"aa": "not-a-number"}}}}
        }))];

        assert!(matches!(
            BalanceAggregator::new().aggregate(&outputs),
            Err(SwapError::ParseError(_))
        ));
    }

    #[test]
    fn test_strict_mode_rejects_non_byte_wrapped_names() {
        let outputs = vec![output(json!({
            "reference": "tx0#0",
            "assets": {"multiAsset": {"map": [["p1", [[{"bytes": "garbage"}, "1"]]]]}}
        }))];

        assert!(BalanceAggregator::with_strict_names(true)
            .aggregate(&outputs)
            .is_err());
        assert!(BalanceAggregator::with_strict_names(false)
            .aggregate(&outputs)
            .is_ok());
    }

    proptest! {
        #[test]
        fn prop_lovelace_total_is_exact_sum(amounts in proptest::collection::vec(0u64..=u64::MAX / 1024, 0..32)) {
            let outputs: Vec<UnspentOutput> = amounts
                .iter()
                .enumerate()
                .map(|(i, amount)| lovelace_output(&format!("tx{}#0", i), *amount))
                .collect();

            let balances = BalanceAggregator::new().aggregate(&outputs).unwrap();
            let expected: u128 = amounts.iter().map(|a| *a as u128).sum();

            if amounts.is_empty() {
                prop_assert!(balances.is_empty());
            } else {
                prop_assert_eq!(
                    balances.get("lovelace").cloned().unwrap_or_default(),
                    BigUint::from(expected)
                );
            }
        }

        #[test]
        fn prop_aggregation_is_idempotent(amounts in proptest::collection::vec(0u64..1_000_000_000u64, 0..16)) {
            let outputs: Vec<UnspentOutput> = amounts
                .iter()
                .enumerate()
                .map(|(i, amount)| lovelace_output(&format!("tx{}#0", i), *amount))
                .collect();

            let aggregator = BalanceAggregator::new();
            prop_assert_eq!(
                aggregator.aggregate(&outputs).unwrap(),
                aggregator.aggregate(&outputs).unwrap()
            );
        }
    }
}

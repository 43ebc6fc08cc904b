use crate::core::error::{SwapError, SwapResult};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// An unspent output as returned by the wallet bridge. The reference is
/// opaque (`txhash#index`) and only ever carried, never parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnspentOutput {
    pub reference: String,
    pub assets: AssetBundle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lovelace: Option<RawAmount>,
    #[serde(
        default,
        rename = "multiAsset",
        skip_serializing_if = "Option::is_none"
    )]
    pub multi_asset: Option<MultiAsset>,
}

/// Native-token holdings of one output, wire shape of the wallet SDK
/// (`assets.multiAsset.map`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiAsset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<PolicyMap>,
}

/// Policy-keyed mapping that may arrive either as a plain JSON object or
/// as an ordered list of `[policy_id, token_map]` entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyMap {
    Entries(Vec<(String, TokenMap)>),
    Object(BTreeMap<String, TokenMap>),
}

impl PolicyMap {
    /// Shape normalization happens here and nowhere deeper: any accepted
    /// wire shape becomes an ordered sequence of (policy id, tokens) pairs.
    pub fn entries(&self) -> Vec<(&str, &TokenMap)> {
        match self {
            PolicyMap::Entries(pairs) => pairs.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            PolicyMap::Object(map) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        }
    }
}

/// Token-name-keyed mapping with the same two accepted shapes. Entry lists
/// additionally allow non-string keys (byte arrays, wrapper objects),
/// which JSON objects cannot express.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenMap {
    Entries(Vec<(TokenName, RawAmount)>),
    Object(BTreeMap<String, RawAmount>),
}

impl TokenMap {
    pub fn entries(&self) -> Vec<(TokenName, &RawAmount)> {
        match self {
            TokenMap::Entries(pairs) => pairs.iter().map(|(k, v)| (k.clone(), v)).collect(),
            TokenMap::Object(map) => map
                .iter()
                .map(|(k, v)| (TokenName::Text(k.clone()), v))
                .collect(),
        }
    }
}

/// The three wire encodings a token name arrives in, plus the node-style
/// buffer object some providers emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenName {
    Text(String),
    Bytes(Vec<u8>),
    Buffer { data: Vec<u8> },
    Wrapped { bytes: Value },
}

impl TokenName {
    /// Canonical lowercase hex form of the name. Plain strings are assumed
    /// hex-encoded already. A wrapped `bytes` field that is not
    /// byte-sequence-shaped either fails (`strict`) or falls back to its
    /// string representation.
    pub fn normalize(&self, strict: bool) -> SwapResult<String> {
        match self {
            TokenName::Text(s) => Ok(s.to_lowercase()),
            TokenName::Bytes(bytes) => Ok(hex::encode(bytes)),
            TokenName::Buffer { data } => Ok(hex::encode(data)),
            TokenName::Wrapped { bytes } => match value_as_bytes(bytes) {
                Some(decoded) => Ok(hex::encode(decoded)),
                None if strict => Err(SwapError::ParseError(format!(
                    "token name bytes are not byte-shaped: {}",
                    bytes
                ))),
                // Last-resort coercion, unvalidated. See Config::strict_token_names.
                None => Ok(coerce_to_string(bytes)),
            },
        }
    }
}

fn value_as_bytes(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
            .collect(),
        // node-style {"type": "Buffer", "data": [...]}
        Value::Object(map) => value_as_bytes(map.get("data")?),
        _ => None,
    }
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_lowercase(),
        other => other.to_string(),
    }
}

/// An asset quantity as found on the wire: integer or decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Integer(u64),
    Text(String),
}

impl RawAmount {
    pub fn to_biguint(&self) -> SwapResult<BigUint> {
        match self {
            RawAmount::Integer(n) => Ok(BigUint::from(*n)),
            RawAmount::Text(s) => s
                .trim()
                .parse::<BigUint>()
                .map_err(|e| SwapError::ParseError(format!("invalid asset amount `{}`: {}", s, e))),
        }
    }
}

/// Exact payload of `POST /aggregator/estimate`. Retained verbatim inside
/// the quote because build-tx re-derives fields from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub token_in: String,
    pub token_out: String,
    /// Input amount in smallest units, as a decimal string.
    pub amount: String,
    /// Percentage, 0.5 == 0.5%.
    pub slippage: f64,
}

/// A priced estimate, immutable once received and consumed exactly once
/// by `SwapOrchestrator::execute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapQuote {
    pub success: bool,
    /// Raw estimate response, opaque pass-through.
    pub data: Value,
    pub request: EstimateRequest,
}

impl SwapQuote {
    pub fn amount_out(&self) -> Option<&Value> {
        self.data.get("amount_out").filter(|v| !v.is_null())
    }

    /// Minimum acceptable output. Falls back to the nominal output amount
    /// when the estimate carries no explicit minimum, accepting full
    /// slippage risk by policy.
    pub fn min_amount_out(&self) -> Option<&Value> {
        self.data
            .get("min_amount_out")
            .filter(|v| !v.is_null())
            .or_else(|| self.amount_out())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildTxRequest {
    pub sender: String,
    pub min_amount_out: Value,
    pub estimate: Value,
    pub amount_in_decimal: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildTxResponse {
    pub cbor: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitTxRequest {
    pub cbor: String,
    pub witness_set: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitTxResponse {
    pub tx_id: String,
}

/// Pipeline stage of a swap. `Failed` is reachable from any state and is
/// terminal; recovery requires a fresh quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapState {
    Idle,
    Quoted,
    Built,
    Signed,
    Submitted,
    Failed,
}

impl fmt::Display for SwapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapState::Idle => write!(f, "idle"),
            SwapState::Quoted => write!(f, "quoted"),
            SwapState::Built => write!(f, "built"),
            SwapState::Signed => write!(f, "signed"),
            SwapState::Submitted => write!(f, "submitted"),
            SwapState::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapOutcome {
    pub tx_id: String,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsolidationOutcome {
    /// One or zero UTXOs: nothing to merge, no transaction was built.
    NoOp { utxo_count: usize },
    Submitted { tx_id: String, merged_inputs: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!("4142"); "plain hex string")]
    #[test_case(json!([0x41, 0x42]); "byte array")]
    #[test_case(json!({"type": "Buffer", "data": [0x41, 0x42]}); "buffer object")]
    #[test_case(json!({"bytes": [0x41, 0x42]}); "wrapped byte array")]
    #[test_case(json!({"bytes": {"type": "Buffer", "data": [0x41, 0x42]}}); "wrapped buffer object")]
    fn test_token_name_encodings_collapse(raw: Value) {
        let name: TokenName = serde_json::from_value(raw).unwrap();
        assert_eq!(name.normalize(false).unwrap(), "4142");
    }

    #[test]
    fn test_token_name_uppercase_hex_is_canonicalized() {
        let name = TokenName::Text("4D494E".to_string());
        assert_eq!(name.normalize(false).unwrap(), "4d494e");
    }

    #[test]
    fn test_wrapped_non_bytes_falls_back_to_string() {
        let name = TokenName::Wrapped {
            bytes: json!("4d494e"),
        };
        assert_eq!(name.normalize(false).unwrap(), "4d494e");
    }

    #[test]
    fn test_wrapped_non_bytes_fails_in_strict_mode() {
        let name = TokenName::Wrapped {
            bytes: json!("not-bytes"),
        };
        assert!(matches!(
            name.normalize(true),
            Err(SwapError::ParseError(_))
        ));
    }

    #[test]
    fn test_policy_map_accepts_both_shapes() {
        let object: PolicyMap = serde_json::from_value(json!({
            "abc123": {"4142": "5"}
        }))
        .unwrap();
        let entries: PolicyMap = serde_json::from_value(json!([
            ["abc123", [[[0x41, 0x42], "5"]]]
        ]))
        .unwrap();

        for shape in [object, entries] {
            let pairs = shape.entries();
            assert_eq!(pairs.len(), 1);
            assert_eq!(pairs[0].0, "abc123");
            let tokens = pairs[0].1.entries();
            assert_eq!(tokens.len(), 1);
            assert_eq!(tokens[0].0.normalize(false).unwrap(), "4142");
            assert_eq!(tokens[0].1.to_biguint().unwrap(), 5u32.into());
        }
    }

    #[test]
    fn test_raw_amount_parses_integer_and_text() {
        assert_eq!(
            RawAmount::Integer(42).to_biguint().unwrap(),
            42u32.into()
        );
        assert_eq!(
            RawAmount::Text("340282366920938463463374607431768211456".to_string())
                .to_biguint()
                .unwrap()
                .to_string(),
            "340282366920938463463374607431768211456"
        );
    }

    #[test]
    fn test_raw_amount_rejects_garbage() {
        let err = RawAmount::Text("12abc".to_string()).to_biguint();
        assert!(matches!(err, Err(SwapError::ParseError(_))));
    }

    #[test]
    fn test_min_amount_out_prefers_explicit_minimum() {
        let quote = SwapQuote {
            success: true,
            data: json!({"amount_out": "100", "min_amount_out": "95"}),
            request: EstimateRequest {
                token_in: "lovelace".to_string(),
                token_out: "abc".to_string(),
                amount: "1000000".to_string(),
                slippage: 0.5,
            },
        };
        assert_eq!(quote.min_amount_out().unwrap(), &json!("95"));
    }

    #[test]
    fn test_min_amount_out_falls_back_to_nominal() {
        let quote = SwapQuote {
            success: true,
            data: json!({"amount_out": "100", "min_amount_out": null}),
            request: EstimateRequest {
                token_in: "lovelace".to_string(),
                token_out: "abc".to_string(),
                amount: "1000000".to_string(),
                slippage: 0.5,
            },
        };
        assert_eq!(quote.min_amount_out().unwrap(), &json!("100"));
    }
}

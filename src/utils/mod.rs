use crate::core::{KNOWN_TOKENS, LOVELACE_PER_ADA, POLICY_ID_HEX_LEN};
use num_bigint::BigUint;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a token symbol or raw asset id into the canonical protocol form.
pub fn parse_token_identifier(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Common token mappings
    if let Some(asset_id) = KNOWN_TOKENS.get(trimmed.to_uppercase().as_str()) {
        return Some((*asset_id).to_string());
    }

    // Raw policy[.]name id: 28-byte policy hex, optionally followed by the
    // token name hex
    let bare = trimmed.replace('.', "").to_lowercase();
    if bare.len() >= POLICY_ID_HEX_LEN
        && bare.len() % 2 == 0
        && bare.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Some(bare);
    }

    None
}

/// Format a decimal digit string with thousands separators
pub fn group_digits(digits: &str) -> String {
    let mut result = String::new();
    let mut count = 0;

    for ch in digits.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

/// Convert a lovelace quantity to its ADA display value (six decimals).
/// `None` when the quantity exceeds what a `Decimal` can represent.
pub fn lovelace_to_ada(lovelace: &BigUint) -> Option<Decimal> {
    let raw = Decimal::from_str(&lovelace.to_string()).ok()?;
    Some((raw / Decimal::from(LOVELACE_PER_ADA)).normalize())
}

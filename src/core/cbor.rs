//! Opaque handling of the chain's binary transaction encoding. The CBOR
//! structure is defined by the Cardano transaction format and is never
//! interpreted here; blobs only move between hex and bytes.

use crate::core::error::SwapResult;

/// An unsigned transaction body, held as opaque CBOR bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    bytes: Vec<u8>,
}

impl Transaction {
    pub fn from_cbor_hex(hex_str: &str) -> SwapResult<Self> {
        Ok(Self {
            bytes: hex::decode(hex_str.trim())?,
        })
    }

    pub fn to_cbor_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Signature data accompanying a transaction, kept separate from the body
/// until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessSet {
    bytes: Vec<u8>,
}

impl WitnessSet {
    pub fn from_cbor_hex(hex_str: &str) -> SwapResult<Self> {
        Ok(Self {
            bytes: hex::decode(hex_str.trim())?,
        })
    }

    pub fn to_cbor_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SwapError;

    #[test]
    fn test_transaction_hex_round_trip() {
        let tx = Transaction::from_cbor_hex("84A300818258").unwrap();
        assert_eq!(tx.to_cbor_hex(), "84a300818258");
        assert_eq!(tx.len(), 6);
    }

    #[test]
    fn test_malformed_hex_is_a_codec_error() {
        assert!(matches!(
            Transaction::from_cbor_hex("zz"),
            Err(SwapError::CodecError(_))
        ));
        assert!(matches!(
            WitnessSet::from_cbor_hex("abc"),
            Err(SwapError::CodecError(_))
        ));
    }
}

use crate::core::{ConsolidationOutcome, SwapResult, MIN_CONSOLIDATION_INPUTS};
use crate::wallet::{SweepBuilder, WalletProvider};
use log::{debug, info};

/// Merges a fragmented UTXO set by sweeping every output back to the
/// wallet: all UTXOs become inputs, no explicit outputs are declared, and
/// the builder's change computation (inputs minus fee) packs the value
/// into the minimal number of resulting outputs.
pub struct Consolidator<W> {
    wallet: W,
}

impl<W: WalletProvider + SweepBuilder> Consolidator<W> {
    pub fn new(wallet: W) -> Self {
        Self { wallet }
    }

    pub async fn consolidate(&self) -> SwapResult<ConsolidationOutcome> {
        let utxos = self.wallet.unspent_outputs().await?;
        debug!("Wallet holds {} UTXOs", utxos.len());

        if utxos.len() < MIN_CONSOLIDATION_INPUTS {
            info!(
                "Wallet is already consolidated ({} UTXOs), nothing to do",
                utxos.len()
            );
            return Ok(ConsolidationOutcome::NoOp {
                utxo_count: utxos.len(),
            });
        }

        let tx = self.wallet.build_sweep(&utxos).await?;
        let witness_set = self.wallet.sign(&tx, &utxos).await?;
        let tx_id = self.wallet.submit(&tx, &witness_set).await?;
        info!("Consolidation submitted: {}", tx_id);

        Ok(ConsolidationOutcome::Submitted {
            tx_id,
            merged_inputs: utxos.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Transaction, UnspentOutput, WitnessSet};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingWallet {
        utxo_count: usize,
        builds: AtomicUsize,
        signs: AtomicUsize,
        submits: AtomicUsize,
    }

    impl CountingWallet {
        fn with_utxos(utxo_count: usize) -> Self {
            Self {
                utxo_count,
                builds: AtomicUsize::new(0),
                signs: AtomicUsize::new(0),
                submits: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WalletProvider for CountingWallet {
        async fn unspent_outputs(&self) -> SwapResult<Vec<UnspentOutput>> {
            Ok((0..self.utxo_count)
                .map(|i| {
                    serde_json::from_value(json!({
                        "reference": format!("tx{}#0", i),
                        "assets": {"lovelace": "1000000"}
                    }))
                    .unwrap()
                })
                .collect())
        }

        async fn address(&self) -> SwapResult<String> {
            Ok("addr1qfake".to_string())
        }

        async fn sign(
            &self,
            _tx: &Transaction,
            _utxos: &[UnspentOutput],
        ) -> SwapResult<WitnessSet> {
            self.signs.fetch_add(1, Ordering::SeqCst);
            WitnessSet::from_cbor_hex("a100")
        }
    }

    #[async_trait]
    impl SweepBuilder for CountingWallet {
        async fn build_sweep(&self, inputs: &[UnspentOutput]) -> SwapResult<Transaction> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            assert_eq!(inputs.len(), self.utxo_count);
            Transaction::from_cbor_hex("84a300")
        }

        async fn submit(
            &self,
            _tx: &Transaction,
            _witness_set: &WitnessSet,
        ) -> SwapResult<String> {
            self.submits.fetch_add(1, Ordering::SeqCst);
            Ok("feedface".to_string())
        }
    }

    #[tokio::test]
    async fn test_single_utxo_is_a_no_op() {
        let consolidator = Consolidator::new(CountingWallet::with_utxos(1));

        let outcome = consolidator.consolidate().await.unwrap();

        assert_eq!(outcome, ConsolidationOutcome::NoOp { utxo_count: 1 });
        let wallet = &consolidator.wallet;
        assert_eq!(wallet.builds.load(Ordering::SeqCst), 0);
        assert_eq!(wallet.signs.load(Ordering::SeqCst), 0);
        assert_eq!(wallet.submits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_wallet_is_a_no_op() {
        let consolidator = Consolidator::new(CountingWallet::with_utxos(0));

        let outcome = consolidator.consolidate().await.unwrap();

        assert_eq!(outcome, ConsolidationOutcome::NoOp { utxo_count: 0 });
    }

    #[tokio::test]
    async fn test_fragmented_wallet_sweeps_all_inputs() {
        let consolidator = Consolidator::new(CountingWallet::with_utxos(5));

        let outcome = consolidator.consolidate().await.unwrap();

        assert_eq!(
            outcome,
            ConsolidationOutcome::Submitted {
                tx_id: "feedface".to_string(),
                merged_inputs: 5
            }
        );
        let wallet = &consolidator.wallet;
        assert_eq!(wallet.builds.load(Ordering::SeqCst), 1);
        assert_eq!(wallet.signs.load(Ordering::SeqCst), 1);
        assert_eq!(wallet.submits.load(Ordering::SeqCst), 1);
    }
}

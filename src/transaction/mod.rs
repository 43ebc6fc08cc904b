pub mod consolidate;

pub use consolidate::Consolidator;

use crate::aggregator::{format_asset, AggregatorClient};
use crate::core::{
    BuildTxRequest, Config, EstimateRequest, SwapError, SwapOutcome, SwapQuote, SwapResult,
    SwapState, Transaction,
};
use crate::wallet::WalletProvider;
use chrono::Utc;
use log::{debug, info};
use serde_json::{json, Value};

/// Drives one swap from estimate to broadcast. Strictly sequential: each
/// stage consumes the exact byte output of the previous one, and any
/// failure transitions to `Failed` with no mid-flight recovery. A retry
/// starts over from a fresh quote.
pub struct SwapOrchestrator<W: WalletProvider> {
    wallet: W,
    aggregator: AggregatorClient,
    state: SwapState,
}

impl<W: WalletProvider> SwapOrchestrator<W> {
    pub fn new(wallet: W, aggregator: AggregatorClient) -> Self {
        Self {
            wallet,
            aggregator,
            state: SwapState::Idle,
        }
    }

    pub fn from_config(config: &Config, wallet: W) -> Self {
        Self::new(wallet, AggregatorClient::from_config(config))
    }

    pub fn state(&self) -> SwapState {
        self.state
    }

    /// Price the swap. The returned quote bundles the raw estimate response
    /// with the exact request parameters used, because `execute` re-derives
    /// build-tx fields from both rather than recomputing them.
    pub async fn quote(
        &mut self,
        from: &str,
        to: &str,
        amount: &str,
        slippage: f64,
    ) -> SwapResult<SwapQuote> {
        let request = EstimateRequest {
            token_in: format_asset(from),
            token_out: format_asset(to),
            amount: amount.to_string(),
            slippage,
        };

        info!(
            "Requesting estimate: {} {} -> {} (slippage {}%)",
            request.amount, request.token_in, request.token_out, request.slippage
        );

        match self.aggregator.estimate(&request).await {
            Ok(data) => {
                self.state = SwapState::Quoted;
                Ok(SwapQuote {
                    success: true,
                    data,
                    request,
                })
            }
            Err(e) => {
                self.state = SwapState::Failed;
                Err(e)
            }
        }
    }

    /// Execute a successful quote through build, sign and submit.
    pub async fn execute(&mut self, quote: &SwapQuote) -> SwapResult<SwapOutcome> {
        if !quote.success {
            self.state = SwapState::Failed;
            return Err(SwapError::InvalidQuote(
                "quote did not succeed; request a fresh estimate".to_string(),
            ));
        }

        match self.run_pipeline(quote).await {
            Ok(outcome) => {
                self.state = SwapState::Submitted;
                Ok(outcome)
            }
            Err(e) => {
                self.state = SwapState::Failed;
                Err(e)
            }
        }
    }

    async fn run_pipeline(&mut self, quote: &SwapQuote) -> SwapResult<SwapOutcome> {
        let sender = self.wallet.address().await?;

        let min_amount_out = quote
            .min_amount_out()
            .cloned()
            .ok_or(SwapError::MissingPayload("min_amount_out"))?;

        // The build endpoint wants the estimate body back with `amount`
        // rewritten to the original *input* amount and `slippage` restored
        // from the request, a subtly different shape than the response.
        let mut estimate = quote.data.clone();
        let fields = estimate.as_object_mut().ok_or_else(|| {
            SwapError::InvalidQuote("estimate response is not a JSON object".to_string())
        })?;
        fields.insert(
            "amount".to_string(),
            Value::String(quote.request.amount.clone()),
        );
        fields.insert("slippage".to_string(), json!(quote.request.slippage));

        let build_request = BuildTxRequest {
            sender,
            min_amount_out,
            estimate,
            amount_in_decimal: false,
        };

        let built = self.aggregator.build_tx(&build_request).await?;
        let cbor = built.cbor.ok_or(SwapError::MissingPayload("cbor"))?;
        let tx = Transaction::from_cbor_hex(&cbor)?;
        self.state = SwapState::Built;
        debug!("Built transaction ({} bytes)", tx.len());

        // The signer needs the current UTXO snapshot to recognize which
        // inputs belong to this wallet.
        let utxos = self.wallet.unspent_outputs().await?;
        let witness_set = self.wallet.sign(&tx, &utxos).await?;
        self.state = SwapState::Signed;

        let tx_id = self
            .aggregator
            .finalize_and_submit(&cbor, &witness_set.to_cbor_hex())
            .await?;
        info!("Swap submitted: {}", tx_id);

        Ok(SwapOutcome {
            tx_id,
            token_in: quote.request.token_in.clone(),
            token_out: quote.request.token_out.clone(),
            amount_in: quote.request.amount.clone(),
            timestamp: Utc::now().timestamp(),
        })
    }
}

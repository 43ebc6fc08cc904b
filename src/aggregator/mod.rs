use crate::core::{
    BuildTxRequest, BuildTxResponse, Config, EstimateRequest, SubmitTxRequest, SubmitTxResponse,
    SwapError, SwapResult, LOVELACE,
};
use log::debug;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Asset id in the form the aggregator protocol expects: the literal
/// base-unit token, otherwise bare policy+name hex with any internal
/// separator stripped.
pub fn format_asset(asset: &str) -> String {
    let trimmed = asset.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("ada")
        || trimmed.eq_ignore_ascii_case(LOVELACE)
    {
        return LOVELACE.to_string();
    }
    trimmed.replace('.', "").to_lowercase()
}

/// HTTP client for the Minswap aggregator endpoints. Every call runs under
/// a deadline; a hung remote surfaces as `SwapError::Timeout` instead of
/// blocking the pipeline.
pub struct AggregatorClient {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl AggregatorClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout_secs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.aggregator_url.clone(), config.timeout_secs)
    }

    async fn with_deadline<T, F>(&self, fut: F) -> SwapResult<T>
    where
        F: Future<Output = SwapResult<T>>,
    {
        match tokio::time::timeout(Duration::from_secs(self.timeout_secs), fut).await {
            Ok(result) => result,
            Err(_) => Err(SwapError::Timeout(self.timeout_secs)),
        }
    }

    /// Request a price estimate. The raw response body is returned as-is;
    /// downstream stages treat it as opaque.
    pub async fn estimate(&self, request: &EstimateRequest) -> SwapResult<Value> {
        let url = format!("{}/aggregator/estimate", self.base_url);
        debug!(
            "POST {} ({} -> {}, amount {})",
            url, request.token_in, request.token_out, request.amount
        );

        self.with_deadline(async {
            let response = self.client.post(&url).json(request).send().await?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(SwapError::QuoteFailed { status, body });
            }

            Ok(response.json::<Value>().await?)
        })
        .await
    }

    /// Request an unsigned transaction for a previously obtained estimate.
    pub async fn build_tx(&self, request: &BuildTxRequest) -> SwapResult<BuildTxResponse> {
        let url = format!("{}/aggregator/build-tx", self.base_url);
        debug!("POST {} (sender {})", url, request.sender);

        self.with_deadline(async {
            let response = self.client.post(&url).json(request).send().await?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(SwapError::BuildFailed { status, body });
            }

            Ok(response.json::<BuildTxResponse>().await?)
        })
        .await
    }

    /// Send the unsigned body and its witness set back for finalization and
    /// broadcast. Returns the reported transaction id.
    pub async fn finalize_and_submit(&self, cbor: &str, witness_set: &str) -> SwapResult<String> {
        let url = format!("{}/aggregator/finalize-and-submit-tx", self.base_url);
        let request = SubmitTxRequest {
            cbor: cbor.to_string(),
            witness_set: witness_set.to_string(),
        };

        self.with_deadline(async {
            let response = self.client.post(&url).json(&request).send().await?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(SwapError::SubmitFailed { status, body });
            }

            let submitted = response.json::<SubmitTxResponse>().await?;
            Ok(submitted.tx_id)
        })
        .await
    }
}

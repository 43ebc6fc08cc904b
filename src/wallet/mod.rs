use crate::core::{Config, SwapError, SwapResult, Transaction, UnspentOutput, WitnessSet};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// The three wallet capabilities the pipelines consume. Key handling and
/// connection setup live behind the bridge; the core only drives this seam.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn unspent_outputs(&self) -> SwapResult<Vec<UnspentOutput>>;

    async fn address(&self) -> SwapResult<String>;

    /// Sign an unsigned transaction. The UTXO snapshot tells the signer
    /// which of the transaction's inputs are spendable by this wallet.
    async fn sign(&self, tx: &Transaction, utxos: &[UnspentOutput]) -> SwapResult<WitnessSet>;
}

/// Builder and submitter capabilities used by consolidation: sweep a set
/// of inputs with no explicit outputs, letting the builder's change logic
/// merge the value, then broadcast through the wallet's own provider.
#[async_trait]
pub trait SweepBuilder: Send + Sync {
    async fn build_sweep(&self, inputs: &[UnspentOutput]) -> SwapResult<Transaction>;

    async fn submit(&self, tx: &Transaction, witness_set: &WitnessSet) -> SwapResult<String>;
}

#[derive(Debug, Serialize)]
struct SignRequest<'a> {
    cbor: String,
    utxos: &'a [UnspentOutput],
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    witness_set: String,
}

#[derive(Debug, Deserialize)]
struct AddressResponse {
    address: String,
}

#[derive(Debug, Serialize)]
struct SweepRequest<'a> {
    inputs: &'a [UnspentOutput],
}

#[derive(Debug, Deserialize)]
struct SweepResponse {
    cbor: Option<String>,
}

#[derive(Debug, Serialize)]
struct WalletSubmitRequest {
    cbor: String,
    witness_set: String,
}

#[derive(Debug, Deserialize)]
struct WalletSubmitResponse {
    tx_id: String,
}

/// HTTP client for the local wallet bridge daemon.
pub struct BridgeWallet {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl BridgeWallet {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout_secs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.wallet_url.clone(), config.timeout_secs)
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
}

async fn fail_on_status(response: reqwest::Response) -> SwapResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(SwapError::WalletFailed { status, body })
}

#[async_trait]
impl WalletProvider for BridgeWallet {
    async fn unspent_outputs(&self) -> SwapResult<Vec<UnspentOutput>> {
        let url = format!("{}/wallet/utxos", self.base_url);
        debug!("GET {}", url);

        self.with_deadline(async {
            let response = fail_on_status(self.client.get(&url).send().await?).await?;
            Ok(response.json::<Vec<UnspentOutput>>().await?)
        })
        .await
    }

    async fn address(&self) -> SwapResult<String> {
        let url = format!("{}/wallet/address", self.base_url);
        debug!("GET {}", url);

        self.with_deadline(async {
            let response = fail_on_status(self.client.get(&url).send().await?).await?;
            let payload = response.json::<AddressResponse>().await?;
            Ok(payload.address)
        })
        .await
    }

    async fn sign(&self, tx: &Transaction, utxos: &[UnspentOutput]) -> SwapResult<WitnessSet> {
        let url = format!("{}/wallet/sign", self.base_url);
        let request = SignRequest {
            cbor: tx.to_cbor_hex(),
            utxos,
        };
        debug!("POST {} ({} known inputs)", url, utxos.len());

        self.with_deadline(async {
            let response =
                fail_on_status(self.client.post(&url).json(&request).send().await?).await?;
            let payload = response.json::<SignResponse>().await?;
            WitnessSet::from_cbor_hex(&payload.witness_set)
        })
        .await
    }
}

#[async_trait]
impl SweepBuilder for BridgeWallet {
    async fn build_sweep(&self, inputs: &[UnspentOutput]) -> SwapResult<Transaction> {
        let url = format!("{}/wallet/sweep", self.base_url);
        let request = SweepRequest { inputs };
        debug!("POST {} ({} inputs, no explicit outputs)", url, inputs.len());

        self.with_deadline(async {
            let response =
                fail_on_status(self.client.post(&url).json(&request).send().await?).await?;
            let payload = response.json::<SweepResponse>().await?;
            match payload.cbor {
                Some(cbor) => Transaction::from_cbor_hex(&cbor),
                None => Err(SwapError::MissingPayload("cbor")),
            }
        })
        .await
    }

    async fn submit(&self, tx: &Transaction, witness_set: &WitnessSet) -> SwapResult<String> {
        let url = format!("{}/wallet/submit", self.base_url);
        let request = WalletSubmitRequest {
            cbor: tx.to_cbor_hex(),
            witness_set: witness_set.to_cbor_hex(),
        };

        self.with_deadline(async {
            let response =
                fail_on_status(self.client.post(&url).json(&request).send().await?).await?;
            let payload = response.json::<WalletSubmitResponse>().await?;
            Ok(payload.tx_id)
        })
        .await
    }
}

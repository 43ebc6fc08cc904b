use thiserror::Error;

pub type SwapResult<T> = Result<T, SwapError>;

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Quote request failed ({status}): {body}")]
    QuoteFailed { status: u16, body: String },

    #[error("Build-tx request failed ({status}): {body}")]
    BuildFailed { status: u16, body: String },

    #[error("Submit request failed ({status}): {body}")]
    SubmitFailed { status: u16, body: String },

    #[error("Wallet request failed ({status}): {body}")]
    WalletFailed { status: u16, body: String },

    #[error("Invalid quote: {0}")]
    InvalidQuote(String),

    #[error("Missing `{0}` in remote response")]
    MissingPayload(&'static str),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Codec error: {0}")]
    CodecError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timeout: operation took longer than {0} seconds")]
    Timeout(u64),

    #[error("Invalid slippage: {0}")]
    InvalidSlippage(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for SwapError {
    fn from(err: anyhow::Error) -> Self {
        SwapError::Other(err.to_string())
    }
}

impl From<reqwest::Error> for SwapError {
    fn from(err: reqwest::Error) -> Self {
        SwapError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        SwapError::SerializationError(err.to_string())
    }
}

impl From<hex::FromHexError> for SwapError {
    fn from(err: hex::FromHexError) -> Self {
        SwapError::CodecError(err.to_string())
    }
}

impl From<std::io::Error> for SwapError {
    fn from(err: std::io::Error) -> Self {
        SwapError::Other(err.to_string())
    }
}

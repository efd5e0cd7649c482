use thiserror::Error;

pub type Result<T, E = EcashError> = std::result::Result<T, E>;

/// Every way minting or depositing a coin can fail. None of these are transient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EcashError {
    #[error("invalid coin signature")]
    InvalidSignature,
    #[error("malformed coin: {0}")]
    MalformedCoin(String),
    #[error("hash mismatch at position {slot}")]
    HashMismatch { slot: usize },
    #[error("identity cannot be embedded in a share: {0}")]
    EncodingError(String),
    #[error("coin amount must be positive")]
    InvalidAmount,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

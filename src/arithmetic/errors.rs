use thiserror::Error;

/// Error type returned when conversion from hex to BigInt fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {radix}-based number representation: {input:?}")]
pub struct ParseBigIntError {
    pub(super) input: String,
    pub(super) radix: u32,
}


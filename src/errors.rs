use thiserror::Error;

/// Error type that captures ledger storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("index {index} out of bounds for ledger of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

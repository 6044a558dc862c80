use thiserror::Error;

#[derive(Debug, Error)]
pub enum FiboError {
    #[error("Please enter a positive integer")]
    InvalidBound { bound: i64 },
    #[error("Failed to write sequence")]
    Io(#[from] std::io::Error),
}

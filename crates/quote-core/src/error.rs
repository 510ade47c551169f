use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Duplicate catalog code: {0}")]
    DuplicateCode(String),

    #[error("Invalid catalog entry {code}: {reason}")]
    InvalidEntry { code: String, reason: String },
}

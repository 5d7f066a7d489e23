use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemosError>;

#[derive(Debug, Error)]
pub enum MemosError {
    #[error("Invalid column color: {0}")]
    InvalidColumnColor(String),

    #[error("Invalid card priority: {0}")]
    InvalidPriority(String),

    #[error("Card {0} appears more than once on the board")]
    DuplicateCard(String),

    #[error("Invalid node type: {0}")]
    InvalidNodeType(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

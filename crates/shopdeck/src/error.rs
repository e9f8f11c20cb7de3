use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopdeckError {
    #[error("No {kind} found with id {id}")]
    NotFound { kind: String, id: String },

    #[error("A {kind} with id {id} already exists")]
    DuplicateId { kind: String, id: String },

    #[error("Unknown value '{value}' for {dimension}")]
    UnknownCategory { dimension: String, value: String },

    #[error("Could not {action} {id}: {reason}")]
    MutationFailed {
        action: String,
        id: String,
        reason: String,
    },

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid sort: {0}")]
    InvalidSort(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Unknown entity kind '{0}'")]
    UnknownKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl ShopdeckError {
    /// Wraps a store failure as a failed mutation, keeping the original reason.
    pub fn mutation_failed(
        action: impl Into<String>,
        id: impl Into<String>,
        cause: &ShopdeckError,
    ) -> Self {
        ShopdeckError::MutationFailed {
            action: action.into(),
            id: id.into(),
            reason: cause.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShopdeckError>;

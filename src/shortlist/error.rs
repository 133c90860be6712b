use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ShortlistError {
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ShortlistError>;

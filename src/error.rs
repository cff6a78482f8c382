use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaginationError {
    #[error("Pagination Config Error: {0}")]
    Config(String),

    #[error("Invalid cursor: {0}")]
    InvalidCursor(#[from] bson::oid::Error),

    #[error("Document has no `{0}` field to use as a cursor")]
    MissingId(String),

    #[error("Error serializing record: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Error parsing config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PaginationResult<T> = std::result::Result<T, PaginationError>;

use funnelcraft_editor::TreeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored page is invalid: {0}")]
    InvalidTree(#[from] TreeError),

    #[error("Invalid page id: {0:?}")]
    InvalidPageId(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

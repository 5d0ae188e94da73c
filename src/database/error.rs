use thiserror::Error;

/// Errors raised by the artifact store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Classification '{0}' already exists in database")]
    DuplicateClassification(String),

    #[error("Store operation failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

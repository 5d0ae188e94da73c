use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Unknown query '{0}'; use 1-25 or L1-L5")]
    UnknownQuery(String),

    #[error("Query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

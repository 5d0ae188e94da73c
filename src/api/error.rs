use thiserror::Error;

/// Errors that can occur while paging through the object search endpoint
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Please enter a classification")]
    EmptyClassification,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request for page {page} failed: {source}")]
    Transport {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("Page {page} returned HTTP status {status}")]
    Status { page: u32, status: u16 },

    #[error("Page {page} is not a valid search response: {source}")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error,
    },
}

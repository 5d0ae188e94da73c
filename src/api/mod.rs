pub mod client;
pub mod error;
#[cfg(test)]
pub mod fake;
pub mod models;

pub use client::{fetch_artifacts, HarvardClient, PageSource};
pub use error::FetchError;
pub use models::RawArtifactRecord;

use std::time::Duration;

use indicatif::ProgressBar;
use reqwest::blocking::{Client, ClientBuilder};
use tracing::{debug, info};

use crate::api::error::FetchError;
use crate::api::models::{RawArtifactRecord, SearchPage};

/// Records requested per page.
pub const PAGE_SIZE: u32 = 100;

/// Anything that can serve one page of search results for a classification.
pub trait PageSource {
    fn fetch_page(&self, classification: &str, page: u32) -> Result<SearchPage, FetchError>;
}

/// Blocking client for the museum's object search endpoint.
pub struct HarvardClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HarvardClient {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, FetchError> {
        Self::with_builder(Client::builder(), endpoint, api_key, timeout)
    }

    fn with_builder(
        builder: ClientBuilder,
        endpoint: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = builder
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl PageSource for HarvardClient {
    fn fetch_page(&self, classification: &str, page: u32) -> Result<SearchPage, FetchError> {
        let size = PAGE_SIZE.to_string();
        let page_index = page.to_string();

        debug!("GET {} classification={} page={}", self.endpoint, classification, page);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("classification", classification),
                ("hasimage", "1"),
                ("size", size.as_str()),
                ("page", page_index.as_str()),
            ])
            .send()
            .map_err(|source| FetchError::Transport { page, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                page,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|source| FetchError::Transport { page, source })?;

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { page, source })
    }
}

/// Page through every search result for `classification`, starting at page 1.
///
/// Stops on the first response without `records`, keeping the records of the
/// last page that has them but no `info.next`. Any failure aborts the whole
/// fetch; nothing is retried.
pub fn fetch_artifacts<S: PageSource + ?Sized>(
    source: &S,
    classification: &str,
    progress: &ProgressBar,
) -> Result<Vec<RawArtifactRecord>, FetchError> {
    let classification = classification.trim();
    if classification.is_empty() {
        return Err(FetchError::EmptyClassification);
    }

    let mut records = Vec::new();
    let mut page = 1;

    loop {
        let response = source.fetch_page(classification, page)?;

        if let Some(total) = response.total_records() {
            progress.set_length(total);
        }

        let has_next = response.has_next();
        let Some(batch) = response.records else {
            debug!("Page {} has no records field, stopping", page);
            break;
        };

        debug!("Page {} returned {} records", page, batch.len());
        records.extend(batch);
        progress.set_position(records.len() as u64);
        progress.set_message(format!("{classification}: page {page}, {} records", records.len()));

        if !has_next {
            break;
        }
        page += 1;
    }

    info!("Fetched {} '{}' records over {} page(s)", records.len(), classification, page);
    Ok(records)
}

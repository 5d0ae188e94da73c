use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::ProgressBar;
use tracing::warn;

use crate::api::{FetchError, PageSource};
use crate::database::repo::ImportSummary;
use crate::database::{ArtifactStore, StoreError};
use crate::export::{save_csv, ResultSet};
use crate::ingest::{self, SplitTables};
use crate::query::{self, CannedQuery};

pub const NO_RESULTS: &str = "No results found for this query.";

/// The three fetched tables with their display titles and file suffixes.
pub fn table_sections(tables: &SplitTables) -> [(&'static str, &'static str, ResultSet); 3] {
    [
        ("Metadata", "metadata", ResultSet::from_rows(&tables.metadata)),
        ("Media", "media", ResultSet::from_rows(&tables.media)),
        ("Colors", "colors", ResultSet::from_rows(&tables.colors)),
    ]
}

/// Write `<classification>_<table>.csv` for every non-empty table.
pub fn export_tables(
    dir: &Path,
    classification: &str,
    tables: &SplitTables,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (_, suffix, result) in table_sections(tables) {
        if result.is_empty() {
            continue;
        }
        let stem = format!("{}_{}", classification.trim(), suffix);
        written.push(save_csv(dir, &stem, &result)?);
    }
    Ok(written)
}

/// Fails when the classification is blank or already stored.
pub fn ensure_importable(store: &ArtifactStore, classification: &str) -> Result<()> {
    let classification = classification.trim();
    if classification.is_empty() {
        return Err(FetchError::EmptyClassification.into());
    }
    if store.has_classification(classification)? {
        warn!("'{}' is already stored", classification);
        return Err(StoreError::DuplicateClassification(classification.to_string()).into());
    }
    Ok(())
}

/// Fetch a classification from `source` and import it. The store is checked
/// first so a duplicate sends no requests.
pub fn migrate<S: PageSource + ?Sized>(
    store: &mut ArtifactStore,
    source: &S,
    classification: &str,
    progress: &ProgressBar,
) -> Result<ImportSummary> {
    ensure_importable(store, classification)?;

    let (_, tables) = ingest::collect(source, classification, progress)?;
    Ok(store.import(classification, &tables)?)
}

/// Run a canned query and, when `out_dir` is set and the result has rows,
/// export it. Returns the result and the written path.
pub fn run_canned(
    store: &ArtifactStore,
    query: CannedQuery,
    out_dir: Option<&Path>,
) -> Result<(ResultSet, Option<PathBuf>)> {
    let result = query::execute(store.connection(), query)?;
    if result.is_empty() {
        return Ok((result, None));
    }

    let path = match out_dir {
        Some(dir) => Some(save_csv(dir, &query.export_stem(), &result)?),
        None => None,
    };
    Ok((result, path))
}

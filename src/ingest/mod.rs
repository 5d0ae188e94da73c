pub mod rows;
pub mod splitter;

use indicatif::ProgressBar;
use tracing::info;

use crate::api::{fetch_artifacts, FetchError, PageSource};

pub use rows::{ColorRow, MediaRow, MetadataRow};
pub use splitter::{split_records, SplitTables};

/// Fetch every record of a classification and split it into flat tables.
/// Returns the raw record count alongside the tables.
pub fn collect<S: PageSource + ?Sized>(
    source: &S,
    classification: &str,
    progress: &ProgressBar,
) -> Result<(usize, SplitTables), FetchError> {
    let records = fetch_artifacts(source, classification, progress)?;
    let tables = split_records(&records);

    info!(
        "Split {} records into {} metadata, {} media and {} color rows",
        records.len(),
        tables.metadata.len(),
        tables.media.len(),
        tables.colors.len()
    );

    Ok((records.len(), tables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{artifact_json, page_json, FakePageSource};
    use crate::database::ArtifactStore;
    use crate::export::csv::to_csv_string;
    use crate::export::ResultSet;
    use crate::query::{execute, CannedQuery};
    use rusqlite::types::Value;

    fn coins_pages() -> (FakePageSource, usize) {
        let mut expected_colors = 0;
        let mut pages = Vec::new();
        for (ids, has_next) in [(1..=100, true), (101..=200, true), (201..=250, false)] {
            let records = ids
                .map(|id: i64| {
                    let colors = (id % 4) as usize;
                    expected_colors += colors;
                    let culture = if id % 10 == 0 { None } else { Some("Byzantine") };
                    artifact_json(id, "Coins", culture, colors)
                })
                .collect();
            pages.push(page_json(records, has_next));
        }
        (FakePageSource::new(pages), expected_colors)
    }

    #[test]
    fn test_coins_end_to_end() {
        let (source, expected_colors) = coins_pages();

        let (fetched, tables) = collect(&source, "Coins", &ProgressBar::hidden()).unwrap();

        assert_eq!(fetched, 250);
        assert_eq!(tables.metadata.len(), 250);
        assert_eq!(tables.media.len(), 250);
        assert_eq!(tables.colors.len(), expected_colors);

        let csv = to_csv_string(&ResultSet::from_rows(&tables.metadata));
        assert_eq!(csv.lines().count(), 251);

        let mut store = ArtifactStore::open_in_memory().unwrap();
        store.import("Coins", &tables).unwrap();

        let missing = execute(store.connection(), CannedQuery::MissingCulture).unwrap();
        assert_eq!(missing.len(), 25);

        let total = execute(store.connection(), CannedQuery::TotalColorEntries).unwrap();
        assert_eq!(total.rows, vec![vec![Value::Integer(expected_colors as i64)]]);

        let second = store.import("Coins", &tables);
        assert!(second.is_err());
        assert_eq!(store.table_counts().unwrap().metadata, 250);
    }
}

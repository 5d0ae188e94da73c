use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{debug, info, warn};

use crate::database::error::StoreError;
use crate::database::schema::{COLORS_TABLE, MEDIA_TABLE, METADATA_TABLE, SCHEMA};
use crate::ingest::{ColorRow, MediaRow, MetadataRow, SplitTables};

/// Rows written by one successful import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub metadata: usize,
    pub media: usize,
    pub colors: usize,
}

/// Row count of each table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub metadata: i64,
    pub media: i64,
    pub colors: i64,
}

/// Owns the single SQLite connection used for a run. Dropping it closes
/// the connection.
pub struct ArtifactStore {
    conn: Connection,
}

impl ArtifactStore {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Open(format!("Failed to create directory {parent:?}: {e}"))
                })?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| StoreError::Open(format!("Failed to open database at {path}: {e}")))?;
        let store = Self { conn };
        store.ensure_schema()?;

        info!("Opened artifact store at {}", path);
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Open(format!("Failed to open in-memory database: {e}")))?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the three tables if absent. Existing tables are never altered.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Distinct classifications already present in the metadata table.
    pub fn classifications(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT classification FROM artifacts_metadata
             WHERE classification IS NOT NULL
             ORDER BY classification",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    pub fn has_classification(&self, classification: &str) -> Result<bool, StoreError> {
        let wanted = classification.trim();
        Ok(self
            .classifications()?
            .iter()
            .any(|existing| existing.trim().eq_ignore_ascii_case(wanted)))
    }

    /// Insert a freshly fetched classification. Refuses, without writing
    /// anything, when the classification is already in the store.
    pub fn import(
        &mut self,
        classification: &str,
        tables: &SplitTables,
    ) -> Result<ImportSummary, StoreError> {
        if self.has_classification(classification)? {
            warn!("Skipping import: '{}' is already stored", classification);
            return Err(StoreError::DuplicateClassification(
                classification.trim().to_string(),
            ));
        }

        let summary = ImportSummary {
            metadata: self.insert_metadata(&tables.metadata)?,
            media: self.insert_media(&tables.media)?,
            colors: self.insert_colors(&tables.colors)?,
        };

        info!(
            "Imported '{}': {} metadata, {} media, {} color rows",
            classification, summary.metadata, summary.media, summary.colors
        );
        Ok(summary)
    }

    pub fn insert_metadata(&mut self, rows: &[MetadataRow]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO artifacts_metadata (id, title, culture, period, century, medium,
                     dimensions, description, department, classification, accessionyear, accessionmethod)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;

            for row in rows {
                stmt.execute(params![
                    row.id,
                    row.title,
                    row.culture,
                    row.period,
                    row.century,
                    row.medium,
                    row.dimensions,
                    row.description,
                    row.department,
                    row.classification,
                    row.accessionyear,
                    row.accessionmethod
                ])?;
            }
        }
        tx.commit()?;

        debug!("Inserted {} rows into {}", rows.len(), METADATA_TABLE);
        Ok(rows.len())
    }

    pub fn insert_media(&mut self, rows: &[MediaRow]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO artifacts_media_1 (objectid, imagecount, mediacount, colorcount,
                     ranknum, datebegin, dateend)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;

            for row in rows {
                stmt.execute(params![
                    row.objectid,
                    row.imagecount,
                    row.mediacount,
                    row.colorcount,
                    row.ranknum,
                    row.datebegin,
                    row.dateend
                ])?;
            }
        }
        tx.commit()?;

        debug!("Inserted {} rows into {}", rows.len(), MEDIA_TABLE);
        Ok(rows.len())
    }

    pub fn insert_colors(&mut self, rows: &[ColorRow]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO artifact_colors (objectid, color, spectrum, hue, percent, css3)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;

            for row in rows {
                stmt.execute(params![
                    row.objectid,
                    row.color,
                    row.spectrum,
                    row.hue,
                    row.percent,
                    row.css3
                ])?;
            }
        }
        tx.commit()?;

        debug!("Inserted {} rows into {}", rows.len(), COLORS_TABLE);
        Ok(rows.len())
    }

    pub fn table_counts(&self) -> Result<TableCounts, StoreError> {
        let count = |table: &str| -> Result<i64, StoreError> {
            let sql = format!("SELECT COUNT(*) FROM {table}");
            Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
        };

        Ok(TableCounts {
            metadata: count(METADATA_TABLE)?,
            media: count(MEDIA_TABLE)?,
            colors: count(COLORS_TABLE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::artifact_json;
    use crate::api::RawArtifactRecord;
    use crate::ingest::split_records;

    fn tables_for(
        classification: &str,
        ids: std::ops::RangeInclusive<i64>,
        colors: usize,
    ) -> SplitTables {
        let records: Vec<RawArtifactRecord> = ids
            .map(|id| artifact_json(id, classification, Some("Roman"), colors))
            .map(|doc| serde_json::from_value(doc).unwrap())
            .collect();
        split_records(&records)
    }

    fn table_names(store: &ArtifactStore) -> Vec<String> {
        let mut stmt = store
            .connection()
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn test_schema_setup_is_idempotent() {
        let store = ArtifactStore::open_in_memory().unwrap();
        let before = table_names(&store);

        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();

        assert_eq!(table_names(&store), before);
        assert_eq!(
            before,
            vec!["artifact_colors", "artifacts_media_1", "artifacts_metadata"]
        );
    }

    #[test]
    fn test_import_writes_all_three_tables() {
        let mut store = ArtifactStore::open_in_memory().unwrap();
        let tables = tables_for("Coins", 1..=4, 3);

        let summary = store.import("Coins", &tables).unwrap();

        assert_eq!(summary, ImportSummary { metadata: 4, media: 4, colors: 12 });
        assert_eq!(
            store.table_counts().unwrap(),
            TableCounts { metadata: 4, media: 4, colors: 12 }
        );
        assert_eq!(store.classifications().unwrap(), vec!["Coins".to_string()]);
    }

    #[test]
    fn test_duplicate_classification_leaves_store_unchanged() {
        let mut store = ArtifactStore::open_in_memory().unwrap();
        store.import("Coins", &tables_for("Coins", 1..=3, 2)).unwrap();
        let before = store.table_counts().unwrap();

        let err = store
            .import("coins ", &tables_for("Coins", 100..=110, 1))
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateClassification(ref name) if name == "coins"));
        assert_eq!(store.table_counts().unwrap(), before);
    }

    #[test]
    fn test_other_classification_is_accepted() {
        let mut store = ArtifactStore::open_in_memory().unwrap();
        store.import("Coins", &tables_for("Coins", 1..=2, 0)).unwrap();

        store.import("Vessels", &tables_for("Vessels", 3..=5, 1)).unwrap();

        assert_eq!(
            store.classifications().unwrap(),
            vec!["Coins".to_string(), "Vessels".to_string()]
        );
        assert_eq!(store.table_counts().unwrap().colors, 3);
    }

    #[test]
    fn test_nulls_are_stored_as_null() {
        let mut store = ArtifactStore::open_in_memory().unwrap();
        let records: Vec<RawArtifactRecord> =
            vec![serde_json::from_value(artifact_json(9, "Coins", None, 0)).unwrap()];
        store.import("Coins", &split_records(&records)).unwrap();

        let null_cultures: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM artifacts_metadata WHERE culture IS NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(null_cultures, 1);
    }

    #[test]
    fn test_failed_batch_is_rolled_back() {
        let mut store = ArtifactStore::open_in_memory().unwrap();
        let mut tables = tables_for("Coins", 1..=3, 0);
        let duplicate = tables.metadata[0].clone();
        tables.metadata.push(duplicate);

        assert!(store.insert_metadata(&tables.metadata).is_err());
        assert_eq!(store.table_counts().unwrap().metadata, 0);
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = std::env::temp_dir()
            .join(format!("artifact-harvest-store-{}", std::process::id()));
        let path = dir.join("nested").join("artifacts.db");
        let path_str = path.to_string_lossy().to_string();

        {
            let store = ArtifactStore::open(&path_str).unwrap();
            assert_eq!(store.table_counts().unwrap(), TableCounts::default());
        }
        assert!(path.exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

use rusqlite::types::Value;
use rusqlite::Connection;
use tracing::debug;

use crate::export::table::ResultSet;
use crate::query::catalog::CannedQuery;
use crate::query::error::QueryError;

/// Run one canned query and collect every row with its column names.
pub fn execute(conn: &Connection, query: CannedQuery) -> Result<ResultSet, QueryError> {
    debug!("Running query {}", query);

    let mut stmt = conn.prepare(query.sql())?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let width = columns.len();

    let rows = stmt
        .query_map([], |row| {
            (0..width)
                .map(|idx| row.get::<_, Value>(idx))
                .collect::<Result<Vec<_>, _>>()
        })?
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Query {} returned {} rows", query.key(), rows.len());
    Ok(ResultSet { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::artifact_json;
    use crate::api::RawArtifactRecord;
    use crate::database::ArtifactStore;
    use crate::ingest::split_records;
    use serde_json::json;

    fn store_with(records: Vec<serde_json::Value>) -> ArtifactStore {
        let records: Vec<RawArtifactRecord> = records
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect();
        let mut store = ArtifactStore::open_in_memory().unwrap();
        store.import("Coins", &split_records(&records)).unwrap();
        store
    }

    fn texts(result: &ResultSet, column: &str) -> Vec<String> {
        result
            .column(column)
            .unwrap()
            .into_iter()
            .filter_map(|v| match v {
                Value::Text(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_unique_cultures_skips_null() {
        let store = store_with(vec![
            artifact_json(1, "Coins", Some("Byzantine"), 0),
            artifact_json(2, "Coins", Some("Byzantine"), 0),
            artifact_json(3, "Coins", Some("Roman"), 0),
            artifact_json(4, "Coins", None, 0),
        ]);

        let result = execute(store.connection(), CannedQuery::UniqueCultures).unwrap();

        assert_eq!(result.columns, vec!["culture".to_string()]);
        assert_eq!(result.len(), 2);
        let mut cultures = texts(&result, "culture");
        cultures.sort();
        assert_eq!(cultures, vec!["Byzantine".to_string(), "Roman".to_string()]);
    }

    #[test]
    fn test_missing_culture_matches_null_and_empty() {
        let store = store_with(vec![
            artifact_json(1, "Coins", Some("Roman"), 0),
            artifact_json(2, "Coins", None, 0),
            artifact_json(3, "Coins", Some(""), 0),
        ]);

        let result = execute(store.connection(), CannedQuery::MissingCulture).unwrap();

        let ids: Vec<&Value> = result.column("id").unwrap();
        assert_eq!(ids, vec![&Value::Integer(2), &Value::Integer(3)]);
    }

    #[test]
    fn test_grey_top_ten_orders_by_rank() {
        let records = (1..=15)
            .rev()
            .map(|id| artifact_json(id, "Coins", None, 1))
            .collect();
        let store = store_with(records);

        let result = execute(store.connection(), CannedQuery::TopRankedGreyArtifacts).unwrap();

        assert_eq!(result.columns, vec!["title", "ranknum", "hue"]);
        assert_eq!(result.len(), 10);
        assert_eq!(result.rows[0][1], Value::Integer(1));
        assert_eq!(result.rows[9][1], Value::Integer(10));
    }

    #[test]
    fn test_media_without_color() {
        let store = store_with(vec![
            artifact_json(1, "Coins", None, 2),
            artifact_json(2, "Coins", None, 0),
        ]);

        let result = execute(store.connection(), CannedQuery::MediaWithoutColor).unwrap();

        assert_eq!(result.rows, vec![vec![Value::Integer(2), Value::Text("Artifact 2".into())]]);
    }

    #[test]
    fn test_colors_of_fixed_artifact() {
        let store = store_with(vec![
            artifact_json(227994, "Coins", None, 3),
            artifact_json(5, "Coins", None, 4),
        ]);

        let result = execute(store.connection(), CannedQuery::ColorsOfArtifact).unwrap();

        assert_eq!(result.columns, vec!["color", "spectrum", "hue", "percent", "css3"]);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_aggregate_columns_are_named() {
        let store = store_with(vec![
            json!({ "id": 1, "department": "Coins", "mediacount": 0 }),
            json!({ "id": 2, "department": "Coins", "mediacount": 3 }),
        ]);

        let result = execute(store.connection(), CannedQuery::WithoutMediaFiles).unwrap();

        assert_eq!(result.columns, vec!["artifacts_without_media"]);
        assert_eq!(result.rows, vec![vec![Value::Integer(1)]]);
    }

    #[test]
    fn test_empty_store_returns_no_rows() {
        let store = ArtifactStore::open_in_memory().unwrap();

        for query in [
            CannedQuery::DistinctHues,
            CannedQuery::ArchaicPeriod,
            CannedQuery::TitlesWithHues,
        ] {
            let result = execute(store.connection(), query).unwrap();
            assert!(result.is_empty());
            assert!(!result.columns.is_empty());
        }
    }
}

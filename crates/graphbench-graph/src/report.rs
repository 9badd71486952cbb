//! JSON result and stat files.
//!
//! Every benchmark query writes two files named after the query: the
//! records it returned under the results directory, and its timing under the
//! stats directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One returned record, keyed by the query's record keys.
pub type Record = Map<String, Value>;

/// Records returned by a query, together with the Cypher that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFile {
    pub query: String,
    pub records: Vec<Record>,
    pub size: usize,
}

impl ResultFile {
    pub fn new(query: impl Into<String>, records: Vec<Record>) -> Self {
        let size = records.len();
        Self {
            query: query.into(),
            records,
            size,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }
}

/// Timing of a single benchmark query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatFile {
    pub query: String,
    pub graph: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: f64,
    pub size: usize,
}

impl StatFile {
    pub fn write(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }
}

/// Serialize `value` to `path`, creating parent directories.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let data = serde_json::to_string(value).context("Failed to serialize JSON")?;
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Pull the `keys` columns out of a Neo4j row.
pub fn row_to_record(row: &neo4rs::Row, keys: &[&str]) -> Result<Record> {
    let mut record = Record::new();
    for key in keys {
        let value: Value = row
            .get(key)
            .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", key, e))?;
        record.insert((*key).to_string(), value);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_file_shape() {
        let mut record = Record::new();
        record.insert("node".to_string(), json!("4:abc:12"));
        record.insert("degree".to_string(), json!(3));

        let result = ResultFile::new("MATCH (n) RETURN n", vec![record]);
        assert_eq!(result.size, 1);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "query": "MATCH (n) RETURN n",
                "records": [{ "node": "4:abc:12", "degree": 3 }],
                "size": 1
            })
        );
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results").join("roadNet").join("Filter.json");

        ResultFile::new("MATCH (n) RETURN n", Vec::new())
            .write(&path)
            .unwrap();

        let written: ResultFile =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.size, 0);
        assert!(written.records.is_empty());
    }

    #[test]
    fn test_stat_file_uses_camel_case() {
        let stat = StatFile {
            query: "Recurs".to_string(),
            graph: "mooc".to_string(),
            started_at: DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            elapsed_ms: 12.5,
            size: 7,
        };

        let value = serde_json::to_value(&stat).unwrap();
        assert_eq!(value["query"], "Recurs");
        assert_eq!(value["startedAt"], "2024-05-01T10:00:00Z");
        assert_eq!(value["elapsedMs"], 12.5);
        assert_eq!(value["size"], 7);
    }
}

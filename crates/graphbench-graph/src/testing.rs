//! Test doubles shared by the unit tests.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::report::Record;
use crate::CypherExecutor;

/// Records every statement it is handed instead of talking to Neo4j.
///
/// Queries answer with a single record whose columns are all null.
#[derive(Default)]
pub struct RecordingExecutor {
    statements: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingExecutor {
    /// Reject any statement containing `fragment`.
    pub fn failing_on(fragment: &str) -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            fail_on: Some(fragment.to_string()),
        }
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    fn record(&self, cypher: &str) -> Result<()> {
        self.statements.lock().unwrap().push(cypher.to_string());
        match &self.fail_on {
            Some(fragment) if cypher.contains(fragment.as_str()) => {
                bail!("statement rejected: {fragment}")
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CypherExecutor for RecordingExecutor {
    async fn run_cypher(&self, cypher: &str) -> Result<()> {
        self.record(cypher)
    }

    async fn fetch_records(&self, cypher: &str, keys: &[&str]) -> Result<Vec<Record>> {
        self.record(cypher)?;
        let record = keys
            .iter()
            .map(|key| ((*key).to_string(), Value::Null))
            .collect();
        Ok(vec![record])
    }
}

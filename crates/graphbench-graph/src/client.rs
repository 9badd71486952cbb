//! Neo4j connection client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use graphbench_core::cypher::ident;
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::report::{row_to_record, Record};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "neo4j://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "neo4jtest".to_string(),
            database: "neo4j".to_string(),
        }
    }
}

/// Client for loading datasets and running benchmark queries.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// `Graph::connect` only builds the pool, so a `RETURN 1` ping forces the
    /// bolt handshake and lets callers put a timeout around this.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(2)
            .fetch_size(1000)
            .build()
            .context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .context("Neo4j is not responding to queries")?;

        Ok(Self { graph })
    }

    /// Execute a Cypher statement that returns no results.
    pub async fn execute(&self, query: Query) -> Result<()> {
        self.graph
            .run(query)
            .await
            .context("Neo4j query execution failed")?;
        Ok(())
    }

    /// Execute a Cypher statement given as text.
    pub async fn execute_text(&self, cypher: &str) -> Result<()> {
        self.execute(Query::new(cypher.to_string())).await
    }

    /// Execute a Cypher query and return results as rows.
    pub async fn query(&self, query: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self
            .graph
            .execute(query)
            .await
            .context("Neo4j query failed")?;

        let mut rows = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .context("Failed to fetch Neo4j result row")?
        {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(
        &self,
        query: Query,
        field: &str,
    ) -> Result<Option<T>> {
        let rows = self.query(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let val: T = row
                .get(field)
                .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", field, e))?;
            Ok(Some(val))
        } else {
            Ok(None)
        }
    }

    /// Count nodes with `node_label` and relationships with `edge_label`.
    ///
    /// Without labels, counts everything in the database.
    pub async fn get_counts(
        &self,
        node_label: Option<&str>,
        edge_label: Option<&str>,
    ) -> Result<GraphCounts> {
        let node_pattern = match node_label {
            Some(label) => format!("(n:{})", ident(label)?),
            None => "(n)".to_string(),
        };
        let rel_pattern = match edge_label {
            Some(label) => format!("()-[r:{}]->()", ident(label)?),
            None => "()-[r]->()".to_string(),
        };

        let node_query = Query::new(format!("MATCH {node_pattern} RETURN count(n) AS count"));
        let rel_query = Query::new(format!("MATCH {rel_pattern} RETURN count(r) AS count"));

        let node_count: i64 = self.query_scalar(node_query, "count").await?.unwrap_or(0);
        let rel_count: i64 = self.query_scalar(rel_query, "count").await?.unwrap_or(0);

        Ok(GraphCounts {
            nodes: node_count as usize,
            relationships: rel_count as usize,
        })
    }
}

/// Runs Cypher text on behalf of the loaders and the query runner.
#[async_trait]
pub trait CypherExecutor: Send + Sync {
    /// Run a statement and discard its result.
    async fn run_cypher(&self, cypher: &str) -> Result<()>;

    /// Run a query and pull the `keys` columns out of every row.
    async fn fetch_records(&self, cypher: &str, keys: &[&str]) -> Result<Vec<Record>>;
}

#[async_trait]
impl CypherExecutor for GraphClient {
    async fn run_cypher(&self, cypher: &str) -> Result<()> {
        self.execute_text(cypher).await
    }

    async fn fetch_records(&self, cypher: &str, keys: &[&str]) -> Result<Vec<Record>> {
        let rows = self.query(Query::new(cypher.to_string())).await?;
        rows.iter().map(|row| row_to_record(row, keys)).collect()
    }
}

/// Node and relationship counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
}

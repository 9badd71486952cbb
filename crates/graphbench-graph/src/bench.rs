//! Benchmark query runner.
//!
//! Runs the fixed query menu against a loaded dataset. A failing query is
//! logged and recorded in the outcome list; the remaining queries still run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use graphbench_core::cypher;
use graphbench_core::{BenchPlan, BenchQuery, DatasetConfig, GraphName};
use tracing::{error, info, warn};

use crate::report::{ResultFile, StatFile};
use crate::{index, CypherExecutor};

/// What happened to one benchmark query.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeStatus {
    Completed { size: usize, elapsed_ms: f64 },
    /// The config has no section for this query.
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub kind: BenchQuery,
    pub status: OutcomeStatus,
}

impl QueryOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed(_))
    }
}

/// Where result and stat files for one graph are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub results_dir: PathBuf,
    pub stats_dir: PathBuf,
}

impl OutputDirs {
    /// `<results_root>/<graphName>/` and `<stats_root>/<graphName>/`.
    pub fn new(results_root: &Path, stats_root: &Path, graph: GraphName) -> Self {
        Self {
            results_dir: results_root.join(graph.as_str()),
            stats_dir: stats_root.join(graph.as_str()),
        }
    }

    pub fn result_path(&self, kind: BenchQuery) -> PathBuf {
        self.results_dir.join(kind.file_name())
    }

    pub fn stat_path(&self, kind: BenchQuery) -> PathBuf {
        self.stats_dir.join(kind.file_name())
    }
}

pub struct QueryRunner<'a> {
    executor: &'a dyn CypherExecutor,
    config: &'a DatasetConfig,
    output: OutputDirs,
}

impl<'a> QueryRunner<'a> {
    pub fn new(
        executor: &'a dyn CypherExecutor,
        config: &'a DatasetConfig,
        output: OutputDirs,
    ) -> Self {
        Self {
            executor,
            config,
            output,
        }
    }

    pub fn output(&self) -> &OutputDirs {
        &self.output
    }

    /// Run every benchmark query in menu order.
    pub async fn run_all(&self) -> Vec<QueryOutcome> {
        let mut outcomes = Vec::with_capacity(BenchQuery::ALL.len());
        for kind in BenchQuery::ALL {
            outcomes.push(self.run_one(kind).await);
        }
        outcomes
    }

    /// Run one benchmark query; errors are logged, not returned.
    pub async fn run_one(&self, kind: BenchQuery) -> QueryOutcome {
        let status = match self.try_run(kind).await {
            Ok(Some(stat)) => OutcomeStatus::Completed {
                size: stat.size,
                elapsed_ms: stat.elapsed_ms,
            },
            Ok(None) => {
                warn!(query = %kind, section = kind.config_key(), "No config section, skipping");
                OutcomeStatus::Skipped
            }
            Err(e) => {
                error!(query = %kind, error = %format!("{e:#}"), "Benchmark query failed");
                OutcomeStatus::Failed(format!("{e:#}"))
            }
        };
        QueryOutcome { kind, status }
    }

    async fn try_run(&self, kind: BenchQuery) -> Result<Option<StatFile>> {
        let Some(plan) = cypher::plan(kind, self.config)? else {
            return Ok(None);
        };
        self.execute(&plan).await.map(Some)
    }

    async fn execute(&self, plan: &BenchPlan) -> Result<StatFile> {
        index::ensure_indexes(self.executor, &plan.indexes).await?;

        for statement in &plan.setup {
            info!(query = %plan.kind, cypher = %statement, "Running setup statement");
            self.executor.run_cypher(statement).await?;
        }

        info!(query = %plan.kind, cypher = %plan.query.text, "Running benchmark query");
        let started_at = Utc::now();
        let timer = Instant::now();
        let records = self
            .executor
            .fetch_records(&plan.query.text, &plan.query.keys)
            .await?;
        let elapsed_ms = timer.elapsed().as_secs_f64() * 1000.0;

        let result = ResultFile::new(plan.query.text.clone(), records);
        result.write(&self.output.result_path(plan.kind))?;

        let stat = StatFile {
            query: plan.kind.name().to_string(),
            graph: self.config.graph_name.to_string(),
            started_at,
            elapsed_ms,
            size: result.size,
        };
        stat.write(&self.output.stat_path(plan.kind))?;

        info!(query = %plan.kind, size = stat.size, elapsed_ms, "Benchmark query finished");
        Ok(stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingExecutor;

    fn road_net_config() -> DatasetConfig {
        serde_json::from_str(
            r#"{ "graphName": "roadNet", "NodeLabel": "Road", "EdgeLabel": "ROAD",
                 "queryFilter": { "nodeLabel": "Road", "fieldName": "Node Id", "value": 10 },
                 "queryFilterSum": { "nodeLabel": "Road" },
                 "queryShortestPath": { "fromNodeLabel": "Road", "toNodeLabel": "Road",
                                        "fromFieldName": "NodeId", "toFieldName": "NodeId",
                                        "fromValue": 0, "toValue": 9, "pathLengthLimit": 5 },
                 "queryRecurs": { "fromLabel": "Road", "fromFieldName": "NodeId", "fromValue": 0,
                                  "edgeLabel": "ROAD", "fieldName": "NodeId", "value": 3,
                                  "depth": 2 },
                 "queryTriangles": { "nodeLabel": "Road", "edgeLabel": "ROAD" } }"#,
        )
        .unwrap()
    }

    fn statuses(outcomes: &[QueryOutcome]) -> Vec<(BenchQuery, &'static str)> {
        outcomes
            .iter()
            .map(|o| {
                let status = match o.status {
                    OutcomeStatus::Completed { .. } => "completed",
                    OutcomeStatus::Skipped => "skipped",
                    OutcomeStatus::Failed(_) => "failed",
                };
                (o.kind, status)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_run_all_keeps_going_after_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = road_net_config();
        let executor = RecordingExecutor::default();
        let output = OutputDirs::new(
            &dir.path().join("results"),
            &dir.path().join("stats"),
            config.graph_name,
        );
        let runner = QueryRunner::new(&executor, &config, output);

        let outcomes = runner.run_all().await;

        assert_eq!(
            statuses(&outcomes),
            vec![
                (BenchQuery::Filter, "failed"),
                (BenchQuery::FilterExt, "skipped"),
                (BenchQuery::FilterSum, "completed"),
                (BenchQuery::ShortestPath, "completed"),
                (BenchQuery::Recurs, "completed"),
                (BenchQuery::Triangles, "completed"),
            ]
        );
        match &outcomes[0].status {
            OutcomeStatus::Failed(reason) => assert!(reason.contains("Node Id")),
            other => panic!("expected a failure, got {other:?}"),
        }

        let statements = executor.statements();
        assert_eq!(statements.len(), 4);
        assert!(statements[3].contains("MATCH (n:Road_triangle)"));

        let triangles = runner.output().result_path(BenchQuery::Triangles);
        let result: ResultFile =
            serde_json::from_str(&std::fs::read_to_string(triangles).unwrap()).unwrap();
        assert_eq!(result.size, 1);
        assert!(!runner.output().result_path(BenchQuery::Filter).exists());
    }

    #[tokio::test]
    async fn test_run_one_writes_stat_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = road_net_config();
        let executor = RecordingExecutor::default();
        let output = OutputDirs::new(
            &dir.path().join("results"),
            &dir.path().join("stats"),
            config.graph_name,
        );
        let runner = QueryRunner::new(&executor, &config, output);

        let outcome = runner.run_one(BenchQuery::Recurs).await;
        assert!(matches!(outcome.status, OutcomeStatus::Completed { size: 1, .. }));

        let stat_path = dir.path().join("stats").join("roadNet").join("Recurs.json");
        let stat: StatFile =
            serde_json::from_str(&std::fs::read_to_string(stat_path).unwrap()).unwrap();
        assert_eq!(stat.query, "Recurs");
        assert_eq!(stat.graph, "roadNet");
        assert_eq!(stat.size, 1);
    }

    #[tokio::test]
    async fn test_database_error_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let config = road_net_config();
        let executor = RecordingExecutor::failing_on("shortestPath");
        let output = OutputDirs::new(
            &dir.path().join("results"),
            &dir.path().join("stats"),
            config.graph_name,
        );
        let runner = QueryRunner::new(&executor, &config, output);

        let outcomes = runner.run_all().await;

        assert!(outcomes[3].is_failed());
        assert!(!outcomes[4].is_failed());
        assert!(!outcomes[5].is_failed());
        assert!(!runner.output().stat_path(BenchQuery::ShortestPath).exists());
    }

    #[test]
    fn test_output_paths_are_per_graph() {
        let output =
            OutputDirs::new(Path::new("results"), Path::new("stats"), GraphName::StableCoin);
        assert_eq!(
            output.result_path(BenchQuery::FilterSum),
            PathBuf::from("results/stableCoin/FilterSum.json")
        );
        assert_eq!(
            output.stat_path(BenchQuery::Triangles),
            PathBuf::from("stats/stableCoin/Triangles.json")
        );
    }

    #[test]
    fn test_outcome_failed() {
        let failed = QueryOutcome {
            kind: BenchQuery::Recurs,
            status: OutcomeStatus::Failed("timeout".to_string()),
        };
        assert!(failed.is_failed());

        let skipped = QueryOutcome {
            kind: BenchQuery::Recurs,
            status: OutcomeStatus::Skipped,
        };
        assert!(!skipped.is_failed());
    }
}

//! Index creation and removal.

use anyhow::{Context, Result};
use graphbench_core::IndexSpec;
use tracing::{debug, info};

use crate::CypherExecutor;

/// Create an index if it does not exist and wait until it is online.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn ensure_index(executor: &dyn CypherExecutor, index: &IndexSpec) -> Result<()> {
    let statement = index.create_statement();
    debug!(cypher = %statement, "Creating index");
    executor
        .run_cypher(&statement)
        .await
        .with_context(|| format!("Failed to create index {}", index.name()))?;

    let statement = index.await_statement();
    debug!(cypher = %statement, "Waiting for index");
    executor
        .run_cypher(&statement)
        .await
        .with_context(|| format!("Index {} did not come online", index.name()))?;

    info!(index = %index.name(), "Index ready");
    Ok(())
}

/// Drop an index if it exists.
pub async fn drop_index(executor: &dyn CypherExecutor, index: &IndexSpec) -> Result<()> {
    let statement = index.drop_statement();
    debug!(cypher = %statement, "Dropping index");
    executor
        .run_cypher(&statement)
        .await
        .with_context(|| format!("Failed to drop index {}", index.name()))?;

    info!(index = %index.name(), "Index dropped");
    Ok(())
}

/// Create several indexes in order.
pub async fn ensure_indexes(executor: &dyn CypherExecutor, indexes: &[IndexSpec]) -> Result<()> {
    for index in indexes {
        ensure_index(executor, index).await?;
    }
    Ok(())
}

/// Drop several indexes in order.
pub async fn drop_indexes(executor: &dyn CypherExecutor, indexes: &[IndexSpec]) -> Result<()> {
    for index in indexes {
        drop_index(executor, index).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingExecutor;
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn test_ensure_index_creates_then_awaits() {
        let executor = RecordingExecutor::default();
        let index = IndexSpec::node("Road", "NodeId").unwrap();

        ensure_index(&executor, &index).await.unwrap();

        assert_eq!(
            executor.statements(),
            vec![
                "CREATE INDEX Road_NodeId_index IF NOT EXISTS FOR (n:Road) ON (n.NodeId)",
                "CALL db.awaitIndex('Road_NodeId_index')",
            ]
        );
        assert!(logs_contain("CALL db.awaitIndex('Road_NodeId_index')"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_drop_index_is_logged() {
        let executor = RecordingExecutor::default();
        let index = IndexSpec::edge("Action", "ACTIONID").unwrap();

        drop_index(&executor, &index).await.unwrap();

        assert_eq!(executor.statements(), vec!["DROP INDEX Action_ACTIONID_index IF EXISTS"]);
        assert!(logs_contain("DROP INDEX Action_ACTIONID_index IF EXISTS"));
    }

    #[tokio::test]
    async fn test_failure_names_the_index() {
        let executor = RecordingExecutor::failing_on("awaitIndex");
        let index = IndexSpec::node("Road", "NodeId").unwrap();

        let err = ensure_index(&executor, &index).await.unwrap_err();
        assert_eq!(err.to_string(), "Index Road_NodeId_index did not come online");
    }
}

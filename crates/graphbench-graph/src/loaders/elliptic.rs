//! Elliptic bitcoin transaction graph.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use graphbench_core::cypher::load;
use graphbench_core::{DatasetConfig, GraphName, IndexSpec};

use super::{run_statements, DatasetLoader};
use crate::{index, CypherExecutor};

pub struct EllipticLoader {
    executor: Arc<dyn CypherExecutor>,
    tx_label: String,
    edge_label: String,
}

impl EllipticLoader {
    pub fn new(executor: Arc<dyn CypherExecutor>, config: &DatasetConfig) -> Result<Self> {
        Ok(Self {
            executor,
            tx_label: config.label("TransactionLabel")?.to_string(),
            edge_label: config.label("EdgeLabel")?.to_string(),
        })
    }

    fn indexes(&self) -> Result<Vec<IndexSpec>> {
        Ok(vec![IndexSpec::node(&self.tx_label, "txId")?])
    }
}

#[async_trait]
impl DatasetLoader for EllipticLoader {
    fn graph(&self) -> GraphName {
        GraphName::Elliptic
    }

    fn counted_labels(&self) -> (&str, &str) {
        (&self.tx_label, &self.edge_label)
    }

    async fn create_index(&self) -> Result<()> {
        index::ensure_indexes(self.executor.as_ref(), &self.indexes()?).await
    }

    async fn create_data(&self) -> Result<()> {
        let statements = load::elliptic_create(&self.tx_label, &self.edge_label)?;
        run_statements(self.executor.as_ref(), "elliptic create", &statements).await
    }

    async fn delete_index(&self) -> Result<()> {
        index::drop_indexes(self.executor.as_ref(), &self.indexes()?).await
    }

    async fn delete_data(&self) -> Result<()> {
        let statements = load::elliptic_delete(&self.tx_label)?;
        run_statements(self.executor.as_ref(), "elliptic delete", &statements).await
    }
}

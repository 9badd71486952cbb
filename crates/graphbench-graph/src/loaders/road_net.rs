//! California road network (SNAP roadNet-CA).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use graphbench_core::cypher::load;
use graphbench_core::preprocess;
use graphbench_core::{DatasetConfig, GraphName, IndexSpec};
use tracing::info;

use super::{run_statements, DatasetLoader};
use crate::{index, CypherExecutor};

pub struct RoadNetLoader {
    executor: Arc<dyn CypherExecutor>,
    node_label: String,
    edge_label: String,
    edge_list: PathBuf,
}

impl RoadNetLoader {
    pub fn new(
        executor: Arc<dyn CypherExecutor>,
        config: &DatasetConfig,
        import_dir: &Path,
    ) -> Result<Self> {
        Ok(Self {
            executor,
            node_label: config.label("NodeLabel")?.to_string(),
            edge_label: config.label("EdgeLabel")?.to_string(),
            edge_list: import_dir.join(load::ROAD_NET_DIR).join(load::ROAD_NET_FILE),
        })
    }

    fn indexes(&self) -> Result<Vec<IndexSpec>> {
        Ok(vec![IndexSpec::node(&self.node_label, "NodeId")?])
    }
}

#[async_trait]
impl DatasetLoader for RoadNetLoader {
    fn graph(&self) -> GraphName {
        GraphName::RoadNet
    }

    fn counted_labels(&self) -> (&str, &str) {
        (&self.node_label, &self.edge_label)
    }

    async fn create_index(&self) -> Result<()> {
        index::ensure_indexes(self.executor.as_ref(), &self.indexes()?).await
    }

    async fn create_data(&self) -> Result<()> {
        let input = self.edge_list.clone();
        let result = tokio::task::spawn_blocking(move || preprocess::normalize_edge_list(&input))
            .await?
            .with_context(|| format!("Failed to preprocess {}", self.edge_list.display()))?;
        info!(rows = result.rows, output = %result.output.display(), "roadNet editing done");

        let statements = load::road_net_create(&self.node_label, &self.edge_label)?;
        run_statements(self.executor.as_ref(), "roadNet create", &statements).await
    }

    async fn delete_index(&self) -> Result<()> {
        index::drop_indexes(self.executor.as_ref(), &self.indexes()?).await
    }

    async fn delete_data(&self) -> Result<()> {
        let statements = load::road_net_delete(&self.node_label, &self.edge_label)?;
        run_statements(self.executor.as_ref(), "roadNet delete", &statements).await
    }
}

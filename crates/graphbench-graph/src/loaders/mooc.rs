//! MOOC user-action graph.
//!
//! The raw TSV files carry action ids that do not line up across files, so
//! they are renumbered before loading.

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

pub struct MoocLoader {
    executor: Arc<dyn CypherExecutor>,
    user_label: String,
    target_label: String,
    action_label: String,
    data_dir: PathBuf,
}

impl MoocLoader {
    pub fn new(
        executor: Arc<dyn CypherExecutor>,
        config: &DatasetConfig,
        import_dir: &Path,
    ) -> Result<Self> {
        Ok(Self {
            executor,
            user_label: config.label("UserLabel")?.to_string(),
            target_label: config.label("TargetLabel")?.to_string(),
            action_label: config.label("ActionLabel")?.to_string(),
            data_dir: import_dir.join(load::MOOC_DIR),
        })
    }

    fn indexes(&self) -> Result<Vec<IndexSpec>> {
        Ok(vec![
            IndexSpec::node(&self.user_label, "USERID")?,
            IndexSpec::node(&self.target_label, "TARGETID")?,
            IndexSpec::edge(&self.action_label, "ACTIONID")?,
        ])
    }

    /// Write the `_edit.csv` copies that the load statements read.
    async fn preprocess(&self) -> Result<()> {
        for file in [
            load::MOOC_ACTION_LABELS,
            load::MOOC_ACTION_FEATURES,
            load::MOOC_ACTIONS,
        ] {
            let path = self.data_dir.join(file);
            let input = path.clone();
            let result = tokio::task::spawn_blocking(move || preprocess::renumber_actions(&input))
                .await?
                .with_context(|| format!("Failed to preprocess {}", path.display()))?;
            info!(file, rows = result.rows, "Renumbered mooc actions");
        }
        Ok(())
    }
}

#[async_trait]
impl DatasetLoader for MoocLoader {
    fn graph(&self) -> GraphName {
        GraphName::Mooc
    }

    fn counted_labels(&self) -> (&str, &str) {
        (&self.user_label, &self.action_label)
    }

    async fn create_index(&self) -> Result<()> {
        index::ensure_indexes(self.executor.as_ref(), &self.indexes()?).await
    }

    async fn create_data(&self) -> Result<()> {
        self.preprocess().await?;
        let statements =
            load::mooc_create(&self.user_label, &self.target_label, &self.action_label)?;
        run_statements(self.executor.as_ref(), "mooc create", &statements).await
    }

    async fn delete_index(&self) -> Result<()> {
        index::drop_indexes(self.executor.as_ref(), &self.indexes()?).await
    }

    async fn delete_data(&self) -> Result<()> {
        let statements =
            load::mooc_delete(&self.user_label, &self.target_label, &self.action_label)?;
        run_statements(self.executor.as_ref(), "mooc delete", &statements).await
    }
}

//! ERC20 stablecoin transfer graph.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use graphbench_core::cypher::load;
use graphbench_core::{DatasetConfig, GraphName, IndexSpec};

use super::{run_statements, DatasetLoader};
use crate::{index, CypherExecutor};

pub struct StableCoinLoader {
    executor: Arc<dyn CypherExecutor>,
    address_label: String,
    action_label: String,
    contract: String,
}

impl StableCoinLoader {
    pub fn new(executor: Arc<dyn CypherExecutor>, config: &DatasetConfig) -> Result<Self> {
        Ok(Self {
            executor,
            address_label: config.label("AddressLabel")?.to_string(),
            action_label: config.label("ActionLabel")?.to_string(),
            contract: config.contract_address().to_string(),
        })
    }

    fn indexes(&self) -> Result<Vec<IndexSpec>> {
        Ok(vec![IndexSpec::node(&self.address_label, "addressId")?])
    }
}

#[async_trait]
impl DatasetLoader for StableCoinLoader {
    fn graph(&self) -> GraphName {
        GraphName::StableCoin
    }

    fn counted_labels(&self) -> (&str, &str) {
        (&self.address_label, &self.action_label)
    }

    async fn create_index(&self) -> Result<()> {
        index::ensure_indexes(self.executor.as_ref(), &self.indexes()?).await
    }

    async fn create_data(&self) -> Result<()> {
        let statements =
            load::stable_coin_create(&self.address_label, &self.action_label, &self.contract)?;
        run_statements(self.executor.as_ref(), "stableCoin create", &statements).await
    }

    async fn delete_index(&self) -> Result<()> {
        index::drop_indexes(self.executor.as_ref(), &self.indexes()?).await
    }

    async fn delete_data(&self) -> Result<()> {
        let statements = load::stable_coin_delete(&self.address_label, &self.action_label)?;
        run_statements(self.executor.as_ref(), "stableCoin delete", &statements).await
    }

    /// Drops the address index before the data.
    async fn delete(&self) -> Result<()> {
        self.delete_index().await?;
        self.delete_data().await
    }
}

//! Dataset loaders.
//!
//! One loader per dataset. Each knows which indexes its graph needs and
//! which `LOAD CSV` statements build or remove it; [`run`] maps the CLI's
//! mode/target pair onto the loader methods.

pub mod elliptic;
pub mod mooc;
pub mod road_net;
pub mod stable_coin;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use graphbench_core::{DatasetConfig, EditMode, EditTarget, GraphName};
use tracing::{debug, info};

use crate::CypherExecutor;

pub use elliptic::EllipticLoader;
pub use mooc::MoocLoader;
pub use road_net::RoadNetLoader;
pub use stable_coin::StableCoinLoader;

/// Builds and tears down one dataset in Neo4j.
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    fn graph(&self) -> GraphName;

    /// Node and relationship labels to report counts for after a load.
    fn counted_labels(&self) -> (&str, &str);

    async fn create_index(&self) -> Result<()>;

    async fn create_data(&self) -> Result<()>;

    async fn delete_index(&self) -> Result<()>;

    async fn delete_data(&self) -> Result<()>;

    /// Indexes first so the `MERGE`/`MATCH` lookups during the load use them.
    async fn create(&self) -> Result<()> {
        self.create_index().await?;
        self.create_data().await
    }

    async fn delete(&self) -> Result<()> {
        self.delete_data().await?;
        self.delete_index().await
    }
}

/// Pick the loader for the config's `graphName`.
///
/// `import_dir` is the Neo4j import directory on the local filesystem, used
/// by loaders that preprocess raw files before `LOAD CSV`.
pub fn loader_for(
    executor: Arc<dyn CypherExecutor>,
    config: &DatasetConfig,
    import_dir: &Path,
) -> Result<Box<dyn DatasetLoader>> {
    let loader: Box<dyn DatasetLoader> = match config.graph_name {
        GraphName::Elliptic => Box::new(EllipticLoader::new(executor, config)?),
        GraphName::Mooc => Box::new(MoocLoader::new(executor, config, import_dir)?),
        GraphName::RoadNet => Box::new(RoadNetLoader::new(executor, config, import_dir)?),
        GraphName::StableCoin => Box::new(StableCoinLoader::new(executor, config)?),
    };
    Ok(loader)
}

/// Run the loader method selected by `mode` and `target`.
pub async fn run(loader: &dyn DatasetLoader, mode: EditMode, target: EditTarget) -> Result<()> {
    info!(graph = %loader.graph(), %mode, %target, "Starting load");
    let started = Instant::now();

    let result = match (mode, target) {
        (EditMode::Create, EditTarget::All) => loader.create().await,
        (EditMode::Create, EditTarget::Index) => loader.create_index().await,
        (EditMode::Create, EditTarget::Data) => loader.create_data().await,
        (EditMode::Delete, EditTarget::All) => loader.delete().await,
        (EditMode::Delete, EditTarget::Index) => loader.delete_index().await,
        (EditMode::Delete, EditTarget::Data) => loader.delete_data().await,
    };
    result.with_context(|| format!("{} {} failed for {}", mode, target, loader.graph()))?;

    info!(
        graph = %loader.graph(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Load finished"
    );
    Ok(())
}

/// Execute statements one after another, logging each.
pub(crate) async fn run_statements(
    executor: &dyn CypherExecutor,
    phase: &str,
    statements: &[String],
) -> Result<()> {
    let total = statements.len();
    for (i, statement) in statements.iter().enumerate() {
        let step = i + 1;
        debug!(phase, step, cypher = %statement, "Running statement");

        let started = Instant::now();
        executor
            .run_cypher(statement)
            .await
            .with_context(|| format!("{phase}: statement {step}/{total} failed"))?;

        info!(
            phase,
            step,
            total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Statement finished"
        );
    }
    Ok(())
}

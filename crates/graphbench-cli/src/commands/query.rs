//! `graphbench query`: run the benchmark query menu.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use graphbench_core::{BenchQuery, DatasetConfig};
use graphbench_graph::{GraphClient, OutputDirs, QueryRunner};
use tracing::info;

use crate::output;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Dataset config file (JSON)
    pub config: PathBuf,

    /// Run only these queries (comma separated), in menu order by default
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<BenchQuery>,

    /// Root directory for result files
    #[arg(long, default_value = "results")]
    pub results_dir: PathBuf,

    /// Root directory for timing files
    #[arg(long, default_value = "stats")]
    pub stats_dir: PathBuf,
}

pub async fn execute(args: QueryArgs, client: &GraphClient) -> Result<()> {
    let config = DatasetConfig::from_file(&args.config)?;
    let dirs = OutputDirs::new(&args.results_dir, &args.stats_dir, config.graph_name);
    let runner = QueryRunner::new(client, &config, dirs);

    let outcomes = if args.only.is_empty() {
        runner.run_all().await
    } else {
        let mut outcomes = Vec::with_capacity(args.only.len());
        for kind in &args.only {
            outcomes.push(runner.run_one(*kind).await);
        }
        outcomes
    };

    output::print_outcomes(config.graph_name.as_str(), &outcomes);
    info!(
        graph = %config.graph_name,
        completed = output::completed_count(&outcomes),
        results = %runner.output().results_dir.display(),
        stats = %runner.output().stats_dir.display(),
        "Benchmark run finished"
    );

    Ok(())
}

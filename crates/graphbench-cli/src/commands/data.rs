//! `graphbench data`: create or delete a dataset.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use graphbench_core::{DatasetConfig, EditMode, EditTarget};
use graphbench_graph::{loader_for, loaders, GraphClient};

use crate::output;

#[derive(Args, Debug)]
pub struct DataArgs {
    /// Dataset config file (JSON)
    pub config: PathBuf,

    /// create | delete
    pub mode: EditMode,

    /// index | data | all
    pub target: EditTarget,

    /// Neo4j import directory on this machine, used for preprocessed files
    #[arg(long, env = "GRAPHBENCH_IMPORT_DIR", default_value = "neo4j/import")]
    pub import_dir: PathBuf,
}

pub async fn execute(args: DataArgs, client: &GraphClient) -> Result<()> {
    let config = DatasetConfig::from_file(&args.config)?;
    let loader = loader_for(Arc::new(client.clone()), &config, &args.import_dir)?;

    println!(
        "{} {} {} {}",
        "Dataset".bold(),
        config.graph_name.to_string().cyan(),
        args.mode,
        args.target
    );

    let pb = output::spinner(format!("{} {}...", args.mode, args.target));
    let result = loaders::run(loader.as_ref(), args.mode, args.target).await;
    pb.finish_and_clear();
    result?;

    println!("{} {} {}", "✓".green().bold(), args.mode, args.target);

    let (node_label, edge_label) = loader.counted_labels();
    let counts = client.get_counts(Some(node_label), Some(edge_label)).await?;
    output::print_counts(node_label, edge_label, &counts);

    Ok(())
}

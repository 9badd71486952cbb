//! CLI command definitions and handlers.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use graphbench_graph::{GraphClient, GraphConfig};
use tracing::info;

pub mod data;
pub mod query;

/// Load graph datasets into Neo4j and benchmark Cypher queries against them
#[derive(Parser)]
#[command(name = "graphbench")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Neo4j connection settings.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Bolt URI of the Neo4j server
    #[arg(long, env = "NEO4J_URI", default_value = "neo4j://localhost:7687", global = true)]
    pub uri: String,

    /// Neo4j user
    #[arg(long, env = "NEO4J_USER", default_value = "neo4j", global = true)]
    pub user: String,

    /// Neo4j password
    #[arg(
        long,
        env = "NEO4J_PASSWORD",
        default_value = "neo4jtest",
        hide_env_values = true,
        global = true
    )]
    pub password: String,

    /// Database name
    #[arg(long, env = "NEO4J_DATABASE", default_value = "neo4j", global = true)]
    pub database: String,

    /// Seconds to wait for the server before giving up
    #[arg(long, default_value_t = 10, global = true)]
    pub connect_timeout: u64,
}

impl ConnectionArgs {
    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            uri: self.uri.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or delete a dataset's indexes and data
    Data(data::DataArgs),

    /// Run the benchmark queries for a dataset
    Query(query::QueryArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let client = connect(&self.connection).await?;

        match self.command {
            Commands::Data(args) => data::execute(args, &client).await,
            Commands::Query(args) => query::execute(args, &client).await,
        }
    }
}

/// Connect to Neo4j, failing fast when the server does not answer.
async fn connect(args: &ConnectionArgs) -> Result<GraphClient> {
    let config = args.graph_config();
    let timeout = Duration::from_secs(args.connect_timeout);

    match tokio::time::timeout(timeout, GraphClient::connect(&config)).await {
        Ok(Ok(client)) => {
            info!(uri = %config.uri, database = %config.database, "Connection established");
            Ok(client)
        }
        Ok(Err(e)) => {
            eprintln!("{} {}", "Connection error".red().bold(), config.uri);
            Err(e)
        }
        Err(_) => {
            eprintln!("{} {}", "Connection error".red().bold(), config.uri);
            Err(anyhow!(
                "Neo4j did not respond within {}s",
                args.connect_timeout
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_data_command() {
        let cli = Cli::try_parse_from([
            "graphbench",
            "--uri",
            "bolt://db:7687",
            "data",
            "configs/roadNet.json",
            "create",
            "all",
        ])
        .unwrap();

        assert_eq!(cli.connection.uri, "bolt://db:7687");
        match cli.command {
            Commands::Data(args) => {
                assert_eq!(args.config, PathBuf::from("configs/roadNet.json"));
                assert_eq!(args.mode, graphbench_core::EditMode::Create);
                assert_eq!(args.target, graphbench_core::EditTarget::All);
            }
            Commands::Query(_) => panic!("expected data command"),
        }
    }

    #[test]
    fn test_reject_wrong_edit_mode() {
        let result = Cli::try_parse_from(["graphbench", "data", "c.json", "find", "all"]);
        let err = result.err().unwrap().to_string();
        assert!(err.contains("wrong edit mode: find"));
    }

    #[test]
    fn test_parse_query_only() {
        let cli = Cli::try_parse_from([
            "graphbench",
            "query",
            "configs/mooc.json",
            "--only",
            "Filter,Triangles",
        ])
        .unwrap();

        match cli.command {
            Commands::Query(args) => {
                assert_eq!(
                    args.only,
                    vec![
                        graphbench_core::BenchQuery::Filter,
                        graphbench_core::BenchQuery::Triangles
                    ]
                );
                assert_eq!(args.results_dir, PathBuf::from("results"));
            }
            Commands::Data(_) => panic!("expected query command"),
        }
    }
}

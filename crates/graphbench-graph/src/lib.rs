//! # graphbench graph
//!
//! Neo4j side of graphbench: connection handling, index management,
//! dataset loaders and the benchmark query runner.

pub mod bench;
pub mod client;
pub mod index;
pub mod loaders;
pub mod report;

#[cfg(test)]
mod testing;

pub use bench::{OutcomeStatus, OutputDirs, QueryOutcome, QueryRunner};
pub use client::{CypherExecutor, GraphClient, GraphConfig, GraphCounts};
pub use loaders::{loader_for, DatasetLoader};
pub use report::{ResultFile, StatFile};

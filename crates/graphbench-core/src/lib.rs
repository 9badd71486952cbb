//! graphbench core library
//!
//! Dataset configuration, Cypher templates and dataset file preprocessing
//! for the graphbench loader and query runner. Nothing here talks to Neo4j.

pub mod config;
pub mod cypher;
pub mod error;
pub mod mode;
pub mod preprocess;

pub use config::{DatasetConfig, GraphName, Literal};
pub use cypher::{BenchPlan, BenchQuery, CypherQuery, IndexScope, IndexSpec};
pub use error::{BenchError, BenchResult};
pub use mode::{EditMode, EditTarget};

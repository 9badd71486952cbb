//! Cypher statement templates.
//!
//! Labels and property names cannot be passed as query parameters, so every
//! template interpolates them directly. Each one goes through [`ident`]
//! first.

pub mod bench;
pub mod index;
pub mod load;

use std::fmt;
use std::str::FromStr;

use crate::error::{BenchError, BenchResult};

pub use bench::{plan, BenchPlan};
pub use index::{IndexScope, IndexSpec};

/// Check that a label or property name is safe to splice into Cypher.
pub fn ident(name: &str) -> BenchResult<&str> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(name)
    } else {
        Err(BenchError::InvalidIdentifier(name.to_string()))
    }
}

/// A query to send to Neo4j, with the record keys its columns are aliased to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CypherQuery {
    pub text: String,
    pub keys: Vec<&'static str>,
}

impl CypherQuery {
    pub fn new(text: impl Into<String>, keys: &[&'static str]) -> Self {
        Self {
            text: text.into(),
            keys: keys.to_vec(),
        }
    }
}

/// The fixed benchmark menu, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BenchQuery {
    Filter,
    FilterExt,
    FilterSum,
    ShortestPath,
    Recurs,
    Triangles,
}

impl BenchQuery {
    pub const ALL: [BenchQuery; 6] = [
        Self::Filter,
        Self::FilterExt,
        Self::FilterSum,
        Self::ShortestPath,
        Self::Recurs,
        Self::Triangles,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Filter => "Filter",
            Self::FilterExt => "FilterExt",
            Self::FilterSum => "FilterSum",
            Self::ShortestPath => "ShortestPath",
            Self::Recurs => "Recurs",
            Self::Triangles => "Triangles",
        }
    }

    /// Config section holding this query's parameters.
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::Filter => "queryFilter",
            Self::FilterExt => "queryFilterExt",
            Self::FilterSum => "queryFilterSum",
            Self::ShortestPath => "queryShortestPath",
            Self::Recurs => "queryRecurs",
            Self::Triangles => "queryTriangles",
        }
    }

    /// File name used for both the result and the stat file.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for BenchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BenchQuery {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|q| q.name().eq_ignore_ascii_case(s) || q.config_key().eq_ignore_ascii_case(s))
            .ok_or_else(|| BenchError::UnknownQuery(s.to_string()))
    }
}

//! Load command modes: what to do (`create`/`delete`) and to what
//! (`index`/`data`/`all`).

use std::fmt;
use std::str::FromStr;

use crate::error::BenchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Index,
    Data,
    All,
}

impl EditMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }
}

impl EditTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Data => "data",
            Self::All => "all",
        }
    }
}

impl FromStr for EditMode {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "delete" => Ok(Self::Delete),
            _ => Err(BenchError::InvalidEditMode(s.to_string())),
        }
    }
}

impl FromStr for EditTarget {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(Self::Index),
            "data" => Ok(Self::Data),
            "all" => Ok(Self::All),
            _ => Err(BenchError::InvalidEditTarget(s.to_string())),
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

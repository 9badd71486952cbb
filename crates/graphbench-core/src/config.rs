//! Per-dataset JSON configuration.
//!
//! A config file names the graph, the node/edge labels the loader writes,
//! and one section per benchmark query:
//!
//! ```json
//! {
//!   "graphName": "roadNet",
//!   "NodeLabel": "RoadNode",
//!   "EdgeLabel": "ROAD",
//!   "queryFilter": { "nodeLabel": "RoadNode", "fieldName": "NodeId", "value": 1000 },
//!   "queryTriangles": { "nodeLabel": "RoadNode", "edgeLabel": "ROAD" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{BenchError, BenchResult};

/// Contract filtered out of the ERC20 transfer dump when none is configured (USDT).
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";

/// Datasets the loader and the query templates know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum GraphName {
    #[serde(rename = "elliptic")]
    Elliptic,
    #[serde(rename = "mooc")]
    Mooc,
    #[serde(rename = "roadNet")]
    RoadNet,
    #[serde(rename = "stableCoin")]
    StableCoin,
}

impl GraphName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elliptic => "elliptic",
            Self::Mooc => "mooc",
            Self::RoadNet => "roadNet",
            Self::StableCoin => "stableCoin",
        }
    }

    /// Graphs whose filterable properties live on nodes rather than on
    /// relationships.
    pub fn filters_on_nodes(&self) -> bool {
        matches!(self, Self::Elliptic | Self::RoadNet)
    }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A config value spliced into Cypher.
///
/// Numbers and booleans render as-is. Strings render verbatim, so a string
/// property value must carry its own quotes (`"'0xabc'"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Literal(pub Value);

impl Literal {
    /// Render the literal as a Cypher expression; `name` is used in errors.
    pub fn render(&self, name: &str) -> BenchResult<String> {
        render_value(&self.0, name)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Self(Value::from(n))
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self(Value::from(s))
    }
}

fn render_value(value: &Value, name: &str) -> BenchResult<String> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::String(s) if s.trim().is_empty() => Err(BenchError::invalid(name, "empty value")),
        Value::String(s) => Ok(s.clone()),
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(|item| render_value(item, name))
                .collect::<BenchResult<Vec<_>>>()?;
            Ok(format!("[{}]", parts.join(", ")))
        }
        Value::Null => Err(BenchError::invalid(name, "null is not a valid value")),
        Value::Object(_) => Err(BenchError::invalid(name, "maps are not supported")),
    }
}

/// `queryFilter`: property threshold scan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub node_label: Option<String>,
    pub edge_label: Option<String>,
    pub field_name: String,
    pub value: Literal,
}

/// `queryFilterExt`: property threshold plus out-degree filter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterExtParams {
    pub node_label: String,
    pub edge_label: String,
    pub field_name: Option<String>,
    pub value: Option<Literal>,
    #[serde(deserialize_with = "de_count")]
    pub degree: u32,
}

/// `queryFilterSum`: per-node neighbour aggregation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSumParams {
    pub node_label: String,
    pub edge_label: Option<String>,
    pub field_name: Option<String>,
    pub value: Option<Literal>,
}

/// `queryShortestPath`: bounded shortest path between two matched nodes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortestPathParams {
    pub from_node_label: String,
    pub to_node_label: String,
    pub from_field_name: String,
    pub to_field_name: String,
    pub from_value: Literal,
    pub to_value: Literal,
    #[serde(deserialize_with = "de_count")]
    pub path_length_limit: u32,
}

/// `queryRecurs`: fixed-depth traversal with a per-hop condition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecursParams {
    pub from_label: String,
    pub from_field_name: String,
    pub from_value: Literal,
    pub edge_label: String,
    pub field_name: String,
    pub value: Literal,
    #[serde(deserialize_with = "de_count")]
    pub depth: u32,
}

/// How the triangle query gets its triangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriangleMode {
    /// Read precomputed `<label>_triangle` nodes.
    #[default]
    Materialized,
    /// Enumerate triangles in the query itself.
    Direct,
}

/// `queryTriangles`: undirected triangle listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrianglesParams {
    pub node_label: String,
    pub edge_label: String,
    #[serde(default)]
    pub mode: TriangleMode,
    /// Recompute the materialized triangle nodes before reading them.
    #[serde(default)]
    pub rebuild: bool,
}

/// A parsed dataset config file.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(rename = "graphName")]
    pub graph_name: GraphName,

    #[serde(rename = "contractAddress", default)]
    pub contract_address: Option<String>,

    #[serde(rename = "queryFilter", default)]
    pub query_filter: Option<FilterParams>,

    #[serde(rename = "queryFilterExt", default)]
    pub query_filter_ext: Option<FilterExtParams>,

    #[serde(rename = "queryFilterSum", default)]
    pub query_filter_sum: Option<FilterSumParams>,

    #[serde(rename = "queryShortestPath", default)]
    pub query_shortest_path: Option<ShortestPathParams>,

    #[serde(rename = "queryRecurs", default)]
    pub query_recurs: Option<RecursParams>,

    #[serde(rename = "queryTriangles", default)]
    pub query_triangles: Option<TrianglesParams>,

    /// Dataset labels (`NodeLabel`, `EdgeLabel`, `UserLabel`, ...).
    #[serde(flatten)]
    pub labels: BTreeMap<String, Value>,
}

impl DatasetConfig {
    /// Read and parse a config file.
    pub fn from_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| BenchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| BenchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fetch a required dataset label by its config key.
    pub fn label(&self, key: &str) -> BenchResult<&str> {
        match self.labels.get(key) {
            Some(Value::String(label)) => crate::cypher::ident(label),
            _ => Err(BenchError::MissingLabel {
                key: key.to_string(),
                graph: self.graph_name,
            }),
        }
    }

    /// Contract address used to filter the stablecoin transfer dump.
    pub fn contract_address(&self) -> &str {
        self.contract_address
            .as_deref()
            .unwrap_or(DEFAULT_CONTRACT_ADDRESS)
    }
}

/// Accept counts written either as JSON numbers or numeric strings.
fn de_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => u32::try_from(n).map_err(de::Error::custom),
        Raw::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ELLIPTIC: &str = r#"{
        "graphName": "elliptic",
        "TransactionLabel": "EllipticTransaction",
        "EdgeLabel": "EllipticAction",
        "queryFilter": { "nodeLabel": "EllipticTransaction", "edgeLabel": "EllipticAction",
                         "fieldName": "total_BTC", "value": 100 },
        "queryFilterExt": { "nodeLabel": "EllipticTransaction", "edgeLabel": "EllipticAction",
                            "fieldName": "total_BTC", "value": 10, "degree": "3" },
        "queryShortestPath": { "fromNodeLabel": "EllipticTransaction",
                               "toNodeLabel": "EllipticTransaction",
                               "fromFieldName": "txId", "toFieldName": "txId",
                               "fromValue": 230425980, "toValue": 5530458, "pathLengthLimit": 10 },
        "queryTriangles": { "nodeLabel": "EllipticTransaction", "edgeLabel": "EllipticAction",
                            "mode": "direct" }
    }"#;

    #[test]
    fn test_parse_elliptic_config() {
        let config: DatasetConfig = serde_json::from_str(ELLIPTIC).unwrap();
        assert_eq!(config.graph_name, GraphName::Elliptic);
        assert_eq!(config.label("TransactionLabel").unwrap(), "EllipticTransaction");
        assert_eq!(config.label("EdgeLabel").unwrap(), "EllipticAction");

        let ext = config.query_filter_ext.unwrap();
        assert_eq!(ext.degree, 3);
        let sp = config.query_shortest_path.unwrap();
        assert_eq!(sp.path_length_limit, 10);
        assert_eq!(sp.from_value.render("fromValue").unwrap(), "230425980");

        assert_eq!(config.query_triangles.unwrap().mode, TriangleMode::Direct);
        assert!(config.query_recurs.is_none());
    }

    #[test]
    fn test_missing_label() {
        let config: DatasetConfig = serde_json::from_str(ELLIPTIC).unwrap();
        let err = config.label("UserLabel").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Label 'UserLabel' is required for graph 'elliptic'"
        );
    }

    #[test]
    fn test_label_must_be_identifier() {
        let config: DatasetConfig = serde_json::from_str(
            r#"{ "graphName": "roadNet", "NodeLabel": "Road) DETACH DELETE (n" }"#,
        )
        .unwrap();
        assert!(matches!(
            config.label("NodeLabel"),
            Err(BenchError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_unknown_graph_name() {
        let result: Result<DatasetConfig, _> =
            serde_json::from_str(r#"{ "graphName": "twitter" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_contract_address_default() {
        let config: DatasetConfig =
            serde_json::from_str(r#"{ "graphName": "stableCoin" }"#).unwrap();
        assert_eq!(config.contract_address(), DEFAULT_CONTRACT_ADDRESS);

        let config: DatasetConfig = serde_json::from_str(
            r#"{ "graphName": "stableCoin", "contractAddress": "0xa0b8" }"#,
        )
        .unwrap();
        assert_eq!(config.contract_address(), "0xa0b8");
    }

    #[test]
    fn test_literal_rendering() {
        assert_eq!(Literal::from(42).render("v").unwrap(), "42");
        assert_eq!(Literal(serde_json::json!(0.5)).render("v").unwrap(), "0.5");
        assert_eq!(Literal::from("'0xabc'").render("v").unwrap(), "'0xabc'");
        assert_eq!(Literal(serde_json::json!([1, 2])).render("v").unwrap(), "[1, 2]");
        assert!(Literal(Value::Null).render("v").is_err());
        assert!(Literal::from("  ").render("v").is_err());
    }

    #[test]
    fn test_from_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = DatasetConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, BenchError::ConfigParse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));

        let err = DatasetConfig::from_file("/nonexistent/graphbench.json").unwrap_err();
        assert!(matches!(err, BenchError::ConfigRead { .. }));
    }
}

//! Range index statements.

use crate::error::BenchResult;

use super::ident;

/// Whether an index covers node or relationship properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexScope {
    Node,
    Edge,
}

/// A single-property index named `<label>_<field>_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub scope: IndexScope,
    pub label: String,
    pub field: String,
}

impl IndexSpec {
    pub fn node(label: &str, field: &str) -> BenchResult<Self> {
        Self::new(IndexScope::Node, label, field)
    }

    pub fn edge(label: &str, field: &str) -> BenchResult<Self> {
        Self::new(IndexScope::Edge, label, field)
    }

    fn new(scope: IndexScope, label: &str, field: &str) -> BenchResult<Self> {
        Ok(Self {
            scope,
            label: ident(label)?.to_string(),
            field: ident(field)?.to_string(),
        })
    }

    pub fn name(&self) -> String {
        format!("{}_{}_index", self.label, self.field)
    }

    pub fn create_statement(&self) -> String {
        match self.scope {
            IndexScope::Node => format!(
                "CREATE INDEX {} IF NOT EXISTS FOR (n:{}) ON (n.{})",
                self.name(),
                self.label,
                self.field
            ),
            IndexScope::Edge => format!(
                "CREATE INDEX {} IF NOT EXISTS FOR ()-[e:{}]->() ON (e.{})",
                self.name(),
                self.label,
                self.field
            ),
        }
    }

    /// Blocks until the index is online.
    pub fn await_statement(&self) -> String {
        format!("CALL db.awaitIndex('{}')", self.name())
    }

    pub fn drop_statement(&self) -> String {
        format!("DROP INDEX {} IF EXISTS", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_index_statements() {
        let index = IndexSpec::node("RoadNode", "NodeId").unwrap();
        assert_eq!(index.name(), "RoadNode_NodeId_index");
        assert_eq!(
            index.create_statement(),
            "CREATE INDEX RoadNode_NodeId_index IF NOT EXISTS FOR (n:RoadNode) ON (n.NodeId)"
        );
        assert_eq!(index.await_statement(), "CALL db.awaitIndex('RoadNode_NodeId_index')");
        assert_eq!(index.drop_statement(), "DROP INDEX RoadNode_NodeId_index IF EXISTS");
    }

    #[test]
    fn test_edge_index_statement() {
        let index = IndexSpec::edge("MoocAction", "ACTIONID").unwrap();
        assert_eq!(
            index.create_statement(),
            "CREATE INDEX MoocAction_ACTIONID_index IF NOT EXISTS \
             FOR ()-[e:MoocAction]->() ON (e.ACTIONID)"
        );
    }

    #[test]
    fn test_rejects_bad_field() {
        assert!(IndexSpec::node("RoadNode", "Node Id").is_err());
    }
}

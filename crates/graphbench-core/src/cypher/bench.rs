//! Benchmark query templates.
//!
//! Each template depends on the dataset: elliptic and roadNet keep their
//! numeric properties on nodes, mooc and stableCoin on relationships.

use crate::config::{
    DatasetConfig, FilterExtParams, FilterParams, FilterSumParams, GraphName, Literal,
    RecursParams, ShortestPathParams, TriangleMode, TrianglesParams,
};
use crate::error::{BenchError, BenchResult};

use super::{ident, BenchQuery, CypherQuery, IndexSpec};

/// Batch size for the triangle rebuild.
const TRIANGLE_BATCH_ROWS: u32 = 10_000;

/// Everything needed to run one benchmark query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchPlan {
    pub kind: BenchQuery,
    /// Indexes created (and awaited) before the query runs.
    pub indexes: Vec<IndexSpec>,
    /// Untimed statements run after the indexes, before the query.
    pub setup: Vec<String>,
    pub query: CypherQuery,
}

impl BenchPlan {
    fn new(kind: BenchQuery, query: CypherQuery) -> Self {
        Self {
            kind,
            indexes: Vec::new(),
            setup: Vec::new(),
            query,
        }
    }

    fn with_index(mut self, index: IndexSpec) -> Self {
        self.indexes.push(index);
        self
    }
}

/// Build the plan for `kind`, or `None` when the config has no section for it.
pub fn plan(kind: BenchQuery, config: &DatasetConfig) -> BenchResult<Option<BenchPlan>> {
    let graph = config.graph_name;
    let plan = match kind {
        BenchQuery::Filter => config.query_filter.as_ref().map(|p| filter(graph, p)),
        BenchQuery::FilterExt => config.query_filter_ext.as_ref().map(|p| filter_ext(graph, p)),
        BenchQuery::FilterSum => config.query_filter_sum.as_ref().map(|p| filter_sum(graph, p)),
        BenchQuery::ShortestPath => config.query_shortest_path.as_ref().map(shortest_path),
        BenchQuery::Recurs => config.query_recurs.as_ref().map(|p| recurs(graph, p)),
        BenchQuery::Triangles => config.query_triangles.as_ref().map(triangles),
    };
    plan.transpose()
}

fn required<'a>(value: &'a Option<String>, name: &str) -> BenchResult<&'a str> {
    value.as_deref().ok_or_else(|| BenchError::missing(name))
}

fn required_literal(value: &Option<Literal>, name: &str) -> BenchResult<String> {
    value
        .as_ref()
        .ok_or_else(|| BenchError::missing(name))?
        .render(name)
}

fn positive(value: u32, name: &str) -> BenchResult<u32> {
    if value == 0 {
        return Err(BenchError::invalid(name, "must be at least 1"));
    }
    Ok(value)
}

/// Nodes or relationships whose property is at least `value`.
pub fn filter(graph: GraphName, params: &FilterParams) -> BenchResult<BenchPlan> {
    let field = ident(&params.field_name)?;
    let value = params.value.render("queryFilter.value")?;

    if graph.filters_on_nodes() {
        let label = ident(required(&params.node_label, "queryFilter.nodeLabel")?)?;
        let query = CypherQuery::new(
            format!(
                "MATCH (n:{label})
                 WHERE n.{field} >= {value}
                 RETURN elementId(n) AS node"
            ),
            &["node"],
        );
        Ok(BenchPlan::new(BenchQuery::Filter, query).with_index(IndexSpec::node(label, field)?))
    } else {
        let label = ident(required(&params.edge_label, "queryFilter.edgeLabel")?)?;
        let query = CypherQuery::new(
            format!(
                "MATCH ()-[r:{label}]->()
                 WHERE r.{field} >= {value}
                 RETURN elementId(r) AS edge"
            ),
            &["edge"],
        );
        Ok(BenchPlan::new(BenchQuery::Filter, query).with_index(IndexSpec::edge(label, field)?))
    }
}

/// Nodes with at least `degree` outgoing relationships, after a property filter.
pub fn filter_ext(graph: GraphName, params: &FilterExtParams) -> BenchResult<BenchPlan> {
    let node = ident(&params.node_label)?;
    let edge = ident(&params.edge_label)?;
    let degree = params.degree;

    let text = match graph {
        GraphName::Elliptic => {
            let field = ident(required(&params.field_name, "queryFilterExt.fieldName")?)?;
            let value = required_literal(&params.value, "queryFilterExt.value")?;
            format!(
                "MATCH (p:{node})
                 WHERE p.{field} >= {value}
                 MATCH (p)-[r:{edge}]->()
                 WITH p, count(r) AS cnt
                 WHERE cnt >= {degree}
                 RETURN elementId(p) AS node, cnt AS degree"
            )
        }
        GraphName::RoadNet => format!(
            "MATCH (p:{node})
             MATCH (p)-[r:{edge}]->()
             WITH p, count(r) AS cnt
             WHERE cnt >= {degree}
             RETURN elementId(p) AS node, cnt AS degree"
        ),
        GraphName::Mooc | GraphName::StableCoin => {
            let field = ident(required(&params.field_name, "queryFilterExt.fieldName")?)?;
            let value = required_literal(&params.value, "queryFilterExt.value")?;
            format!(
                "MATCH (p:{node})
                 MATCH (p)-[r:{edge}]->()
                 WHERE r.{field} >= {value}
                 WITH p, count(r) AS cnt
                 WHERE cnt >= {degree}
                 RETURN elementId(p) AS node, cnt AS degree"
            )
        }
    };

    Ok(BenchPlan::new(
        BenchQuery::FilterExt,
        CypherQuery::new(text, &["node", "degree"]),
    ))
}

/// Per-node sum of a neighbour (or relationship) property above a threshold.
pub fn filter_sum(graph: GraphName, params: &FilterSumParams) -> BenchResult<BenchPlan> {
    let node = ident(&params.node_label)?;

    // roadNet carries no numeric payload beyond ids.
    if graph == GraphName::RoadNet {
        let query = CypherQuery::new(
            format!(
                "MATCH (n:{node})
                 RETURN elementId(n) AS node"
            ),
            &["node"],
        );
        return Ok(BenchPlan::new(BenchQuery::FilterSum, query));
    }

    let edge = ident(required(&params.edge_label, "queryFilterSum.edgeLabel")?)?;
    let field = ident(required(&params.field_name, "queryFilterSum.fieldName")?)?;
    let value = required_literal(&params.value, "queryFilterSum.value")?;

    let text = if graph == GraphName::Elliptic {
        format!(
            "MATCH (n:{node})
             MATCH (n)-[r:{edge}]->(m:{node})
             WHERE m.{field} >= {value}
             WITH n, collect(m.{field}) AS neighbors
             RETURN elementId(n) AS node, reduce(total = 0, val IN neighbors | total + val) AS sum"
        )
    } else {
        format!(
            "MATCH (n:{node})
             MATCH (n)-[r:{edge}]->()
             WHERE r.{field} >= {value}
             WITH n, collect(r.{field}) AS neighbors
             RETURN elementId(n) AS node, reduce(total = 0, val IN neighbors | total + val) AS sum"
        )
    };

    Ok(BenchPlan::new(
        BenchQuery::FilterSum,
        CypherQuery::new(text, &["node", "sum"]),
    ))
}

/// Undirected shortest path of bounded length between two matched nodes.
pub fn shortest_path(params: &ShortestPathParams) -> BenchResult<BenchPlan> {
    let from = ident(&params.from_node_label)?;
    let to = ident(&params.to_node_label)?;
    let from_field = ident(&params.from_field_name)?;
    let to_field = ident(&params.to_field_name)?;
    let from_value = params.from_value.render("queryShortestPath.fromValue")?;
    let to_value = params.to_value.render("queryShortestPath.toValue")?;
    let limit = positive(params.path_length_limit, "queryShortestPath.pathLengthLimit")?;

    let query = CypherQuery::new(
        format!(
            "MATCH (start:{from} {{{from_field}: {from_value}}}),
                   (end:{to} {{{to_field}: {to_value}}}),
                   p = shortestPath((start)-[*..{limit}]-(end))
             RETURN nodes(p) AS nodes, length(p) AS length"
        ),
        &["nodes", "length"],
    );
    Ok(BenchPlan::new(BenchQuery::ShortestPath, query))
}

/// Distinct nodes reached in exactly `depth` hops where every hop passes the
/// condition.
pub fn recurs(graph: GraphName, params: &RecursParams) -> BenchResult<BenchPlan> {
    let from = ident(&params.from_label)?;
    let from_field = ident(&params.from_field_name)?;
    let from_value = params.from_value.render("queryRecurs.fromValue")?;
    let edge = ident(&params.edge_label)?;
    let field = ident(&params.field_name)?;
    let value = params.value.render("queryRecurs.value")?;
    let depth = positive(params.depth, "queryRecurs.depth")?;

    let condition = if graph.filters_on_nodes() {
        format!("endNode(rel).{field} >= {value}")
    } else {
        format!("rel.{field} >= {value}")
    };

    let query = CypherQuery::new(
        format!(
            "MATCH (start:{from} {{{from_field}: {from_value}}})
             CALL {{
                 WITH start
                 MATCH (start)-[rels:{edge}*{depth}..{depth}]->(n:{from})
                 WHERE ALL(rel IN rels WHERE {condition})
                 RETURN DISTINCT n
             }}
             RETURN elementId(n) AS lastVertex"
        ),
        &["lastVertex"],
    );

    let plan = BenchPlan::new(BenchQuery::Recurs, query);
    if graph.filters_on_nodes() {
        Ok(plan)
    } else {
        Ok(plan.with_index(IndexSpec::edge(edge, field)?))
    }
}

/// Triangles over `edge_label`, ignoring direction.
pub fn triangles(params: &TrianglesParams) -> BenchResult<BenchPlan> {
    let node = ident(&params.node_label)?;
    let edge = ident(&params.edge_label)?;
    let triangle = triangle_label(node);

    if params.rebuild && params.mode == TriangleMode::Direct {
        return Err(BenchError::invalid(
            "queryTriangles.rebuild",
            "only applies to materialized mode",
        ));
    }

    let query = match params.mode {
        TriangleMode::Direct => CypherQuery::new(
            format!(
                "MATCH (a:{node})-[:{edge}]-(b:{node}), (b)-[:{edge}]-(c:{node})
                 WHERE elementId(a) < elementId(b) AND elementId(b) < elementId(c)
                   AND EXISTS {{ (a)-[:{edge}]-(c) }}
                 RETURN DISTINCT elementId(a) AS a, elementId(b) AS b, elementId(c) AS c"
            ),
            &["a", "b", "c"],
        ),
        TriangleMode::Materialized => CypherQuery::new(
            format!(
                "MATCH (n:{triangle})
                 RETURN n.a AS a, n.b AS b, n.c AS c"
            ),
            &["a", "b", "c"],
        ),
    };

    let mut plan = BenchPlan::new(BenchQuery::Triangles, query);
    if params.rebuild {
        plan.setup = rebuild_triangles(node, edge);
    }
    Ok(plan)
}

/// Label of the materialized triangle nodes for `node_label`.
pub fn triangle_label(node_label: &str) -> String {
    format!("{node_label}_triangle")
}

/// Drop and recompute the `<label>_triangle` nodes.
fn rebuild_triangles(node: &str, edge: &str) -> Vec<String> {
    let triangle = triangle_label(node);
    vec![
        format!(
            "MATCH (t:{triangle})
             CALL {{
                 WITH t
                 DELETE t
             }} IN TRANSACTIONS OF {TRIANGLE_BATCH_ROWS} ROWS"
        ),
        format!(
            "MATCH (a:{node})-[:{edge}]-(b:{node})
             WHERE elementId(a) < elementId(b)
             WITH DISTINCT a, b
             CALL {{
                 WITH a, b
                 MATCH (b)-[:{edge}]-(c:{node})
                 WHERE elementId(b) < elementId(c) AND EXISTS {{ (a)-[:{edge}]-(c) }}
                 WITH DISTINCT elementId(a) AS a_id, elementId(b) AS b_id, elementId(c) AS c_id
                 CREATE (:{triangle} {{a: a_id, b: b_id, c: c_id}})
             }} IN TRANSACTIONS OF {TRIANGLE_BATCH_ROWS} ROWS"
        ),
    ]
}

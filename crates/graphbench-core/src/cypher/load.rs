//! `LOAD CSV` and bulk delete statements for each dataset.
//!
//! File URLs are relative to the Neo4j import directory.

use super::ident;
use crate::error::{BenchError, BenchResult};

pub const ELLIPTIC_FEATURES: &str = "file:///elliptic/txs_features.csv";
pub const ELLIPTIC_CLASSES: &str = "file:///elliptic/txs_classes.csv";
pub const ELLIPTIC_EDGES: &str = "file:///elliptic/txs_edgelist.csv";

pub const MOOC_DIR: &str = "act-mooc";
pub const MOOC_ACTIONS: &str = "mooc_actions.tsv";
pub const MOOC_ACTION_LABELS: &str = "mooc_action_labels.tsv";
pub const MOOC_ACTION_FEATURES: &str = "mooc_action_features.tsv";

pub const ROAD_NET_DIR: &str = "roadNet-CA.txt";
pub const ROAD_NET_FILE: &str = "roadNet-CA.txt";

pub const STABLE_COIN_TRANSFERS: &str = "file:///ERC20-stablecoins/token_transfers_V2.0.0.csv";

/// Numeric transaction properties in `txs_features.csv` besides `txId`.
const ELLIPTIC_FLOAT_FEATURES: &[&str] = &[
    "timestamp",
    "Local_feature_1",
    "Aggregate_feature_1",
    "in_txs_degree",
    "out_txs_degree",
    "total_BTC",
    "fees",
    "size",
    "num_input_addresses",
    "num_output_addresses",
    "in_BTC_min",
    "in_BTC_max",
    "in_BTC_mean",
    "in_BTC_median",
    "in_BTC_total",
    "out_BTC_min",
    "out_BTC_max",
    "out_BTC_mean",
    "out_BTC_median",
    "out_BTC_total",
];

const MOOC_FEATURES: &[&str] = &["FEATURE0", "FEATURE1", "FEATURE2", "FEATURE3"];

/// URL of a preprocessed file (`<stem>_edit.csv`) under the import directory.
pub fn edited_url(dir: &str, file: &str) -> String {
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    format!("file:///{dir}/{stem}_edit.csv")
}

/// Delete every node (or relationship) bound by `pattern` in batches.
fn batched_delete(pattern: &str, var: &str, detach: bool, rows: u32) -> String {
    let delete = if detach { "DETACH DELETE" } else { "DELETE" };
    format!(
        "MATCH {pattern}
         CALL {{
             WITH {var}
             {delete} {var}
         }} IN TRANSACTIONS OF {rows} ROWS"
    )
}

/// Transactions, their classes, then the edge list.
pub fn elliptic_create(tx_label: &str, edge_label: &str) -> BenchResult<Vec<String>> {
    let tx = ident(tx_label)?;
    let edge = ident(edge_label)?;

    let mut props = vec!["txId: toInteger(tx.txId)".to_string()];
    props.extend(
        ELLIPTIC_FLOAT_FEATURES
            .iter()
            .map(|f| format!("{f}: toFloat(tx.{f})")),
    );
    let props = props.join(",\n                     ");

    Ok(vec![
        format!(
            "LOAD CSV WITH HEADERS FROM '{ELLIPTIC_FEATURES}' AS tx
             CALL {{
                 WITH tx
                 CREATE (:{tx} {{
                     {props}
                 }})
             }} IN TRANSACTIONS OF 10000 ROWS"
        ),
        format!(
            "LOAD CSV WITH HEADERS FROM '{ELLIPTIC_CLASSES}' AS tx
             CALL {{
                 WITH tx
                 MATCH (t:{tx} {{txId: toInteger(tx.txId)}})
                 SET t.class = toInteger(tx.class)
             }} IN TRANSACTIONS OF 10000 ROWS"
        ),
        format!(
            "LOAD CSV WITH HEADERS FROM '{ELLIPTIC_EDGES}' AS edge
             CALL {{
                 WITH edge
                 MATCH (tx1:{tx} {{txId: toInteger(edge.txId1)}})
                 MATCH (tx2:{tx} {{txId: toInteger(edge.txId2)}})
                 CREATE (tx1)-[:{edge}]->(tx2)
             }} IN TRANSACTIONS OF 10000 ROWS"
        ),
    ])
}

pub fn elliptic_delete(tx_label: &str) -> BenchResult<Vec<String>> {
    let tx = ident(tx_label)?;
    Ok(vec![batched_delete(&format!("(t:{tx})"), "t", true, 1000)])
}

/// Actions with users and targets merged in, then labels, then features.
/// Reads the `_edit.csv` files produced by preprocessing.
pub fn mooc_create(
    user_label: &str,
    target_label: &str,
    action_label: &str,
) -> BenchResult<Vec<String>> {
    let user = ident(user_label)?;
    let target = ident(target_label)?;
    let action = ident(action_label)?;

    let actions = edited_url(MOOC_DIR, MOOC_ACTIONS);
    let labels = edited_url(MOOC_DIR, MOOC_ACTION_LABELS);
    let features = edited_url(MOOC_DIR, MOOC_ACTION_FEATURES);

    let set_features = MOOC_FEATURES
        .iter()
        .map(|f| format!("action.{f} = toFloat(act.{f})"))
        .collect::<Vec<_>>()
        .join(",\n                     ");

    Ok(vec![
        format!(
            "LOAD CSV WITH HEADERS FROM '{actions}' AS act
             FIELDTERMINATOR '\\t'
             CALL {{
                 WITH act
                 MERGE (user:{user} {{USERID: toInteger(act.USERID)}})
                 MERGE (target:{target} {{TARGETID: toInteger(act.TARGETID)}})
                 CREATE (user)-[:{action} {{
                     ACTIONID: toInteger(act.ACTIONID),
                     TIMESTAMP: toFloat(act.TIMESTAMP)
                 }}]->(target)
             }} IN TRANSACTIONS OF 1000 ROWS"
        ),
        format!(
            "LOAD CSV WITH HEADERS FROM '{labels}' AS act
             FIELDTERMINATOR '\\t'
             CALL {{
                 WITH act
                 MATCH ()-[action:{action} {{ACTIONID: toInteger(act.ACTIONID)}}]->()
                 SET action.LABEL = toInteger(act.LABEL)
             }} IN TRANSACTIONS OF 1000 ROWS"
        ),
        format!(
            "LOAD CSV WITH HEADERS FROM '{features}' AS act
             FIELDTERMINATOR '\\t'
             CALL {{
                 WITH act
                 MATCH ()-[action:{action} {{ACTIONID: toInteger(act.ACTIONID)}}]->()
                 SET {set_features}
             }} IN TRANSACTIONS OF 1000 ROWS"
        ),
    ])
}

pub fn mooc_delete(
    user_label: &str,
    target_label: &str,
    action_label: &str,
) -> BenchResult<Vec<String>> {
    let user = ident(user_label)?;
    let target = ident(target_label)?;
    let action = ident(action_label)?;

    Ok(vec![
        batched_delete(&format!("()-[act:{action}]->()"), "act", false, 10_000),
        batched_delete(&format!("(target:{target})"), "target", false, 10_000),
        batched_delete(&format!("(user:{user})"), "user", false, 10_000),
    ])
}

pub fn road_net_create(node_label: &str, edge_label: &str) -> BenchResult<Vec<String>> {
    let node = ident(node_label)?;
    let edge = ident(edge_label)?;
    let edges = edited_url(ROAD_NET_DIR, ROAD_NET_FILE);

    Ok(vec![format!(
        "LOAD CSV WITH HEADERS FROM '{edges}' AS edge
         FIELDTERMINATOR '\\t'
         CALL {{
             WITH edge
             MERGE (from:{node} {{NodeId: toInteger(edge.FromNodeId)}})
             MERGE (to:{node} {{NodeId: toInteger(edge.ToNodeId)}})
             CREATE (from)-[:{edge}]->(to)
         }} IN TRANSACTIONS OF 10000 ROWS"
    )])
}

pub fn road_net_delete(node_label: &str, edge_label: &str) -> BenchResult<Vec<String>> {
    let node = ident(node_label)?;
    let edge = ident(edge_label)?;

    Ok(vec![
        batched_delete(&format!("()-[e:{edge}]->()"), "e", false, 10_000),
        batched_delete(&format!("(n:{node})"), "n", false, 10_000),
    ])
}

/// Transfers of a single token contract between addresses.
pub fn stable_coin_create(
    address_label: &str,
    action_label: &str,
    contract: &str,
) -> BenchResult<Vec<String>> {
    let address = ident(address_label)?;
    let action = ident(action_label)?;
    // Spliced into a quoted literal.
    if contract.is_empty() || !contract.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(BenchError::invalid("contractAddress", "must be a hex address"));
    }

    Ok(vec![format!(
        "LOAD CSV WITH HEADERS FROM '{STABLE_COIN_TRANSFERS}' AS trans
         FIELDTERMINATOR ','
         CALL {{
             WITH trans
             WITH trans
             WHERE trans.contract_address = '{contract}'
             MERGE (from:{address} {{addressId: trans.from_address}})
             MERGE (to:{address} {{addressId: trans.to_address}})
             CREATE (from)-[:{action} {{
                 time_stamp: toFloat(trans.time_stamp),
                 value: toFloat(trans.value)
             }}]->(to)
         }} IN TRANSACTIONS OF 10000 ROWS"
    )])
}

pub fn stable_coin_delete(address_label: &str, action_label: &str) -> BenchResult<Vec<String>> {
    let address = ident(address_label)?;
    let action = ident(action_label)?;

    Ok(vec![
        batched_delete(&format!("()-[act:{action}]->()"), "act", false, 10_000),
        batched_delete(&format!("(addr:{address})"), "addr", false, 10_000),
    ])
}

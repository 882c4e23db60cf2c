use wotex_core::NodeId;

/// Errors raised by the graph store.
///
/// All of them denote a caller bug (an id issued by another graph, a
/// self-certification) and are never retried.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("unknown node {node} (graph has {node_count} nodes)")]
    UnknownNode { node: NodeId, node_count: usize },

    #[error("node {0} cannot certify itself")]
    SelfLink(NodeId),

    #[error("graph is full: no more node ids available")]
    Exhausted,
}

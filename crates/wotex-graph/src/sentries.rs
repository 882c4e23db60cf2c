use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wotex_core::{NodeId, NodeStatus};

use crate::graph::GraphView;

/// Partition of the confirmed nodes into sentries and non-sentries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentryPartition {
    pub sentries: BTreeSet<NodeId>,
    pub non_sentries: BTreeSet<NodeId>,
}

impl SentryPartition {
    /// Status of a node under this partition; `None` for nodes outside it
    /// (pending nodes or ids from another graph).
    pub fn status_of(&self, id: NodeId) -> Option<NodeStatus> {
        if self.sentries.contains(&id) {
            Some(NodeStatus::Sentry)
        } else if self.non_sentries.contains(&id) {
            Some(NodeStatus::Member)
        } else {
            None
        }
    }

    pub fn is_sentry(&self, id: NodeId) -> bool {
        self.sentries.contains(&id)
    }

    /// All confirmed nodes, sentries first.
    pub fn members(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.sentries
            .iter()
            .chain(self.non_sentries.iter())
            .copied()
    }

    pub fn len(&self) -> usize {
        self.sentries.len() + self.non_sentries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split the confirmed nodes of `graph` by the sentry rule: a node is a
/// sentry iff it issued at least `threshold` certifications and received at
/// least `threshold` certifications. Pending nodes belong to neither set.
pub fn qualify_sentries<G: GraphView>(graph: &G, threshold: u32) -> SentryPartition {
    let threshold = threshold as usize;
    let mut partition = SentryPartition::default();

    for index in 0..graph.node_count() {
        let Ok(raw) = u32::try_from(index) else {
            break;
        };
        let id = NodeId(raw);
        if graph.is_pending(id) {
            continue;
        }
        if graph.issued_count(id) >= threshold && graph.received_count(id) >= threshold {
            partition.sentries.insert(id);
        } else {
            partition.non_sentries.insert(id);
        }
    }

    tracing::debug!(
        threshold,
        sentries = partition.sentries.len(),
        non_sentries = partition.non_sentries.len(),
        "qualified sentries"
    );
    partition
}

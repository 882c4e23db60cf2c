use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use wotex_core::{IdentityRecord, NodeId, PendingCertification};
use wotex_graph::{GraphError, GraphHandle, WotGraph};
use wotex_identity::PendingDirectory;

/// Links that only exist through sandbox certifications, as `(from, to)`.
pub type PendingEdgeSet = HashSet<(NodeId, NodeId)>;

/// A working graph carrying sandbox data on top of the confirmed graph.
///
/// Dropping the overlay releases its graph handle; the confirmed graph is
/// never written to.
#[derive(Debug)]
pub struct Overlay {
    graph: GraphHandle,
    pending_nodes: BTreeMap<NodeId, IdentityRecord>,
    by_hash: HashMap<String, NodeId>,
    pending_edges: PendingEdgeSet,
    skipped: usize,
}

impl Overlay {
    pub fn graph(&self) -> &GraphHandle {
        &self.graph
    }

    /// Pending identities by overlay node id, in discovery order.
    pub fn pending_nodes(&self) -> &BTreeMap<NodeId, IdentityRecord> {
        &self.pending_nodes
    }

    /// Overlay node holding the pending identity with content hash `hash`.
    pub fn pending_node_of(&self, hash: &str) -> Option<NodeId> {
        self.by_hash.get(hash).copied()
    }

    pub fn pending_edges(&self) -> &PendingEdgeSet {
        &self.pending_edges
    }

    /// Number of sandbox certifications whose endpoints could not be resolved.
    pub fn skipped_certifications(&self) -> usize {
        self.skipped
    }

    /// Discard the working graph.
    pub fn release(self) {
        self.graph.release();
    }
}

/// Build an overlay of `base` with every pending identity of `directory`
/// and every resolvable pending certification.
///
/// Certifications resolve their issuer by public key and their target by
/// content hash, against `members` (confirmed) and the pending identities.
/// Unresolvable certifications are skipped. An edge is recorded as pending
/// only when it did not already exist.
pub fn build_overlay(
    base: &Arc<WotGraph>,
    members: &[IdentityRecord],
    directory: &PendingDirectory,
    certifications: &[PendingCertification],
) -> Result<Overlay, GraphError> {
    let mut graph = base.snapshot();

    let mut by_pubkey: HashMap<&str, NodeId> = HashMap::new();
    let mut by_hash: HashMap<&str, NodeId> = HashMap::new();
    for member in members {
        if let Some(node) = member.node() {
            by_pubkey.insert(member.pubkey.as_str(), node);
            by_hash.insert(member.hash.as_str(), node);
        }
    }

    let mut pending_nodes = BTreeMap::new();
    for entry in directory.entries() {
        let node = graph.add_node()?;
        by_pubkey.entry(entry.record.pubkey.as_str()).or_insert(node);
        by_hash.entry(entry.record.hash.as_str()).or_insert(node);
        pending_nodes.insert(node, entry.record.clone());
    }

    let mut pending_edges = PendingEdgeSet::new();
    let mut skipped = 0;
    for cert in certifications {
        let from = by_pubkey.get(cert.from.as_str()).copied();
        let to = by_hash.get(cert.to.as_str()).copied();
        let (Some(from), Some(to)) = (from, to) else {
            tracing::debug!(from = %cert.from, to = %cert.to, "skipping dangling pending certification");
            skipped += 1;
            continue;
        };
        if from == to {
            tracing::debug!(node = %from, "skipping pending self-certification");
            skipped += 1;
            continue;
        }
        if graph.add_link(from, to)? {
            pending_edges.insert((from, to));
        }
    }

    // First discovered identity wins a repeated hash, as for certifications.
    let mut pending_by_hash = HashMap::new();
    for (&node, record) in &pending_nodes {
        pending_by_hash.entry(record.hash.clone()).or_insert(node);
    }

    tracing::debug!(
        pending_nodes = pending_nodes.len(),
        pending_edges = pending_edges.len(),
        skipped,
        "built pending overlay"
    );

    Ok(Overlay {
        graph,
        pending_nodes,
        by_hash: pending_by_hash,
        pending_edges,
        skipped,
    })
}

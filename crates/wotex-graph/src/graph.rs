use std::collections::HashMap;
use std::sync::Arc;

use wotex_core::NodeId;

use crate::error::GraphError;

/// Read access shared by the confirmed graph and its working copies.
///
/// Sentry qualification and path search are written once against this trait.
pub trait GraphView {
    /// Number of node ids issued so far. Ids are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// True if `id` was added as a pending (sandbox) node.
    fn is_pending(&self, id: NodeId) -> bool;

    /// Nodes certified by `id` (outgoing links).
    fn issued(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_;

    /// Nodes certifying `id` (incoming links).
    fn received(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_;

    fn contains(&self, id: NodeId) -> bool {
        id.index() < self.node_count()
    }

    /// Fail fast on ids this graph never issued.
    fn check(&self, id: NodeId) -> Result<(), GraphError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode {
                node: id,
                node_count: self.node_count(),
            })
        }
    }

    fn issued_count(&self, id: NodeId) -> usize {
        self.issued(id).count()
    }

    fn received_count(&self, id: NodeId) -> usize {
        self.received(id).count()
    }

    fn has_link(&self, from: NodeId, to: NodeId) -> bool {
        self.contains(from) && self.issued(from).any(|n| n == to)
    }
}

#[derive(Debug, Clone, Default)]
struct NodeLinks {
    issued: Vec<NodeId>,
    received: Vec<NodeId>,
}

impl NodeLinks {
    fn link(&mut self, to: NodeId) {
        self.issued.push(to);
    }

    fn backlink(&mut self, from: NodeId) {
        self.received.push(from);
    }
}

fn next_id(count: usize) -> Result<NodeId, GraphError> {
    u32::try_from(count)
        .map(NodeId)
        .map_err(|_| GraphError::Exhausted)
}

/// The confirmed certification graph.
///
/// Nodes live in an arena indexed by [`NodeId`]; links are stored twice
/// (issued and received) so both directions can be walked.
#[derive(Debug, Clone, Default)]
pub struct WotGraph {
    nodes: Vec<NodeLinks>,
    link_count: usize,
}

impl WotGraph {
    /// Create a new, empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new confirmed node.
    pub fn add_node(&mut self) -> Result<NodeId, GraphError> {
        let id = next_id(self.nodes.len())?;
        self.nodes.push(NodeLinks::default());
        Ok(id)
    }

    /// Insert a certification `from -> to`.
    ///
    /// Returns `Ok(false)` if the link was already present.
    pub fn add_link(&mut self, from: NodeId, to: NodeId) -> Result<bool, GraphError> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Err(GraphError::SelfLink(from));
        }
        if self.has_link(from, to) {
            return Ok(false);
        }
        self.nodes[from.index()].link(to);
        self.nodes[to.index()].backlink(from);
        self.link_count += 1;
        Ok(true)
    }

    pub fn link_count(&self) -> usize {
        self.link_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Open an isolated working copy sharing this graph as its base.
    ///
    /// Writes to the handle land in its private delta, so the base is never
    /// modified. Creation cost does not depend on graph size.
    pub fn snapshot(self: &Arc<Self>) -> GraphHandle {
        tracing::trace!(nodes = self.nodes.len(), "opened graph handle");
        GraphHandle {
            base: Arc::clone(self),
            added_nodes: 0,
            delta: HashMap::new(),
            delta_links: 0,
        }
    }
}

impl GraphView for WotGraph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn is_pending(&self, _id: NodeId) -> bool {
        false
    }

    fn issued(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(id.index())
            .into_iter()
            .flat_map(|n| n.issued.iter().copied())
    }

    fn received(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(id.index())
            .into_iter()
            .flat_map(|n| n.received.iter().copied())
    }
}

/// A private, mutable working copy of a [`WotGraph`].
///
/// Nodes added here are pending nodes with ids above the base's id range.
/// Dropping the handle releases the delta; the base is left untouched.
#[derive(Debug)]
pub struct GraphHandle {
    base: Arc<WotGraph>,
    added_nodes: usize,
    delta: HashMap<NodeId, NodeLinks>,
    delta_links: usize,
}

impl GraphHandle {
    /// Allocate a new pending node.
    pub fn add_node(&mut self) -> Result<NodeId, GraphError> {
        let id = next_id(self.node_count())?;
        self.added_nodes += 1;
        Ok(id)
    }

    /// Insert a certification `from -> to` into the delta.
    ///
    /// Returns `Ok(false)` if the link already exists in the base or delta.
    pub fn add_link(&mut self, from: NodeId, to: NodeId) -> Result<bool, GraphError> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Err(GraphError::SelfLink(from));
        }
        if self.has_link(from, to) {
            return Ok(false);
        }
        self.delta.entry(from).or_default().link(to);
        self.delta.entry(to).or_default().backlink(from);
        self.delta_links += 1;
        Ok(true)
    }

    /// Open another independent copy carrying this handle's delta.
    pub fn snapshot(&self) -> GraphHandle {
        GraphHandle {
            base: Arc::clone(&self.base),
            added_nodes: self.added_nodes,
            delta: self.delta.clone(),
            delta_links: self.delta_links,
        }
    }

    /// The confirmed graph this handle was opened on.
    pub fn base(&self) -> &Arc<WotGraph> {
        &self.base
    }

    /// Number of pending nodes added to this handle.
    pub fn pending_count(&self) -> usize {
        self.added_nodes
    }

    /// Number of links added to this handle.
    pub fn delta_link_count(&self) -> usize {
        self.delta_links
    }

    /// Discard the handle and its delta.
    pub fn release(self) {}
}

impl Drop for GraphHandle {
    fn drop(&mut self) {
        tracing::trace!(
            pending_nodes = self.added_nodes,
            delta_links = self.delta_links,
            "released graph handle"
        );
    }
}

impl GraphView for GraphHandle {
    fn node_count(&self) -> usize {
        self.base.node_count() + self.added_nodes
    }

    fn is_pending(&self, id: NodeId) -> bool {
        id.index() >= self.base.node_count() && self.contains(id)
    }

    fn issued(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.base.issued(id).chain(
            self.delta
                .get(&id)
                .into_iter()
                .flat_map(|n| n.issued.iter().copied()),
        )
    }

    fn received(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.base.received(id).chain(
            self.delta
                .get(&id)
                .into_iter()
                .flat_map(|n| n.received.iter().copied()),
        )
    }
}

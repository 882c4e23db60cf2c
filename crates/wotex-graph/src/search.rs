use serde::{Deserialize, Serialize};

use wotex_core::NodeId;

use crate::error::GraphError;
use crate::graph::GraphView;

/// Upper bound on the number of equal-length paths enumerated per search.
///
/// Paths are produced in lexicographic order, so the cap only cuts the tail.
pub const MAX_ENUMERATED_PATHS: usize = 4096;

/// A certification chain from `source` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathResult {
    nodes: Vec<NodeId>,
}

impl PathResult {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    /// Nodes in order, source first.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    /// Number of certifications in the chain.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Directed links `(from, to)` traversed by the chain.
    pub fn links(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Find every minimum-length simple path from `source` to `destination`
/// following certifications, with at most `max_hops` links.
///
/// Returns an empty list if the destination is not reachable within the
/// bound. Paths are sorted lexicographically by node id. The search walks
/// the graph level by level and never explores past `max_hops` levels, so it
/// terminates on cyclic graphs.
pub fn shortest_paths<G: GraphView>(
    graph: &G,
    source: NodeId,
    destination: NodeId,
    max_hops: u32,
) -> Result<Vec<PathResult>, GraphError> {
    graph.check(source)?;
    graph.check(destination)?;

    if source == destination {
        return Ok(vec![PathResult::new(vec![source])]);
    }

    let n = graph.node_count();
    let mut depth: Vec<Option<u32>> = vec![None; n];
    let mut preds: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    depth[source.index()] = Some(0);

    let mut frontier = vec![source];
    let mut level = 0;
    while level < max_hops && !frontier.is_empty() && depth[destination.index()].is_none() {
        let mut next = Vec::new();
        for &current in &frontier {
            for neighbour in graph.issued(current) {
                match depth[neighbour.index()] {
                    None => {
                        depth[neighbour.index()] = Some(level + 1);
                        preds[neighbour.index()].push(current);
                        next.push(neighbour);
                    }
                    Some(d) if d == level + 1 => preds[neighbour.index()].push(current),
                    Some(_) => {}
                }
            }
        }
        frontier = next;
        level += 1;
    }

    if depth[destination.index()].is_none() {
        return Ok(Vec::new());
    }

    // Mark the nodes lying on at least one shortest path.
    let mut on_path = vec![false; n];
    on_path[destination.index()] = true;
    let mut stack = vec![destination];
    while let Some(node) = stack.pop() {
        for &pred in &preds[node.index()] {
            if !on_path[pred.index()] {
                on_path[pred.index()] = true;
                stack.push(pred);
            }
        }
    }

    let mut paths = Vec::new();
    let mut current = vec![source];
    enumerate(graph, &depth, &on_path, destination, &mut current, &mut paths);

    tracing::trace!(
        %source,
        %destination,
        hops = paths.first().map(PathResult::hops),
        count = paths.len(),
        "shortest paths"
    );
    Ok(paths)
}

/// Depth-first walk of the shortest-path layers in ascending id order.
fn enumerate<G: GraphView>(
    graph: &G,
    depth: &[Option<u32>],
    on_path: &[bool],
    destination: NodeId,
    current: &mut Vec<NodeId>,
    out: &mut Vec<PathResult>,
) {
    if out.len() >= MAX_ENUMERATED_PATHS {
        return;
    }
    let Some(&last) = current.last() else {
        return;
    };
    if last == destination {
        out.push(PathResult::new(current.clone()));
        return;
    }

    let next_depth = depth[last.index()].map(|d| d + 1);
    let mut successors: Vec<NodeId> = graph
        .issued(last)
        .filter(|n| on_path[n.index()] && depth[n.index()] == next_depth)
        .collect();
    successors.sort_unstable();

    for next in successors {
        current.push(next);
        enumerate(graph, depth, on_path, destination, current, out);
        current.pop();
    }
}

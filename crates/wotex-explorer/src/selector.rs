use serde::{Deserialize, Serialize};

use wotex_core::{Direction, NodeId};
use wotex_graph::{shortest_paths, GraphError, GraphView};

use crate::overlay::PendingEdgeSet;

/// One column of a result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// A node of the chain. `pending_cert` is set when the certification
    /// linking it to the previous step only exists in the sandbox.
    Node { id: NodeId, pending_cert: bool },
    /// Filler of a placeholder row.
    Unknown,
}

impl Step {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Node { id, .. } => Some(*id),
            Self::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// The chain between the target and one member, target first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub member: NodeId,
    /// False for placeholder rows (no chain within the hop bound).
    pub resolved: bool,
    pub steps: Vec<Step>,
}

impl Row {
    fn placeholder(target: NodeId, member: NodeId, max_hops: u32) -> Self {
        let fillers = max_hops.saturating_sub(1) as usize;
        let mut steps = Vec::with_capacity(fillers + 2);
        steps.push(Step::Node {
            id: target,
            pending_cert: false,
        });
        steps.extend(std::iter::repeat(Step::Unknown).take(fillers));
        steps.push(Step::Node {
            id: member,
            pending_cert: false,
        });
        Self {
            member,
            resolved: false,
            steps,
        }
    }

    /// Number of certifications in a resolved row.
    pub fn hops(&self) -> Option<usize> {
        self.resolved.then(|| self.steps.len().saturating_sub(1))
    }

    fn second_step_unknown(&self) -> bool {
        self.steps.get(1).is_some_and(Step::is_unknown)
    }
}

/// Compute one row per member: the first shortest chain between `target`
/// and the member in `direction`, or a placeholder when none exists within
/// `max_hops`.
///
/// `is_target_alias` tells whether a member carries the target's display
/// key; such members get no placeholder row.
///
/// Rows are ordered by descending step count, resolved rows before
/// placeholders, and the whole sequence is then reversed. The net order is
/// ascending length with placeholders ahead of resolved rows of equal
/// width; this follows the sort-then-reverse mechanism literally rather
/// than the "resolved chains first" reading of it.
pub fn select_paths<G, F>(
    graph: &G,
    target: NodeId,
    members: &[NodeId],
    direction: Direction,
    max_hops: u32,
    pending_edges: &PendingEdgeSet,
    is_target_alias: F,
) -> Result<Vec<Row>, GraphError>
where
    G: GraphView,
    F: Fn(NodeId) -> bool,
{
    graph.check(target)?;
    let mut rows = Vec::with_capacity(members.len());

    for &member in members {
        let (source, destination) = match direction {
            Direction::MemberToTarget => (member, target),
            Direction::TargetToMember => (target, member),
        };
        let paths = shortest_paths(graph, source, destination, max_hops)?;

        match paths.into_iter().next() {
            Some(path) => {
                let nodes = path.nodes();
                let mut steps: Vec<Step> = nodes
                    .iter()
                    .enumerate()
                    .map(|(i, &id)| {
                        // Flag the link between this node and the one the
                        // row visits just before it.
                        let pending_cert = match direction {
                            Direction::TargetToMember => i > 0
                                && pending_edges.contains(&(nodes[i - 1], id)),
                            Direction::MemberToTarget => i + 1 < nodes.len()
                                && pending_edges.contains(&(id, nodes[i + 1])),
                        };
                        Step::Node { id, pending_cert }
                    })
                    .collect();
                if direction == Direction::MemberToTarget {
                    steps.reverse();
                }
                tracing::debug!(%member, hops = path.hops(), "chain found");
                rows.push(Row {
                    member,
                    resolved: true,
                    steps,
                });
            }
            None if is_target_alias(member) => {
                tracing::debug!(%member, "no chain to target alias, row skipped");
            }
            None => {
                tracing::debug!(%member, max_hops, "no chain within bound");
                rows.push(Row::placeholder(target, member, max_hops));
            }
        }
    }

    rows.sort_by(|a, b| {
        b.steps
            .len()
            .cmp(&a.steps.len())
            .then_with(|| a.second_step_unknown().cmp(&b.second_step_unknown()))
    });
    rows.reverse();
    Ok(rows)
}

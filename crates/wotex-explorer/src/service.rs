use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wotex_core::threshold::DEFAULT_PROTOCOL_VERSION;
use wotex_core::{sentry_threshold, Direction, ExplorerConfig, IdentityRecord, NodeId, NodeStatus};
use wotex_graph::{qualify_sentries, GraphView, SentryPartition, WotGraph};
use wotex_identity::{GraphSource, IdentityResolver, IdentityStore, PendingDirectory};

use crate::error::ExplorerError;
use crate::overlay::{build_overlay, PendingEdgeSet};
use crate::report::{IdentityView, ReportRow, ReportStep, TrustReport};
use crate::selector::{select_paths, Row, Step};

/// Parameters of a trust-distance query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustQuery {
    /// Target key: uid, public key, or `uid[n]` for pending homonyms.
    /// `None` only lists sentries and non-sentries.
    pub target: Option<String>,
    /// Overlay sandbox identities and certifications.
    pub include_sandbox: bool,
    pub direction: Direction,
}

impl TrustQuery {
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            ..Default::default()
        }
    }

    pub fn with_sandbox(mut self, include_sandbox: bool) -> Self {
        self.include_sandbox = include_sandbox;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

/// Answers trust-distance queries.
///
/// Holds its two collaborators explicitly: the source of the confirmed
/// graph and the identity/certification store. Each query reads the graph
/// afresh and works on private handles, so one explorer can serve
/// concurrent queries.
pub struct TrustExplorer {
    graphs: Arc<dyn GraphSource>,
    identities: Arc<dyn IdentityStore>,
    config: ExplorerConfig,
}

impl TrustExplorer {
    pub fn new(
        graphs: Arc<dyn GraphSource>,
        identities: Arc<dyn IdentityStore>,
        config: ExplorerConfig,
    ) -> Self {
        Self {
            graphs,
            identities,
            config,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Run a query end to end.
    pub async fn explore(&self, query: TrustQuery) -> Result<TrustReport, ExplorerError> {
        let query_id = Uuid::now_v7();
        let started = Instant::now();
        let max_hops = self.config.max_hops();

        let graph = Arc::new(self.graphs.confirmed_graph().await?);
        let threshold = self.threshold().await?;
        let partition = qualify_sentries(&*graph, threshold);
        let mut identities = self.confirmed_identities(&partition).await?;

        let mut report = TrustReport {
            query_id,
            computed_at: Utc::now(),
            threshold,
            max_hops,
            direction: query.direction,
            include_sandbox: query.include_sandbox,
            sentries: Vec::new(),
            non_sentries: Vec::new(),
            target: None,
            rows: Vec::new(),
        };

        if let Some(key) = query.target.as_deref() {
            let pending = self.identities.pending_identities().await?;
            let directory = PendingDirectory::new(pending);
            let resolver = IdentityResolver::new(&*self.identities, &directory);
            let target = resolver.resolve(key, query.include_sandbox).await?;

            let rows = if query.include_sandbox {
                let members = self.identities.members().await?;
                let certifications = self.identities.pending_certifications().await?;
                let overlay = build_overlay(&graph, &members, &directory, &certifications)?;

                let target_node = match target.node() {
                    Some(node) => node,
                    None => overlay.pending_node_of(&target.hash).ok_or_else(|| {
                        ExplorerError::Internal(format!(
                            "pending identity {} missing from overlay",
                            target.uid
                        ))
                    })?,
                };
                for (&node, record) in overlay.pending_nodes() {
                    identities.insert(node, record.clone());
                }
                let mut working: Vec<NodeId> = partition.members().collect();
                working.extend(overlay.pending_nodes().keys().copied());

                let rows = self.rows(
                    overlay.graph(),
                    target_node,
                    &working,
                    query.direction,
                    overlay.pending_edges(),
                    &identities,
                )?;
                overlay.release();
                rows
            } else {
                let target_node = target.node().ok_or_else(|| {
                    ExplorerError::Internal(format!("identity {} has no graph node", target.uid))
                })?;
                let working: Vec<NodeId> = partition.members().collect();
                self.rows(
                    &*graph,
                    target_node,
                    &working,
                    query.direction,
                    &PendingEdgeSet::new(),
                    &identities,
                )?
            };

            report.target = Some(view(&target, status_of(&partition, &target)));
            report.rows = rows
                .iter()
                .map(|row| report_row(row, &partition, &identities))
                .collect::<Result<Vec<_>, _>>()?;
        }

        report.sentries = views(partition.sentries.iter().copied(), &partition, &identities)?;
        report.non_sentries =
            views(partition.non_sentries.iter().copied(), &partition, &identities)?;

        tracing::info!(
            %query_id,
            target = query.target.as_deref().unwrap_or("-"),
            direction = %query.direction,
            include_sandbox = query.include_sandbox,
            threshold,
            sentries = report.sentries.len(),
            rows = report.rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "trust query completed"
        );
        Ok(report)
    }

    async fn threshold(&self) -> Result<u32, ExplorerError> {
        let (members_count, version) = match self.identities.network_head().await? {
            Some(head) => (head.members_count, head.version),
            None => (0, DEFAULT_PROTOCOL_VERSION),
        };
        Ok(sentry_threshold(
            members_count,
            self.config.step_max,
            version,
            self.config.dsen_p,
        ))
    }

    /// Look up every confirmed node concurrently; results are collected by
    /// position, not by completion order.
    async fn confirmed_identities(
        &self,
        partition: &SentryPartition,
    ) -> Result<HashMap<NodeId, IdentityRecord>, ExplorerError> {
        let nodes: Vec<NodeId> = partition.members().collect();
        let lookups = nodes
            .iter()
            .map(|&node| self.identities.identity_by_node(node));
        let results = join_all(lookups).await;

        let mut identities = HashMap::with_capacity(nodes.len());
        for (node, result) in nodes.into_iter().zip(results) {
            let record = result?.ok_or_else(|| {
                ExplorerError::Internal(format!("no identity bound to node {node}"))
            })?;
            identities.insert(node, record);
        }
        Ok(identities)
    }

    fn rows<G: GraphView>(
        &self,
        graph: &G,
        target: NodeId,
        members: &[NodeId],
        direction: Direction,
        pending_edges: &PendingEdgeSet,
        identities: &HashMap<NodeId, IdentityRecord>,
    ) -> Result<Vec<Row>, ExplorerError> {
        let target_uid = identities.get(&target).map(|r| r.uid.as_str());
        let is_target_alias = |member: NodeId| {
            member != target
                && identities.get(&member).map(|r| r.uid.as_str()) == target_uid
        };
        Ok(select_paths(
            graph,
            target,
            members,
            direction,
            self.config.max_hops(),
            pending_edges,
            is_target_alias,
        )?)
    }
}

fn status_of(partition: &SentryPartition, record: &IdentityRecord) -> NodeStatus {
    record
        .node()
        .and_then(|node| partition.status_of(node))
        .unwrap_or(NodeStatus::Pending)
}

fn view(record: &IdentityRecord, status: NodeStatus) -> IdentityView {
    IdentityView {
        uid: record.uid.clone(),
        pubkey: record.pubkey.clone(),
        status,
    }
}

fn lookup<'a>(
    identities: &'a HashMap<NodeId, IdentityRecord>,
    node: NodeId,
) -> Result<&'a IdentityRecord, ExplorerError> {
    identities
        .get(&node)
        .ok_or_else(|| ExplorerError::Internal(format!("no identity bound to node {node}")))
}

fn node_status(partition: &SentryPartition, node: NodeId) -> NodeStatus {
    partition.status_of(node).unwrap_or(NodeStatus::Pending)
}

fn views(
    nodes: impl Iterator<Item = NodeId>,
    partition: &SentryPartition,
    identities: &HashMap<NodeId, IdentityRecord>,
) -> Result<Vec<IdentityView>, ExplorerError> {
    nodes
        .map(|node| -> Result<IdentityView, ExplorerError> {
            Ok(view(lookup(identities, node)?, node_status(partition, node)))
        })
        .collect()
}

fn report_row(
    row: &Row,
    partition: &SentryPartition,
    identities: &HashMap<NodeId, IdentityRecord>,
) -> Result<ReportRow, ExplorerError> {
    let member = view(
        lookup(identities, row.member)?,
        node_status(partition, row.member),
    );
    let steps = row
        .steps
        .iter()
        .map(|step| -> Result<ReportStep, ExplorerError> {
            match *step {
                Step::Node { id, pending_cert } => {
                    let record = lookup(identities, id)?;
                    Ok(ReportStep::Identity {
                        uid: record.uid.clone(),
                        pubkey: record.pubkey.clone(),
                        status: node_status(partition, id),
                        pending_cert,
                    })
                }
                Step::Unknown => Ok(ReportStep::Unknown),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ReportRow {
        member,
        resolved: row.resolved,
        steps,
    })
}

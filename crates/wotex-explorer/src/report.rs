//! Result contract handed to presentation layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wotex_core::{Direction, NodeStatus};

/// An identity as shown in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityView {
    /// Display key; pending homonyms carry their `[n]` suffix.
    pub uid: String,
    pub pubkey: String,
    pub status: NodeStatus,
}

/// One column of a report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportStep {
    Identity {
        uid: String,
        pubkey: String,
        status: NodeStatus,
        /// The certification linking this step to the previous one is pending.
        pending_cert: bool,
    },
    Unknown,
}

impl ReportStep {
    pub fn uid(&self) -> Option<&str> {
        match self {
            Self::Identity { uid, .. } => Some(uid),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub member: IdentityView,
    /// False when no chain exists within the hop bound.
    pub resolved: bool,
    /// Steps starting at the target.
    pub steps: Vec<ReportStep>,
}

impl ReportRow {
    /// Per-step pending certification flags, target first.
    pub fn pending_flags(&self) -> Vec<bool> {
        self.steps
            .iter()
            .map(|s| matches!(s, ReportStep::Identity { pending_cert: true, .. }))
            .collect()
    }
}

/// Outcome of a trust-distance query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustReport {
    pub query_id: Uuid,
    pub computed_at: DateTime<Utc>,
    /// Sentry threshold (`dSen`) used for the partition.
    pub threshold: u32,
    pub max_hops: u32,
    pub direction: Direction,
    pub include_sandbox: bool,
    pub sentries: Vec<IdentityView>,
    pub non_sentries: Vec<IdentityView>,
    /// Resolved target, absent for sentry-only queries.
    pub target: Option<IdentityView>,
    pub rows: Vec<ReportRow>,
}

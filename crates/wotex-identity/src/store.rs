use async_trait::async_trait;

use wotex_core::{IdentityRecord, NetworkHead, NodeId, PendingCertification};
use wotex_graph::WotGraph;

use crate::error::StoreError;

/// Source of the confirmed certification graph.
///
/// Every call is a fresh read; callers never cache the result across queries.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Build the confirmed graph from persisted state.
    async fn confirmed_graph(&self) -> Result<WotGraph, StoreError>;
}

/// Read-only query interface over identities and certifications.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Find a confirmed identity by uid or public key.
    async fn find_member(&self, key: &str) -> Result<Option<IdentityRecord>, StoreError>;

    /// Find the confirmed identity bound to a node of the confirmed graph.
    async fn identity_by_node(&self, node: NodeId) -> Result<Option<IdentityRecord>, StoreError>;

    /// All confirmed identities.
    async fn members(&self) -> Result<Vec<IdentityRecord>, StoreError>;

    /// Pending identities, in discovery order.
    async fn pending_identities(&self) -> Result<Vec<IdentityRecord>, StoreError>;

    /// Pending certifications, in discovery order.
    async fn pending_certifications(&self) -> Result<Vec<PendingCertification>, StoreError>;

    /// Current network size and protocol version, if a head exists.
    async fn network_head(&self) -> Result<Option<NetworkHead>, StoreError>;
}

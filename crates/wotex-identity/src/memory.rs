use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::{PoisonError, RwLock};

use wotex_core::{IdentityRecord, NetworkHead, NodeId, PendingCertification};
use wotex_graph::{GraphError, WotGraph};

use crate::dataset::{IdentityEntry, WotDataset};
use crate::error::StoreError;
use crate::store::{GraphSource, IdentityStore};

/// In-memory identity/certification store.
///
/// Members are stored in node id order; uids and public keys are indexed in
/// a DashMap so lookups from concurrent queries do not contend.
pub struct MemoryWotStore {
    members: RwLock<Vec<IdentityRecord>>,
    /// uid or pubkey -> node id.
    by_key: DashMap<String, NodeId>,
    links: RwLock<Vec<(NodeId, NodeId)>>,
    pending_identities: RwLock<Vec<IdentityRecord>>,
    pending_certifications: RwLock<Vec<PendingCertification>>,
    head: RwLock<Option<NetworkHead>>,
}

impl MemoryWotStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            members: RwLock::new(Vec::new()),
            by_key: DashMap::new(),
            links: RwLock::new(Vec::new()),
            pending_identities: RwLock::new(Vec::new()),
            pending_certifications: RwLock::new(Vec::new()),
            head: RwLock::new(None),
        }
    }

    /// Build a store from a dataset, validating member references.
    pub fn from_dataset(dataset: WotDataset) -> Result<Self, StoreError> {
        let store = Self::new();
        for entry in dataset.members {
            store.insert_member(entry)?;
        }
        for cert in dataset.certifications {
            store.certify(&cert.from, &cert.to)?;
        }
        for entry in dataset.pending_identities {
            store.add_pending_identity(entry);
        }
        for cert in dataset.pending_certifications {
            store.add_pending_certification(cert);
        }
        store.set_head(dataset.head);

        tracing::info!(
            members = store.member_count(),
            links = store.link_count(),
            pending_identities = store.pending_identity_count(),
            "loaded web of trust"
        );
        Ok(store)
    }

    /// Add a confirmed member. Node ids follow insertion order.
    pub fn insert_member(&self, entry: IdentityEntry) -> Result<NodeId, StoreError> {
        for key in [&entry.uid, &entry.pubkey] {
            if self.by_key.contains_key(key) {
                return Err(StoreError::DuplicateMember(key.clone()));
            }
        }

        let mut members = self.members.write().unwrap_or_else(PoisonError::into_inner);
        let node = member_node_id(members.len())?;

        self.by_key.insert(entry.uid.clone(), node);
        self.by_key.insert(entry.pubkey.clone(), node);
        members.push(IdentityRecord::confirmed(entry.uid, entry.pubkey, entry.hash, node));
        Ok(node)
    }

    /// Record a confirmed certification between two members.
    pub fn certify(&self, from: &str, to: &str) -> Result<(), StoreError> {
        let from = self.node_of(from)?;
        let to = self.node_of(to)?;
        if from == to {
            return Err(GraphError::SelfLink(from).into());
        }
        self.links
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((from, to));
        Ok(())
    }

    pub fn add_pending_identity(&self, entry: IdentityEntry) {
        self.pending_identities
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(IdentityRecord::pending(entry.uid, entry.pubkey, entry.hash));
    }

    pub fn add_pending_certification(&self, cert: PendingCertification) {
        self.pending_certifications
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(cert);
    }

    pub fn set_head(&self, head: Option<NetworkHead>) {
        *self.head.write().unwrap_or_else(PoisonError::into_inner) = head;
    }

    pub fn member_count(&self) -> usize {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn link_count(&self) -> usize {
        self.links.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn pending_identity_count(&self) -> usize {
        self.pending_identities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn pending_certification_count(&self) -> usize {
        self.pending_certifications
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn node_of(&self, key: &str) -> Result<NodeId, StoreError> {
        self.by_key
            .get(key)
            .map(|entry| *entry.value())
            .ok_or_else(|| StoreError::UnknownMember(key.to_string()))
    }
}

impl Default for MemoryWotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphSource for MemoryWotStore {
    async fn confirmed_graph(&self) -> Result<WotGraph, StoreError> {
        let mut graph = WotGraph::new();
        for _ in 0..self.member_count() {
            graph.add_node()?;
        }
        let links = self.links.read().unwrap_or_else(PoisonError::into_inner);
        for &(from, to) in links.iter() {
            graph.add_link(from, to)?;
        }
        Ok(graph)
    }
}

#[async_trait]
impl IdentityStore for MemoryWotStore {
    async fn find_member(&self, key: &str) -> Result<Option<IdentityRecord>, StoreError> {
        let Some(node) = self.by_key.get(key).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.identity_by_node(node).await
    }

    async fn identity_by_node(&self, node: NodeId) -> Result<Option<IdentityRecord>, StoreError> {
        let members = self.members.read().unwrap_or_else(PoisonError::into_inner);
        Ok(members.get(node.index()).cloned())
    }

    async fn members(&self) -> Result<Vec<IdentityRecord>, StoreError> {
        Ok(self
            .members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn pending_identities(&self) -> Result<Vec<IdentityRecord>, StoreError> {
        Ok(self
            .pending_identities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn pending_certifications(&self) -> Result<Vec<PendingCertification>, StoreError> {
        Ok(self
            .pending_certifications
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn network_head(&self) -> Result<Option<NetworkHead>, StoreError> {
        Ok(*self.head.read().unwrap_or_else(PoisonError::into_inner))
    }
}

fn member_node_id(count: usize) -> Result<NodeId, GraphError> {
    u32::try_from(count)
        .map(NodeId)
        .map_err(|_| GraphError::Exhausted)
}

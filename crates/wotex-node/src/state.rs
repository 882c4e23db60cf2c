//! Shared node state for HTTP handlers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use wotex_explorer::TrustExplorer;
use wotex_identity::MemoryWotStore;

/// Shared state for the running node.
pub struct NodeState {
    /// Query service shared by every request.
    pub explorer: TrustExplorer,
    /// Backing store, kept for status reporting.
    pub store: Arc<MemoryWotStore>,
    /// Dataset the store was loaded from.
    pub dataset: PathBuf,
    /// When the node started.
    pub start_time: Instant,
}

impl NodeState {
    pub fn new(explorer: TrustExplorer, store: Arc<MemoryWotStore>, dataset: PathBuf) -> Self {
        Self {
            explorer,
            store,
            dataset,
            start_time: Instant::now(),
        }
    }
}

//! Dataset-backed storage for the wotex node.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use wotex_identity::{MemoryWotStore, WotDataset};

/// Load the web of trust described by the dataset at `path`.
///
/// A missing file yields an empty store so that a freshly initialised node
/// can start; a malformed one is an error.
pub fn open_store(path: &Path) -> Result<Arc<MemoryWotStore>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "dataset not found, starting with an empty web of trust");
        return Ok(Arc::new(MemoryWotStore::new()));
    }

    let dataset = WotDataset::load(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    let store = MemoryWotStore::from_dataset(dataset)
        .with_context(|| format!("inconsistent dataset {}", path.display()))?;
    Ok(Arc::new(store))
}

//! On-disk description of a web of trust.

use serde::{Deserialize, Serialize};
use std::path::Path;

use wotex_core::{NetworkHead, PendingCertification};

use crate::error::StoreError;

/// Identity fields as they appear in a dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityEntry {
    pub uid: String,
    pub pubkey: String,
    pub hash: String,
}

/// Confirmed certification between two members, by public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub from: String,
    pub to: String,
}

/// A snapshot of the identity/certification store.
///
/// Members receive node ids in the order they are listed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WotDataset {
    #[serde(default)]
    pub head: Option<NetworkHead>,
    #[serde(default)]
    pub members: Vec<IdentityEntry>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
    #[serde(default)]
    pub pending_identities: Vec<IdentityEntry>,
    #[serde(default)]
    pub pending_certifications: Vec<PendingCertification>,
}

impl WotDataset {
    /// Read a JSON dataset file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        let dataset = serde_json::from_str(&contents)?;
        Ok(dataset)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

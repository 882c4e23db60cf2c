use std::collections::HashMap;

use wotex_core::IdentityRecord;

use crate::error::ResolveError;
use crate::store::IdentityStore;

/// Split a key of the form `name[n]` into `("name", n)`.
///
/// Keys without a well-formed numeric suffix map to index 0 and are kept
/// whole, so `"bob[x]"` is looked up as the literal name `"bob[x]"`.
pub fn parse_key(key: &str) -> (&str, usize) {
    if let Some(body) = key.strip_suffix(']') {
        if let Some(open) = body.rfind('[') {
            let (base, digits) = (&body[..open], &body[open + 1..]);
            if !base.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
            {
                if let Ok(index) = digits.parse() {
                    return (base, index);
                }
            }
        }
    }
    (key, 0)
}

/// A pending identity with its position among homonyms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    /// The identity; `uid` is the display key (suffixed for homonyms).
    pub record: IdentityRecord,
    /// The uid as written in the sandbox.
    pub base_uid: String,
    /// Rank among pending identities sharing `base_uid`, in discovery order.
    pub index: usize,
}

/// Pending identities with stable homonym suffixes.
///
/// Identities sharing a uid (case-sensitive) are numbered `uid[0]`,
/// `uid[1]`, … in discovery order. A uid held by a single pending identity
/// keeps its bare form as display key. The numbering depends only on the
/// input order, so rebuilding the directory from the same sequence gives
/// the same suffixes.
#[derive(Debug, Clone, Default)]
pub struct PendingDirectory {
    entries: Vec<PendingEntry>,
    /// base uid -> positions in `entries`, in index order.
    by_uid: HashMap<String, Vec<usize>>,
}

impl PendingDirectory {
    pub fn new(pending: impl IntoIterator<Item = IdentityRecord>) -> Self {
        let pending: Vec<IdentityRecord> = pending.into_iter().collect();

        let mut homonyms: HashMap<&str, usize> = HashMap::new();
        for record in &pending {
            *homonyms.entry(record.uid.as_str()).or_insert(0) += 1;
        }
        let homonyms: HashMap<String, usize> = homonyms
            .into_iter()
            .map(|(uid, count)| (uid.to_string(), count))
            .collect();

        let mut directory = Self::default();
        for mut record in pending {
            let base_uid = record.uid.clone();
            let positions = directory.by_uid.entry(base_uid.clone()).or_default();
            let index = positions.len();
            positions.push(directory.entries.len());

            if homonyms.get(&base_uid).copied().unwrap_or(0) > 1 {
                record.uid = format!("{base_uid}[{index}]");
            }
            directory.entries.push(PendingEntry {
                record,
                base_uid,
                index,
            });
        }
        directory
    }

    /// Entries in discovery order.
    pub fn entries(&self) -> &[PendingEntry] {
        &self.entries
    }

    /// The `index`-th pending identity named `base_uid`.
    pub fn find(&self, base_uid: &str, index: usize) -> Option<&PendingEntry> {
        self.by_uid
            .get(base_uid)
            .and_then(|positions| positions.get(index))
            .map(|&pos| &self.entries[pos])
    }

    /// Look up by `name[n]` key, falling back to an exact public key match.
    pub fn find_key(&self, key: &str) -> Option<&PendingEntry> {
        let (base, index) = parse_key(key);
        self.find(base, index)
            .or_else(|| self.by_pubkey(key))
    }

    pub fn by_pubkey(&self, pubkey: &str) -> Option<&PendingEntry> {
        self.entries.iter().find(|e| e.record.pubkey == pubkey)
    }

    pub fn by_hash(&self, hash: &str) -> Option<&PendingEntry> {
        self.entries.iter().find(|e| e.record.hash == hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves a query key to a single identity, confirmed or pending.
pub struct IdentityResolver<'a> {
    store: &'a dyn IdentityStore,
    directory: &'a PendingDirectory,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(store: &'a dyn IdentityStore, directory: &'a PendingDirectory) -> Self {
        Self { store, directory }
    }

    /// Resolve `key` (a uid, public key, or suffixed `uid[n]`).
    ///
    /// Confirmed identities win over pending ones. A key that only matches
    /// pending data fails with [`ResolveError::SandboxRequired`] unless
    /// `include_sandbox` is set.
    pub async fn resolve(
        &self,
        key: &str,
        include_sandbox: bool,
    ) -> Result<IdentityRecord, ResolveError> {
        if let Some(record) = self.store.find_member(key).await? {
            tracing::debug!(key, uid = %record.uid, "resolved confirmed identity");
            return Ok(record);
        }

        match self.directory.find_key(key) {
            Some(entry) if include_sandbox => {
                tracing::debug!(key, uid = %entry.record.uid, "resolved pending identity");
                Ok(entry.record.clone())
            }
            Some(_) => Err(ResolveError::SandboxRequired(key.to_string())),
            None => Err(ResolveError::NotFound(key.to_string())),
        }
    }
}

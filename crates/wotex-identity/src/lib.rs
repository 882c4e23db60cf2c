//! wotex Identity Layer
//!
//! Maps external identity keys to graph nodes and abstracts the
//! identity/certification store:
//! - [`GraphSource`] and [`IdentityStore`] — read-only collaborator interfaces
//! - [`MemoryWotStore`] — in-memory store loaded from a [`WotDataset`]
//! - [`PendingDirectory`] — stable `uid[n]` suffixes for pending homonyms
//! - [`IdentityResolver`] — key resolution across confirmed and pending identities

pub mod dataset;
pub mod error;
pub mod memory;
pub mod resolver;
pub mod store;

pub use dataset::{CertificationEntry, IdentityEntry, WotDataset};
pub use error::{ResolveError, StoreError};
pub use memory::MemoryWotStore;
pub use resolver::{parse_key, IdentityResolver, PendingDirectory, PendingEntry};
pub use store::{GraphSource, IdentityStore};

//! wotex Core — Fundamental types, errors, and configuration shared by the
//! web-of-trust explorer crates.

pub mod config;
pub mod error;
pub mod threshold;
pub mod types;

pub use config::{ExplorerConfig, MAX_HOPS_LIMIT};
pub use error::CoreError;
pub use threshold::sentry_threshold;
pub use types::{
    Direction, IdentityRecord, IdentityStatus, NetworkHead, NodeId, NodeStatus,
    PendingCertification,
};

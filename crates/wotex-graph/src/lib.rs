//! wotex Graph — in-memory certification graph for trust-distance queries.
//!
//! This crate provides:
//! - [`WotGraph`] — the confirmed graph, an arena of adjacency lists keyed by dense [`NodeId`]s.
//! - [`GraphHandle`] — an isolated working copy (shared base plus private delta).
//! - [`qualify_sentries`] — the degree-based sentry partition.
//! - [`shortest_paths`] — bounded enumeration of minimum-length simple paths.

pub mod error;
pub mod graph;
pub mod search;
pub mod sentries;

pub use error::GraphError;
pub use graph::{GraphHandle, GraphView, WotGraph};
pub use search::{shortest_paths, PathResult, MAX_ENUMERATED_PATHS};
pub use sentries::{qualify_sentries, SentryPartition};

pub use wotex_core::NodeId;

//! wotex Explorer — trust-distance queries over a web of trust.
//!
//! This crate provides:
//! - [`build_overlay`] — merges sandbox identities and certifications into an isolated working graph.
//! - [`select_paths`] — one representative certification chain (or placeholder) per member, ranked.
//! - [`TrustExplorer`] — the query service tying resolution, overlay, selection, and enrichment together.

pub mod error;
pub mod overlay;
pub mod report;
pub mod selector;
pub mod service;

pub use error::ExplorerError;
pub use overlay::{build_overlay, Overlay, PendingEdgeSet};
pub use report::{IdentityView, ReportRow, ReportStep, TrustReport};
pub use selector::{select_paths, Row, Step};
pub use service::{TrustExplorer, TrustQuery};

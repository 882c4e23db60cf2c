use wotex_graph::GraphError;
use wotex_identity::{ResolveError, StoreError};

/// Errors surfaced to callers of a trust-distance query.
///
/// Resolution failures stay distinct; every other failure collapses into a
/// single diagnostic message.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error("identity not found: {0}")]
    NotFound(String),

    #[error("identity {0} is only known from sandbox data; include the sandbox to query it")]
    SandboxRequired(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ResolveError> for ExplorerError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound(key) => Self::NotFound(key),
            ResolveError::SandboxRequired(key) => Self::SandboxRequired(key),
            ResolveError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<StoreError> for ExplorerError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<GraphError> for ExplorerError {
    fn from(err: GraphError) -> Self {
        Self::Internal(err.to_string())
    }
}

use wotex_graph::GraphError;

/// Errors raised by identity/certification stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unknown member: {0}")]
    UnknownMember(String),

    #[error("duplicate member key: {0}")]
    DuplicateMember(String),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a failed key resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("identity not found: {0}")]
    NotFound(String),

    /// The key only matches pending identities and sandbox data is excluded.
    #[error("identity {0} is only known from sandbox data; include the sandbox to query it")]
    SandboxRequired(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

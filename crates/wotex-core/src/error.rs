/// Core errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid direction: {0} (expected member-to-target or target-to-member)")]
    InvalidDirection(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Parameters of the trust-distance computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Maximum certification distance of the currency (`stepMax`).
    #[serde(default = "default_step_max")]
    pub step_max: u32,
    /// Hop bound of the path search. Defaults to `step_max`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hops: Option<u32>,
    /// Multiplier of the legacy (protocol <= 3) threshold formula.
    #[serde(default = "default_dsen_p")]
    pub dsen_p: f64,
}

/// Largest accepted hop bound. Placeholder rows are this wide.
pub const MAX_HOPS_LIMIT: u32 = u8::MAX as u32;

fn default_step_max() -> u32 {
    5
}

fn default_dsen_p() -> f64 {
    1.0
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            step_max: default_step_max(),
            max_hops: None,
            dsen_p: default_dsen_p(),
        }
    }
}

impl ExplorerConfig {
    /// Hop bound applied to every search.
    pub fn max_hops(&self) -> u32 {
        self.max_hops.unwrap_or(self.step_max)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.step_max == 0 {
            return Err(CoreError::InvalidConfig("step_max must be at least 1".into()));
        }
        if self.max_hops == Some(0) {
            return Err(CoreError::InvalidConfig("max_hops must be at least 1".into()));
        }
        if self.max_hops() > MAX_HOPS_LIMIT {
            return Err(CoreError::InvalidConfig(format!(
                "max_hops must be at most {MAX_HOPS_LIMIT}, got {}",
                self.max_hops()
            )));
        }
        if !(self.dsen_p.is_finite() && self.dsen_p > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "dsen_p must be a positive number, got {}",
                self.dsen_p
            )));
        }
        Ok(())
    }
}

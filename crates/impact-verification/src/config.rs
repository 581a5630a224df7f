//! Verification service configuration

use crate::VerificationServiceError;
use serde::{Deserialize, Serialize};

/// Configuration for reviewer operations
///
/// Loadable from TOML:
///
/// ```toml
/// max_batch_size = 100
/// require_org_admin = true
/// min_dispute_reason_len = 1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Largest batch accepted by approve-all
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Require the reviewer to administer the entry's organization
    #[serde(default = "default_require_org_admin")]
    pub require_org_admin: bool,

    /// Minimum dispute reason length, in characters after trimming
    #[serde(default = "default_min_dispute_reason_len")]
    pub min_dispute_reason_len: usize,
}

fn default_max_batch_size() -> usize {
    100
}

fn default_require_org_admin() -> bool {
    true
}

fn default_min_dispute_reason_len() -> usize {
    1
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
            require_org_admin: default_require_org_admin(),
            min_dispute_reason_len: default_min_dispute_reason_len(),
        }
    }
}

impl VerificationConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, VerificationServiceError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| VerificationServiceError::Config(e.to_string()))?;

        if config.max_batch_size == 0 {
            return Err(VerificationServiceError::Config(
                "max_batch_size must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}

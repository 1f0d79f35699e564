//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Put the full error text into HTTP error details (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}

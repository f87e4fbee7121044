//! Configuration I/O (YAML loading)
//!
//! Defines the YAML schema types. Loading and export live on
//! `QueryConfig` in query_config.rs.

use super::query_config::{EmptyClaimPolicy, FailurePolicy, OverwritePolicy};
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Base preset
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Fine-grained overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

fn default_preset() -> String {
    "standard".to_string()
}

/// Configuration overrides applied on top of the preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_policy: Option<FailurePolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite_policy: Option<OverwritePolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_claim: Option<EmptyClaimPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_tag_probes: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_chain_steps: Option<usize>,
}

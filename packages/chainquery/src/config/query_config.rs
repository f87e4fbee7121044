//! Query engine configuration
//!
//! ```rust,ignore
//! // Preset
//! let config = QueryConfig::preset(Preset::Strict);
//!
//! // Preset with overrides
//! let config = QueryConfig::preset(Preset::Standard)
//!     .failure_policy(FailurePolicy::Skip)
//!     .max_chain_steps(32);
//!
//! // YAML
//! let config = QueryConfig::from_yaml("query.yaml")?;
//! ```

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, ConfigOverrides};
use super::preset::Preset;
use super::validation::{check_range, Validatable};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for `max_chain_steps`
pub const MAX_CHAIN_STEPS_LIMIT: usize = 4096;

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// What a query does when replay fails on an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop on the first failing element and report it
    Abort,
    /// Log the failure and leave the element out (kept in place by `remove`)
    Skip,
}

/// What `CaptureContext::begin` does when an unclaimed chain is staged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Discard the staged chain with a warning
    Replace,
    /// Fail with `CaptureError::AlreadyStaged`
    Reject,
}

/// What a claimed-chain query does when the context holds nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyClaimPolicy {
    /// Use the identity chain (the element itself)
    Identity,
    /// Fail with `QueryError::NoStagedExpression`
    Reject,
}

/// Complete configuration for a `QueryEngine`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    preset: Preset,
    pub failure_policy: FailurePolicy,
    pub overwrite_policy: OverwritePolicy,
    pub empty_claim: EmptyClaimPolicy,
    /// Consult registered wrapper probes during element type resolution
    pub use_tag_probes: bool,
    /// Longest chain a recorder accepts
    pub max_chain_steps: usize,
}

impl QueryConfig {
    /// Start from a preset
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Standard => Self {
                preset,
                failure_policy: FailurePolicy::Abort,
                overwrite_policy: OverwritePolicy::Replace,
                empty_claim: EmptyClaimPolicy::Identity,
                use_tag_probes: true,
                max_chain_steps: 256,
            },
            Preset::Strict => Self {
                preset,
                failure_policy: FailurePolicy::Abort,
                overwrite_policy: OverwritePolicy::Reject,
                empty_claim: EmptyClaimPolicy::Reject,
                use_tag_probes: true,
                max_chain_steps: 64,
            },
            Preset::Lenient => Self {
                preset,
                failure_policy: FailurePolicy::Skip,
                overwrite_policy: OverwritePolicy::Replace,
                empty_claim: EmptyClaimPolicy::Identity,
                use_tag_probes: true,
                max_chain_steps: MAX_CHAIN_STEPS_LIMIT,
            },
        }
    }

    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn overwrite_policy(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite_policy = policy;
        self
    }

    pub fn empty_claim(mut self, policy: EmptyClaimPolicy) -> Self {
        self.empty_claim = policy;
        self
    }

    pub fn use_tag_probes(mut self, enabled: bool) -> Self {
        self.use_tag_probes = enabled;
        self
    }

    pub fn max_chain_steps(mut self, steps: usize) -> Self {
        self.max_chain_steps = steps;
        self
    }

    /// Load and validate a YAML v1 configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML v1 document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        // Version check
        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = Preset::from_str(&export.preset)
            .map_err(|_| ConfigError::UnknownPreset(export.preset.clone()))?;

        let mut config = Self::preset(preset);
        if let Some(overrides) = export.overrides {
            config.apply(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Export as a YAML v1 document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.preset.to_string(),
            overrides: Some(ConfigOverrides {
                failure_policy: Some(self.failure_policy),
                overwrite_policy: Some(self.overwrite_policy),
                empty_claim: Some(self.empty_claim),
                use_tag_probes: Some(self.use_tag_probes),
                max_chain_steps: Some(self.max_chain_steps),
            }),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }

    fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(policy) = overrides.failure_policy {
            self.failure_policy = policy;
        }
        if let Some(policy) = overrides.overwrite_policy {
            self.overwrite_policy = policy;
        }
        if let Some(policy) = overrides.empty_claim {
            self.empty_claim = policy;
        }
        if let Some(enabled) = overrides.use_tag_probes {
            self.use_tag_probes = enabled;
        }
        if let Some(steps) = overrides.max_chain_steps {
            self.max_chain_steps = steps;
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl Validatable for QueryConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range(
            "max_chain_steps",
            self.max_chain_steps,
            1..=MAX_CHAIN_STEPS_LIMIT,
            "a limit of zero rejects every capture",
        )
    }

    fn config_name(&self) -> &'static str {
        "QueryConfig"
    }
}

//! Errors raised while building or loading a `QueryConfig`

use std::fmt::Display;
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting outside its accepted bounds
    #[error("{setting} = {value} is outside {bounds} ({hint})")]
    OutOfRange {
        setting: String,
        value: String,
        bounds: String,
        hint: String,
    },

    #[error("config document has no 'version' key; chainquery config files start with 'version: 1'")]
    MissingVersion,

    #[error("config version {found} is not understood (this build reads {})", list_versions(supported))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    #[error("no preset called '{0}' (choose standard, strict or lenient)")]
    UnknownPreset(String),

    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// `setting` holds `value`, which falls outside `bounds`
    pub fn out_of_range<T: Display>(
        setting: &str,
        value: T,
        bounds: RangeInclusive<T>,
        hint: &str,
    ) -> Self {
        let (low, high) = bounds.into_inner();
        Self::OutOfRange {
            setting: setting.to_string(),
            value: value.to_string(),
            bounds: format!("{low}..={high}"),
            hint: hint.to_string(),
        }
    }
}

fn list_versions(versions: &[u32]) -> String {
    let listed: Vec<String> = versions.iter().map(u32::to_string).collect();
    listed.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = ConfigError::out_of_range(
            "max_chain_steps",
            0,
            1..=4096,
            "a chain needs room for at least one step",
        );

        let msg = err.to_string();
        assert_eq!(
            msg,
            "max_chain_steps = 0 is outside 1..=4096 (a chain needs room for at least one step)"
        );
    }

    #[test]
    fn test_unsupported_version_lists_known_versions() {
        let err = ConfigError::UnsupportedVersion {
            found: 3,
            supported: vec![1, 2],
        };
        assert_eq!(
            err.to_string(),
            "config version 3 is not understood (this build reads 1, 2)"
        );
    }

    #[test]
    fn test_unknown_preset_error() {
        let msg = ConfigError::UnknownPreset("paranoid".to_string()).to_string();
        assert!(msg.contains("'paranoid'"));
        assert!(msg.contains("standard, strict or lenient"));
    }

    #[test]
    fn test_missing_version_error() {
        let msg = ConfigError::MissingVersion.to_string();
        assert!(msg.contains("version: 1"));
    }
}

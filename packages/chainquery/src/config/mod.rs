//! Configuration
//!
//! Presets with per-field overrides, loadable from a versioned YAML file.
//!
//! ```rust,ignore
//! use chainquery::config::{Preset, QueryConfig};
//!
//! let config = QueryConfig::preset(Preset::Strict).max_chain_steps(32);
//! let config = QueryConfig::from_yaml("query.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod query_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use preset::Preset;
pub use query_config::{
    EmptyClaimPolicy, FailurePolicy, OverwritePolicy, QueryConfig, MAX_CHAIN_STEPS_LIMIT,
};
pub use validation::Validatable;

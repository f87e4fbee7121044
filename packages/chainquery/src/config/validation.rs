//! Configuration validation

use super::error::{ConfigError, ConfigResult};
use std::fmt::Display;
use std::ops::RangeInclusive;

/// Trait for validatable configuration objects
///
/// ```rust,ignore
/// fn build_engine<C: Validatable>(config: C) -> Result<QueryEngine, ConfigError> {
///     config.validate()?;
///     // ...
/// }
/// ```
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Check that `value` lies in `bounds`
pub(crate) fn check_range<T>(
    setting: &str,
    value: T,
    bounds: RangeInclusive<T>,
    hint: &str,
) -> ConfigResult<()>
where
    T: PartialOrd + Display,
{
    if bounds.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::out_of_range(setting, value, bounds, hint))
}

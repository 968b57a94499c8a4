//! Error types for the session cache
//!
//! Cache operations never fail: a miss is `None`. The only fallible surface
//! is configuration loading.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the session cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A configuration variable was present but could not be used
    #[error("Invalid configuration {var}={value:?}: {reason}")]
    InvalidConfig {
        var: String,
        value: String,
        reason: String,
    },
}

impl CacheError {
    /// Builds an `InvalidConfig` error for `var` holding `value`.
    pub fn invalid_config(
        var: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CacheError::InvalidConfig {
            var: var.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the session cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = CacheError::invalid_config("CACHE_CAPACITY", "lots", "not an integer");
        assert_eq!(
            err.to_string(),
            "Invalid configuration CACHE_CAPACITY=\"lots\": not an integer"
        );
    }
}

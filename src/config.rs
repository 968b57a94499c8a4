//! Configuration Module
//!
//! Handles cache sizing and default expiry, optionally loaded from environment
//! variables by the embedding application.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Default maximum number of resident entries.
pub const DEFAULT_CAPACITY: usize = 100;

/// Environment variable holding the cache capacity.
pub const CAPACITY_VAR: &str = "CACHE_CAPACITY";

/// Environment variable holding the default TTL in milliseconds.
pub const DEFAULT_TTL_VAR: &str = "CACHE_DEFAULT_TTL_MS";

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// TTL applied by `set` when the caller passes none; `None` = never expire
    #[serde(with = "ttl_millis")]
    pub default_ttl: Option<Duration>,
}

impl CacheConfig {
    /// Creates a config with the given capacity and no default TTL.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Sets the TTL applied to entries stored without one.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Loads the config from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: unset)
    ///
    /// Unset variables fall back to defaults; malformed ones are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(CAPACITY_VAR) {
            config.capacity = raw.trim().parse().map_err(|_| {
                CacheError::invalid_config(CAPACITY_VAR, &raw, "expected a non-negative integer")
            })?;
        }

        if let Some(raw) = lookup(DEFAULT_TTL_VAR) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                CacheError::invalid_config(DEFAULT_TTL_VAR, &raw, "expected milliseconds")
            })?;
            if millis == 0 {
                return Err(CacheError::invalid_config(
                    DEFAULT_TTL_VAR,
                    &raw,
                    "TTL must be positive",
                ));
            }
            config.default_ttl = Some(Duration::from_millis(millis));
        }

        Ok(config)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_ttl: None,
        }
    }
}

// TTLs travel as integer milliseconds in config files.
mod ttl_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ttl: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ttl {
            Some(ttl) => serializer.serialize_some(&crate::clock::duration_ms(*ttl)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

//! List fetch policy configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Longest accepted staleness window: one year.
pub const MAX_STALE_AFTER_SECS: u64 = 60 * 60 * 24 * 365;

/// Default staleness window, in seconds.
const fn default_stale_after_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPolicyKind {
    /// Fetch once per mount, no caching.
    Once,
    /// Per-key cache with a staleness window.
    #[default]
    Cached,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub policy: FetchPolicyKind,

    /// Staleness window for cached lists.
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            policy: FetchPolicyKind::default(),
            stale_after_secs: default_stale_after_secs(),
        }
    }
}

impl CacheConfig {
    /// Staleness window, clamped to [`MAX_STALE_AFTER_SECS`].
    pub const fn stale_after(&self) -> Duration {
        let secs = if self.stale_after_secs > MAX_STALE_AFTER_SECS {
            MAX_STALE_AFTER_SECS
        } else {
            self.stale_after_secs
        };
        Duration::from_secs(secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.stale_after_secs > MAX_STALE_AFTER_SECS {
            return Err(ConfigError::InvalidValue {
                field: "cache.stale_after_secs".into(),
                reason: format!(
                    "{} exceeds the maximum of {MAX_STALE_AFTER_SECS} seconds",
                    self.stale_after_secs
                ),
            });
        }
        Ok(())
    }
}

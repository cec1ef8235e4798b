//! # stw-config
//!
//! Layered configuration loading for Steward using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STEWARD_*` prefix, `__` as separator)
//! 2. Project-level `.steward/config.toml`
//! 3. User-level `~/.config/steward/config.toml`
//! 4. Built-in defaults
//!
//! Loaded values are validated; see [`StewardConfig::validate`].
//!
//! # Environment Variable Mapping
//!
//! Figment maps `STEWARD_SUPABASE__URL` -> `supabase.url`,
//! `STEWARD_CACHE__STALE_AFTER_SECS` -> `cache.stale_after_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use stw_config::StewardConfig;
//!
//! let config = StewardConfig::load_with_dotenv().expect("config");
//! if config.supabase.is_configured() {
//!     println!("Supabase URL: {}", config.supabase.url);
//! }
//! ```

mod cache;
mod client;
mod error;
mod functions;
mod session;
mod supabase;

pub use cache::{CacheConfig, FetchPolicyKind, MAX_STALE_AFTER_SECS};
pub use client::ClientConfig;
pub use error::ConfigError;
pub use functions::{
    CREATE_USER_FUNCTION, CreationTransportKind, DEFAULT_FUNCTIONS_URL, FunctionsConfig,
};
pub use session::SessionConfig;
pub use supabase::SupabaseConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "STEWARD_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StewardConfig {
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub functions: FunctionsConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

impl StewardConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or stack providers on top.
    pub fn figment() -> Figment {
        Self::file_figment().merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Functions base URL after applying override and fallback.
    pub fn functions_base_url(&self) -> String {
        self.functions.resolved_base_url(&self.supabase.url)
    }

    /// Endpoint used by the direct HTTP creation transport.
    pub fn create_user_endpoint(&self) -> String {
        self.functions
            .resolved_create_user_endpoint(&self.supabase.url)
    }

    /// Reject values the rest of Steward cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache.validate()
    }

    /// Fail with [`ConfigError::NotConfigured`] if Supabase is missing.
    pub fn require_supabase(&self) -> Result<&SupabaseConfig, ConfigError> {
        if self.supabase.is_configured() {
            Ok(&self.supabase)
        } else {
            Err(ConfigError::NotConfigured {
                section: "supabase".into(),
            })
        }
    }

    fn file_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".steward/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("steward").join("config.toml"))
    }

    /// Load `.env` from the workspace root, or the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

//! # fleet-config
//!
//! Layered configuration loading for the fleet dashboard using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FLEET_*` prefix, `__` as separator)
//! 2. Project-level `.fleet/config.toml`
//! 3. User-level `~/.config/fleet/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FLEET_SESSION__STORAGE_KEY` -> `session.storage_key`,
//! `FLEET_NAVIGATION__FORCE_RELOAD` -> `navigation.force_reload`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use fleet_config::FleetConfig;
//!
//! let config = FleetConfig::load_with_dotenv().expect("config");
//! println!("session key: {}", config.session.storage_key);
//! ```

mod error;
mod navigation;
mod session;
mod storage;

pub use error::ConfigError;
pub use navigation::NavigationConfig;
pub use session::SessionConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FleetConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl FleetConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".fleet/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("FLEET_").split("__"))
    }

    /// Reject values the session manager cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "session.storage_key".into(),
                reason: "must not be empty".into(),
            });
        }
        for (field, route) in [
            (
                "navigation.super_admin_dashboard",
                &self.navigation.super_admin_dashboard,
            ),
            (
                "navigation.company_admin_dashboard",
                &self.navigation.company_admin_dashboard,
            ),
        ] {
            if !route.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: format!("route '{route}' must start with '/'"),
                });
            }
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fleet").join("config.toml"))
    }
}

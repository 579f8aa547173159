//! Configuration system for Permgate
//!
//! Configuration is built once at startup and handed by reference to the
//! components that need it. There is no process-wide mutable configuration.
//!
//! # Configuration Hierarchy
//!
//! Configuration values are resolved in the following order (highest priority wins):
//!
//! 1. **Code** (fields set after loading) - Highest priority
//! 2. **Environment Variables** - Override file config
//! 3. **Config File** (permgate.toml) - Override defaults
//! 4. **Defaults** - Lowest priority
//!
//! # Example
//!
//! ```no_run
//! use permgate_core::config::PermgateConfig;
//!
//! // Load with full supersedence
//! let config = PermgateConfig::load()?;
//!
//! // Or load from specific file
//! let config = PermgateConfig::from_file("permgate.toml")?;
//!
//! // Or use defaults
//! let config = PermgateConfig::default();
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod auth;
pub mod logging;
pub mod rbac;
pub mod storage;

pub use auth::AuthConfig;
pub use logging::LoggingConfig;
pub use rbac::RbacConfig;
pub use storage::{StorageBackend, StorageConfig};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete Permgate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PermgateConfig {
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub rbac: RbacConfig,
    pub logging: LoggingConfig,
}

impl PermgateConfig {
    /// Load configuration with full supersedence chain
    ///
    /// Priority order (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file (permgate.toml)
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        Self::load_from("permgate.toml")
    }

    /// Load configuration from a specific file, falling back to defaults when it is absent
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.auth.merge(other.auth);
        self.storage.merge(other.storage);
        self.rbac.merge(other.rbac);
        self.logging.merge(other.logging);
    }

    /// Apply environment variables to configuration
    pub fn apply_env_vars(&mut self) {
        self.auth.apply_env_vars();
        self.storage.apply_env_vars();
        self.rbac.apply_env_vars();
        self.logging.apply_env_vars();
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()?;
        self.storage.validate()?;
        self.rbac.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

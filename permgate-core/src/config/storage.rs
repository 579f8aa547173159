//! Storage configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Which permission store backs the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map, lost on restart
    Memory,
    /// One JSON document per role under `data_dir`
    File,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::Memory, data_dir: "./data/permissions".to_string() }
    }
}

impl StorageConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(backend) = env::var("PERMGATE_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(backend) => self.backend = backend,
                Err(e) => log::warn!("Ignoring PERMGATE_STORAGE_BACKEND: {}", e),
            }
        }
        if let Ok(dir) = env::var("PERMGATE_DATA_DIR") {
            self.data_dir = dir;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::File && self.data_dir.trim().is_empty() {
            bail!("storage.data_dir is required for the file backend");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert_eq!("FILE".parse::<StorageBackend>(), Ok(StorageBackend::File));
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_file_backend_requires_dir() {
        let config = StorageConfig { backend: StorageBackend::File, data_dir: " ".to_string() };
        assert!(config.validate().is_err());
    }
}

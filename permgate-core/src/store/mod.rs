//! Permission document storage
//!
//! One authoritative document per role. A `put` replaces the whole document in a
//! single logical write; concurrent readers observe either the previous or the
//! new document, never a mix.
//!
//! # Example
//!
//! ```no_run
//! use permgate_core::store::{MemoryPermissionStore, PermissionStore};
//! use permgate_core::rbac::PermissionDocument;
//!
//! # async fn example() -> Result<(), permgate_core::store::StoreError> {
//! let store = MemoryPermissionStore::new();
//! store.put("VIEWER", PermissionDocument::new()).await?;
//! let doc = store.get("VIEWER").await?;
//! # Ok(())
//! # }
//! ```

mod file;
mod memory;

pub use file::FilePermissionStore;
pub use memory::MemoryPermissionStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::rbac::PermissionDocument;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("role not configured: {0}")]
    RoleNotConfigured(String),
    #[error("invalid role name: {0}")]
    InvalidRoleName(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

/// Permission document storage trait
///
/// Implement this trait to back the gate with another database.
#[async_trait::async_trait]
pub trait PermissionStore: Send + Sync {
    /// Current document for `role`
    async fn get(&self, role: &str) -> Result<PermissionDocument, StoreError>;

    /// Roles that have a stored document, sorted
    async fn list_roles(&self) -> Result<BTreeSet<String>, StoreError>;

    /// Replace the entire document for `role`
    async fn put(&self, role: &str, document: PermissionDocument) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S: PermissionStore> PermissionStore for Arc<S> {
    async fn get(&self, role: &str) -> Result<PermissionDocument, StoreError> {
        (**self).get(role).await
    }

    async fn list_roles(&self) -> Result<BTreeSet<String>, StoreError> {
        (**self).list_roles().await
    }

    async fn put(&self, role: &str, document: PermissionDocument) -> Result<(), StoreError> {
        (**self).put(role, document).await
    }
}

/// Build the store selected in configuration
pub fn open_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn PermissionStore>> {
    let store: Arc<dyn PermissionStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryPermissionStore::new()),
        StorageBackend::File => Arc::new(FilePermissionStore::new(&config.data_dir)?),
    };
    log::info!("Permission store ready ({:?})", config.backend);
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_store() {
        let store = open_store(&StorageConfig::default()).unwrap();
        assert!(store.list_roles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            data_dir: dir.path().join("perms").to_string_lossy().into_owned(),
        };
        let store = open_store(&config).unwrap();
        store.put("EDITOR", PermissionDocument::new()).await.unwrap();
        assert!(dir.path().join("perms").join("EDITOR.json").exists());
    }
}

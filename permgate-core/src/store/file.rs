//! File-backed permission store
//!
//! Each role's document is a `<ROLE>.json` file under the data directory. A put
//! writes the serialized document to a temporary sibling and renames it over the
//! target, so readers open either the old file or the new one.

use super::{PermissionStore, StoreError};
use crate::rbac::PermissionDocument;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const EXTENSION: &str = "json";

/// File-backed permission store
#[derive(Debug, Clone)]
pub struct FilePermissionStore {
    dir: PathBuf,
}

impl FilePermissionStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        log::debug!("File permission store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, role: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_role_name(role) {
            return Err(StoreError::InvalidRoleName(role.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", role, EXTENSION)))
    }
}

/// Role names become file names, so only `[A-Za-z0-9_-]` is accepted
fn is_valid_role_name(role: &str) -> bool {
    !role.is_empty() && role.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[async_trait::async_trait]
impl PermissionStore for FilePermissionStore {
    async fn get(&self, role: &str) -> Result<PermissionDocument, StoreError> {
        let path = self.document_path(role)?;

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::RoleNotConfigured(role.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&raw)?)
    }

    async fn list_roles(&self) -> Result<BTreeSet<String>, StoreError> {
        let mut roles = BTreeSet::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(role) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_role_name(role) {
                    roles.insert(role.to_string());
                }
            }
        }

        Ok(roles)
    }

    async fn put(&self, role: &str, document: PermissionDocument) -> Result<(), StoreError> {
        let path = self.document_path(role)?;
        let data = serde_json::to_vec_pretty(&document)?;

        let tmp = self.dir.join(format!(".{}.{}.tmp", role, Uuid::new_v4()));
        if let Err(e) = tokio::fs::write(&tmp, &data).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        log::debug!("Stored permission document for {} ({} resources)", role, document.len());
        Ok(())
    }
}

//! In-memory permission store
//!
//! Documents live behind a `RwLock<HashMap>` as `Arc`s. A replace swaps a single
//! `Arc` under the write lock. Suitable for tests and single-process deployments;
//! documents are lost on restart.

use super::{PermissionStore, StoreError};
use crate::rbac::PermissionDocument;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Documents = HashMap<String, Arc<PermissionDocument>>;

/// In-memory permission store
#[derive(Clone, Default)]
pub struct MemoryPermissionStore {
    documents: Arc<RwLock<Documents>>,
}

impl MemoryPermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with documents
    pub fn seeded<I, R>(documents: I) -> Self
    where
        I: IntoIterator<Item = (R, PermissionDocument)>,
        R: Into<String>,
    {
        let documents = documents
            .into_iter()
            .map(|(role, doc)| (role.into(), Arc::new(doc)))
            .collect();
        Self { documents: Arc::new(RwLock::new(documents)) }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Documents>, StoreError> {
        self.documents
            .read()
            .map_err(|_| StoreError::Unavailable("permission map lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Documents>, StoreError> {
        self.documents
            .write()
            .map_err(|_| StoreError::Unavailable("permission map lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl PermissionStore for MemoryPermissionStore {
    async fn get(&self, role: &str) -> Result<PermissionDocument, StoreError> {
        let document = self
            .read()?
            .get(role)
            .cloned()
            .ok_or_else(|| StoreError::RoleNotConfigured(role.to_string()))?;
        Ok(document.as_ref().clone())
    }

    async fn list_roles(&self) -> Result<BTreeSet<String>, StoreError> {
        Ok(self.read()?.keys().cloned().collect())
    }

    async fn put(&self, role: &str, document: PermissionDocument) -> Result<(), StoreError> {
        self.write()?.insert(role.to_string(), Arc::new(document));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::{FieldPermission, ResourcePermission};

    /// Document whose resources and fields all carry the same generation marker
    fn generation(n: usize) -> PermissionDocument {
        let mut doc = PermissionDocument::new();
        for r in 0..8 {
            let mut perm = ResourcePermission { view: true, ..Default::default() };
            for f in 0..8 {
                perm = perm.with_field(format!("gen{}_f{}", n, f), FieldPermission::new(true, false, true));
            }
            doc = doc.with_resource(format!("gen{}_r{}", n, r), perm);
        }
        doc
    }

    fn generation_of(doc: &PermissionDocument) -> Option<String> {
        let mut markers = doc.resources().flat_map(|(name, perm)| {
            std::iter::once(name.split('_').next().unwrap_or_default().to_string()).chain(
                perm.fields.keys().map(|f| f.split('_').next().unwrap_or_default().to_string()),
            )
        });
        let first = markers.next()?;
        markers.all(|m| m == first).then_some(first)
    }

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryPermissionStore::new();
        let doc = generation(1);

        store.put("MANAGER", doc.clone()).await.unwrap();
        assert_eq!(store.get("MANAGER").await.unwrap(), doc);

        let roles = store.list_roles().await.unwrap();
        assert_eq!(roles.into_iter().collect::<Vec<_>>(), vec!["MANAGER".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_role() {
        let store = MemoryPermissionStore::new();
        assert!(matches!(
            store.get("VIEWER").await,
            Err(StoreError::RoleNotConfigured(role)) if role == "VIEWER"
        ));
    }

    #[tokio::test]
    async fn test_put_replaces_whole_document() {
        let store = MemoryPermissionStore::seeded([("EDITOR", generation(1))]);
        store.put("EDITOR", generation(2)).await.unwrap();

        let doc = store.get("EDITOR").await.unwrap();
        assert_eq!(generation_of(&doc).as_deref(), Some("gen2"));
    }

    #[tokio::test]
    async fn test_list_roles_sorted() {
        let store = MemoryPermissionStore::seeded([
            ("VIEWER", PermissionDocument::new()),
            ("EDITOR", PermissionDocument::new()),
            ("MANAGER", PermissionDocument::new()),
        ]);
        let roles: Vec<_> = store.list_roles().await.unwrap().into_iter().collect();
        assert_eq!(roles, vec!["EDITOR", "MANAGER", "VIEWER"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_replace_never_mixes_versions() {
        let store = MemoryPermissionStore::seeded([("MANAGER", generation(0))]);

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for n in 1..200 {
                    store.put("MANAGER", generation(n)).await.unwrap();
                }
            })
        };

        let mut readers = vec![];
        for _ in 0..4 {
            let store = store.clone();
            readers.push(tokio::spawn(async move {
                for _ in 0..200 {
                    let doc = store.get("MANAGER").await.unwrap();
                    assert!(generation_of(&doc).is_some(), "observed a mixed document");
                }
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }
}

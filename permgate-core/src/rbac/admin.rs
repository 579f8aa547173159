//! Permission document administration
//!
//! The only legitimate writer of permission documents. Every operation is limited
//! to the configured allow-list of roles, which never includes ADMIN.

use super::gate::{Denial, ForbiddenReason};
use super::permissions::PermissionDocument;
use super::ROLE_ADMIN;
use crate::config::RbacConfig;
use crate::security::Identity;
use crate::store::{PermissionStore, StoreError};
use std::sync::Arc;

#[derive(thiserror::Error, Debug)]
pub enum AdminError {
    #[error("invalid role: {0}")]
    InvalidRole(String),
    #[error("role not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AdminError {
    /// HTTP status code for the error
    pub fn status_code(&self) -> u16 {
        match self {
            AdminError::InvalidRole(_) => 400,
            AdminError::NotFound(_) => 404,
            AdminError::Store(_) => 500,
        }
    }
}

/// Only ADMIN may administer permission documents
pub fn require_admin(identity: Option<&Identity>) -> Result<(), Denial> {
    match identity {
        None => Err(Denial::Unauthenticated),
        Some(identity) if identity.is_admin() => Ok(()),
        Some(identity) => {
            log::warn!("Administration denied for user {} ({})", identity.user_id, identity.role);
            Err(ForbiddenReason::AdminRequired.into())
        }
    }
}

/// Parse a document from its JSON wire shape
pub fn parse_document(raw: &str) -> Result<PermissionDocument, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Administration of per-role permission documents
#[derive(Clone)]
pub struct PermissionAdmin {
    store: Arc<dyn PermissionStore>,
    configurable_roles: Vec<String>,
}

impl PermissionAdmin {
    pub fn new(store: Arc<dyn PermissionStore>, configurable_roles: Vec<String>) -> Self {
        let configurable_roles =
            configurable_roles.into_iter().filter(|role| role != ROLE_ADMIN).collect();
        Self { store, configurable_roles }
    }

    pub fn from_config(store: Arc<dyn PermissionStore>, config: &RbacConfig) -> Self {
        Self::new(store, config.configurable_roles.clone())
    }

    pub fn configurable_roles(&self) -> &[String] {
        &self.configurable_roles
    }

    fn check_role(&self, role: &str) -> Result<(), AdminError> {
        if self.configurable_roles.iter().any(|r| r == role) {
            Ok(())
        } else {
            Err(AdminError::InvalidRole(role.to_string()))
        }
    }

    /// Roles that currently have a stored document, sorted
    pub async fn list_roles(&self) -> Result<Vec<String>, AdminError> {
        let roles = self.store.list_roles().await?;
        Ok(roles.into_iter().filter(|role| role != ROLE_ADMIN).collect())
    }

    pub async fn get_document(&self, role: &str) -> Result<PermissionDocument, AdminError> {
        self.check_role(role)?;
        self.store.get(role).await.map_err(|e| match e {
            StoreError::RoleNotConfigured(role) => AdminError::NotFound(role),
            other => AdminError::Store(other),
        })
    }

    /// Replace the whole document for `role`
    ///
    /// Takes effect for the next authorization decision.
    pub async fn replace_document(
        &self,
        role: &str,
        document: PermissionDocument,
    ) -> Result<(), AdminError> {
        self.check_role(role)?;
        let resources = document.len();
        self.store.put(role, document).await?;
        log::info!("Replaced permission document for {} ({} resources)", role, resources);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::{AuthorizationGate, ResourcePermission};
    use crate::store::MemoryPermissionStore;

    fn admin() -> (Arc<MemoryPermissionStore>, PermissionAdmin) {
        let store = Arc::new(MemoryPermissionStore::new());
        let admin = PermissionAdmin::from_config(store.clone(), &RbacConfig::default());
        (store, admin)
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(Some(&Identity::new("a", "ADMIN"))).is_ok());
        assert_eq!(require_admin(None), Err(Denial::Unauthenticated));
        assert_eq!(
            require_admin(Some(&Identity::new("m", "MANAGER"))),
            Err(Denial::Forbidden(ForbiddenReason::AdminRequired))
        );
    }

    #[tokio::test]
    async fn test_admin_role_is_never_configurable() {
        let store = Arc::new(MemoryPermissionStore::new());
        let admin = PermissionAdmin::new(store, vec!["ADMIN".to_string(), "VIEWER".to_string()]);
        assert_eq!(admin.configurable_roles(), ["VIEWER".to_string()]);

        let err = admin.replace_document("ADMIN", PermissionDocument::new()).await.unwrap_err();
        assert!(matches!(err, AdminError::InvalidRole(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_unknown_role_rejected() {
        let (_, admin) = admin();
        for role in ["AUDITOR", "", "manager"] {
            assert!(matches!(admin.get_document(role).await, Err(AdminError::InvalidRole(_))));
        }
    }

    #[tokio::test]
    async fn test_get_missing_document_is_not_found() {
        let (_, admin) = admin();
        let err = admin.get_document("EDITOR").await.unwrap_err();
        assert!(matches!(err, AdminError::NotFound(_)));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_replace_then_get_and_list() {
        let (_, admin) = admin();
        let doc = parse_document(
            r#"{"projects":{"view":true,"fields":{"name":{"view":true}}}}"#,
        )
        .unwrap();

        admin.replace_document("VIEWER", doc.clone()).await.unwrap();
        admin.replace_document("MANAGER", PermissionDocument::new()).await.unwrap();

        assert_eq!(admin.get_document("VIEWER").await.unwrap(), doc);
        assert_eq!(admin.list_roles().await.unwrap(), vec!["MANAGER", "VIEWER"]);
    }

    #[tokio::test]
    async fn test_replace_is_whole_document() {
        let (store, admin) = admin();
        let gate = AuthorizationGate::new(store);
        let editor = Identity::new("e1", "EDITOR");

        let before = PermissionDocument::new()
            .with_resource("tasks", ResourcePermission { view: true, ..Default::default() });
        admin.replace_document("EDITOR", before).await.unwrap();
        assert!(gate.decide(Some(&editor), "tasks", "view").await.is_ok());

        // The new document does not mention tasks, so access is gone
        let after = PermissionDocument::new()
            .with_resource("projects", ResourcePermission { view: true, ..Default::default() });
        admin.replace_document("EDITOR", after).await.unwrap();
        assert_eq!(
            gate.decide(Some(&editor), "tasks", "view").await,
            Err(Denial::Forbidden(ForbiddenReason::NoTableAccess))
        );
    }

    #[test]
    fn test_parse_document_rejects_malformed() {
        assert!(parse_document("{").is_err());
        assert!(parse_document(r#"{"tasks":{"view":"yes"}}"#).is_err());
        assert!(parse_document("{}").unwrap().is_empty());
    }
}

//! Authorization gate
//!
//! Per-request decision composing the caller identity, the requested
//! (resource, action) pair and the role's current permission document.
//!
//! Evaluation order:
//! 1. No identity -> `Unauthenticated`
//! 2. `users` resource and caller is not ADMIN -> `Forbidden(UsersTableRestricted)`
//! 3. ADMIN -> full access, no store call
//! 4. Store lookup fails -> `Forbidden(StoreUnavailable)`
//! 5. Resource absent from the document -> `Forbidden(NoTableAccess)`
//! 6. Unknown action -> `Forbidden(UnknownAction)`, flag false -> `Forbidden(ActionNotAllowed)`
//! 7. Otherwise the resolved [`ResourcePermission`]
//!
//! Nothing is cached between calls, so a replaced document applies to the next
//! decision. Store failures are not retried.

use super::permissions::{Action, ResourcePermission};
use super::RESOURCE_USERS;
use crate::security::Identity;
use crate::store::{PermissionStore, StoreError};
use std::sync::Arc;

/// Sub-reason of a policy denial
///
/// Internal diagnostics only: callers see a single "forbidden" outcome.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ForbiddenReason {
    #[error("users table restricted to ADMIN")]
    UsersTableRestricted,
    #[error("no table access")]
    NoTableAccess,
    #[error("{0} not allowed")]
    ActionNotAllowed(Action),
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("permission lookup failed")]
    StoreUnavailable,
    #[error("administration restricted to ADMIN")]
    AdminRequired,
}

/// Outcome of a failed authorization
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("forbidden: {0}")]
    Forbidden(ForbiddenReason),
}

impl Denial {
    /// HTTP status code for the denial
    pub fn status_code(&self) -> u16 {
        match self {
            Denial::Unauthenticated => 401,
            Denial::Forbidden(_) => 403,
        }
    }

    /// Caller-facing message; never includes the sub-reason
    pub fn public_message(&self) -> &'static str {
        match self {
            Denial::Unauthenticated => "unauthorized",
            Denial::Forbidden(_) => "forbidden",
        }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Denial::Forbidden(_))
    }
}

impl From<ForbiddenReason> for Denial {
    fn from(reason: ForbiddenReason) -> Self {
        Denial::Forbidden(reason)
    }
}

/// Decide whether `identity` may perform `action` on `resource`
///
/// Stateless: identical inputs against an unchanged store give identical results.
pub async fn decide(
    identity: Option<&Identity>,
    resource: &str,
    action: &str,
    store: &dyn PermissionStore,
) -> Result<ResourcePermission, Denial> {
    let identity = identity.ok_or(Denial::Unauthenticated)?;

    if resource == RESOURCE_USERS && !identity.is_admin() {
        return Err(ForbiddenReason::UsersTableRestricted.into());
    }

    if identity.is_admin() {
        return Ok(ResourcePermission::full_access());
    }

    let document = store.get(&identity.role).await.map_err(|e| {
        match e {
            StoreError::RoleNotConfigured(_) => {
                log::debug!("No permission document for role {}", identity.role)
            }
            other => log::error!("Permission lookup for role {} failed: {}", identity.role, other),
        }
        ForbiddenReason::StoreUnavailable
    })?;

    let permission = document.resource(resource).ok_or(ForbiddenReason::NoTableAccess)?;

    let action: Action = action.parse().map_err(ForbiddenReason::UnknownAction)?;
    if !permission.allows(action) {
        return Err(ForbiddenReason::ActionNotAllowed(action).into());
    }

    Ok(permission.clone())
}

/// Authorization gate bound to a permission store
#[derive(Clone)]
pub struct AuthorizationGate {
    store: Arc<dyn PermissionStore>,
}

impl AuthorizationGate {
    pub fn new(store: Arc<dyn PermissionStore>) -> Self {
        Self { store }
    }

    /// Resolve the permission for one request, logging the outcome
    pub async fn decide(
        &self,
        identity: Option<&Identity>,
        resource: &str,
        action: &str,
    ) -> Result<ResourcePermission, Denial> {
        let result = decide(identity, resource, action, self.store.as_ref()).await;
        let user = identity.map(|i| i.user_id.as_str()).unwrap_or("<anonymous>");

        match &result {
            Ok(_) => {
                log::debug!("Access granted: user {} -> {} {}", user, resource, action);
            }
            Err(denial) => {
                log::warn!("Access denied: user {} -> {} {} ({})", user, resource, action, denial);
            }
        }

        result
    }
}

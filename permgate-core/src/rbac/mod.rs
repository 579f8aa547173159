//! Permgate RBAC (Role-Based Access Control) Module
//!
//! Config-driven table and field level authorization.
//!
//! # Features
//! - One JSON [`PermissionDocument`] per role, fetched fresh for every decision
//! - Table-level `view` / `create` / `edit` / `delete` flags
//! - Field-level masking of schema-less records ([`projection`])
//! - Hard-coded ADMIN bypass and `users` lock
//!
//! # Example
//! ```rust,ignore
//! let gate = AuthorizationGate::new(store);
//! let permission = gate.decide(Some(&identity), "tasks", "edit").await?;
//! let update = projection::require_writable(&incoming, &permission.fields)?;
//! ```

mod admin;
mod context;
mod gate;
mod permissions;
pub mod projection;

pub use admin::{parse_document, require_admin, AdminError, PermissionAdmin};
pub use context::{Guard, RequestContext};
pub use gate::{AuthorizationGate, Denial, ForbiddenReason};
pub use permissions::{Action, FieldPermission, FieldPermissions, PermissionDocument, ResourcePermission};

/// Role with full access that never has a stored document
pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_MANAGER: &str = "MANAGER";
pub const ROLE_EDITOR: &str = "EDITOR";
pub const ROLE_VIEWER: &str = "VIEWER";

/// Resource that only ADMIN may touch, whatever a document says
pub const RESOURCE_USERS: &str = "users";

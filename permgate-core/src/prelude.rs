//! Convenient imports for applications embedding Permgate
//!
//! ```rust,ignore
//! use permgate_core::prelude::*;
//! ```

pub use crate::config::PermgateConfig;
pub use crate::rbac::projection::{
    project_readable, project_readable_all, project_writable, require_writable, ProjectionError,
    Record,
};
pub use crate::rbac::{
    parse_document, require_admin, Action, AdminError, AuthorizationGate, Denial,
    FieldPermission, ForbiddenReason, Guard, PermissionAdmin, PermissionDocument, RequestContext,
    ResourcePermission,
};
pub use crate::security::{AuthError, Identity, TokenValidator};
pub use crate::store::{
    open_store, FilePermissionStore, MemoryPermissionStore, PermissionStore, StoreError,
};

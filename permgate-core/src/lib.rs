//! Permgate - Core
//!
//! Configuration-driven authorization for multi-tenant application backends.
//!
//! # Overview
//!
//! Permgate authenticates a bearer credential, resolves the caller's role into a
//! concrete table + field permission set, enforces that set on every guarded
//! operation, and projects untyped request/response payloads down to the fields
//! the caller may see or write.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use permgate_core::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PermgateConfig::load()?;
//!     permgate_core::logging::init_logging(&config.logging)?;
//!
//!     let store = open_store(&config.storage)?;
//!     let guard = Guard::new(
//!         TokenValidator::from_config(&config.auth),
//!         AuthorizationGate::new(store.clone()),
//!     );
//!
//!     let ctx = guard.authorize(Some("Bearer <token>"), "tasks", "edit").await?;
//!     let update = ctx.writable(&incoming)?;
//!     # Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`security`] - Bearer token verification and caller identity
//! - [`store`] - Per-role permission document persistence
//! - [`rbac`] - Authorization gate, field projection, administration
//! - [`config`] - TOML + environment configuration
//! - [`logging`] - `log` facade bootstrap
//!
//! # Rules
//!
//! - **Default deny**: a missing document, resource, action flag or field means no access
//! - **ADMIN bypass**: `ADMIN` is granted everything without touching the store
//! - **Users lock**: the `users` resource is denied to every other role, whatever the document says
//! - **No cache**: every decision reads the current document

pub mod config; // Configuration system with TOML support
pub mod logging;
pub mod rbac; // Decision, projection and administration
pub mod security; // Token verification and identity
pub mod store; // Permission document storage

pub mod prelude;

pub use config::PermgateConfig;
pub use rbac::{
    AuthorizationGate, Denial, FieldPermission, ForbiddenReason, Guard, PermissionAdmin,
    PermissionDocument, RequestContext, ResourcePermission,
};
pub use security::{AuthError, Identity, TokenValidator};
pub use store::{PermissionStore, StoreError};

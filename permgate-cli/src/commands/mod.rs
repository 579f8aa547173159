pub mod check;
pub mod project;
pub mod roles;
pub mod token;

use anyhow::{bail, Context};
use permgate_core::config::StorageBackend;
use permgate_core::rbac::Guard;
use permgate_core::store::open_store;
use permgate_core::{AuthorizationGate, PermgateConfig, PermissionStore, TokenValidator};
use std::path::Path;
use std::sync::Arc;

/// Read a whole file, naming it in the error
pub fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Open the configured store, refusing backends that do not outlive the process
///
/// A memory store starts empty on every run, so writes would be lost and every
/// non-ADMIN decision would be denied.
pub fn persistent_store(
    config: &PermgateConfig,
    command: &str,
) -> anyhow::Result<Arc<dyn PermissionStore>> {
    if config.storage.backend == StorageBackend::Memory {
        bail!(
            "{} requires storage.backend = \"file\" (set it in permgate.toml or PERMGATE_STORAGE_BACKEND)",
            command
        );
    }
    open_store(&config.storage)
}

/// Guard over the configured store and secret
pub fn guard(config: &PermgateConfig, command: &str) -> anyhow::Result<Guard> {
    let store = persistent_store(config, command)?;
    Ok(Guard::new(TokenValidator::from_config(&config.auth), AuthorizationGate::new(store)))
}

/// Turn a raw token argument into an `Authorization` header value
pub fn bearer_header(token: &str) -> String {
    let token = token.trim();
    if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {}", token)
    }
}

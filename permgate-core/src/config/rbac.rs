//! RBAC configuration

use crate::rbac::ROLE_ADMIN;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RbacConfig {
    /// Roles whose permission documents may be administered. ADMIN is never configurable.
    pub configurable_roles: Vec<String>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            configurable_roles: vec![
                "MANAGER".to_string(),
                "EDITOR".to_string(),
                "VIEWER".to_string(),
            ],
        }
    }
}

impl RbacConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        // Comma separated, e.g. "MANAGER,EDITOR,VIEWER"
        if let Ok(roles) = env::var("PERMGATE_CONFIGURABLE_ROLES") {
            self.configurable_roles = roles
                .split(',')
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.configurable_roles.iter().any(|r| r == ROLE_ADMIN) {
            bail!("rbac.configurable_roles must not contain {}", ROLE_ADMIN);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_not_configurable() {
        let config = RbacConfig {
            configurable_roles: vec!["MANAGER".to_string(), "ADMIN".to_string()],
        };
        assert!(config.validate().is_err());
        assert!(RbacConfig::default().validate().is_ok());
    }
}

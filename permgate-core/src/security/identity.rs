//! Caller identity

use crate::rbac::ROLE_ADMIN;
use serde::{Deserialize, Serialize};

/// Authenticated caller, produced once per request by [`super::TokenValidator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub role: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), role: role.into() }
    }

    /// Whether this caller gets the ADMIN bypass
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin_is_exact_match() {
        assert!(Identity::new("u1", "ADMIN").is_admin());
        assert!(!Identity::new("u1", "admin").is_admin());
        assert!(!Identity::new("u1", "MANAGER").is_admin());
    }
}

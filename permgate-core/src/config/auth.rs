//! Authentication configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC-SHA256 key used to sign and verify bearer tokens
    pub jwt_secret: String,
    /// Lifetime of issued tokens in seconds
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // Development default, override with PERMGATE_JWT_SECRET
            jwt_secret: "super-secret-key".to_string(),
            token_ttl_secs: 24 * 60 * 60,
        }
    }
}

impl AuthConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(secret) = env::var("PERMGATE_JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if let Ok(ttl) = env::var("PERMGATE_TOKEN_TTL") {
            if let Ok(ttl) = ttl.parse() {
                self.token_ttl_secs = ttl;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.is_empty() {
            bail!("auth.jwt_secret must not be empty");
        }
        if self.token_ttl_secs == 0 {
            bail!("auth.token_ttl_secs must be greater than zero");
        }
        Ok(())
    }
}

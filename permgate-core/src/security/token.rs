//! Bearer token issue and verification
//!
//! Tokens are compact JWTs signed with HMAC-SHA256:
//! `base64url(header).base64url(claims).base64url(signature)`.

use super::Identity;
use crate::config::AuthConfig;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

/// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

const JWT_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// JWT claims carried by a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: String,
    pub role: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Why a credential failed to authenticate
///
/// All variants surface to callers as the same "unauthorized" outcome; the
/// variant is kept for logs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing credential")]
    MissingCredential,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("invalid token signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

/// Issues and verifies bearer tokens
///
/// Verification is deterministic for a given secret and clock: tampering with any
/// segment fails the signature check, and a passed `exp` always fails.
#[derive(Clone)]
pub struct TokenValidator {
    secret: Vec<u8>,
    ttl_secs: u64,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator").field("ttl_secs", &self.ttl_secs).finish_non_exhaustive()
    }
}

impl TokenValidator {
    /// Create a validator with a 24-hour default token lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into().into_bytes(), ttl_secs: 24 * 60 * 60 }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.clone()).with_ttl(config.token_ttl_secs)
    }

    /// Set token lifetime in seconds
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Issue a token for `user_id` acting as `role`
    pub fn issue(&self, user_id: &str, role: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);
        let claims = TokenClaims {
            user_id: user_id.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
            jti: Some(Uuid::new_v4().to_string()),
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims (used by `issue`, and by tooling that needs explicit expiry)
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        let payload =
            serde_json::to_vec(claims).map_err(|e| AuthError::Malformed(e.to_string()))?;

        let header_b64 = URL_SAFE_NO_PAD.encode(JWT_HEADER.as_bytes());
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload);

        let mut mac = self.mac()?;
        mac.update(format!("{}.{}", header_b64, payload_b64).as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}.{}", header_b64, payload_b64, signature))
    }

    /// Verify a credential and produce the caller identity
    pub fn verify(&self, credential: Option<&str>) -> Result<Identity, AuthError> {
        let token = credential.map(str::trim).filter(|t| !t.is_empty());
        let token = token.ok_or(AuthError::MissingCredential)?;

        let claims = self.decode(token)?;
        Ok(Identity::new(claims.user_id, claims.role))
    }

    /// Validate signature and expiry, returning the claims
    pub fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(AuthError::Malformed(format!("expected 3 segments, got {}", parts.len())));
        }

        self.verify_signature(parts[0], parts[1], parts[2])?;

        let payload = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|e| AuthError::Malformed(format!("payload encoding: {}", e)))?;
        let claims: TokenClaims = serde_json::from_slice(&payload)
            .map_err(|e| AuthError::Malformed(format!("claims: {}", e)))?;

        if claims.user_id.is_empty() || claims.role.is_empty() {
            return Err(AuthError::Malformed("empty user_id or role claim".to_string()));
        }

        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|_| AuthError::BadSignature)
    }

    /// Constant-time signature check
    fn verify_signature(
        &self,
        header: &str,
        payload: &str,
        signature: &str,
    ) -> Result<(), AuthError> {
        let signature_bytes =
            URL_SAFE_NO_PAD.decode(signature).map_err(|_| AuthError::BadSignature)?;

        let mut mac = self.mac()?;
        mac.update(format!("{}.{}", header, payload).as_bytes());
        mac.verify_slice(&signature_bytes).map_err(|_| AuthError::BadSignature)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> TokenValidator {
        TokenValidator::new("test_secret")
    }

    #[test]
    fn test_issue_and_verify() {
        let validator = validator();
        let token = validator.issue("user-42", "MANAGER").unwrap();

        assert_eq!(token.split('.').count(), 3);

        let identity = validator.verify(Some(&token)).unwrap();
        assert_eq!(identity, Identity::new("user-42", "MANAGER"));
    }

    #[test]
    fn test_verify_is_deterministic() {
        let validator = validator();
        let token = validator.issue("user-42", "EDITOR").unwrap();
        assert_eq!(validator.verify(Some(&token)), validator.verify(Some(&token)));
    }

    #[test]
    fn test_missing_credential() {
        let validator = validator();
        assert_eq!(validator.verify(None), Err(AuthError::MissingCredential));
        assert_eq!(validator.verify(Some("   ")), Err(AuthError::MissingCredential));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let validator = validator();
        assert!(matches!(validator.verify(Some("only_one_part")), Err(AuthError::Malformed(_))));
        assert!(matches!(
            validator.verify(Some("not.a.valid.jwt.token")),
            Err(AuthError::Malformed(_))
        ));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let validator = validator();
        let token = validator.issue("user-42", "VIEWER").unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let tampered = format!("{}.{}.invalid_signature", parts[0], parts[1]);

        assert_eq!(validator.verify(Some(&tampered)), Err(AuthError::BadSignature));
    }

    #[test]
    fn test_tampered_role_rejected() {
        let validator = validator();
        let token = validator.issue("user-42", "VIEWER").unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let now = Utc::now().timestamp();
        let forged = serde_json::json!({
            "user_id": "user-42",
            "role": "ADMIN",
            "iat": now,
            "exp": now + 3600,
        });
        let forged_b64 = URL_SAFE_NO_PAD.encode(forged.to_string());
        let tampered = format!("{}.{}.{}", parts[0], forged_b64, parts[2]);

        assert_eq!(validator.verify(Some(&tampered)), Err(AuthError::BadSignature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = validator().issue("user-42", "VIEWER").unwrap();
        let other = TokenValidator::new("another_secret");
        assert_eq!(other.verify(Some(&token)), Err(AuthError::BadSignature));
    }

    #[test]
    fn test_expired_token_rejected() {
        let validator = validator();
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            user_id: "user-42".to_string(),
            role: "MANAGER".to_string(),
            iat: now - 7200,
            exp: now - 1,
            jti: None,
        };
        let token = validator.sign(&claims).unwrap();

        assert_eq!(validator.verify(Some(&token)), Err(AuthError::Expired));
    }

    #[test]
    fn test_empty_role_claim_rejected() {
        let validator = validator();
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            user_id: "user-42".to_string(),
            role: String::new(),
            iat: now,
            exp: now + 60,
            jti: None,
        };
        let token = validator.sign(&claims).unwrap();

        assert!(matches!(validator.verify(Some(&token)), Err(AuthError::Malformed(_))));
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(Some("Bearer ")), None);
        assert_eq!(extract_bearer(None), None);
    }
}

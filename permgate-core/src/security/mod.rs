//! Permgate Security Module
//!
//! Bearer credential verification. A verified token yields an [`Identity`]
//! (user id + role) that lives for exactly one request.
//!
//! ## Security Features
//! - **JWT Tokens**: HMAC-SHA256 signatures, constant-time verification
//! - **Expiry**: every token carries `exp`; expired tokens never authenticate

mod identity;
mod token;

pub use identity::Identity;
pub use token::{extract_bearer, AuthError, TokenClaims, TokenValidator};

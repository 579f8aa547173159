//! Request guard
//!
//! Joins credential verification and the authorization gate so a handler gets
//! either a [`RequestContext`] or a [`Denial`] from one call.

use super::gate::{AuthorizationGate, Denial};
use super::permissions::ResourcePermission;
use super::projection::{self, ProjectionError, Record};
use crate::security::{extract_bearer, Identity, TokenValidator};

/// Authorized request: who the caller is and what they resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub identity: Identity,
    pub permission: ResourcePermission,
}

impl RequestContext {
    /// Mask an outgoing record to the viewable fields
    pub fn readable(&self, record: &Record) -> Record {
        projection::project_readable(record, &self.permission.fields)
    }

    /// Mask every row of an outgoing listing
    pub fn readable_all<'a, I>(&self, records: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        projection::project_readable_all(records, &self.permission.fields)
    }

    /// Screen an incoming create/update payload
    pub fn writable(&self, record: &Record) -> Result<Record, ProjectionError> {
        projection::require_writable(record, &self.permission.fields)
    }
}

/// Authentication plus authorization for guarded operations
#[derive(Clone)]
pub struct Guard {
    validator: TokenValidator,
    gate: AuthorizationGate,
}

impl Guard {
    pub fn new(validator: TokenValidator, gate: AuthorizationGate) -> Self {
        Self { validator, gate }
    }

    pub fn validator(&self) -> &TokenValidator {
        &self.validator
    }

    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    /// Verify the identity in an `Authorization` header value
    ///
    /// The failure detail goes to the log; callers only see `Unauthenticated`.
    pub fn authenticate(&self, auth_header: Option<&str>) -> Result<Identity, Denial> {
        self.validator.verify(extract_bearer(auth_header)).map_err(|e| {
            log::warn!("Authentication failed: {}", e);
            Denial::Unauthenticated
        })
    }

    /// Authenticate the header and decide `action` on `resource`
    pub async fn authorize(
        &self,
        auth_header: Option<&str>,
        resource: &str,
        action: &str,
    ) -> Result<RequestContext, Denial> {
        let identity = self.authenticate(auth_header)?;
        let permission = self.gate.decide(Some(&identity), resource, action).await?;
        Ok(RequestContext { identity, permission })
    }
}

use cucumber::World as CucumberWorld;
use permgate_core::prelude::*;
use permgate_core::security::TokenClaims;
use std::collections::BTreeSet;
use std::sync::Arc;

pub const TEST_SECRET: &str = "permgate-bdd-secret";

/// Store that fails every call, for outage scenarios
pub struct UnavailableStore;

#[async_trait::async_trait]
impl PermissionStore for UnavailableStore {
    async fn get(&self, _role: &str) -> Result<PermissionDocument, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn list_roles(&self) -> Result<BTreeSet<String>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn put(&self, _role: &str, _document: PermissionDocument) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[derive(CucumberWorld)]
#[world(init = Self::new)]
pub struct PermgateWorld {
    pub store: Arc<dyn PermissionStore>,
    pub validator: TokenValidator,
    /// `Authorization` header sent with the next request
    pub auth_header: Option<String>,
    pub decision: Option<Result<RequestContext, Denial>>,
    pub projection: Option<Result<Record, ProjectionError>>,
    pub admin_result: Option<Result<(), AdminError>>,
}

impl std::fmt::Debug for PermgateWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermgateWorld")
            .field("store", &"<PermissionStore>")
            .field("auth_header", &self.auth_header)
            .field("decision", &self.decision)
            .field("projection", &self.projection)
            .field("admin_result", &self.admin_result)
            .finish()
    }
}

impl PermgateWorld {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryPermissionStore::new()),
            validator: TokenValidator::new(TEST_SECRET),
            auth_header: None,
            decision: None,
            projection: None,
            admin_result: None,
        }
    }

    pub fn guard(&self) -> Guard {
        Guard::new(self.validator.clone(), AuthorizationGate::new(self.store.clone()))
    }

    pub fn admin(&self) -> PermissionAdmin {
        PermissionAdmin::new(
            self.store.clone(),
            vec!["MANAGER".to_string(), "EDITOR".to_string(), "VIEWER".to_string()],
        )
    }

    /// Sign in as `role` with a fresh token
    pub fn sign_in(&mut self, user_id: &str, role: &str) {
        let token = self.validator.issue(user_id, role).expect("token issue failed");
        self.auth_header = Some(format!("Bearer {}", token));
    }

    /// Sign in with a token that expired an hour ago
    pub fn sign_in_expired(&mut self, role: &str) {
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaims {
            user_id: "stale".to_string(),
            role: role.to_string(),
            iat: now - 7200,
            exp: now - 3600,
            jti: None,
        };
        let token = self.validator.sign(&claims).expect("token sign failed");
        self.auth_header = Some(format!("Bearer {}", token));
    }

    pub async fn request(&mut self, resource: &str, action: &str) {
        let result = self.guard().authorize(self.auth_header.as_deref(), resource, action).await;
        self.decision = Some(result);
    }

    pub fn context(&self) -> &RequestContext {
        match &self.decision {
            Some(Ok(ctx)) => ctx,
            other => panic!("expected a granted request, got {:?}", other),
        }
    }

    pub fn denial(&self) -> &Denial {
        match &self.decision {
            Some(Err(denial)) => denial,
            other => panic!("expected a denied request, got {:?}", other),
        }
    }
}

impl Default for PermgateWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a docstring into a JSON object record
pub fn record_from(text: &str) -> Record {
    match serde_json::from_str(text) {
        Ok(serde_json::Value::Object(record)) => record,
        other => panic!("docstring must be a JSON object, got {:?}", other),
    }
}

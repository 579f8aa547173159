use crate::features::world::{record_from, PermgateWorld, UnavailableStore};
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use permgate_core::prelude::*;
use serde_json::Value;
use std::sync::Arc;

fn docstring(step: &Step) -> &str {
    step.docstring.as_deref().expect("step requires a docstring")
}

// Store setup
#[given(expr = "the {string} role has the document:")]
async fn given_role_document(world: &mut PermgateWorld, role: String, step: &Step) {
    let document = parse_document(docstring(step)).expect("invalid permission document");
    world.store.put(&role, document).await.expect("store put failed");
}

#[given("the permission store is unavailable")]
async fn given_store_unavailable(world: &mut PermgateWorld) {
    world.store = Arc::new(UnavailableStore);
}

// Credentials
#[given(expr = "a signed-in {string} user")]
async fn given_signed_in(world: &mut PermgateWorld, role: String) {
    world.sign_in("u-1", &role);
}

#[given(expr = "a {string} user with an expired token")]
async fn given_expired(world: &mut PermgateWorld, role: String) {
    world.sign_in_expired(&role);
}

#[given(expr = "a {string} user with a token signed by another secret")]
async fn given_foreign_token(world: &mut PermgateWorld, role: String) {
    let token = TokenValidator::new("someone-else").issue("intruder", &role).expect("issue failed");
    world.auth_header = Some(format!("Bearer {}", token));
}

#[given("no credential")]
async fn given_no_credential(world: &mut PermgateWorld) {
    world.auth_header = None;
}

// Decisions
#[when(expr = "they request {string} on {string}")]
async fn when_request(world: &mut PermgateWorld, action: String, resource: String) {
    world.request(&resource, &action).await;
}

#[when(expr = "they read a {string} record:")]
async fn when_read_record(world: &mut PermgateWorld, resource: String, step: &Step) {
    world.request(&resource, "view").await;
    let record = record_from(docstring(step));
    world.projection = Some(Ok(world.context().readable(&record)));
}

async fn write_record(world: &mut PermgateWorld, resource: &str, action: &str, step: &Step) {
    world.request(resource, action).await;
    let record = record_from(docstring(step));
    world.projection = Some(world.context().writable(&record));
}

#[when(expr = "they edit a {string} record:")]
async fn when_edit_record(world: &mut PermgateWorld, resource: String, step: &Step) {
    write_record(world, &resource, "edit", step).await;
}

#[when(expr = "they create a {string} record:")]
async fn when_create_record(world: &mut PermgateWorld, resource: String, step: &Step) {
    write_record(world, &resource, "create", step).await;
}

#[then("the request is granted")]
async fn then_granted(world: &mut PermgateWorld) {
    world.context();
}

#[then("the request is granted with full access")]
async fn then_full_access(world: &mut PermgateWorld) {
    assert_eq!(world.context().permission, ResourcePermission::full_access());
}

#[then("the request is forbidden")]
async fn then_forbidden(world: &mut PermgateWorld) {
    let denial = world.denial();
    assert!(denial.is_forbidden(), "expected forbidden, got {:?}", denial);
    assert_eq!(denial.status_code(), 403);
    assert_eq!(denial.public_message(), "forbidden");
}

#[then(expr = "the request is forbidden because {string}")]
async fn then_forbidden_because(world: &mut PermgateWorld, reason: String) {
    match world.denial() {
        Denial::Forbidden(actual) => assert_eq!(actual.to_string(), reason),
        other => panic!("expected forbidden, got {:?}", other),
    }
}

#[then("the request is unauthenticated")]
async fn then_unauthenticated(world: &mut PermgateWorld) {
    assert_eq!(world.denial(), &Denial::Unauthenticated);
    assert_eq!(world.denial().status_code(), 401);
}

#[then("the projected record is:")]
async fn then_projected(world: &mut PermgateWorld, step: &Step) {
    let expected: Value = serde_json::from_str(docstring(step)).expect("invalid expected JSON");
    match &world.projection {
        Some(Ok(record)) => assert_eq!(Value::Object(record.clone()), expected),
        other => panic!("expected a projected record, got {:?}", other),
    }
}

#[then("the write is rejected as empty")]
async fn then_write_rejected(world: &mut PermgateWorld) {
    assert_eq!(world.projection, Some(Err(ProjectionError::NoPermittedFields)));
}

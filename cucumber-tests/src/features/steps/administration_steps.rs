use crate::features::world::PermgateWorld;
use cucumber::gherkin::Step;
use cucumber::{then, when};
use permgate_core::prelude::*;

#[when(expr = "the administrator replaces the {string} document with:")]
async fn when_admin_replaces(world: &mut PermgateWorld, role: String, step: &Step) {
    let raw = step.docstring.as_deref().expect("step requires a docstring");
    let document = parse_document(raw).expect("invalid permission document");
    world.admin_result = Some(world.admin().replace_document(&role, document).await);
}

#[then(expr = "the administration fails with status {int}")]
async fn then_admin_fails(world: &mut PermgateWorld, status: u16) {
    match &world.admin_result {
        Some(Err(e)) => assert_eq!(e.status_code(), status),
        other => panic!("expected an administration error, got {:?}", other),
    }
}

#[then("the administration succeeds")]
async fn then_admin_succeeds(world: &mut PermgateWorld) {
    assert!(matches!(world.admin_result, Some(Ok(()))), "got {:?}", world.admin_result);
}

#[then(expr = "the stored roles are {string}")]
async fn then_stored_roles(world: &mut PermgateWorld, roles: String) {
    let listed = world.admin().list_roles().await.expect("list roles failed");
    let expected: Vec<String> = roles.split(',').map(|r| r.trim().to_string()).collect();
    assert_eq!(listed, expected);
}

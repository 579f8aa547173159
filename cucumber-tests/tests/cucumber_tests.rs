use cucumber::World;
use cucumber_tests::features::world::PermgateWorld;

#[tokio::main]
async fn main() {
    let features = concat!(env!("CARGO_MANIFEST_DIR"), "/../features/authorization/");
    PermgateWorld::cucumber().fail_on_skipped().run_and_exit(features).await;
}

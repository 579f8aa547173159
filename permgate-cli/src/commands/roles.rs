use super::{persistent_store, read_file};
use anyhow::Context;
use permgate_core::rbac::parse_document;
use permgate_core::{PermgateConfig, PermissionAdmin};
use std::path::Path;

fn admin(config: &PermgateConfig, command: &str) -> anyhow::Result<PermissionAdmin> {
    let store = persistent_store(config, command)?;
    Ok(PermissionAdmin::from_config(store, &config.rbac))
}

pub async fn list(config: &PermgateConfig) -> anyhow::Result<()> {
    let roles = admin(config, "roles list")?.list_roles().await?;
    println!("{}", serde_json::json!({ "roles": roles }));
    Ok(())
}

pub async fn get(config: &PermgateConfig, role: &str) -> anyhow::Result<()> {
    let document = admin(config, "roles get")?.get_document(role).await?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

pub async fn set(config: &PermgateConfig, role: &str, file: &Path) -> anyhow::Result<()> {
    let raw = read_file(file)?;
    let document = parse_document(&raw)
        .with_context(|| format!("invalid permission document in {}", file.display()))?;

    admin(config, "roles set")?.replace_document(role, document).await?;
    log::info!("Document for {} written under {}", role, config.storage.data_dir);
    println!("{}", serde_json::json!({ "status": "updated" }));
    Ok(())
}

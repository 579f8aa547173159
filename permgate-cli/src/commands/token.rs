use permgate_core::{PermgateConfig, TokenValidator};

pub fn issue(config: &PermgateConfig, user_id: &str, role: &str) -> anyhow::Result<()> {
    let token = TokenValidator::from_config(&config.auth).issue(user_id, role)?;
    println!("{}", token);
    Ok(())
}

pub fn verify(config: &PermgateConfig, token: &str) -> anyhow::Result<()> {
    let claims = TokenValidator::from_config(&config.auth).decode(token.trim())?;
    println!("{}", serde_json::to_string_pretty(&claims)?);
    Ok(())
}

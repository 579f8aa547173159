use super::{bearer_header, guard};
use anyhow::anyhow;
use permgate_core::PermgateConfig;

/// Print the resolved permission, or fail with the caller-facing denial
pub async fn run(
    config: &PermgateConfig,
    token: &str,
    resource: &str,
    action: &str,
) -> anyhow::Result<()> {
    let guard = guard(config, "check")?;

    match guard.authorize(Some(&bearer_header(token)), resource, action).await {
        Ok(ctx) => {
            println!("{}", serde_json::to_string_pretty(&ctx.permission)?);
            Ok(())
        }
        Err(denial) => Err(anyhow!("{} ({})", denial.public_message(), denial.status_code())),
    }
}

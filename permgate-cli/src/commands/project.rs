use super::{bearer_header, guard, read_file};
use crate::ProjectMode;
use anyhow::{anyhow, bail, Context};
use permgate_core::prelude::{Record, RequestContext};
use permgate_core::PermgateConfig;
use serde_json::Value;
use std::path::Path;

pub async fn run(
    config: &PermgateConfig,
    token: &str,
    resource: &str,
    mode: ProjectMode,
    file: &Path,
    create: bool,
) -> anyhow::Result<()> {
    let payload: Value = serde_json::from_str(&read_file(file)?)
        .with_context(|| format!("invalid JSON in {}", file.display()))?;

    let action = match (mode, create) {
        (ProjectMode::Read, _) => "view",
        (ProjectMode::Write, false) => "edit",
        (ProjectMode::Write, true) => "create",
    };

    let ctx = guard(config, "project")?
        .authorize(Some(&bearer_header(token)), resource, action)
        .await
        .map_err(|denial| anyhow!("{} ({})", denial.public_message(), denial.status_code()))?;

    let projected = project(&ctx, mode, payload)?;
    println!("{}", serde_json::to_string_pretty(&projected)?);
    Ok(())
}

fn project(ctx: &RequestContext, mode: ProjectMode, payload: Value) -> anyhow::Result<Value> {
    match (mode, payload) {
        (ProjectMode::Read, Value::Object(record)) => Ok(Value::Object(ctx.readable(&record))),
        (ProjectMode::Read, Value::Array(rows)) => {
            let records = rows.into_iter().map(into_record).collect::<anyhow::Result<Vec<_>>>()?;
            let masked = ctx.readable_all(&records).into_iter().map(Value::Object).collect();
            Ok(Value::Array(masked))
        }
        (ProjectMode::Write, Value::Object(record)) => Ok(Value::Object(ctx.writable(&record)?)),
        (ProjectMode::Write, _) => bail!("write payload must be a JSON object"),
        (ProjectMode::Read, _) => bail!("read payload must be a JSON object or array of objects"),
    }
}

fn into_record(value: Value) -> anyhow::Result<Record> {
    match value {
        Value::Object(record) => Ok(record),
        other => bail!("expected a JSON object, got {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permgate_core::prelude::*;
    use serde_json::json;

    fn manager_ctx() -> RequestContext {
        let tasks = ResourcePermission { view: true, edit: true, ..Default::default() }
            .with_field("status", FieldPermission::new(true, false, true))
            .with_field("title", FieldPermission::new(true, false, false));
        RequestContext { identity: Identity::new("m1", "MANAGER"), permission: tasks }
    }

    #[test]
    fn write_projection_keeps_editable_fields() {
        let out = project(&manager_ctx(), ProjectMode::Write, json!({"title": "new", "status": "DONE"}))
            .unwrap();
        assert_eq!(out, json!({"status": "DONE"}));
    }

    #[test]
    fn read_projection_over_array() {
        let rows = json!([{"title": "a", "owner": 1}, {"status": "DONE", "owner": 2}]);
        let out = project(&manager_ctx(), ProjectMode::Read, rows).unwrap();
        assert_eq!(out, json!([{"title": "a"}, {"status": "DONE"}]));
    }

    #[test]
    fn empty_write_is_an_error() {
        assert!(project(&manager_ctx(), ProjectMode::Write, json!({"title": "x"})).is_err());
        assert!(project(&manager_ctx(), ProjectMode::Write, json!([1, 2])).is_err());
        assert!(project(&manager_ctx(), ProjectMode::Read, json!([1])).is_err());
    }
}

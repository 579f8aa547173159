//! Field-level projection of schema-less records
//!
//! Both projections filter by key only and never look at value shapes. An empty
//! field map means the table-level grant covers every field.

use super::permissions::FieldPermissions;
use serde_json::{Map, Value};

/// Untyped key/value payload (values keep their JSON type tags)
pub type Record = Map<String, Value>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// The write projection removed every submitted field
    #[error("no permitted fields to write")]
    NoPermittedFields,
}

/// Keep only the keys the caller may view
///
/// With a non-empty `fields` map, keys missing from it are dropped.
pub fn project_readable(record: &Record, fields: &FieldPermissions) -> Record {
    project_by(record, fields, |perm| perm.view)
}

/// Keep only the keys the caller may write
///
/// Keyed on the `edit` flag for creation and update alike; the field-level
/// `create` flag is not consulted.
pub fn project_writable(record: &Record, fields: &FieldPermissions) -> Record {
    project_by(record, fields, |perm| perm.edit)
}

/// [`project_writable`], rejecting a write that would carry no fields
pub fn require_writable(
    record: &Record,
    fields: &FieldPermissions,
) -> Result<Record, ProjectionError> {
    let projected = project_writable(record, fields);
    if projected.is_empty() {
        return Err(ProjectionError::NoPermittedFields);
    }
    Ok(projected)
}

/// Read projection over every row of a listing
pub fn project_readable_all<'a, I>(records: I, fields: &FieldPermissions) -> Vec<Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().map(|record| project_readable(record, fields)).collect()
}

fn project_by<F>(record: &Record, fields: &FieldPermissions, allowed: F) -> Record
where
    F: Fn(&super::FieldPermission) -> bool,
{
    if fields.is_empty() {
        return record.clone();
    }

    record
        .iter()
        .filter(|(key, _)| fields.get(key.as_str()).is_some_and(&allowed))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

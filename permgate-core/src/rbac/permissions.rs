//! Permission document model
//!
//! Wire shape, persisted and administered as JSON:
//!
//! ```json
//! {
//!   "tasks": {
//!     "view": true, "create": false, "edit": true, "delete": false,
//!     "fields": { "status": { "view": true, "create": false, "edit": true } }
//!   }
//! }
//! ```
//!
//! Missing flags deserialize to `false`; a missing or `null` `fields` map is empty.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Field name -> capability flags
pub type FieldPermissions = BTreeMap<String, FieldPermission>;

/// Per-field capability flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldPermission {
    pub view: bool,
    pub create: bool,
    pub edit: bool,
}

impl FieldPermission {
    pub fn new(view: bool, create: bool, edit: bool) -> Self {
        Self { view, create, edit }
    }
}

/// Table-level flags plus optional field-level flags for one resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePermission {
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,

    /// Empty means unrestricted field access
    #[serde(deserialize_with = "null_as_empty", skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: FieldPermissions,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<FieldPermissions, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FieldPermissions>::deserialize(deserializer)?.unwrap_or_default())
}

impl ResourcePermission {
    /// Every table flag set, no field restriction. Synthesized for ADMIN.
    pub fn full_access() -> Self {
        Self { view: true, create: true, edit: true, delete: true, fields: BTreeMap::new() }
    }

    /// Table-level flag for `action`
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
        }
    }

    /// Add a field rule
    pub fn with_field(mut self, name: impl Into<String>, permission: FieldPermission) -> Self {
        self.fields.insert(name.into(), permission);
        self
    }

    /// Whether field-level projection applies
    pub fn restricts_fields(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// One role's permissions, keyed by resource name
///
/// Stored and replaced as a whole; there is no partial patching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionDocument(BTreeMap<String, ResourcePermission>);

impl PermissionDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, resource: impl Into<String>, permission: ResourcePermission) -> Self {
        self.0.insert(resource.into(), permission);
        self
    }

    pub fn resource(&self, resource: &str) -> Option<&ResourcePermission> {
        self.0.get(resource)
    }

    pub fn resources(&self) -> impl Iterator<Item = (&String, &ResourcePermission)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, ResourcePermission>> for PermissionDocument {
    fn from(map: BTreeMap<String, ResourcePermission>) -> Self {
        Self(map)
    }
}

/// Table-level action checked by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Action::View),
            "create" => Ok(Action::Create),
            "edit" => Ok(Action::Edit),
            "delete" => Ok(Action::Delete),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Action a role may perform on a resource category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Manage,
}

/// Resource category (e.g. `"students"`) → allowed actions.
pub type PermissionMap = BTreeMap<String, BTreeSet<Action>>;

/// Stored permission record. Nothing in the request path consults it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermission {
    pub id: String,
    pub name: String,
    pub label: String,
    pub permissions: PermissionMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UpsertRolePermissionDto {
    pub name: String,
    pub label: String,
    pub permissions: PermissionMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_map_uses_lowercase_actions() {
        let json = r#"{"students":["read","update"],"system":["manage"]}"#;
        let map: PermissionMap = serde_json::from_str(json).unwrap();

        assert!(map["students"].contains(&Action::Read));
        assert!(map["students"].contains(&Action::Update));
        assert!(!map["students"].contains(&Action::Delete));
        assert_eq!(serde_json::to_string(&map).unwrap(), json);
    }

    #[test]
    fn unknown_action_is_rejected() {
        let json = r#"{"students":["teleport"]}"#;
        assert!(serde_json::from_str::<PermissionMap>(json).is_err());
    }
}

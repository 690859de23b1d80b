//! Resources (people) and their current subproject assignments.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Avatar shown for rows whose resource has been deleted.
pub const DELETED_RESOURCE_AVATAR: &str =
    "https://placehold.co/40x40/f3f4f6/374151?text=DLT";

/// A staff member as returned by `GET /resource`.
///
/// `assigned_subprojects` is the *current* assignment set; billing records
/// may still reference subprojects a resource has since left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: DbId,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub assigned_subprojects: Vec<DbId>,
    /// Denormalized revenue rate, used as a fallback when neither the
    /// billing record nor the subproject carries one.
    #[serde(default)]
    pub flatrate: Option<f64>,
}

impl Resource {
    /// Whether this resource is currently assigned to `subproject_id`.
    pub fn is_assigned_to(&self, subproject_id: DbId) -> bool {
        self.assigned_subprojects.contains(&subproject_id)
    }
}

/// Display name for a billing record whose resource no longer exists:
/// the denormalized snapshot when present, a generic placeholder otherwise.
pub fn deleted_resource_name(snapshot: Option<&str>, resource_id: DbId) -> String {
    match snapshot {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Deleted Resource ({resource_id})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_assigned_to_checks_membership() {
        let resource = Resource {
            id: 1,
            name: "Alice".into(),
            role: "Engineer".into(),
            avatar_url: None,
            assigned_subprojects: vec![10, 11],
            flatrate: None,
        };
        assert!(resource.is_assigned_to(10));
        assert!(!resource.is_assigned_to(12));
    }

    #[test]
    fn deleted_name_uses_snapshot_when_present() {
        assert_eq!(deleted_resource_name(Some("Bob"), 7), "Bob");
    }

    #[test]
    fn deleted_name_falls_back_to_placeholder() {
        assert_eq!(deleted_resource_name(None, 7), "Deleted Resource (7)");
        assert_eq!(deleted_resource_name(Some(""), 7), "Deleted Resource (7)");
    }
}

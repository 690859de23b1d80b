//! Projects and the subprojects they own.
//!
//! A subproject is the billing-relevant unit: resources are assigned to
//! subprojects, productivity rates are configured per subproject, and the
//! optional flat rate (the revenue rate charged to the client) lives here.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Whether a project is shown in selection dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Lifecycle status of a subproject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubprojectStatus {
    Active,
    Inactive,
}

/// A top-level project as returned by `GET /project` and, with its
/// subprojects nested, by `GET /project/project-subproject`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub description: Option<String>,
    pub created_on: Timestamp,
    pub updated_at: Timestamp,
    /// Owned subprojects. Empty on the flat `GET /project` listing.
    #[serde(default)]
    pub subprojects: Vec<Subproject>,
}

/// A billing-relevant sub-unit of a project. Exactly one project owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subproject {
    pub id: DbId,
    pub name: String,
    pub project_id: DbId,
    pub status: SubprojectStatus,
    /// Revenue rate charged to the client, distinct from internal cost rates.
    #[serde(default)]
    pub flatrate: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_on: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> Timestamp {
        chrono::DateTime::parse_from_rfc3339("2025-06-01T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc)
    }

    #[test]
    fn project_deserializes_without_subprojects() {
        let json = serde_json::json!({
            "id": 1,
            "name": "Apollo",
            "visibility": "visible",
            "created_on": "2025-06-01T00:00:00Z",
            "updated_at": "2025-06-01T00:00:00Z"
        });
        let project: Project = serde_json::from_value(json).unwrap();
        assert_eq!(project.name, "Apollo");
        assert!(project.subprojects.is_empty());
        assert_eq!(project.visibility, Visibility::Visible);
    }

    #[test]
    fn subproject_flatrate_defaults_to_none() {
        let sp = Subproject {
            id: 10,
            name: "Backend".into(),
            project_id: 1,
            status: SubprojectStatus::Active,
            flatrate: None,
            description: None,
            created_on: ts(),
            updated_at: ts(),
        };
        let json = serde_json::to_value(&sp).unwrap();
        let back: Subproject = serde_json::from_value(json).unwrap();
        assert!(back.flatrate.is_none());
        assert_eq!(back.status, SubprojectStatus::Active);
    }
}

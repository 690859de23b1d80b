//! Lookup indices over the loaded project tree and resource roster.

use std::collections::HashMap;

use crate::project::{Project, Subproject};
use crate::resource::Resource;
use crate::types::DbId;

/// Immutable indices built once per snapshot load: subproject id to its
/// owning (project, subproject) pair, and resource id to resource.
///
/// Assignments or billing records referencing ids absent from these
/// indices are dangling (concurrent edits elsewhere) and are skipped by
/// the reconciliation engine rather than treated as errors.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    projects: Vec<Project>,
    resources: Vec<Resource>,
    /// subproject id -> (index into `projects`, index into its subprojects)
    subproject_index: HashMap<DbId, (usize, usize)>,
    /// resource id -> index into `resources`
    resource_index: HashMap<DbId, usize>,
}

impl ReferenceIndex {
    /// Build the indices from a freshly fetched project-subproject tree
    /// and resource roster.
    pub fn build(projects: Vec<Project>, resources: Vec<Resource>) -> Self {
        let mut subproject_index = HashMap::new();
        for (pi, project) in projects.iter().enumerate() {
            for (si, subproject) in project.subprojects.iter().enumerate() {
                subproject_index.insert(subproject.id, (pi, si));
            }
        }
        let resource_index = resources
            .iter()
            .enumerate()
            .map(|(ri, r)| (r.id, ri))
            .collect();
        Self {
            projects,
            resources,
            subproject_index,
            resource_index,
        }
    }

    /// Resolve a subproject id to its owning project and the subproject
    /// itself. `None` marks a dangling reference.
    pub fn resolve_subproject(&self, subproject_id: DbId) -> Option<(&Project, &Subproject)> {
        let (pi, si) = *self.subproject_index.get(&subproject_id)?;
        let project = &self.projects[pi];
        Some((project, &project.subprojects[si]))
    }

    pub fn resource(&self, resource_id: DbId) -> Option<&Resource> {
        self.resource_index
            .get(&resource_id)
            .map(|&ri| &self.resources[ri])
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Every subproject id reachable from the loaded tree, in tree order.
    pub fn subproject_ids(&self) -> Vec<DbId> {
        self.projects
            .iter()
            .flat_map(|p| p.subprojects.iter().map(|sp| sp.id))
            .collect()
    }
}

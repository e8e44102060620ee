use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::IdGenerator;
use crate::model::Coordinates;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: Option<Coordinates>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a project.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub location: Option<Coordinates>,
    pub address: Option<String>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<Coordinates>,
    pub address: Option<String>,
}

#[derive(Debug, Default)]
pub struct ProjectRegistry {
    projects: Vec<Project>,
    current: Option<String>,
    ids: IdGenerator,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously saved projects.
    pub fn with_projects(projects: Vec<Project>) -> Self {
        let ids = IdGenerator::after(projects.iter().map(|p| p.id.as_str()));
        Self { projects, current: None, ids }
    }

    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn add(&mut self, draft: ProjectDraft) -> Project {
        let now = Utc::now();
        let project = Project {
            id: self.ids.next_id(),
            name: draft.name,
            description: draft.description,
            location: draft.location,
            address: draft.address,
            created_at: now,
            updated_at: now,
        };

        tracing::debug!(id = %project.id, name = %project.name, "project added");
        self.projects.push(project.clone());
        project
    }

    pub fn update(&mut self, id: &str, update: ProjectUpdate) -> Option<&Project> {
        let project = self.projects.iter_mut().find(|p| p.id == id)?;

        if let Some(name) = update.name {
            project.name = name;
        }
        if let Some(description) = update.description {
            project.description = description;
        }
        if let Some(location) = update.location {
            project.location = Some(location);
        }
        if let Some(address) = update.address {
            project.address = Some(address);
        }
        project.updated_at = Utc::now();

        Some(&*project)
    }

    /// Returns `false` when no project has that id.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.projects.iter().position(|p| p.id == id) else {
            return false;
        };

        self.projects.remove(index);
        if self.current.as_deref() == Some(id) {
            self.current = None;
        }
        true
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn set_current(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.current = Some(id.to_string());
        true
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_deref().and_then(|id| self.get(id))
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ProjectDraft {
        ProjectDraft { name: name.into(), ..Default::default() }
    }

    #[test]
    fn add_stamps_id_and_timestamps() {
        let mut registry = ProjectRegistry::new();
        let project = registry.add(draft("Warehouse"));

        assert!(!project.id.is_empty());
        assert_eq!(project.created_at, project.updated_at);
        assert_eq!(registry.list(), &[project.clone()]);
        assert_eq!(registry.get(&project.id), Some(&project));
    }

    #[test]
    fn loaded_projects_keep_their_ids() {
        let mut seed = ProjectRegistry::new();
        let existing = seed.add(draft("Existing"));

        let mut registry = ProjectRegistry::with_projects(vec![existing.clone()]);
        let added = registry.add(draft("New"));

        assert_ne!(added.id, existing.id);
        assert_eq!(registry.get(&existing.id), Some(&existing));
    }

    #[test]
    fn update_merges_fields() {
        let mut registry = ProjectRegistry::new();
        let created = registry.add(ProjectDraft {
            name: "Warehouse".into(),
            description: "North site".into(),
            ..Default::default()
        });

        let updated = registry
            .update(
                &created.id,
                ProjectUpdate { name: Some("Depot".into()), ..Default::default() },
            )
            .unwrap();

        assert_eq!(updated.name, "Depot");
        assert_eq!(updated.description, "North site");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn update_unknown_returns_none() {
        let mut registry = ProjectRegistry::new();
        assert!(registry.update("missing", ProjectUpdate::default()).is_none());
    }

    #[test]
    fn delete_reports_presence_and_clears_current() {
        let mut registry = ProjectRegistry::new();
        let a = registry.add(draft("A"));
        let b = registry.add(draft("B"));
        assert!(registry.set_current(&a.id));

        assert!(registry.delete(&a.id));
        assert!(!registry.delete(&a.id));
        assert!(registry.current().is_none());
        assert_eq!(registry.list().len(), 1);
        assert_eq!(registry.list()[0].id, b.id);
    }

    #[test]
    fn current_selection() {
        let mut registry = ProjectRegistry::new();
        let a = registry.add(draft("A"));

        assert!(!registry.set_current("missing"));
        assert!(registry.current().is_none());

        registry.set_current(&a.id);
        assert_eq!(registry.current().map(|p| p.name.as_str()), Some("A"));

        registry.clear_current();
        assert!(registry.current().is_none());
    }
}

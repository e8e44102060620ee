use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::IdGenerator;

pub const DEFAULT_FLOOR_PLAN_WIDTH: u32 = 800;
pub const DEFAULT_FLOOR_PLAN_HEIGHT: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraKind {
    #[default]
    Indoor,
    Outdoor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraStatus {
    Online,
    #[default]
    Offline,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloorPlanKind {
    /// Uploaded image.
    Upload,
    /// Snapshot of a map view.
    Map,
}

/// A camera pinned to a position on a floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub floor_plan_id: String,
    #[serde(rename = "type")]
    pub kind: CameraKind,
    pub status: CameraStatus,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when placing a camera; unset options take the defaults.
#[derive(Debug, Clone, Default)]
pub struct CameraDraft {
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub floor_plan_id: String,
    pub kind: Option<CameraKind>,
    pub status: Option<CameraStatus>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CameraUpdate {
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub floor_plan_id: Option<String>,
    pub kind: Option<CameraKind>,
    pub status: Option<CameraStatus>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FloorPlanKind,
    pub image_url: Option<String>,
    pub width: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FloorPlanDraft {
    pub name: String,
    pub kind: FloorPlanKind,
    pub image_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Default)]
pub struct CameraRegistry {
    cameras: Vec<Camera>,
    floor_plans: Vec<FloorPlan>,
    selected_floor_plan: Option<String>,
    ids: IdGenerator,
}

impl CameraRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously saved cameras and floor plans.
    pub fn with_state(cameras: Vec<Camera>, floor_plans: Vec<FloorPlan>) -> Self {
        let ids = IdGenerator::after(
            cameras
                .iter()
                .map(|c| c.id.as_str())
                .chain(floor_plans.iter().map(|fp| fp.id.as_str())),
        );
        Self { cameras, floor_plans, selected_floor_plan: None, ids }
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn floor_plans(&self) -> &[FloorPlan] {
        &self.floor_plans
    }

    pub fn add_camera(&mut self, draft: CameraDraft) -> Camera {
        let camera = Camera {
            id: self.ids.next_id(),
            name: draft
                .name
                .unwrap_or_else(|| format!("Camera {}", self.cameras.len() + 1)),
            x: draft.x,
            y: draft.y,
            floor_plan_id: draft.floor_plan_id,
            kind: draft.kind.unwrap_or_default(),
            status: draft.status.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            created_at: Utc::now(),
        };

        tracing::debug!(id = %camera.id, floor_plan = %camera.floor_plan_id, "camera added");
        self.cameras.push(camera.clone());
        camera
    }

    pub fn remove_camera(&mut self, id: &str) -> bool {
        let before = self.cameras.len();
        self.cameras.retain(|c| c.id != id);
        self.cameras.len() != before
    }

    /// Apply `update` to the camera; `false` if it does not exist.
    pub fn update_camera(&mut self, id: &str, update: CameraUpdate) -> bool {
        let Some(camera) = self.cameras.iter_mut().find(|c| c.id == id) else {
            return false;
        };

        if let Some(name) = update.name {
            camera.name = name;
        }
        if let Some(x) = update.x {
            camera.x = x;
        }
        if let Some(y) = update.y {
            camera.y = y;
        }
        if let Some(floor_plan_id) = update.floor_plan_id {
            camera.floor_plan_id = floor_plan_id;
        }
        if let Some(kind) = update.kind {
            camera.kind = kind;
        }
        if let Some(status) = update.status {
            camera.status = status;
        }
        if let Some(description) = update.description {
            camera.description = description;
        }
        true
    }

    pub fn camera(&self, id: &str) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.id == id)
    }

    pub fn cameras_on<'a>(&'a self, floor_plan_id: &'a str) -> impl Iterator<Item = &'a Camera> {
        self.cameras.iter().filter(move |c| c.floor_plan_id == floor_plan_id)
    }

    pub fn add_floor_plan(&mut self, draft: FloorPlanDraft) -> FloorPlan {
        let plan = FloorPlan {
            id: self.ids.next_id(),
            name: draft.name,
            kind: draft.kind,
            image_url: draft.image_url,
            width: draft.width.filter(|w| *w > 0).unwrap_or(DEFAULT_FLOOR_PLAN_WIDTH),
            height: draft.height.filter(|h| *h > 0).unwrap_or(DEFAULT_FLOOR_PLAN_HEIGHT),
            created_at: Utc::now(),
        };

        self.floor_plans.push(plan.clone());
        plan
    }

    /// Remove a floor plan together with every camera placed on it.
    pub fn remove_floor_plan(&mut self, id: &str) -> bool {
        let removed_cameras = self.cameras.len();
        self.cameras.retain(|c| c.floor_plan_id != id);
        let removed_cameras = removed_cameras - self.cameras.len();

        let before = self.floor_plans.len();
        self.floor_plans.retain(|fp| fp.id != id);
        let removed = self.floor_plans.len() != before;

        if self.selected_floor_plan.as_deref() == Some(id) {
            self.selected_floor_plan = None;
        }

        tracing::debug!(id, removed, removed_cameras, "floor plan removed");
        removed
    }

    /// Select a floor plan. An unknown id clears the selection.
    pub fn select_floor_plan(&mut self, id: &str) {
        self.selected_floor_plan = self
            .floor_plans
            .iter()
            .any(|fp| fp.id == id)
            .then(|| id.to_string());
    }

    pub fn selected_floor_plan(&self) -> Option<&FloorPlan> {
        let id = self.selected_floor_plan.as_deref()?;
        self.floor_plans.iter().find(|fp| fp.id == id)
    }

    pub fn total_cameras(&self) -> usize {
        self.cameras.len()
    }

    pub fn online_cameras(&self) -> usize {
        self.count_with_status(CameraStatus::Online)
    }

    pub fn offline_cameras(&self) -> usize {
        self.count_with_status(CameraStatus::Offline)
    }

    fn count_with_status(&self, status: CameraStatus) -> usize {
        self.cameras.iter().filter(|c| c.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(registry: &mut CameraRegistry, name: &str) -> FloorPlan {
        registry.add_floor_plan(FloorPlanDraft {
            name: name.into(),
            kind: FloorPlanKind::Upload,
            image_url: None,
            width: None,
            height: None,
        })
    }

    fn camera_on(registry: &mut CameraRegistry, floor_plan_id: &str) -> Camera {
        registry.add_camera(CameraDraft {
            floor_plan_id: floor_plan_id.into(),
            x: 10.0,
            y: 20.0,
            ..Default::default()
        })
    }

    #[test]
    fn camera_defaults() {
        let mut registry = CameraRegistry::new();
        let first = camera_on(&mut registry, "fp");
        let second = camera_on(&mut registry, "fp");

        assert_eq!(first.name, "Camera 1");
        assert_eq!(second.name, "Camera 2");
        assert_eq!(first.kind, CameraKind::Indoor);
        assert_eq!(first.status, CameraStatus::Offline);
        assert_eq!(first.description, "");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn draft_overrides_defaults() {
        let mut registry = CameraRegistry::new();
        let camera = registry.add_camera(CameraDraft {
            name: Some("Gate".into()),
            kind: Some(CameraKind::Outdoor),
            status: Some(CameraStatus::Online),
            floor_plan_id: "fp".into(),
            ..Default::default()
        });

        assert_eq!(camera.name, "Gate");
        assert_eq!(camera.kind, CameraKind::Outdoor);
        assert_eq!(registry.online_cameras(), 1);
        assert_eq!(registry.offline_cameras(), 0);
    }

    #[test]
    fn update_and_remove_camera() {
        let mut registry = CameraRegistry::new();
        let camera = camera_on(&mut registry, "fp");

        assert!(registry.update_camera(
            &camera.id,
            CameraUpdate { status: Some(CameraStatus::Maintenance), x: Some(1.5), ..Default::default() },
        ));
        let stored = registry.camera(&camera.id).unwrap();
        assert_eq!(stored.status, CameraStatus::Maintenance);
        assert_eq!(stored.x, 1.5);
        assert_eq!(stored.y, 20.0);

        assert!(!registry.update_camera("missing", CameraUpdate::default()));
        assert!(registry.remove_camera(&camera.id));
        assert!(!registry.remove_camera(&camera.id));
        assert_eq!(registry.total_cameras(), 0);
    }

    #[test]
    fn floor_plan_defaults_to_800_by_600() {
        let mut registry = CameraRegistry::new();
        let fp = plan(&mut registry, "Ground floor");
        assert_eq!((fp.width, fp.height), (800, 600));
    }

    #[test]
    fn zero_floor_plan_size_uses_defaults() {
        let mut registry = CameraRegistry::new();
        let fp = registry.add_floor_plan(FloorPlanDraft {
            name: "Basement".into(),
            kind: FloorPlanKind::Map,
            image_url: None,
            width: Some(0),
            height: Some(0),
        });
        assert_eq!((fp.width, fp.height), (800, 600));

        let sized = registry.add_floor_plan(FloorPlanDraft {
            name: "Annex".into(),
            kind: FloorPlanKind::Upload,
            image_url: None,
            width: Some(1024),
            height: None,
        });
        assert_eq!((sized.width, sized.height), (1024, 600));
    }

    #[test]
    fn restored_state_keeps_ids_unique() {
        let mut seed = CameraRegistry::new();
        let ground = plan(&mut seed, "Ground");
        let existing = camera_on(&mut seed, &ground.id);

        let mut registry =
            CameraRegistry::with_state(vec![existing.clone()], vec![ground.clone()]);
        let added = camera_on(&mut registry, &ground.id);
        let roof = plan(&mut registry, "Roof");

        assert_ne!(added.id, existing.id);
        assert_ne!(roof.id, ground.id);
        assert_eq!(registry.camera(&existing.id), Some(&existing));
        assert_eq!(registry.cameras_on(&ground.id).count(), 2);
        assert!(registry.selected_floor_plan().is_none());
    }

    #[test]
    fn removing_floor_plan_cascades_and_clears_selection() {
        let mut registry = CameraRegistry::new();
        let ground = plan(&mut registry, "Ground");
        let roof = plan(&mut registry, "Roof");
        camera_on(&mut registry, &ground.id);
        camera_on(&mut registry, &ground.id);
        let kept = camera_on(&mut registry, &roof.id);

        registry.select_floor_plan(&ground.id);
        assert_eq!(registry.selected_floor_plan().map(|fp| fp.name.as_str()), Some("Ground"));

        assert!(registry.remove_floor_plan(&ground.id));

        assert!(registry.selected_floor_plan().is_none());
        assert_eq!(registry.floor_plans().len(), 1);
        assert_eq!(registry.cameras(), &[kept]);
        assert_eq!(registry.cameras_on(&ground.id).count(), 0);
        assert_eq!(registry.cameras_on(&roof.id).count(), 1);
    }

    #[test]
    fn removing_other_floor_plan_keeps_selection() {
        let mut registry = CameraRegistry::new();
        let ground = plan(&mut registry, "Ground");
        let roof = plan(&mut registry, "Roof");

        registry.select_floor_plan(&ground.id);
        registry.remove_floor_plan(&roof.id);

        assert_eq!(registry.selected_floor_plan().map(|fp| fp.id.clone()), Some(ground.id));
    }

    #[test]
    fn selecting_unknown_floor_plan_clears_selection() {
        let mut registry = CameraRegistry::new();
        let ground = plan(&mut registry, "Ground");
        registry.select_floor_plan(&ground.id);

        registry.select_floor_plan("missing");

        assert!(registry.selected_floor_plan().is_none());
    }

    #[test]
    fn camera_serializes_with_type_key() {
        let mut registry = CameraRegistry::new();
        let camera = camera_on(&mut registry, "fp");
        let json = serde_json::to_value(&camera).unwrap();

        assert_eq!(json["type"], "indoor");
        assert_eq!(json["status"], "offline");
        assert_eq!(json["floorPlanId"], "fp");
    }
}

//! Site bookkeeping: projects, floor plans and the cameras placed on them.
//!
//! Everything lives in memory; callers decide if and where to persist it.

use chrono::Utc;

pub mod camera;
pub mod project;

pub use camera::{
    Camera, CameraDraft, CameraKind, CameraRegistry, CameraStatus, CameraUpdate, FloorPlan,
    FloorPlanDraft, FloorPlanKind,
};
pub use project::{Project, ProjectDraft, ProjectRegistry, ProjectUpdate};

/// Hands out timestamp based ids (milliseconds since the epoch), bumped when
/// two are requested within the same millisecond.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Generator that never hands out an id at or below any of `existing`.
    pub(crate) fn after<'a>(existing: impl IntoIterator<Item = &'a str>) -> Self {
        let last = existing
            .into_iter()
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or_default();
        Self { last }
    }

    pub(crate) fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last.to_string()
    }
}

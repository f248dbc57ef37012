//! Periodic autosave policy.
//!
//! The host calls [`Autosave::tick`] from its timer between input events;
//! when a save is due it gets a snapshot to hand to its store.

use chrono::{DateTime, TimeDelta, Utc};
use mm_core::SceneModel;
use mm_core::model::SceneData;

pub const DEFAULT_INTERVAL: TimeDelta = TimeDelta::seconds(30);

#[derive(Debug, Clone)]
pub struct Autosave {
    interval: TimeDelta,
    last_run: DateTime<Utc>,
    saved_revision: u64,
}

impl Autosave {
    /// Start the timer at `now`, treating the scene's current revision as
    /// already saved.
    pub fn new(interval: TimeDelta, now: DateTime<Utc>, scene: &SceneModel) -> Self {
        Self {
            interval,
            last_run: now,
            saved_revision: scene.revision(),
        }
    }

    /// Returns the snapshot to save if the interval has elapsed, the scene
    /// changed since the last save, and the scene is not empty.
    pub fn tick(&mut self, now: DateTime<Utc>, scene: &SceneModel) -> Option<SceneData> {
        if now - self.last_run < self.interval {
            return None;
        }
        self.last_run = now;
        if scene.revision() == self.saved_revision {
            return None;
        }
        if scene.is_empty() {
            log::debug!("autosave skipped: scene is empty");
            return None;
        }
        self.saved_revision = scene.revision();
        log::debug!("autosave at revision {}", self.saved_revision);
        Some(scene.snapshot())
    }
}

//! Saved-map store: a single JSON file holding every saved map plus a
//! pointer to the map currently open in the editor.
//!
//! Writes go through a temp file in the same directory and are renamed into
//! place, so a crash never leaves a truncated store behind.

use crate::model::SceneData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not access the map store: {0}")]
    Io(#[from] std::io::Error),
    #[error("the map store is corrupted: {0}")]
    Format(#[from] serde_json::Error),
    #[error("mind map `{0}` not found")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMap {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub scene: SceneData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    #[serde(default)]
    maps: Vec<SavedMap>,
    #[serde(default)]
    current_map: Option<String>,
}

/// Fields of a saved map that `update` may change.
#[derive(Debug, Clone, Default)]
pub struct MapUpdate {
    pub title: Option<String>,
    pub scene: Option<SceneData>,
}

pub struct MapStore {
    path: PathBuf,
}

impl MapStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StoreFile, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(StoreFile::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(StoreFile::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, file: &StoreFile) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, file)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    /// All saved maps, oldest first.
    pub fn list(&self) -> Result<Vec<SavedMap>, StoreError> {
        Ok(self.read()?.maps)
    }

    pub fn get(&self, id: &str) -> Result<Option<SavedMap>, StoreError> {
        Ok(self.read()?.maps.into_iter().find(|m| m.id == id))
    }

    /// Save a new map and make it current.
    pub fn save(&self, title: impl Into<String>, scene: SceneData) -> Result<SavedMap, StoreError> {
        let mut file = self.read()?;
        let now = Utc::now();
        let map = SavedMap {
            id: uuid::Uuid::new_v4().simple().to_string(),
            title: title.into(),
            scene,
            created_at: now,
            updated_at: now,
        };
        file.maps.push(map.clone());
        file.current_map = Some(map.id.clone());
        self.write(&file)?;
        log::info!("saved map {} ({})", map.id, map.title);
        Ok(map)
    }

    pub fn update(&self, id: &str, update: MapUpdate) -> Result<SavedMap, StoreError> {
        let mut file = self.read()?;
        let map = file
            .maps
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(title) = update.title {
            map.title = title;
        }
        if let Some(scene) = update.scene {
            map.scene = scene;
        }
        map.updated_at = Utc::now();
        let updated = map.clone();
        self.write(&file)?;
        Ok(updated)
    }

    /// Delete a map. Deleting the current map clears the current pointer.
    /// Deleting an unknown id is not an error.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut file = self.read()?;
        file.maps.retain(|m| m.id != id);
        if file.current_map.as_deref() == Some(id) {
            file.current_map = None;
        }
        self.write(&file)
    }

    pub fn current_id(&self) -> Result<Option<String>, StoreError> {
        Ok(self.read()?.current_map)
    }

    pub fn set_current_id(&self, id: &str) -> Result<(), StoreError> {
        let mut file = self.read()?;
        file.current_map = Some(id.to_string());
        self.write(&file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, MapStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = MapStore::open(dir.path().join("maps.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.current_id().unwrap(), None);
    }

    #[test]
    fn save_sets_current_and_update_bumps_timestamp() {
        let (_dir, store) = store();
        let saved = store.save("Plan", SceneData::default()).unwrap();
        assert_eq!(store.current_id().unwrap(), Some(saved.id.clone()));

        let updated = store
            .update(
                &saved.id,
                MapUpdate {
                    title: Some("Plan v2".into()),
                    ..MapUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Plan v2");
        assert_eq!(updated.created_at, saved.created_at);
        assert!(updated.updated_at >= saved.updated_at);
        assert_eq!(store.get(&saved.id).unwrap().unwrap().title, "Plan v2");
    }

    #[test]
    fn update_of_unknown_map_fails() {
        let (_dir, store) = store();
        assert!(matches!(
            store.update("nope", MapUpdate::default()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn deleting_current_map_clears_pointer() {
        let (_dir, store) = store();
        let first = store.save("A", SceneData::default()).unwrap();
        let second = store.save("B", SceneData::default()).unwrap();
        store.set_current_id(&first.id).unwrap();

        store.delete(&second.id).unwrap();
        assert_eq!(store.current_id().unwrap(), Some(first.id.clone()));
        store.delete(&first.id).unwrap();
        assert_eq!(store.current_id().unwrap(), None);
        assert!(store.list().unwrap().is_empty());
    }
}

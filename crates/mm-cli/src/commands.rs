//! Subcommand implementations.

use mm_core::model::SceneData;
use mm_core::share::{self, SharePayload};
use mm_core::{CanvasConfig, ConfigError, MapStore, StoreError};
use mm_editor::{CanvasHandle, CanvasSession};
use mm_export::{ExportConfig, ExportError, ExportKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TITLE: &str = "Mind Map";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("could not read map file {path}: {source}")]
    ReadMap {
        path: String,
        source: std::io::Error,
    },
    #[error("map file {path} is not valid: {source}")]
    ParseMap {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid or corrupted link")]
    InvalidLink,
}

impl CliError {
    pub fn user_message(&self) -> String {
        match self {
            CliError::Export(err) => err.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

/// A map file: a bare `{nodes, connections}` snapshot, a saved map or a
/// share payload. Only the title and the scene are read.
#[derive(Debug, Deserialize)]
struct MapFile {
    #[serde(default)]
    title: Option<String>,
    #[serde(flatten)]
    scene: SceneData,
}

fn read_map(path: &Path) -> Result<MapFile, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadMap {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseMap {
        path: path.display().to_string(),
        source,
    })
}

pub async fn export(
    map: &Path,
    kind: ExportKind,
    out_dir: &Path,
    title: Option<String>,
    config: Option<&Path>,
) -> Result<(), CliError> {
    let file = read_map(map)?;
    let export_config = match config {
        Some(path) => ExportConfig::from_path(path)?,
        None => ExportConfig::default(),
    };

    let mut session = CanvasSession::new(CanvasConfig::default(), Some(file.scene))
        .with_export_config(export_config);
    if let Some(title) = title.or(file.title) {
        session.set_title(title);
    }

    let job = session.begin_export(kind)?;
    let result = job.run(session.export_services()).await;
    let artifact = session.finish_export(result)?;
    let path = artifact.write_to(out_dir)?;
    println!("{}", path.display());
    Ok(())
}

pub fn share_encode(map: &Path, title: Option<String>, origin: Option<&str>) -> Result<(), CliError> {
    let file = read_map(map)?;
    let title = title
        .or(file.title)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let payload = SharePayload::new(title, file.scene);
    match origin {
        Some(origin) => println!("{}", share::share_url(origin, &payload)),
        None => println!("{}", share::encode(&payload)),
    }
    Ok(())
}

/// Accepts a bare segment or a full `/shared/{segment}` URL.
fn segment_of(input: &str) -> &str {
    let input = input.trim().trim_end_matches('/');
    match input.rsplit_once("/shared/") {
        Some((_, segment)) => segment,
        None => input,
    }
}

pub fn share_decode(input: &str) -> Result<(), CliError> {
    let payload = share::decode(segment_of(input)).ok_or(CliError::InvalidLink)?;
    // The payload was just deserialized, so it serializes back.
    let json = serde_json::to_string_pretty(&payload).unwrap_or_default();
    println!("{json}");
    Ok(())
}

pub fn maps_list(store: &Path) -> Result<(), CliError> {
    let store = MapStore::open(store);
    let current = store.current_id()?;
    let maps = store.list()?;
    if maps.is_empty() {
        println!("No saved maps.");
        return Ok(());
    }
    for map in maps {
        let marker = if current.as_deref() == Some(map.id.as_str()) {
            '*'
        } else {
            ' '
        };
        println!(
            "{marker} {}  {}  ({} nodes, updated {})",
            map.id,
            map.title,
            map.scene.nodes.len(),
            map.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub fn maps_delete(store: &Path, id: &str) -> Result<(), CliError> {
    let store = MapStore::open(store);
    if store.get(id)?.is_none() {
        return Err(StoreError::NotFound(id.to_string()).into());
    }
    store.delete(id)?;
    println!("Deleted {id}");
    Ok(())
}

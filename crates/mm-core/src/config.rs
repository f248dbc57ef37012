//! Canvas configuration.
//!
//! Every field has a default, so a JSON file only needs the keys it wants to
//! override.

use crate::model::Color;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for the interactive canvas.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Size of nodes created by double-click.
    pub node_width: f32,
    pub node_height: f32,

    /// Label of the root node seeded into an empty session.
    pub root_text: String,
    /// World position of the seeded root node.
    pub root_position: (f32, f32),
    pub root_color: Color,

    /// Label and fill of nodes created by double-click.
    pub new_node_text: String,
    pub new_node_color: Color,

    /// Colors offered by the property panel.
    pub palette: Vec<Color>,

    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Discrete zoom-in / zoom-out control multipliers.
    pub zoom_in_step: f32,
    pub zoom_out_step: f32,
    /// Wheel multipliers for scrolling up / down.
    pub wheel_zoom_in: f32,
    pub wheel_zoom_out: f32,

    /// Nominal visible extent at zoom 1, restored by a view reset.
    pub view_width: f32,
    pub view_height: f32,

    /// World offset of a duplicated node from its original.
    pub duplicate_offset: (f32, f32),
    /// Appended to the label of a duplicated node.
    pub copy_suffix: String,

    /// Spacing of the background reference grid, in world units.
    pub grid_spacing: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            node_width: 120.0,
            node_height: 60.0,
            root_text: "Central Idea".into(),
            root_position: (400.0, 300.0),
            root_color: Color::rgb8(0x15, 0x80, 0x3d),
            new_node_text: "New Idea".into(),
            new_node_color: Color::rgb8(0x84, 0xcc, 0x16),
            palette: vec![
                Color::rgb8(0x15, 0x80, 0x3d),
                Color::rgb8(0x84, 0xcc, 0x16),
                Color::rgb8(0x3b, 0x82, 0xf6),
                Color::rgb8(0xef, 0x44, 0x44),
                Color::rgb8(0x8b, 0x5c, 0xf6),
                Color::rgb8(0xf5, 0x9e, 0x0b),
            ],
            min_zoom: 0.1,
            max_zoom: 3.0,
            zoom_in_step: 1.2,
            zoom_out_step: 0.8,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            view_width: 1200.0,
            view_height: 800.0,
            duplicate_offset: (20.0, 20.0),
            copy_suffix: " (copy)".into(),
            grid_spacing: 20.0,
        }
    }
}

impl CanvasConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CanvasConfig::from_json_str(r##"{"newNodeText":"Idea","rootColor":"#000"}"##)
            .unwrap();
        assert_eq!(config.new_node_text, "Idea");
        assert_eq!(config.root_color, Color::BLACK);
        assert_eq!(config.node_width, 120.0);
        assert_eq!(config.palette.len(), 6);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            CanvasConfig::from_json_str("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}

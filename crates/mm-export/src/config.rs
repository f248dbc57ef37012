//! Export configuration.

use mm_core::model::Color;
use mm_core::ConfigError;
use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::path::Path;

/// Tunables for the export pipeline. Page positions and sizes are
/// millimetres, font sizes are points.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    /// Canonical frame rendered regardless of the live viewport.
    pub frame_width: f32,
    pub frame_height: f32,
    /// Supersampling factor applied when rasterizing.
    pub scale: f32,
    /// Margin around the frame, in frame units.
    pub padding: f32,
    pub background: Color,
    pub include_grid: bool,

    pub title: String,
    pub title_position: (f32, f32),
    pub title_size: f32,
    /// `{date}` is replaced with the generation date.
    pub footer_template: String,
    pub footer_position: (f32, f32),
    pub footer_size: f32,
    /// `chrono` format string used for `{date}` and file names.
    pub date_format: String,

    pub page_width: f32,
    pub page_height: f32,
    pub image_position: (f32, f32),
    pub image_width: f32,
    /// Images scaled taller than this are clipped, not shrunk.
    pub max_image_height: f32,

    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            frame_width: 1200.0,
            frame_height: 800.0,
            scale: 2.0,
            padding: 20.0,
            background: Color::WHITE,
            include_grid: false,
            title: "Mind Map".into(),
            title_position: (20.0, 20.0),
            title_size: 16.0,
            footer_template: "Generated on {date} with MindMapper".into(),
            footer_position: (10.0, 200.0),
            footer_size: 10.0,
            date_format: "%Y-%m-%d".into(),
            page_width: 297.0,
            page_height: 210.0,
            image_position: (10.0, 30.0),
            image_width: 277.0,
            max_image_height: 180.0,
            file_prefix: "mind-map".into(),
        }
    }
}

impl ExportConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Rejects values that would only fail once an export is running.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid {
                field: "dateFormat",
                reason: format!("`{}` is not a valid date format", self.date_format),
            });
        }
        Ok(())
    }

    /// `date` rendered with `date_format`.
    pub fn format_date(&self, date: NaiveDate) -> Option<String> {
        use std::fmt::Write as _;
        let mut out = String::new();
        write!(out, "{}", date.format(&self.date_format)).ok()?;
        Some(out)
    }

    /// Size of the padded output surface, in frame units.
    pub fn outer_size(&self) -> (f32, f32) {
        (
            self.frame_width + self.padding * 2.0,
            self.frame_height + self.padding * 2.0,
        )
    }

    pub fn footer(&self, date: &str) -> String {
        self.footer_template.replace("{date}", date)
    }
}

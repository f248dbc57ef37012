//! Export jobs: static scene → raster → file bytes.
//!
//! The rasterizer and document composer are services behind traits,
//! constructed on first use by the owner. The heavy work runs on the
//! blocking pool so the caller's event loop keeps receiving input while an
//! export is in flight. A job either completes or fails; there is no
//! cancellation.

use crate::config::ExportConfig;
use crate::document::{DocumentComposer, PdfComposer};
use crate::error::{ExportError, Result};
use crate::raster::{Rasterizer, ResvgRasterizer};
use crate::scene::build_static_scene;
use chrono::NaiveDate;
use mm_core::model::SceneData;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Png,
    Pdf,
}

impl ExportKind {
    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Png => "png",
            ExportKind::Pdf => "pdf",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportKind::Png => "image/png",
            ExportKind::Pdf => "application/pdf",
        }
    }
}

impl std::str::FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportKind::Png),
            "pdf" => Ok(ExportKind::Pdf),
            other => Err(format!("unknown export format `{other}` (expected png or pdf)")),
        }
    }
}

/// `mind-map-2024-03-09.png`
pub fn file_name(prefix: &str, date: NaiveDate, kind: ExportKind) -> String {
    format!("{prefix}-{}.{}", date.format("%Y-%m-%d"), kind.extension())
}

/// The export back-ends.
pub struct ExportServices {
    pub config: ExportConfig,
    pub rasterizer: Box<dyn Rasterizer>,
    pub composer: Box<dyn DocumentComposer>,
}

impl ExportServices {
    pub fn new(config: ExportConfig) -> Self {
        log::debug!("initializing export services");
        Self {
            rasterizer: Box::new(ResvgRasterizer::new()),
            composer: Box::new(PdfComposer::new(config.clone())),
            config,
        }
    }
}

impl Default for ExportServices {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

/// A finished export, not yet written anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub kind: ExportKind,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn mime(&self) -> &'static str {
        self.kind.mime()
    }

    /// Write into `dir` through a temp file renamed into place, so a failed
    /// write never leaves a partial file under the final name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let target = dir.join(&self.file_name);
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&self.bytes)?;
        tmp.flush()?;
        tmp.persist(&target).map_err(|err| err.error)?;
        log::info!("wrote {} ({} bytes)", target.display(), self.bytes.len());
        Ok(target)
    }
}

/// One requested export of a scene snapshot.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub kind: ExportKind,
    pub data: SceneData,
    /// Document title; the configured default when `None`.
    pub title: Option<String>,
    pub date: NaiveDate,
}

impl ExportJob {
    pub fn new(kind: ExportKind, data: SceneData) -> Self {
        Self {
            kind,
            data,
            title: None,
            date: chrono::Local::now().date_naive(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Run the job to completion on the blocking pool.
    pub async fn run(self, services: Arc<ExportServices>) -> Result<ExportArtifact> {
        tokio::task::spawn_blocking(move || self.run_blocking(&services))
            .await
            .map_err(std::io::Error::other)?
    }

    pub fn run_blocking(&self, services: &ExportServices) -> Result<ExportArtifact> {
        let cfg = &services.config;
        let scene = build_static_scene(&self.data, cfg);
        let raster = services.rasterizer.rasterize(&scene, cfg.scale)?;
        log::debug!("rasterized export at {}x{} px", raster.width, raster.height);

        let bytes = match self.kind {
            ExportKind::Png => raster.png,
            ExportKind::Pdf => {
                let title = self.title.as_deref().unwrap_or(&cfg.title);
                let date = cfg
                    .format_date(self.date)
                    .ok_or_else(|| ExportError::DateFormat(cfg.date_format.clone()))?;
                services.composer.compose(&raster, title, &date)?
            }
        };

        Ok(ExportArtifact {
            kind: self.kind,
            file_name: file_name(&cfg.file_prefix, self.date, self.kind),
            bytes,
        })
    }
}

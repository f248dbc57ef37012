//! Rasterization of the static scene to PNG.

use crate::error::{ExportError, Result};
use crate::scene::StaticScene;
use std::sync::{Arc, OnceLock};

/// An encoded raster image.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    /// Pixel dimensions.
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

pub trait Rasterizer: Send + Sync {
    /// Render `scene` at `scale` pixels per frame unit and encode it as PNG.
    fn rasterize(&self, scene: &StaticScene, scale: f32) -> Result<Raster>;
}

/// `resvg`/`tiny-skia` rasterizer. System fonts are loaded on first use.
#[derive(Default)]
pub struct ResvgRasterizer {
    fontdb: OnceLock<Arc<usvg::fontdb::Database>>,
}

impl ResvgRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn options(&self) -> usvg::Options<'static> {
        let fontdb = self.fontdb.get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            log::debug!("loaded {} font faces for rasterization", db.len());
            Arc::new(db)
        });
        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::clone(fontdb);
        opt.font_family = "Arial".to_string();
        opt
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, scene: &StaticScene, scale: f32) -> Result<Raster> {
        let opt = self.options();
        let tree = usvg::Tree::from_str(&scene.svg, &opt).map_err(|err| {
            log::error!("static scene SVG did not parse: {err}");
            ExportError::SvgParse
        })?;

        let width = (scene.width * scale).ceil().max(1.0) as u32;
        let height = (scene.height * scale).ceil().max(1.0) as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(ExportError::PixmapAlloc)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let png = pixmap.encode_png().map_err(|_| ExportError::PngEncode)?;
        Ok(Raster { width, height, png })
    }
}

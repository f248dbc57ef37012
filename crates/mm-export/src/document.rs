//! One-page landscape PDF around the exported raster.
//!
//! The page is laid out as an SVG in millimetre user units (title line,
//! embedded PNG, footer line) and converted with `svg2pdf`. The image keeps
//! the fixed page width; when its scaled height exceeds the cap it is
//! clipped to the cap rather than shrunk further.

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::raster::Raster;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use mm_render::svg::escape_xml;
use std::sync::{Arc, OnceLock};

const MM_PER_PT: f32 = 25.4 / 72.0;
/// usvg resolves `mm` lengths at CSS resolution; the PDF page must use the same.
const SVG_DPI: f32 = 96.0;

pub trait DocumentComposer: Send + Sync {
    fn compose(&self, image: &Raster, title: &str, date: &str) -> Result<Vec<u8>>;
}

/// Placement of the image on the page, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// Height of the image scaled to `width`.
    pub height: f32,
    /// Visible height after the cap.
    pub visible_height: f32,
}

impl ImagePlacement {
    pub fn is_clipped(&self) -> bool {
        self.visible_height < self.height
    }
}

pub fn place_image(image: &Raster, cfg: &ExportConfig) -> ImagePlacement {
    let (x, y) = cfg.image_position;
    let width = cfg.image_width;
    let height = if image.width == 0 {
        0.0
    } else {
        width * image.height as f32 / image.width as f32
    };
    ImagePlacement {
        x,
        y,
        width,
        height,
        visible_height: height.min(cfg.max_image_height),
    }
}

pub struct PdfComposer {
    cfg: ExportConfig,
    fontdb: OnceLock<Arc<svg2pdf::usvg::fontdb::Database>>,
}

impl PdfComposer {
    pub fn new(cfg: ExportConfig) -> Self {
        Self {
            cfg,
            fontdb: OnceLock::new(),
        }
    }

    /// The page as SVG, before conversion.
    pub fn page_svg(&self, image: &Raster, title: &str, date: &str) -> String {
        let cfg = &self.cfg;
        let (pw, ph) = (cfg.page_width, cfg.page_height);
        let place = place_image(image, cfg);
        if place.is_clipped() {
            log::warn!(
                "export image is {:.1}mm tall, clipping to {:.1}mm",
                place.height,
                place.visible_height
            );
        }
        let data = STANDARD.encode(&image.png);
        let (tx, ty) = cfg.title_position;
        let (fx, fy) = cfg.footer_position;

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{pw}mm\" height=\"{ph}mm\" viewBox=\"0 0 {pw} {ph}\">\n"
        ));
        svg.push_str(&format!("<rect x=\"0\" y=\"0\" width=\"{pw}\" height=\"{ph}\" fill=\"#ffffff\"/>\n"));
        svg.push_str(&format!(
            "<defs>\n  <clipPath id=\"image-clip\">\n    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n  </clipPath>\n</defs>\n",
            place.x, place.y, place.width, place.visible_height
        ));
        svg.push_str(&format!(
            "<text x=\"{tx}\" y=\"{ty}\" font-family=\"Helvetica, Arial, sans-serif\" font-size=\"{}\" fill=\"#000000\">{}</text>\n",
            cfg.title_size * MM_PER_PT,
            escape_xml(title)
        ));
        svg.push_str(&format!(
            "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" clip-path=\"url(#image-clip)\" xlink:href=\"data:image/png;base64,{data}\"/>\n",
            place.x, place.y, place.width, place.height
        ));
        svg.push_str(&format!(
            "<text x=\"{fx}\" y=\"{fy}\" font-family=\"Helvetica, Arial, sans-serif\" font-size=\"{}\" fill=\"#000000\">{}</text>\n",
            cfg.footer_size * MM_PER_PT,
            escape_xml(&cfg.footer(date))
        ));
        svg.push_str("</svg>\n");
        svg
    }
}

impl DocumentComposer for PdfComposer {
    fn compose(&self, image: &Raster, title: &str, date: &str) -> Result<Vec<u8>> {
        let svg = self.page_svg(image, title, date);

        let fontdb = self.fontdb.get_or_init(|| {
            let mut db = svg2pdf::usvg::fontdb::Database::new();
            db.load_system_fonts();
            Arc::new(db)
        });
        let mut opt = svg2pdf::usvg::Options::default();
        opt.fontdb = Arc::clone(fontdb);
        opt.font_family = "Arial".to_string();

        let tree = svg2pdf::usvg::Tree::from_str(&svg, &opt).map_err(|err| {
            log::error!("document page SVG did not parse: {err}");
            ExportError::SvgParse
        })?;

        svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions { dpi: SVG_DPI },
        )
        .map_err(|err| {
            log::error!("PDF conversion failed: {err}");
            ExportError::PdfConvert
        })
    }
}

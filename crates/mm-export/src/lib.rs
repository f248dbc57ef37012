pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod raster;
pub mod scene;

pub use config::ExportConfig;
pub use document::{DocumentComposer, PdfComposer};
pub use error::ExportError;
pub use pipeline::{ExportArtifact, ExportJob, ExportKind, ExportServices, file_name};
pub use raster::{Raster, Rasterizer, ResvgRasterizer};
pub use scene::{StaticScene, build_static_scene};

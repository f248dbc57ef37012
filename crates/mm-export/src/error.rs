#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    AlreadyExporting,
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
    #[error("invalid date format `{0}`")]
    DateFormat(String),
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    /// The single message shown to the user when an export fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::AlreadyExporting => "An export is already running. Please wait for it to finish.",
            ExportError::Io(_) => "Could not save the exported file. Please try again.",
            ExportError::PdfConvert | ExportError::DateFormat(_) => "Error exporting PDF. Please try again.",
            ExportError::SvgParse | ExportError::PixmapAlloc | ExportError::PngEncode => {
                "Error exporting image. Please try again."
            }
        }
    }
}

//! Exporter — rasterizes a rendered CV, slices it into A4 bands and assembles a PDF.
//!
//! The pipeline is capture → paginate → assemble. Capture options travel as an
//! argument, so the `VisualDocument` being exported is never touched and the
//! on-screen preview has nothing to restore afterwards.

pub mod handlers;
pub mod paginator;
pub mod pdf;
pub mod raster;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::cv::CvError;
use crate::render::VisualDocument;

use self::paginator::PageGeometry;
use self::raster::Rasterizer;

const FALLBACK_FILE_STEM: &str = "Resume";
/// Widest raster the exporter will allocate, in pixels.
const MAX_RASTER_WIDTH_PX: f32 = 8192.0;

/// Longest document the exporter will rasterize, in A4 pages.
pub const MAX_EXPORT_PAGES: u64 = 12;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the document has no content")]
    EmptyDocument,

    #[error("capture produced an empty image")]
    EmptyRaster,

    #[error("document needs {pages} pages, limit is {limit}")]
    TooLarge { pages: u64, limit: u64 },

    #[error("invalid capture options: {0}")]
    InvalidOptions(String),

    #[error("photo could not be drawn: {0}")]
    Photo(#[from] CvError),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("export task failed: {0}")]
    Task(String),
}

/// Capture parameters. The document is laid out at `capture_width_px` while the
/// simulated viewport is `window_width_px` wide, then drawn at `scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaptureOptions {
    pub capture_width_px: u32,
    pub window_width_px: u32,
    pub scale: f32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        CaptureOptions {
            capture_width_px: 1056,
            window_width_px: 1200,
            scale: 2.0,
        }
    }
}

impl CaptureOptions {
    fn validate(&self) -> Result<(), ExportError> {
        if self.capture_width_px == 0 {
            return Err(ExportError::InvalidOptions(
                "capture width must be positive".to_string(),
            ));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ExportError::InvalidOptions(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        if self.capture_width_px as f32 * self.scale > MAX_RASTER_WIDTH_PX {
            return Err(ExportError::InvalidOptions(format!(
                "capture width {}px at scale {} exceeds {MAX_RASTER_WIDTH_PX}px",
                self.capture_width_px, self.scale
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// `"{name with whitespace runs replaced by _}_CV.pdf"`, or `Resume_CV.pdf` when the name is blank.
///
/// Characters that would break a `Content-Disposition` header are dropped.
pub fn export_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '"') && !(c.is_control() && !c.is_whitespace()))
        .collect();
    let stem = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        format!("{FALLBACK_FILE_STEM}_CV.pdf")
    } else {
        format!("{stem}_CV.pdf")
    }
}

/// Runs the whole pipeline on the current thread.
pub fn export_blocking(
    doc: &VisualDocument,
    person_name: &str,
    rasterizer: &dyn Rasterizer,
    options: &CaptureOptions,
) -> Result<ExportedDocument, ExportError> {
    if doc.is_empty() {
        return Err(ExportError::EmptyDocument);
    }
    options.validate()?;

    let raster = rasterizer.rasterize(doc, options)?;
    let title = if person_name.trim().is_empty() {
        FALLBACK_FILE_STEM
    } else {
        person_name.trim()
    };
    let (bytes, page_count) = pdf::assemble_pdf(raster, &PageGeometry::a4_portrait(), title)?;

    Ok(ExportedDocument {
        file_name: export_file_name(person_name),
        bytes,
        page_count,
    })
}

/// Exports on the blocking pool. Rasterization is CPU-bound and can take a while for
/// long documents.
///
/// Dropping the returned future does not cancel the work already handed to the
/// blocking pool; the result is simply discarded.
pub async fn export_document(
    doc: VisualDocument,
    person_name: String,
    rasterizer: Arc<dyn Rasterizer>,
    options: CaptureOptions,
) -> Result<ExportedDocument, ExportError> {
    let result = tokio::task::spawn_blocking(move || {
        export_blocking(&doc, &person_name, rasterizer.as_ref(), &options)
    })
    .await
    .map_err(|e| ExportError::Task(e.to_string()))?;

    if let Ok(exported) = &result {
        info!(
            file = %exported.file_name,
            pages = exported.page_count,
            bytes = exported.bytes.len(),
            "export complete"
        );
    }
    result
}

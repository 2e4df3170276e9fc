//! Turns a rendered document into pixels for pagination.
//!
//! `Rasterizer` is the seam: the exporter only needs an RGBA image of the whole
//! document at the capture width. `BoxRasterizer` is the built-in implementation;
//! it paints the capture layout with text greeked as solid line bars.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::cv::photo::decode_photo;
use crate::export::paginator::PageGeometry;
use crate::export::{CaptureOptions, ExportError, MAX_EXPORT_PAGES};
use crate::layout::flow::WHITE;
use crate::layout::{layout_document, PaintKind, Rect, Rgb};
use crate::render::VisualDocument;

pub trait Rasterizer: Send + Sync {
    /// Captures the whole document as one image, `capture_width_px × scale` pixels wide.
    fn rasterize(
        &self,
        doc: &VisualDocument,
        options: &CaptureOptions,
    ) -> Result<RgbaImage, ExportError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoxRasterizer;

impl Rasterizer for BoxRasterizer {
    fn rasterize(
        &self,
        doc: &VisualDocument,
        options: &CaptureOptions,
    ) -> Result<RgbaImage, ExportError> {
        let layout = layout_document(
            doc,
            options.capture_width_px as f32,
            options.window_width_px as f32,
        );

        let scale = options.scale;
        let width = (layout.width * scale).round() as u32;
        let height = (layout.height * scale).round() as u32;
        if width == 0 || height == 0 {
            return Err(ExportError::EmptyRaster);
        }
        check_page_budget(width, height)?;

        let mut canvas = RgbaImage::from_pixel(width, height, opaque(WHITE));
        for item in &layout.items {
            match &item.kind {
                PaintKind::Fill(color) | PaintKind::Text(color) => {
                    fill_rect(&mut canvas, item.rect, scale, *color)
                }
                PaintKind::Photo(uri) => draw_photo(&mut canvas, item.rect, scale, uri)?,
            }
        }

        debug!(width, height, items = layout.items.len(), "document rasterized");
        Ok(canvas)
    }
}

/// Rejects a raster taller than `MAX_EXPORT_PAGES` A4 pages before any pixel is allocated.
fn check_page_budget(width: u32, height: u32) -> Result<(), ExportError> {
    let page_height = u64::from(PageGeometry::a4_portrait().page_height_px(width).max(1));
    let pages = u64::from(height).div_ceil(page_height);
    if pages > MAX_EXPORT_PAGES {
        return Err(ExportError::TooLarge {
            pages,
            limit: MAX_EXPORT_PAGES,
        });
    }
    Ok(())
}

fn opaque(color: Rgb) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 255])
}

/// Pixel bounds of a CSS-pixel rect, clipped to the canvas. `None` when empty.
fn pixel_bounds(canvas: &RgbaImage, rect: Rect, scale: f32) -> Option<(u32, u32, u32, u32)> {
    let clamp = |v: f32, max: u32| (v.round().max(0.0) as u32).min(max);
    let x0 = clamp(rect.x * scale, canvas.width());
    let y0 = clamp(rect.y * scale, canvas.height());
    let x1 = clamp((rect.x + rect.w) * scale, canvas.width());
    let y1 = clamp((rect.y + rect.h) * scale, canvas.height());
    (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
}

fn fill_rect(canvas: &mut RgbaImage, rect: Rect, scale: f32, color: Rgb) {
    let Some((x0, y0, x1, y1)) = pixel_bounds(canvas, rect, scale) else {
        return;
    };
    let pixel = opaque(color);
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, pixel);
        }
    }
}

/// Draws the photo cropped to a circle (`object-cover`, `rounded-full`).
fn draw_photo(canvas: &mut RgbaImage, rect: Rect, scale: f32, uri: &str) -> Result<(), ExportError> {
    let Some((x0, y0, x1, y1)) = pixel_bounds(canvas, rect, scale) else {
        return Ok(());
    };
    let size = (x1 - x0).min(y1 - y0);
    if size == 0 {
        return Ok(());
    }

    let photo = decode_photo(uri)?.to_rgba8();
    // Center-crop to a square before scaling, like object-fit: cover.
    let side = photo.width().min(photo.height());
    let square = imageops::crop_imm(
        &photo,
        (photo.width() - side) / 2,
        (photo.height() - side) / 2,
        side,
        side,
    )
    .to_image();
    let scaled = imageops::resize(&square, size, size, FilterType::Triangle);

    let radius = size as f32 / 2.0;
    for (px, py, pixel) in scaled.enumerate_pixels() {
        let dx = px as f32 + 0.5 - radius;
        let dy = py as f32 + 0.5 - radius;
        if dx * dx + dy * dy > radius * radius {
            continue;
        }
        let (cx, cy) = (x0 + px, y0 + py);
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }
        let under = *canvas.get_pixel(cx, cy);
        canvas.put_pixel(cx, cy, blend(under, *pixel));
    }
    Ok(())
}

fn blend(under: Rgba<u8>, over: Rgba<u8>) -> Rgba<u8> {
    let a = u32::from(over[3]);
    let mix = |o: u8, u: u8| ((u32::from(o) * a + u32::from(u) * (255 - a)) / 255) as u8;
    Rgba([
        mix(over[0], under[0]),
        mix(over[1], under[1]),
        mix(over[2], under[2]),
        255,
    ])
}

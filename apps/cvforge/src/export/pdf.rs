//! PDF assembly. One JPEG page band per A4 page, scaled to the full page width.

use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::imageops;
use image::{DynamicImage, RgbaImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

use crate::export::paginator::{plan_bands, PageGeometry};
use crate::export::ExportError;

const JPEG_QUALITY: u8 = 90;
const PRODUCER: &str = concat!("cvforge ", env!("CARGO_PKG_VERSION"));

/// Slices `raster` into page bands and writes them as a multi-page PDF.
///
/// Returns the encoded document and its page count.
pub fn assemble_pdf(
    raster: RgbaImage,
    geometry: &PageGeometry,
    title: &str,
) -> Result<(Vec<u8>, usize), ExportError> {
    let raster_width = raster.width();
    let page_height_px = geometry.page_height_px(raster_width);
    let bands = plan_bands(raster.height(), page_height_px);
    if bands.is_empty() {
        return Err(ExportError::EmptyRaster);
    }

    let rgb = DynamicImage::ImageRgba8(raster).into_rgb8();
    let page_w = geometry.width_pt();
    let page_h = geometry.height_pt();
    let pt_per_px = page_w / raster_width as f32;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(bands.len());

    for band in &bands {
        let slice = imageops::crop_imm(&rgb, 0, band.top, raster_width, band.height).to_image();
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY).encode_image(&slice)?;

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(raster_width),
                "Height" => i64::from(band.height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        // Band drawn from the top edge; a short final band leaves the rest of the page blank.
        let band_h = band.height as f32 * pt_per_px;
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        page_w.into(),
                        0.into(),
                        0.into(),
                        band_h.into(),
                        0.into(),
                        (page_h - band_h).into(),
                    ],
                ),
                Operation::new("Do", vec!["Im0".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_w.into(), page_h.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;

    debug!(pages = page_count, bytes = bytes.len(), "pdf assembled");
    Ok((bytes, page_count))
}

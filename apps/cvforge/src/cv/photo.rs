//! Photo upload: raw image bytes in, embedded `data:` URI out.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use tracing::info;

use crate::cv::CvError;
use crate::models::CvData;

/// Upper bound on accepted upload size.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

const DATA_URI_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

impl CvData {
    /// Validates `bytes` as a supported raster image and stores it as the photo.
    pub fn set_photo(&mut self, bytes: &[u8]) -> Result<(), CvError> {
        let uri = encode_photo(bytes)?;
        info!(bytes = bytes.len(), "photo updated");
        self.personal_info.photo = Some(uri);
        Ok(())
    }

    pub fn clear_photo(&mut self) {
        self.personal_info.photo = None;
    }
}

/// Sniffs, validates and base64-encodes an uploaded image.
pub fn encode_photo(bytes: &[u8]) -> Result<String, CvError> {
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(CvError::PhotoTooLarge {
            size: bytes.len(),
            limit: MAX_PHOTO_BYTES,
        });
    }

    let format = image::guess_format(bytes)
        .map_err(|_| CvError::UnsupportedPhotoFormat("unrecognised".to_string()))?;
    let mime = mime_for(format)
        .ok_or_else(|| CvError::UnsupportedPhotoFormat(format!("{format:?}").to_lowercase()))?;

    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| CvError::InvalidPhoto(e.to_string()))?;

    Ok(format!(
        "{DATA_URI_PREFIX}{mime}{BASE64_MARKER}{}",
        STANDARD.encode(bytes)
    ))
}

/// Returns the raw bytes embedded in a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, CvError> {
    let rest = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or(CvError::InvalidDataUri)?;
    let (_mime, payload) = rest.split_once(BASE64_MARKER).ok_or(CvError::InvalidDataUri)?;
    STANDARD
        .decode(payload)
        .map_err(|_| CvError::InvalidDataUri)
}

/// Decodes a stored photo back into pixels.
pub fn decode_photo(uri: &str) -> Result<DynamicImage, CvError> {
    let bytes = decode_data_uri(uri)?;
    image::load_from_memory(&bytes).map_err(|e| CvError::InvalidPhoto(e.to_string()))
}

fn mime_for(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Bmp => Some("image/bmp"),
        _ => None,
    }
}

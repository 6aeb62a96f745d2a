use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::AppError;
use crate::models::image_items;

/// Encode a stored image for transport.
pub fn encode(image: &image_items::Model) -> String {
    STANDARD.encode(&image.data)
}

/// Decode an uploaded image. Accepts bare base64 or a `data:<mime>;base64,` URL.
pub fn decode(encoded: &str) -> Result<Vec<u8>, AppError> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    };

    STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::Validation(format!("Invalid image encoding: {e}")))
}

/// Decode every uploaded image, failing on the first bad one.
pub fn decode_all(encoded: &[String]) -> Result<Vec<Vec<u8>>, AppError> {
    encoded.iter().map(|s| decode(s)).collect()
}

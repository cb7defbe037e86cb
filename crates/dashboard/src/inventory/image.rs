//! Product image references.
//!
//! An inventory image is either a remote `http(s)` URL or an uploaded file
//! inlined as a base64 `data:` URL.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use url::Url;

use super::InventoryError;

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// A file picked in the image upload control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    #[must_use]
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Inline the upload as a `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::UnsupportedImageType` for non-image MIME
    /// types and `InventoryError::EmptyImage` for empty files.
    pub fn to_data_url(&self) -> Result<String, InventoryError> {
        let mime_type = self.mime_type.trim().to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(InventoryError::UnsupportedImageType(mime_type));
        }
        if self.bytes.is_empty() {
            return Err(InventoryError::EmptyImage);
        }
        Ok(format!(
            "{DATA_URL_PREFIX}{mime_type}{BASE64_MARKER}{}",
            STANDARD.encode(&self.bytes)
        ))
    }
}

/// Decode an inlined image back into its MIME type and bytes.
///
/// # Errors
///
/// Returns `InventoryError::InvalidImage` if `data_url` is not a base64
/// image `data:` URL.
pub fn decode_data_url(data_url: &str) -> Result<ImageUpload, InventoryError> {
    let rest = data_url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or_else(|| InventoryError::InvalidImage("not a data URL".to_string()))?;
    let (mime_type, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or_else(|| InventoryError::InvalidImage("data URL is not base64".to_string()))?;
    if !mime_type.starts_with("image/") {
        return Err(InventoryError::UnsupportedImageType(mime_type.to_string()));
    }
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| InventoryError::InvalidImage(e.to_string()))?;
    Ok(ImageUpload::new(mime_type, bytes))
}

/// Check an image reference before it is stored.
///
/// Empty strings (no image) pass through. `data:` URLs must decode; anything
/// else must be an absolute `http` or `https` URL.
///
/// # Errors
///
/// Returns `InventoryError::InvalidImage` or
/// `InventoryError::UnsupportedImageType` describing the problem.
pub fn validate_image(reference: &str) -> Result<String, InventoryError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Ok(String::new());
    }
    if reference.starts_with(DATA_URL_PREFIX) {
        decode_data_url(reference)?;
        return Ok(reference.to_string());
    }

    let url = Url::parse(reference).map_err(|e| InventoryError::InvalidImage(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(InventoryError::InvalidImage(format!(
            "unsupported URL scheme: {other}"
        ))),
    }
}

//! Validation of uploaded images.
//!
//! The browser sends the photo as a data-URL. Everything here runs before
//! the model is contacted, so a rejected upload never costs an API call.

use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Uploads of this many decoded bytes or more are refused.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

static DATA_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/([A-Za-z0-9_]+);base64,(.+)$").expect("data-URL pattern is valid")
});

/// Rejections are user-facing; the display text is sent back verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please upload an image.")]
    Missing,

    #[error("Invalid image format.")]
    InvalidFormat,

    #[error("File size must be under 5MB.")]
    TooLarge { bytes: usize },
}

/// An accepted image: its MIME subtype and the untouched base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDataUrl {
    subtype: String,
    payload: String,
}

impl ImageDataUrl {
    /// Parse and validate `data:image/{subtype};base64,{payload}`.
    pub fn parse(data_url: &str) -> Result<Self, IntakeError> {
        if data_url.is_empty() {
            return Err(IntakeError::Missing);
        }

        let captures = DATA_URL
            .captures(data_url)
            .ok_or(IntakeError::InvalidFormat)?;
        let subtype = captures[1].to_string();
        let payload = captures[2].to_string();

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.as_bytes())
            .map_err(|_| IntakeError::InvalidFormat)?;
        if bytes.len() >= MAX_IMAGE_BYTES {
            return Err(IntakeError::TooLarge { bytes: bytes.len() });
        }

        Ok(Self { subtype, payload })
    }

    pub fn mime_type(&self) -> String {
        format!("image/{}", self.subtype)
    }

    /// Base64 payload exactly as uploaded.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn to_data_url(&self) -> String {
        format!("data:image/{};base64,{}", self.subtype, self.payload)
    }
}

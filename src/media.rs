//! Image payload handling for PetroSphere
//!
//! Image bytes cross the gateway boundary base64-encoded with an explicit
//! declared media type on both send and receive. This module owns that
//! encoding: reading an image file into a typed payload, joining and
//! splitting `data:` URIs, and validating received payloads before they
//! are written to disk.

use crate::error::{PetrosphereError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// A binary image with its declared media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// Declared media type (e.g. "image/png")
    pub mime_type: String,
}

impl ImagePayload {
    /// Create a payload from bytes and a media type
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    /// Read an image file, sniffing its media type from the content
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a recognized
    /// image format
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            PetrosphereError::Media(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let format = image::guess_format(&data).map_err(|e| {
            PetrosphereError::Media(format!(
                "{} is not a recognized image format: {}",
                path.display(),
                e
            ))
        })?;
        let mime_type = format.to_mime_type().to_string();
        tracing::debug!(
            "Loaded {} ({} bytes, {})",
            path.display(),
            data.len(),
            mime_type
        );
        Ok(Self { data, mime_type })
    }

    /// Base64-encode the payload for transport
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Render the payload as a self-contained `data:` URI
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// Parse a `data:` URI back into a payload
    ///
    /// # Errors
    ///
    /// Returns error if the URI is not a base64 data URI or the payload
    /// does not decode
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| PetrosphereError::Media("not a data URI".to_string()))?;
        let (header, encoded) = rest
            .split_once(',')
            .ok_or_else(|| PetrosphereError::Media("data URI has no payload".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| PetrosphereError::Media("data URI is not base64-encoded".to_string()))?;
        if mime_type.is_empty() {
            return Err(PetrosphereError::Media("data URI has no media type".to_string()).into());
        }
        let data = STANDARD
            .decode(encoded)
            .map_err(|e| PetrosphereError::Media(format!("invalid base64 payload: {}", e)))?;
        Ok(Self {
            data,
            mime_type: mime_type.to_string(),
        })
    }

    /// Decode the payload to verify it is a renderable image
    ///
    /// # Errors
    ///
    /// Returns error if the bytes do not decode as an image
    pub fn validate(&self) -> Result<()> {
        image::load_from_memory(&self.data)
            .map_err(|e| PetrosphereError::Media(format!("payload is not a valid image: {}", e)))?;
        Ok(())
    }

    /// Write the raw payload to a file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.data).map_err(|e| {
            PetrosphereError::Media(format!("Failed to write {}: {}", path.display(), e))
        })?;
        tracing::info!("Wrote {} bytes to {}", self.data.len(), path.display());
        Ok(())
    }
}

/// Decode a base64 body received from the gateway into a payload
///
/// # Arguments
///
/// * `data` - Base64-encoded image bytes
/// * `mime_type` - Declared media type from the response
///
/// # Errors
///
/// Returns error if the body does not decode as base64
pub fn decode_inline(data: &str, mime_type: &str) -> Result<ImagePayload> {
    let bytes = STANDARD
        .decode(data)
        .map_err(|e| PetrosphereError::Media(format!("invalid base64 in reply: {}", e)))?;
    Ok(ImagePayload::new(bytes, mime_type))
}

//! Wire types for the `generateContent` endpoint
//!
//! Request and response structures for the model-serving API. Field
//! names follow the endpoint's camelCase JSON. Response structures are
//! deliberately tolerant: candidates, grounding metadata, and chunk
//! sub-records may all be absent and deserialize to empty defaults.

use serde::{Deserialize, Serialize};

/// Request body for a `generateContent` call
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents, oldest first
    pub contents: Vec<Content>,

    /// Session-level system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    /// Capability attachments; at most the set the operation needs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSpec>>,

    /// Tool configuration (retrieval biasing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,

    /// Generation parameters (reasoning budget, image output)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// A content block: a role plus ordered parts
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Content {
    /// Producing role ("user" or "model"); absent for system instructions
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,

    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A single-text content block with a role
    pub fn text(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            parts: vec![Part::text(text)],
        }
    }

    /// A role-less system instruction block
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    /// A user content block from pre-built parts
    pub fn user_parts(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }
}

/// One part of a content block: text or inline binary data
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,

    /// Inline base64 binary payload
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// A text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// An inline-data part
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

/// Base64 binary payload with its declared media type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Declared media type (e.g. "image/png")
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

/// A capability attachment
///
/// Exactly one of the fields is set per entry; operations attach only
/// the capabilities they need.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    /// Live web search capability
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,

    /// Places lookup capability
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<GoogleMaps>,
}

/// Empty marker object enabling live web search
#[derive(Debug, Clone, Serialize, Default)]
pub struct GoogleSearch {}

/// Empty marker object enabling places lookup
#[derive(Debug, Clone, Serialize, Default)]
pub struct GoogleMaps {}

impl ToolSpec {
    /// Live web search attachment
    pub fn search() -> Self {
        Self {
            google_search: Some(GoogleSearch {}),
            google_maps: None,
        }
    }

    /// Places lookup attachment
    pub fn maps() -> Self {
        Self {
            google_search: None,
            google_maps: Some(GoogleMaps {}),
        }
    }
}

/// Tool configuration carried alongside attachments
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    /// Retrieval biasing configuration
    pub retrieval_config: RetrievalConfig,
}

/// Retrieval biasing configuration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    /// Coordinates results are biased toward
    pub lat_lng: LatLng,
}

/// A latitude/longitude pair
#[derive(Debug, Clone, Serialize)]
pub struct LatLng {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Generation parameters
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Extended internal-reasoning budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,

    /// Image output parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

/// Extended internal-reasoning budget
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    /// Token budget the model may spend reasoning before answering
    pub thinking_budget: u32,
}

/// Image output parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Output aspect ratio (fixed to "1:1" in this system)
    pub aspect_ratio: String,
    /// Output resolution tier ("1K", "2K", or "4K")
    pub image_size: String,
}

/// Response body of a `generateContent` call
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GenerateContentResponse {
    /// Response candidates; may be absent or empty
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if any
    pub fn primary_text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// First inline-data part of the first candidate, if any
    pub fn inline_image(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
    }

    /// Grounding chunks of the first candidate; empty when absent
    pub fn grounding_chunks(&self) -> &[GroundingChunk] {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.as_slice())
            .unwrap_or(&[])
    }
}

/// One response candidate
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<Content>,

    /// Grounding metadata attached to search/locate replies
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

/// Grounding metadata of a candidate
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    /// Source chunks; may be absent
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding chunk
///
/// Either, both, or neither sub-record may be present; the adapter
/// tolerates all four shapes.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GroundingChunk {
    /// Web source sub-record
    #[serde(default)]
    pub web: Option<ChunkSource>,

    /// Maps source sub-record
    #[serde(default)]
    pub maps: Option<ChunkSource>,
}

/// Title and URI of a grounding source
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ChunkSource {
    /// Human-readable source title
    #[serde(default)]
    pub title: Option<String>,

    /// Source URI
    #[serde(default)]
    pub uri: Option<String>,
}

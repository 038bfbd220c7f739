//! Domain types returned by the model gateway
//!
//! Every result type here is a terminal snapshot of one request: the
//! gateway never merges, diffs, or incrementally updates a previously
//! returned value. The only state carried across calls is the
//! [`ConversationSession`], which is replaced wholesale whenever the
//! reasoning mode changes.

use crate::gateway::wire::GroundingChunk;
use crate::media::ImagePayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed fallback text appended to the transcript when a send fails
pub const FALLBACK_TEXT: &str =
    "I encountered an error while processing your request. Please try again.";

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End-user input
    User,
    /// Assistant reply
    Model,
    /// Session-level instruction
    System,
}

impl Role {
    /// Wire-format role string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exchange in a chat transcript
///
/// Turns are never mutated after creation; a transcript only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who produced the turn
    pub role: Role,
    /// Text content
    pub text: String,
    /// Whether extended reasoning was enabled when this turn was produced
    pub used_reasoning: bool,
    /// When the turn was created
    pub at: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            used_reasoning: false,
            at: Utc::now(),
        }
    }

    /// Create a model turn, tagged with the session's reasoning mode
    pub fn model(text: impl Into<String>, used_reasoning: bool) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            used_reasoning,
            at: Utc::now(),
        }
    }

    /// The fixed fallback turn shown when a send fails
    pub fn fallback() -> Self {
        Self::model(FALLBACK_TEXT, false)
    }
}

/// Client-held state of one chat session
///
/// The remote endpoint is stateless, so the "session handle" is the
/// accumulated turn history resent with every message, bound to the
/// reasoning flag chosen at open time. Toggling the flag requires a new
/// session; the old one is dropped, not merged.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    reasoning_enabled: bool,
    turns: Vec<ConversationTurn>,
}

impl ConversationSession {
    /// Create an empty session with the given reasoning mode
    pub fn new(reasoning_enabled: bool) -> Self {
        Self {
            reasoning_enabled,
            turns: Vec::new(),
        }
    }

    /// Whether extended reasoning is enabled for this session
    pub fn reasoning_enabled(&self) -> bool {
        self.reasoning_enabled
    }

    /// Exchanged turns, oldest first
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Number of exchanged turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when no message has been exchanged yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub(crate) fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }
}

/// Origin of a citation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationOrigin {
    /// Live web search result
    Web,
    /// Places lookup result
    Maps,
}

impl std::fmt::Display for CitationOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Web => write!(f, "web"),
            Self::Maps => write!(f, "maps"),
        }
    }
}

/// A grounding source citation with a guaranteed title and URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Human-readable source title
    pub title: String,
    /// Source URI
    pub uri: String,
    /// Which grounding source produced the citation
    pub origin: CitationOrigin,
}

impl Citation {
    /// Extract a citation from a grounding chunk
    ///
    /// Returns `None` for chunks that carry neither a web nor a maps
    /// sub-record, or whose URI is absent or does not parse as a URL;
    /// those are dropped rather than rendered as broken links. When both
    /// sub-records are present the maps one wins. A missing title falls
    /// back to the URI so every surviving citation has both fields.
    pub fn from_chunk(chunk: &GroundingChunk) -> Option<Self> {
        let (source, origin) = match (&chunk.maps, &chunk.web) {
            (Some(maps), _) => (maps, CitationOrigin::Maps),
            (None, Some(web)) => (web, CitationOrigin::Web),
            (None, None) => return None,
        };
        let uri = source.uri.as_deref()?.trim();
        if uri.is_empty() || url::Url::parse(uri).is_err() {
            return None;
        }
        let title = source
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(uri);
        Some(Self {
            title: title.to_string(),
            uri: uri.to_string(),
            origin,
        })
    }

    /// Extract and filter citations from a list of grounding chunks
    pub fn from_chunks(chunks: &[GroundingChunk]) -> Vec<Self> {
        chunks.iter().filter_map(Self::from_chunk).collect()
    }
}

/// Grounded answer to a knowledge query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Answer text
    pub answer: String,
    /// Filtered source citations, in response order
    pub citations: Vec<Citation>,
}

/// Device coordinates in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
}

/// Grounded answer to a geological-location query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResult {
    /// Answer text
    pub answer: String,
    /// Filtered place/source citations, in response order
    pub citations: Vec<Citation>,
    /// Requester coordinates the query was biased toward, if any
    pub coordinates: Option<Coordinates>,
}

/// Output resolution tier for image synthesis
///
/// A closed set of three sizes; arbitrary dimensions are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionTier {
    /// 1K output
    OneK,
    /// 2K output
    TwoK,
    /// 4K output
    FourK,
}

impl ResolutionTier {
    /// Wire-format size string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneK => "1K",
            Self::TwoK => "2K",
            Self::FourK => "4K",
        }
    }
}

impl std::fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResolutionTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "1K" => Ok(Self::OneK),
            "2K" => Ok(Self::TwoK),
            "4K" => Ok(Self::FourK),
            other => Err(format!("Unknown resolution tier: {}", other)),
        }
    }
}

/// A synthesized specimen image
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Decoded image payload with its declared media type
    pub image: ImagePayload,
    /// Resolution tier the image was requested at
    pub tier: ResolutionTier,
}

impl GeneratedImage {
    /// Render the image as a self-contained data URI
    pub fn data_uri(&self) -> String {
        self.image.to_data_uri()
    }
}

/// A transformed specimen image
#[derive(Debug, Clone)]
pub struct EditedImage {
    /// Decoded image payload with its declared media type
    pub image: ImagePayload,
    /// Media type of the source image the edit was applied to
    pub source_mime: String,
    /// The instruction that produced the edit
    pub instruction: String,
}

impl EditedImage {
    /// Render the image as a self-contained data URI
    pub fn data_uri(&self) -> String {
        self.image.to_data_uri()
    }
}

//! Model gateway adapter
//!
//! Translates high-level intents into calls against the external
//! model-serving endpoint and normalizes the replies into plain data.
//! Split into the client itself, the domain types it returns, and the
//! wire-format structures of the endpoint.

mod client;
pub mod types;
pub mod wire;

pub use client::ModelGateway;
pub use types::{
    Citation, CitationOrigin, ConversationSession, ConversationTurn, Coordinates, EditedImage,
    GeneratedImage, LocationResult, ResolutionTier, Role, SearchResult, FALLBACK_TEXT,
};

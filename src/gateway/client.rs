//! Model gateway client
//!
//! The only logic boundary in the system: translates high-level intents
//! (converse, search, locate, synthesize, edit, analyze, summarize) into
//! `generateContent` calls and normalizes the replies into plain domain
//! data. Every operation is one awaited round trip: no retries, no
//! batching, no caching, no cancellation. The only state shared across
//! calls is the [`ConversationSession`] handle, which `send_message`
//! reads and `open_conversation` replaces.

use crate::config::GatewayConfig;
use crate::credentials::ApiKeyStore;
use crate::error::{PetrosphereError, Result};
use crate::gateway::types::{
    Citation, ConversationSession, ConversationTurn, Coordinates, EditedImage, GeneratedImage,
    LocationResult, ResolutionTier, SearchResult,
};
use crate::gateway::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig,
    LatLng, Part, RetrievalConfig, ThinkingConfig, ToolConfig, ToolSpec,
};
use crate::media::{self, ImagePayload};
use reqwest::Client;
use std::time::Duration;

/// Fixed system instruction for chat sessions
const SYSTEM_INSTRUCTION: &str =
    "You are an expert petrologist assisting a user in the study of Igneous, Metamorphic, \
     and Sedimentary rocks. Provide detailed, scientifically accurate information about \
     mineral composition, formation environments, and classification schemes. When requested \
     for complex reasoning, use your thinking capabilities.";

/// Aspect ratio for synthesized images; fixed in this system
const IMAGE_ASPECT_RATIO: &str = "1:1";

/// Wrap a synthesis prompt with the fixed stylistic preamble
fn synthesis_prompt(prompt: &str) -> String {
    format!(
        "A professional geological sample photo of: {}. High detail, scientific thin \
         section or macro photography style.",
        prompt
    )
}

/// Wrap a locate query with the fixed site-finding framing
fn locate_prompt(query: &str) -> String {
    format!("Find geological sites or formations related to: {}", query)
}

/// Wrap an analysis question with the fixed thin-section framing
fn analysis_prompt(question: &str) -> String {
    format!(
        "As a petrologist, analyze this thin section image. {}. Focus on optical \
         properties like pleochroism, birefringence, and mineral identification.",
        question
    )
}

/// Wrap a description with the fixed summary framing
fn summary_prompt(text: &str) -> String {
    format!(
        "Summarize the following geological description into 3 key bullet points: {}",
        text
    )
}

/// Client for the model-serving endpoint
///
/// # Examples
///
/// ```no_run
/// use petrosphere::config::GatewayConfig;
/// use petrosphere::gateway::ModelGateway;
///
/// # async fn example() -> petrosphere::error::Result<()> {
/// let gateway = ModelGateway::new(GatewayConfig::default())?;
/// let result = gateway.search_grounded("basalt weathering").await?;
/// println!("{}", result.answer);
/// # Ok(())
/// # }
/// ```
pub struct ModelGateway {
    client: Client,
    config: GatewayConfig,
    keys: ApiKeyStore,
}

impl ModelGateway {
    /// Create a gateway with the default key store
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: GatewayConfig) -> Result<Self> {
        Self::with_key_store(config, ApiKeyStore::new())
    }

    /// Create a gateway with a custom key store (used by tests)
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn with_key_store(config: GatewayConfig, keys: ApiKeyStore) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("petrosphere/0.2.0")
            .build()
            .map_err(|e| PetrosphereError::Gateway(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized model gateway: api_base={}, chat_model={}",
            config.api_base,
            config.models.chat
        );

        Ok(Self {
            client,
            config,
            keys,
        })
    }

    /// The configured endpoint base URL
    pub fn api_base(&self) -> &str {
        &self.config.api_base
    }

    /// Open a conversation session
    ///
    /// The session is bound to the given reasoning mode. Calling this
    /// again replaces the previous session outright; callers re-issue it
    /// only when the mode changes, not per message.
    pub fn open_conversation(&self, reasoning_enabled: bool) -> ConversationSession {
        tracing::info!(
            "Opened conversation session (reasoning={})",
            reasoning_enabled
        );
        ConversationSession::new(reasoning_enabled)
    }

    /// Send one chat message and await the completion
    ///
    /// The user turn is recorded on the session before the call; on
    /// success the model turn is recorded too and returned, tagged with
    /// the session's reasoning mode. On failure the error propagates and
    /// the caller appends the fixed fallback turn to its transcript.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty text (before any network I/O)
    /// and `Gateway` on call failure. No retry: a failure is terminal
    /// for that message and the user must resend.
    pub async fn send_message(
        &self,
        session: &mut ConversationSession,
        text: &str,
    ) -> Result<ConversationTurn> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PetrosphereError::InvalidInput("message is empty".to_string()).into());
        }

        session.push(ConversationTurn::user(text));

        let contents = session
            .turns()
            .iter()
            .map(|turn| Content::text(turn.role.as_str(), turn.text.clone()))
            .collect();

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::system(SYSTEM_INSTRUCTION)),
            tools: None,
            tool_config: None,
            generation_config: session.reasoning_enabled().then(|| GenerationConfig {
                thinking_config: Some(ThinkingConfig {
                    thinking_budget: self.config.thinking_budget,
                }),
                image_config: None,
            }),
        };

        let response = self.generate(&self.config.models.chat, &request).await?;
        let answer = response.primary_text().ok_or_else(|| {
            PetrosphereError::Gateway("completion contained no text".to_string())
        })?;

        let turn = ConversationTurn::model(answer, session.reasoning_enabled());
        session.push(turn.clone());
        Ok(turn)
    }

    /// Answer a knowledge query with live-web grounding
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty query and `Gateway` on call
    /// failure; no partial results are reported.
    pub async fn search_grounded(&self, query: &str) -> Result<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PetrosphereError::InvalidInput("query is empty".to_string()).into());
        }

        let request = GenerateContentRequest {
            contents: vec![Content::text("user", query)],
            tools: Some(vec![ToolSpec::search()]),
            ..Default::default()
        };

        let response = self.generate(&self.config.models.search, &request).await?;
        let answer = response
            .primary_text()
            .ok_or_else(|| PetrosphereError::Gateway("reply contained no text".to_string()))?;
        let citations = Citation::from_chunks(response.grounding_chunks());

        tracing::debug!(
            "Search returned {} citations for query \"{}\"",
            citations.len(),
            query
        );
        Ok(SearchResult { answer, citations })
    }

    /// Locate geological formations, optionally biased toward coordinates
    ///
    /// Coordinates are best-effort: when absent the call proceeds without
    /// a location bias and must never fail on that account. Both the
    /// places-lookup and live-web-search capabilities are attached so
    /// answers may cite either.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty query and `Gateway` on call
    /// failure.
    pub async fn locate_formations(
        &self,
        query: &str,
        coordinates: Option<Coordinates>,
    ) -> Result<LocationResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PetrosphereError::InvalidInput("query is empty".to_string()).into());
        }

        let request = GenerateContentRequest {
            contents: vec![Content::text("user", locate_prompt(query))],
            tools: Some(vec![ToolSpec::maps(), ToolSpec::search()]),
            tool_config: coordinates.map(|c| ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLng {
                        latitude: c.latitude,
                        longitude: c.longitude,
                    },
                },
            }),
            ..Default::default()
        };

        let response = self.generate(&self.config.models.locate, &request).await?;
        let answer = response
            .primary_text()
            .ok_or_else(|| PetrosphereError::Gateway("reply contained no text".to_string()))?;
        let citations = Citation::from_chunks(response.grounding_chunks());

        Ok(LocationResult {
            answer,
            citations,
            coordinates,
        })
    }

    /// Synthesize a specimen image at one of the fixed resolution tiers
    ///
    /// The prompt is wrapped with the fixed stylistic preamble; callers
    /// never get raw-prompt-only output. If no API key is available yet
    /// this triggers the interactive credential selection flow and blocks
    /// until it resolves.
    ///
    /// Returns `Ok(None)` when the reply carries no image payload, a
    /// valid, non-exceptional outcome distinct from a call failure.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty prompt and `Gateway` on
    /// outright call failure.
    pub async fn synthesize_image(
        &self,
        prompt: &str,
        tier: ResolutionTier,
    ) -> Result<Option<GeneratedImage>> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(PetrosphereError::InvalidInput("prompt is empty".to_string()).into());
        }

        // Image synthesis requires an explicitly selected key; block on
        // the selection flow before the first call rather than failing.
        self.keys.ensure_selected()?;

        let request = GenerateContentRequest {
            contents: vec![Content::text("user", synthesis_prompt(prompt))],
            generation_config: Some(GenerationConfig {
                thinking_config: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
                    image_size: tier.as_str().to_string(),
                }),
            }),
            ..Default::default()
        };

        let response = self.generate(&self.config.models.image, &request).await?;
        match response.inline_image() {
            Some(inline) => {
                let image = media::decode_inline(&inline.data, &inline.mime_type)?;
                Ok(Some(GeneratedImage { image, tier }))
            }
            None => {
                tracing::warn!("Synthesis reply contained no image payload");
                Ok(None)
            }
        }
    }

    /// Edit an image according to an instruction
    ///
    /// Returns `Ok(None)` when the reply carries no image payload, under
    /// the same contract as [`Self::synthesize_image`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the source payload is empty or the
    /// instruction is blank; both are rejected before any network call.
    pub async fn edit_image(
        &self,
        source: &ImagePayload,
        instruction: &str,
    ) -> Result<Option<EditedImage>> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(
                PetrosphereError::InvalidInput("edit instruction is empty".to_string()).into(),
            );
        }
        if source.data.is_empty() || source.mime_type.is_empty() {
            return Err(PetrosphereError::InvalidInput(
                "source image is missing or has no media type".to_string(),
            )
            .into());
        }

        let request = GenerateContentRequest {
            contents: vec![Content::user_parts(vec![
                Part::inline(source.mime_type.clone(), source.to_base64()),
                Part::text(instruction),
            ])],
            ..Default::default()
        };

        let response = self.generate(&self.config.models.edit, &request).await?;
        match response.inline_image() {
            Some(inline) => {
                let image = media::decode_inline(&inline.data, &inline.mime_type)?;
                Ok(Some(EditedImage {
                    image,
                    source_mime: source.mime_type.clone(),
                    instruction: instruction.to_string(),
                }))
            }
            None => {
                tracing::warn!("Edit reply contained no image payload");
                Ok(None)
            }
        }
    }

    /// Analyze a thin-section view given as a data URI
    ///
    /// The URI is split into payload and declared media type before the
    /// call; the question is sent with the fixed analytical framing.
    ///
    /// # Errors
    ///
    /// Returns `Media` for a malformed data URI and `InvalidInput` for a
    /// blank question (both before any network I/O); `Gateway` on call
    /// failure, with no fallback text (callers supply their own).
    pub async fn analyze_view(&self, image_data_uri: &str, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(PetrosphereError::InvalidInput("question is empty".to_string()).into());
        }
        let payload = ImagePayload::from_data_uri(image_data_uri)?;

        let request = GenerateContentRequest {
            contents: vec![Content::user_parts(vec![
                Part::inline(payload.mime_type.clone(), payload.to_base64()),
                Part::text(analysis_prompt(question)),
            ])],
            ..Default::default()
        };

        let response = self.generate(&self.config.models.vision, &request).await?;
        response
            .primary_text()
            .ok_or_else(|| PetrosphereError::Gateway("analysis reply contained no text".to_string()).into())
    }

    /// Condense a geological description into three key bullet points
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty text and `Gateway` on call
    /// failure.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PetrosphereError::InvalidInput("text is empty".to_string()).into());
        }

        let request = GenerateContentRequest {
            contents: vec![Content::text("user", summary_prompt(text))],
            ..Default::default()
        };

        let response = self.generate(&self.config.models.summary, &request).await?;
        response
            .primary_text()
            .ok_or_else(|| PetrosphereError::Gateway("summary reply contained no text".to_string()).into())
    }

    /// Perform one `generateContent` round trip
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self.keys.get()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base, model
        );
        tracing::debug!(
            "Sending generateContent request: model={}, contents={}",
            model,
            request.contents.len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gateway request failed: {}", e);
                PetrosphereError::Gateway(format!("request to {} failed: {}", model, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Endpoint returned error {}: {}", status, error_text);
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(PetrosphereError::Authentication(format!(
                    "endpoint rejected the API key ({}): {}",
                    status, error_text
                ))
                .into());
            }
            return Err(PetrosphereError::Gateway(format!(
                "endpoint returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse endpoint response: {}", e);
            PetrosphereError::Gateway(format!("failed to parse response: {}", e))
        })?;

        tracing::debug!(
            "Received response: candidates={}",
            parsed.candidates.len()
        );
        Ok(parsed)
    }
}

//! Integration tests for the model gateway
//!
//! Every operation is driven against a wiremock server through the
//! config `api_base` override. The API key is supplied via the
//! environment so no interactive selection flow runs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;

use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use petrosphere::config::GatewayConfig;
use petrosphere::error::PetrosphereError;
use petrosphere::gateway::{
    CitationOrigin, ConversationTurn, ModelGateway, ResolutionTier, Role, FALLBACK_TEXT,
};
use petrosphere::media::ImagePayload;

const TEST_KEY: &str = "test-key";

static KEY_INIT: std::sync::Once = std::sync::Once::new();

/// Build a gateway pointed at the mock server
fn gateway(server: &MockServer) -> ModelGateway {
    KEY_INIT.call_once(|| std::env::set_var("PETROSPHERE_API_KEY", TEST_KEY));
    let mut config = GatewayConfig::default();
    config.api_base = server.uri();
    ModelGateway::new(config).unwrap()
}

/// A minimal text-only reply body
fn text_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]}
        }]
    })
}

/// Encode a 1x1 pixel as a real PNG
fn png_1x1() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([200, 100, 50, 255]));
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

#[tokio::test]
async fn test_send_message_returns_model_turn() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-pro-preview:generateContent"))
        .and(header("x-goog-api-key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(
            "Gabbro is a coarse-grained intrusive igneous rock.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let mut session = gateway.open_conversation(false);

    let turn = gateway
        .send_message(&mut session, "What is gabbro?")
        .await
        .unwrap();

    assert_eq!(turn.role, Role::Model);
    assert_eq!(
        turn.text,
        "Gabbro is a coarse-grained intrusive igneous rock."
    );
    assert!(!turn.used_reasoning);
    // Session accumulated the user turn and the model turn
    assert_eq!(session.len(), 2);
    assert_eq!(session.turns()[0].role, Role::User);
    assert_eq!(session.turns()[1].role, Role::Model);
}

#[tokio::test]
async fn test_send_message_reasoning_session_attaches_budget() {
    let server = MockServer::start().await;

    // The reasoning session must carry the thinking budget in its
    // generation config; a plain session must not (matched by expect).
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-pro-preview:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": {"thinkingConfig": {"thinkingBudget": 32768}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Deep answer.")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let mut session = gateway.open_conversation(true);

    let turn = gateway
        .send_message(&mut session, "Classify this metamorphic facies")
        .await
        .unwrap();

    assert!(turn.used_reasoning);
}

#[tokio::test]
async fn test_send_message_failure_yields_fallback_entry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-pro-preview:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let mut session = gateway.open_conversation(false);
    let mut transcript: Vec<ConversationTurn> = Vec::new();

    transcript.push(ConversationTurn::user("What is gneiss?"));
    let result = gateway.send_message(&mut session, "What is gneiss?").await;
    assert!(result.is_err());

    // The caller recovers with the fixed fallback turn so the transcript
    // is never left without a model reply.
    transcript.push(ConversationTurn::fallback());
    assert_eq!(transcript.last().unwrap().text, FALLBACK_TEXT);
    assert_eq!(transcript.last().unwrap().role, Role::Model);

    // The session kept the user turn; the failed exchange added nothing
    assert_eq!(session.len(), 1);
    assert_eq!(session.turns()[0].role, Role::User);
}

#[tokio::test]
async fn test_toggling_reasoning_uses_fresh_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-pro-preview:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Answer.")))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let mut session = gateway.open_conversation(false);
    gateway
        .send_message(&mut session, "First question")
        .await
        .unwrap();
    assert_eq!(session.len(), 2);

    // Mode toggle: the replacement session starts empty and reflects the
    // new mode; it must not silently reuse the pre-toggle history.
    let session = gateway.open_conversation(true);
    assert!(session.is_empty());
    assert!(session.reasoning_enabled());
}

#[tokio::test]
async fn test_search_attaches_web_search_tool() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
        .and(body_partial_json(json!({"tools": [{"googleSearch": {}}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Grounded answer.")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let result = gateway.search_grounded("basalt weathering").await.unwrap();
    assert_eq!(result.answer, "Grounded answer.");
    assert!(result.citations.is_empty());
}

#[tokio::test]
async fn test_search_filters_unusable_citations() {
    let server = MockServer::start().await;

    let body = json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "Basalt weathers to clays."}]},
            "groundingMetadata": {
                "groundingChunks": [
                    {"web": {"title": "Weathering of basalt", "uri": "https://example.org/basalt"}},
                    {"web": {"title": "No link here"}},
                    {"maps": {"uri": "https://maps.example.org/outcrop"}},
                    {"retrievedContext": {"title": "Other source type", "uri": "https://example.org/x"}},
                    {"web": {"title": "Broken", "uri": "not a valid url"}},
                    {}
                ]
            }
        }]
    });

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let result = gateway.search_grounded("basalt weathering").await.unwrap();

    // Only the two chunks with a usable web/maps URI survive; every
    // surviving citation has both a title and a URI.
    assert_eq!(result.citations.len(), 2);
    assert_eq!(result.citations[0].title, "Weathering of basalt");
    assert_eq!(result.citations[0].origin, CitationOrigin::Web);
    assert_eq!(result.citations[1].uri, "https://maps.example.org/outcrop");
    assert_eq!(result.citations[1].title, "https://maps.example.org/outcrop");
    assert_eq!(result.citations[1].origin, CitationOrigin::Maps);
    for citation in &result.citations {
        assert!(!citation.title.is_empty());
        assert!(!citation.uri.is_empty());
    }
}

#[tokio::test]
async fn test_search_failure_is_terminal_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let err = gateway.search_grounded("basalt").await.unwrap_err();
    let err = err.downcast_ref::<PetrosphereError>().unwrap();
    assert!(matches!(err, PetrosphereError::Gateway(_)));
}

#[tokio::test]
async fn test_locate_attaches_maps_and_search_tools() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "tools": [{"googleMaps": {}}, {"googleSearch": {}}]
        })))
        .and(body_string_contains(
            "Find geological sites or formations related to: columnar jointing",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Giant's Causeway.")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let result = gateway
        .locate_formations("columnar jointing", None)
        .await
        .unwrap();
    assert_eq!(result.answer, "Giant's Causeway.");
    assert!(result.coordinates.is_none());
}

#[tokio::test]
async fn test_locate_with_coordinates_biases_retrieval() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "toolConfig": {"retrievalConfig": {"latLng": {"latitude": 64.1, "longitude": -21.9}}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Nearby outcrops.")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let coords = petrosphere::gateway::Coordinates {
        latitude: 64.1,
        longitude: -21.9,
    };
    let result = gateway
        .locate_formations("tuff rings", Some(coords))
        .await
        .unwrap();
    assert_eq!(result.coordinates.unwrap().latitude, 64.1);
}

#[tokio::test]
async fn test_locate_without_coordinates_matches_shape_of_biased_call() {
    let server = MockServer::start().await;

    // Missing coordinates must never block or fail the query; the result
    // shape is identical modulo content.
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Formations.")))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let unbiased = gateway.locate_formations("eskers", None).await.unwrap();
    let biased = gateway
        .locate_formations(
            "eskers",
            Some(petrosphere::gateway::Coordinates {
                latitude: 60.0,
                longitude: 25.0,
            }),
        )
        .await
        .unwrap();

    assert_eq!(unbiased.answer, biased.answer);
    assert_eq!(unbiased.citations.len(), biased.citations.len());
    assert!(unbiased.coordinates.is_none());
    assert!(biased.coordinates.is_some());
}

#[tokio::test]
async fn test_synthesize_returns_decodable_image() {
    let server = MockServer::start().await;

    let png = png_1x1();
    let body = json!({
        "candidates": [{
            "content": {"parts": [
                {"text": "Here is the specimen:"},
                {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(&png)}}
            ]}
        }]
    });

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-pro-image-preview:generateContent"))
        .and(body_string_contains("A professional geological sample photo of:"))
        .and(body_partial_json(json!({
            "generationConfig": {"imageConfig": {"aspectRatio": "1:1", "imageSize": "2K"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let generated = gateway
        .synthesize_image("olivine basalt with phenocrysts", ResolutionTier::TwoK)
        .await
        .unwrap()
        .expect("reply carried an image");

    assert_eq!(generated.tier, ResolutionTier::TwoK);
    assert_eq!(generated.image.mime_type, "image/png");
    assert_eq!(generated.image.data, png);
    assert!(generated.image.validate().is_ok());
}

#[tokio::test]
async fn test_synthesize_empty_reply_returns_none_not_error() {
    let server = MockServer::start().await;

    // A successful reply without an image payload is a valid empty
    // state, distinct from a thrown call failure.
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-pro-image-preview:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_reply("I cannot draw that.")),
        )
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    for tier in [
        ResolutionTier::OneK,
        ResolutionTier::TwoK,
        ResolutionTier::FourK,
    ] {
        let generated = gateway
            .synthesize_image("a pegmatite dike", tier)
            .await
            .unwrap();
        assert!(generated.is_none());
    }
}

#[tokio::test]
async fn test_synthesize_failure_is_error_not_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-pro-image-preview:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let result = gateway
        .synthesize_image("a pegmatite dike", ResolutionTier::OneK)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_edit_rejects_missing_inputs_before_any_network_call() {
    let server = MockServer::start().await;
    let gateway = gateway(&server);

    // Blank instruction
    let source = ImagePayload::new(png_1x1(), "image/png");
    let err = gateway.edit_image(&source, "   ").await.unwrap_err();
    let err = err.downcast_ref::<PetrosphereError>().unwrap();
    assert!(matches!(err, PetrosphereError::InvalidInput(_)));

    // Missing source bytes
    let empty = ImagePayload::new(Vec::new(), "image/png");
    let err = gateway.edit_image(&empty, "brighten it").await.unwrap_err();
    let err = err.downcast_ref::<PetrosphereError>().unwrap();
    assert!(matches!(err, PetrosphereError::InvalidInput(_)));

    // Neither rejection reached the wire
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_then_analyze_round_trips_media_type() {
    let server = MockServer::start().await;

    let png = png_1x1();
    let edit_body = json!({
        "candidates": [{
            "content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(&png)}}
            ]}
        }]
    });

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash-image:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(edit_body))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"inlineData": {"mimeType": "image/png"}}, {}]}]
        })))
        .and(body_string_contains("As a petrologist, analyze this thin section image."))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_reply("Plagioclase laths.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let source = ImagePayload::new(png.clone(), "image/png");
    let edited = gateway
        .edit_image(&source, "highlight the phenocrysts")
        .await
        .unwrap()
        .expect("reply carried an image");

    assert_eq!(edited.source_mime, "image/png");
    assert_eq!(edited.instruction, "highlight the phenocrysts");

    // The edited payload's data URI decodes back to the same declared
    // media type and feeds straight into analysis
    let uri = edited.data_uri();
    let decoded = ImagePayload::from_data_uri(&uri).unwrap();
    assert_eq!(decoded.mime_type, "image/png");
    assert_eq!(decoded.data, png);

    let answer = gateway
        .analyze_view(&uri, "What minerals are visible?")
        .await
        .unwrap();
    assert_eq!(answer, "Plagioclase laths.");
}

#[tokio::test]
async fn test_edit_empty_reply_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash-image:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("No edit made.")))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let source = ImagePayload::new(png_1x1(), "image/png");
    let edited = gateway.edit_image(&source, "do nothing").await.unwrap();
    assert!(edited.is_none());
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let err = gateway.search_grounded("basalt").await.unwrap_err();
    let err = err.downcast_ref::<PetrosphereError>().unwrap();
    assert!(matches!(err, PetrosphereError::Authentication(_)));
}

#[tokio::test]
async fn test_summarize_wraps_text_with_fixed_framing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-flash-lite-latest:generateContent"))
        .and(body_string_contains(
            "Summarize the following geological description into 3 key bullet points:",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("- point one")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let summary = gateway
        .summarize("A coarse-grained intrusive rock of gabbroic composition.")
        .await
        .unwrap();
    assert_eq!(summary, "- point one");
}

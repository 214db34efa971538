//! Axum-based HTTP gateway: the session WebSocket plus a small REST surface.
//!
//! - `GET /ws` upgrades to a relay session
//! - `GET /health` reports liveness and session counts
//! - `POST /api/translate` one-shot text translation
//! - `POST /api/stt` one-shot speech recognition of a raw audio body
//! - `POST /api/tts` one-shot speech synthesis
//!
//! REST routes carry a request body limit and a request timeout. WebSocket
//! sessions are long-lived and bounded only by the per-stage timeout.

use crate::config::{Config, GatewayConfig};
use crate::voice::outcome::elapsed_ms;
use crate::voice::{
    CaptureSettings, HttpRecognitionBackend, HttpSynthesisBackend, HttpTranslationBackend,
    LanguageCode, LanguageRegistry, Ports, Session, SessionPipeline, SessionRegistry, TextTurn,
    Turn, TurnError, VoiceStyle,
};
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Query, State, WebSocketUpgrade,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Content type of synthesized speech.
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SessionPipeline>,
    pub sessions: Arc<SessionRegistry>,
    /// Capture settings every new session starts with.
    pub capture_defaults: CaptureSettings,
}

impl AppState {
    pub fn new(pipeline: SessionPipeline, capture_defaults: CaptureSettings) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            sessions: Arc::new(SessionRegistry::new()),
            capture_defaults,
        }
    }

    /// Wire the HTTP backends described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.backend_timeout();
        let ports = Ports {
            recognition: Arc::new(HttpRecognitionBackend::new(
                &config.backends.recognition_url,
                timeout,
            )?),
            translation: Arc::new(HttpTranslationBackend::new(
                &config.backends.translation_url,
                timeout,
            )?),
            synthesis: Arc::new(HttpSynthesisBackend::new(
                &config.backends.synthesis_url,
                timeout,
            )?),
        };
        let pipeline = SessionPipeline::new(ports, config.stage_timeout());
        Ok(Self::new(pipeline, config.capture_defaults()?))
    }
}

/// Build the router with middleware.
pub fn build_router(state: AppState, gateway: &GatewayConfig) -> Router {
    let api = Router::new()
        .route("/api/translate", post(handle_translate))
        .route("/api/stt", post(handle_stt))
        .route("/api/tts", post(handle_tts))
        .layer(DefaultBodyLimit::max(gateway.max_body_bytes))
        .layer(RequestBodyLimitLayer::new(gateway.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            gateway.request_timeout(),
        ));

    Router::new()
        .route("/health", get(handle_health))
        .route("/ws", get(handle_ws))
        .merge(api)
        .with_state(state)
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: tokio::net::TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Run the gateway described by `config` until Ctrl-C.
pub async fn run_gateway(config: Config) -> Result<()> {
    config.validate()?;

    let host = config.gateway.host.as_str();
    let port = config.gateway.port;
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let actual_port = listener.local_addr()?.port();

    let state = AppState::from_config(&config)?;
    let app = build_router(state, &config.gateway);

    tracing::info!(
        addr = %format!("{host}:{actual_port}"),
        translation = %config.backends.translation_url,
        recognition = %config.backends.recognition_url,
        synthesis = %config.backends.synthesis_url,
        "Gateway listening"
    );

    serve(listener, app, shutdown_signal()).await?;
    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

// ══════════════════════════════════════════════════════════════════════════════
// AXUM HANDLERS
// ══════════════════════════════════════════════════════════════════════════════

/// GET /health
async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.sessions.snapshot();
    let languages: Vec<&str> = LanguageCode::all().iter().map(|l| l.as_str()).collect();
    Json(serde_json::json!({
        "status": "ok",
        "active_sessions": snapshot.active_sessions,
        "total_sessions": snapshot.total_sessions,
        "total_turns": snapshot.total_turns,
        "languages": languages,
    }))
}

/// GET /ws: one relay session per connection.
async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    let session = Session::open(
        Arc::clone(&state.pipeline),
        Arc::clone(&state.sessions),
        state.capture_defaults,
    );
    tracing::debug!(session_id = %session.id(), "Upgrading to relay session");
    ws.on_upgrade(move |socket| session.serve(socket))
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message.into() })),
    )
}

fn resolve_pair(src: &str, tgt: &str) -> Result<(LanguageCode, LanguageCode), TurnError> {
    Ok((LanguageRegistry::code(src)?, LanguageRegistry::code(tgt)?))
}

#[derive(Debug, Deserialize)]
pub struct TranslateBody {
    pub text: String,
    pub src: String,
    pub tgt: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateLatency {
    pub translation_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct TranslateReply {
    pub original: String,
    /// The untranslated text when translation failed.
    pub translation: String,
    pub latency: TranslateLatency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/translate
async fn handle_translate(
    State(state): State<AppState>,
    body: Result<Json<TranslateBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("/api/translate JSON parse error: {e}");
            return bad_request(
                "Invalid JSON body. Expected: {\"text\": \"...\", \"src\": \"..\", \"tgt\": \"..\"}",
            )
            .into_response();
        }
    };

    let (src, tgt) = match resolve_pair(&body.src, &body.tgt) {
        Ok(pair) => pair,
        Err(e) => return bad_request(e.to_string()).into_response(),
    };

    let turn = Turn::Text(TextTurn {
        text: body.text,
        src,
        tgt,
        action: String::new(),
    });
    let frame = state.pipeline.process(turn, &state.capture_defaults).await;
    let error = frame.error().map(ToString::to_string);
    let translation = match frame.translation {
        Ok(translation) => translation,
        Err(_) => frame.fallback.unwrap_or_default(),
    };
    let reply = TranslateReply {
        original: frame.original_text,
        translation,
        latency: TranslateLatency {
            translation_ms: frame.latency.translation_ms,
        },
        error,
    };

    (StatusCode::OK, Json(reply)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct SttParams {
    pub lang: String,
    /// Capture literals; omitted values fall back to the configured defaults.
    pub sensitivity: Option<String>,
    #[serde(rename = "chunkDuration")]
    pub chunk_duration: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SttLatency {
    pub recognition_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct SttReply {
    pub text: String,
    pub latency: SttLatency,
}

/// POST /api/stt?lang=..: raw audio body in, recognized text out.
async fn handle_stt(
    State(state): State<AppState>,
    params: Result<Query<SttParams>, QueryRejection>,
    audio: Bytes,
) -> Response {
    let Query(params) = match params {
        Ok(q) => q,
        Err(e) => {
            tracing::warn!("/api/stt query error: {e}");
            return bad_request(
                "Invalid query. Expected: ?lang=..&sensitivity=Low|Medium|High&chunkDuration=20ms|50ms|100ms",
            )
            .into_response();
        }
    };

    if audio.is_empty() {
        return bad_request("audio body must not be empty").into_response();
    }
    let lang = match LanguageRegistry::code(&params.lang) {
        Ok(lang) => lang,
        Err(e) => return bad_request(e.to_string()).into_response(),
    };

    let mut settings = state.capture_defaults;
    let sensitivity = params
        .sensitivity
        .as_deref()
        .unwrap_or(settings.sensitivity.as_str());
    let chunk_duration = params
        .chunk_duration
        .as_deref()
        .unwrap_or(settings.chunk_duration.as_str());
    if let Err(e) = settings.apply(sensitivity, chunk_duration) {
        return bad_request(e.to_string()).into_response();
    }

    let started = Instant::now();
    let recognized = state
        .pipeline
        .recognize(&audio, lang, settings.to_recognizer_tuning())
        .await;
    let recognition_ms = elapsed_ms(started);

    match recognized {
        Ok(text) => (
            StatusCode::OK,
            Json(SttReply {
                text,
                latency: SttLatency { recognition_ms },
            }),
        )
            .into_response(),
        Err(e) => {
            let status = match e {
                TurnError::Unintelligible => StatusCode::UNPROCESSABLE_ENTITY,
                TurnError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TtsBody {
    pub text: String,
    pub lang: String,
    #[serde(default)]
    pub voice: VoiceStyle,
}

/// POST /api/tts
async fn handle_tts(
    State(state): State<AppState>,
    body: Result<Json<TtsBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("/api/tts JSON parse error: {e}");
            return bad_request(
                "Invalid JSON body. Expected: {\"text\": \"...\", \"lang\": \"..\", \"voice\": \"standard|female|male\"}",
            )
            .into_response();
        }
    };

    if body.text.trim().is_empty() {
        return bad_request("text must not be empty").into_response();
    }
    let lang = match LanguageRegistry::code(&body.lang) {
        Ok(lang) => lang,
        Err(e) => return bad_request(e.to_string()).into_response(),
    };

    match state.pipeline.synthesize(&body.text, lang, body.voice).await {
        Ok(audio) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, AUDIO_CONTENT_TYPE)],
            audio,
        )
            .into_response(),
        Err(e) => {
            let status = match e {
                TurnError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::testing::{
        happy_ports, ports, FakeRecognizer, FakeSynthesizer, FakeTranslator,
    };
    use crate::voice::{RecognitionError, DEFAULT_STAGE_TIMEOUT};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    fn state_with(ports: Ports) -> AppState {
        AppState::new(
            SessionPipeline::new(ports, DEFAULT_STAGE_TIMEOUT),
            CaptureSettings::default(),
        )
    }

    fn translate_body(text: &str, src: &str, tgt: &str) -> Result<Json<TranslateBody>, JsonRejection> {
        Ok(Json(TranslateBody {
            text: text.into(),
            src: src.into(),
            tgt: tgt.into(),
        }))
    }

    fn tts_body(text: &str, lang: &str, voice: VoiceStyle) -> Result<Json<TtsBody>, JsonRejection> {
        Ok(Json(TtsBody {
            text: text.into(),
            lang: lang.into(),
            voice,
        }))
    }

    fn stt_query(
        lang: &str,
        sensitivity: Option<&str>,
        chunk_duration: Option<&str>,
    ) -> Result<Query<SttParams>, QueryRejection> {
        Ok(Query(SttParams {
            lang: lang.into(),
            sensitivity: sensitivity.map(Into::into),
            chunk_duration: chunk_duration.map(Into::into),
        }))
    }

    fn recognizer_state(recognizer: Arc<FakeRecognizer>) -> AppState {
        state_with(ports(
            recognizer,
            Arc::new(FakeTranslator::replying("")),
            Arc::new(FakeSynthesizer::replying(b"")),
        ))
    }

    async fn json_of(response: Response) -> serde_json::Value {
        let payload = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&payload).unwrap()
    }

    #[tokio::test]
    async fn health_reports_sessions_and_languages() {
        let state = state_with(happy_ports());
        let _id = state.sessions.open();

        let response = handle_health(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_of(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["active_sessions"], 1);
        assert_eq!(body["languages"].as_array().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn translate_success() {
        let state = state_with(happy_ports());
        let response = handle_translate(State(state), translate_body("hola", "es", "en")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_of(response).await;
        assert_eq!(body["original"], "hola");
        assert_eq!(body["translation"], "hello");
        assert!(body["latency"]["translation_ms"].is_u64());
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn translate_failure_falls_back_to_original() {
        let state = state_with(ports(
            Arc::new(FakeRecognizer::replying("")),
            Arc::new(FakeTranslator::failing("model crashed: stack trace")),
            Arc::new(FakeSynthesizer::replying(b"")),
        ));
        let response = handle_translate(State(state), translate_body("hello", "en", "th")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_of(response).await;
        assert_eq!(body["translation"], "hello");
        assert_eq!(body["error"], "translation failed");
        assert!(!body.to_string().contains("stack trace"));
    }

    #[tokio::test]
    async fn translate_empty_text_skips_backend() {
        let translator = Arc::new(FakeTranslator::replying("unused"));
        let state = state_with(ports(
            Arc::new(FakeRecognizer::replying("")),
            translator.clone(),
            Arc::new(FakeSynthesizer::replying(b"")),
        ));
        let response = handle_translate(State(state), translate_body("  ", "en", "th")).await;
        let body = json_of(response).await;
        assert_eq!(body["translation"], "");
        assert_eq!(body["latency"]["translation_ms"], 0);
        assert_eq!(translator.calls(), 0);
    }

    #[tokio::test]
    async fn translate_unknown_language_is_bad_request() {
        let state = state_with(happy_ports());
        let response = handle_translate(State(state), translate_body("hi", "en", "xx")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_of(response).await;
        assert_eq!(body["error"], "unsupported language: xx");
    }

    #[tokio::test]
    async fn stt_returns_recognized_text() {
        let recognizer = Arc::new(FakeRecognizer::replying("hola"));
        let state = recognizer_state(recognizer.clone());
        let response = handle_stt(
            State(state),
            stt_query("es", Some("High"), Some("20ms")),
            Bytes::from_static(b"RIFF"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_of(response).await;
        assert_eq!(body["text"], "hola");
        assert!(body["latency"]["recognition_ms"].is_u64());

        let seen = recognizer.seen.lock();
        assert_eq!(seen[0].0, b"RIFF");
        assert_eq!(seen[0].1.as_str(), "es-ES");
        assert_eq!(seen[0].2.energy_threshold, 1000);
        assert!((seen[0].2.pause_threshold - 0.02).abs() < 1e-9);
    }

    #[tokio::test]
    async fn stt_defaults_capture_settings() {
        let recognizer = Arc::new(FakeRecognizer::replying("hi"));
        let state = recognizer_state(recognizer.clone());
        let response = handle_stt(
            State(state),
            stt_query("en", None, Some("100ms")),
            Bytes::from_static(b"abc"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let tuning = recognizer.last_tuning().unwrap();
        assert_eq!(tuning.energy_threshold, 2000);
        assert!((tuning.pause_threshold - 0.1).abs() < 1e-9);
    }

    #[tokio::test]
    async fn stt_maps_recognition_failures_to_status() {
        let cases = [
            (RecognitionError::Unintelligible, StatusCode::UNPROCESSABLE_ENTITY),
            (
                RecognitionError::Unavailable("connection refused".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                RecognitionError::Other("decoder panic".into()),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (error, expected) in cases {
            let state = recognizer_state(Arc::new(FakeRecognizer::failing(error)));
            let response = handle_stt(
                State(state),
                stt_query("en", None, None),
                Bytes::from_static(b"abc"),
            )
            .await;
            assert_eq!(response.status(), expected);
            let body = json_of(response).await;
            assert!(!body.to_string().contains("decoder panic"));
        }
    }

    #[tokio::test]
    async fn stt_timeout_is_gateway_timeout() {
        let recognizer =
            FakeRecognizer::replying("late").with_delay(Duration::from_millis(500));
        let state = AppState::new(
            SessionPipeline::new(
                ports(
                    Arc::new(recognizer),
                    Arc::new(FakeTranslator::replying("")),
                    Arc::new(FakeSynthesizer::replying(b"")),
                ),
                Duration::from_millis(20),
            ),
            CaptureSettings::default(),
        );
        let response = handle_stt(
            State(state),
            stt_query("en", None, None),
            Bytes::from_static(b"abc"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let body = json_of(response).await;
        assert_eq!(body["error"], "recognition timed out");
    }

    #[tokio::test]
    async fn stt_rejects_bad_input_before_backend() {
        let recognizer = Arc::new(FakeRecognizer::replying("unused"));
        let cases = [
            (stt_query("en", None, None), Bytes::new()),
            (stt_query("xx", None, None), Bytes::from_static(b"abc")),
            (stt_query("en", Some("Loud"), None), Bytes::from_static(b"abc")),
            (stt_query("en", None, Some("30ms")), Bytes::from_static(b"abc")),
        ];
        for (query, audio) in cases {
            let state = recognizer_state(recognizer.clone());
            let response = handle_stt(State(state), query, audio).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(recognizer.calls(), 0);
    }

    #[tokio::test]
    async fn router_stt_requires_lang() {
        let app = build_router(state_with(happy_ports()), &GatewayConfig::default());
        let request = Request::post("/api/stt")
            .body(Body::from(vec![1u8, 2, 3]))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn tts_returns_audio() {
        let synthesizer = Arc::new(FakeSynthesizer::replying(b"ID3"));
        let state = state_with(ports(
            Arc::new(FakeRecognizer::replying("")),
            Arc::new(FakeTranslator::replying("")),
            synthesizer.clone(),
        ));
        let response = handle_tts(State(state), tts_body("hello", "en", VoiceStyle::Female)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            AUDIO_CONTENT_TYPE
        );
        let payload = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&payload[..], b"ID3");
        assert_eq!(synthesizer.seen.lock()[0].2, VoiceStyle::Female);
    }

    #[tokio::test]
    async fn tts_empty_text_is_bad_request() {
        let state = state_with(happy_ports());
        let response = handle_tts(State(state), tts_body("   ", "en", VoiceStyle::Standard)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn tts_backend_failure_is_bad_gateway() {
        let state = state_with(ports(
            Arc::new(FakeRecognizer::replying("")),
            Arc::new(FakeTranslator::replying("")),
            Arc::new(FakeSynthesizer::failing("engine offline")),
        ));
        let response = handle_tts(State(state), tts_body("hi", "en", VoiceStyle::Standard)).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_of(response).await;
        assert_eq!(body["error"], "synthesis backend unavailable");
    }

    #[tokio::test]
    async fn router_serves_health() {
        let app = build_router(state_with(happy_ports()), &GatewayConfig::default());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn router_rejects_invalid_json() {
        let app = build_router(state_with(happy_ports()), &GatewayConfig::default());
        let request = Request::post("/api/translate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": 5}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn router_rejects_unknown_voice() {
        let app = build_router(state_with(happy_ports()), &GatewayConfig::default());
        let request = Request::post("/api/tts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text":"hi","lang":"en","voice":"robot"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn router_enforces_body_limit() {
        let gateway = GatewayConfig {
            max_body_bytes: 64,
            ..GatewayConfig::default()
        };
        let app = build_router(state_with(happy_ports()), &gateway);
        let text = "a".repeat(256);
        let payload = serde_json::json!({ "text": text, "src": "en", "tgt": "th" }).to_string();
        let request = Request::post("/api/translate")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, payload.len())
            .body(Body::from(payload))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn ws_route_requires_upgrade() {
        let app = build_router(state_with(happy_ports()), &GatewayConfig::default());
        let response = app
            .oneshot(Request::get("/ws").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[test]
    fn app_state_from_default_config() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert_eq!(state.capture_defaults, CaptureSettings::default());
        assert_eq!(state.sessions.active_count(), 0);
    }
}

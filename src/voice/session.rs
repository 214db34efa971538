//! One connection's lifecycle.
//!
//! A session reads frames in order, answers each one before reading the
//! next, and survives every per-turn failure. It ends only when the
//! transport closes.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;

use super::capture::CaptureSettings;
use super::events::{ClientMessage, ServerMessage};
use super::outcome::{OutcomeFrame, TurnError};
use super::pipeline::SessionPipeline;
use super::registry::SessionRegistry;
use super::turn;

pub struct Session {
    id: String,
    settings: CaptureSettings,
    turns: u64,
    pipeline: Arc<SessionPipeline>,
    registry: Arc<SessionRegistry>,
}

impl Session {
    /// Register a new session starting from `defaults`.
    pub fn open(
        pipeline: Arc<SessionPipeline>,
        registry: Arc<SessionRegistry>,
        defaults: CaptureSettings,
    ) -> Self {
        let id = registry.open();
        tracing::info!(
            session_id = %id,
            sensitivity = %defaults.sensitivity,
            chunk_duration = %defaults.chunk_duration,
            "Session opened"
        );
        Self {
            id,
            settings: defaults,
            turns: 0,
            pipeline,
            registry,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn settings(&self) -> CaptureSettings {
        self.settings
    }

    /// Number of turn frames handled so far. Control messages don't count.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Handle one inbound text frame and return the reply.
    pub async fn handle_frame(&mut self, raw: &str) -> String {
        match ClientMessage::detect(raw) {
            Some(Ok(ClientMessage::Settings {
                sensitivity,
                chunk_duration,
            })) => self
                .apply_settings(sensitivity.as_deref(), chunk_duration.as_deref())
                .to_json(),
            Some(Err(e)) => {
                tracing::debug!(session_id = %self.id, error = %e, "Unreadable control message");
                ServerMessage::Error {
                    kind: "invalid_config".into(),
                    message: "invalid settings message".into(),
                }
                .to_json()
            }
            None => self.handle_turn(raw).await,
        }
    }

    /// Binary frames carry no turn.
    pub fn reject_binary(&mut self) -> String {
        self.turns += 1;
        let frame = OutcomeFrame::rejected(TurnError::MalformedFrame);
        self.finish_turn("binary", &frame);
        frame.render()
    }

    fn apply_settings(
        &mut self,
        sensitivity: Option<&str>,
        chunk_duration: Option<&str>,
    ) -> ServerMessage {
        let sensitivity = sensitivity.unwrap_or(self.settings.sensitivity.as_str());
        let chunk_duration = chunk_duration.unwrap_or(self.settings.chunk_duration.as_str());

        match self.settings.apply(sensitivity, chunk_duration) {
            Ok(applied) => {
                tracing::info!(
                    session_id = %self.id,
                    sensitivity = %applied.sensitivity,
                    chunk_duration = %applied.chunk_duration,
                    "Capture settings updated"
                );
                ServerMessage::settings_ack(applied)
            }
            Err(e) => {
                tracing::debug!(session_id = %self.id, error = %e, "Settings update rejected");
                ServerMessage::error(&TurnError::from(e))
            }
        }
    }

    async fn handle_turn(&mut self, raw: &str) -> String {
        self.turns += 1;
        let (kind, frame) = match turn::parse(raw) {
            Ok(turn) => {
                let kind = turn.kind();
                (kind, self.pipeline.process(turn, &self.settings).await)
            }
            Err(rejected) => ("rejected", rejected.into_frame()),
        };
        self.finish_turn(kind, &frame);
        frame.render()
    }

    fn finish_turn(&self, kind: &'static str, frame: &OutcomeFrame) {
        let outcome = frame.error().map_or("ok", TurnError::kind);
        tracing::info!(
            session_id = %self.id,
            turn = self.turns,
            kind,
            outcome,
            recognition_ms = frame.latency.recognition_ms,
            translation_ms = frame.latency.translation_ms,
            "Turn processed"
        );
        self.registry.record_turn(&self.id, frame.is_ok());
    }

    /// Drive the session over a WebSocket until the client goes away.
    pub async fn serve(mut self, socket: WebSocket) {
        let (mut ws_sender, mut ws_receiver) = socket.split();

        while let Some(msg) = ws_receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!(session_id = %self.id, error = %e, "WebSocket receive failed");
                    break;
                }
            };

            let reply = match msg {
                Message::Text(text) => self.handle_frame(text.as_str()).await,
                Message::Binary(_) => self.reject_binary(),
                Message::Close(_) => break,
                // Ping/pong are answered by the transport.
                _ => continue,
            };

            if let Err(e) = ws_sender.send(Message::Text(reply.into())).await {
                tracing::debug!(session_id = %self.id, error = %e, "WebSocket send failed");
                break;
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(stats) = self.registry.close(&self.id) {
            tracing::info!(
                session_id = %self.id,
                turns = stats.turns,
                failed_turns = stats.failed_turns,
                duration_ms = stats.duration_ms,
                "Session ended"
            );
        }
    }
}

//! Wire protocol: one JSON object per frame.
//!
//! Inbound:  `{"message": "<question>"}` or `{"type": "heartbeat"}`.
//! Outbound: `{"type", "message", "timestamp", "confidence"?, "sources", "success"?}`.

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use kbase_core::constants::{
    FRAME_TYPE_ASSISTANT, FRAME_TYPE_ERROR, FRAME_TYPE_HEARTBEAT, MAX_QUESTION_BYTES,
};
use kbase_core::errors::SessionError;
use kbase_core::{Answer, ConfidenceTier, Source};

/// A parsed inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Trimmed, non-empty question text.
    Question(String),
    HeartbeatAck,
}

/// Parse one inbound frame. Anything that is not a heartbeat ack or a
/// non-blank string question is `MalformedRequest`.
pub fn parse_inbound(raw: &str) -> Result<Inbound, SessionError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| malformed(format!("invalid JSON: {e}")))?;
    let Some(object) = value.as_object() else {
        return Err(malformed("expected a JSON object"));
    };

    if object.get("type").and_then(Value::as_str) == Some(FRAME_TYPE_HEARTBEAT) {
        return Ok(Inbound::HeartbeatAck);
    }

    let question = match object.get("message") {
        None => return Err(malformed("missing 'message' field")),
        Some(Value::String(text)) => text.trim(),
        Some(_) => return Err(malformed("'message' must be a string")),
    };
    if question.is_empty() {
        return Err(malformed("question is empty"));
    }
    if question.len() > MAX_QUESTION_BYTES {
        return Err(malformed(format!(
            "question exceeds {MAX_QUESTION_BYTES} bytes"
        )));
    }
    Ok(Inbound::Question(question.to_string()))
}

fn malformed(reason: impl Into<String>) -> SessionError {
    SessionError::MalformedRequest {
        reason: reason.into(),
    }
}

/// Outbound frame `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameType {
    Assistant,
    Error,
    Heartbeat,
}

impl FrameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assistant => FRAME_TYPE_ASSISTANT,
            Self::Error => FRAME_TYPE_ERROR,
            Self::Heartbeat => FRAME_TYPE_HEARTBEAT,
        }
    }
}

/// One outbound frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundFrame {
    #[serde(rename = "type")]
    pub frame_type: FrameType,
    pub message: String,
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_tier: Option<ConfidenceTier>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl OutboundFrame {
    fn new(frame_type: FrameType, message: impl Into<String>) -> Self {
        Self {
            frame_type,
            message: message.into(),
            timestamp: timestamp(),
            confidence: None,
            confidence_tier: None,
            sources: Vec::new(),
            success: None,
        }
    }

    /// Answer-shaped greeting; no retrieval behind it.
    pub fn welcome(message: impl Into<String>) -> Self {
        Self::new(FrameType::Assistant, message)
    }

    pub fn answer(answer: &Answer) -> Self {
        Self {
            confidence: answer.confidence,
            confidence_tier: Some(answer.confidence_tier),
            sources: answer.sources.clone(),
            success: Some(answer.succeeded),
            ..Self::new(FrameType::Assistant, answer.text.clone())
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            ..Self::new(FrameType::Error, message)
        }
    }

    pub fn heartbeat() -> Self {
        Self::new(FrameType::Heartbeat, "ping")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbase_core::ContentType;

    #[test]
    fn parses_question_and_trims() {
        assert_eq!(
            parse_inbound(r#"{"message": "  What is Customer?  "}"#),
            Ok(Inbound::Question("What is Customer?".into()))
        );
    }

    #[test]
    fn parses_heartbeat_ack() {
        assert_eq!(parse_inbound(r#"{"type":"heartbeat"}"#), Ok(Inbound::HeartbeatAck));
    }

    #[test]
    fn rejects_malformed_frames() {
        for raw in [
            "not json",
            "[1,2]",
            "{}",
            r#"{"message": 42}"#,
            r#"{"message": "   "}"#,
            r#"{"type": "assistant"}"#,
        ] {
            assert!(
                matches!(parse_inbound(raw), Err(SessionError::MalformedRequest { .. })),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn rejects_oversized_question() {
        let raw = serde_json::json!({ "message": "x".repeat(MAX_QUESTION_BYTES + 1) }).to_string();
        assert!(parse_inbound(&raw).is_err());
    }

    #[test]
    fn answer_frame_wire_shape() {
        let answer = Answer {
            text: "**Customer** is an entity.".into(),
            confidence_tier: ConfidenceTier::High,
            confidence: Some(0.9),
            sources: vec![Source {
                name: "Customer".into(),
                content_type: ContentType::Entity,
                confidence: 0.9,
            }],
            succeeded: true,
        };
        let json: Value = serde_json::from_str(&OutboundFrame::answer(&answer).to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "assistant");
        assert_eq!(json["message"], "**Customer** is an entity.");
        assert_eq!(json["confidence"], 0.9);
        assert_eq!(json["success"], true);
        assert_eq!(json["sources"][0]["name"], "Customer");
        assert_eq!(json["sources"][0]["type"], "entity");
        assert_eq!(json["timestamp"].as_str().unwrap().len(), 8);
    }

    #[test]
    fn welcome_omits_confidence_and_success() {
        let json: Value = serde_json::from_str(&OutboundFrame::welcome("hi").to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "assistant");
        assert!(json.get("confidence").is_none());
        assert!(json.get("success").is_none());
        assert_eq!(json["sources"], serde_json::json!([]));
    }

    #[test]
    fn frame_type_strings_match_constants() {
        for t in [FrameType::Assistant, FrameType::Error, FrameType::Heartbeat] {
            assert_eq!(serde_json::to_value(t).unwrap(), t.as_str());
        }
    }
}

//! OpenAI-style wire types accepted by the relay.
//!
//! Notes:
//! - Chat bodies are forwarded as raw bytes. `ChatCompletionPayload` is only a
//!   lenient view used for diagnostics and never rejects a request.
//! - `CompletionPayload` is strict: `prompt` is required and unknown fields are
//!   dropped before forwarding.
//! - Unset optional fields are omitted on serialization, never sent as `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_TEMPERATURE: f64 = 0.7;

fn default_temperature() -> Option<f64> {
    Some(DEFAULT_TEMPERATURE)
}

fn default_stream() -> Option<bool> {
    Some(false)
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,

    /// Either plain text, a list of content parts, or anything else the
    /// upstream understands.
    #[serde(default = "MessageContent::null")]
    pub content: MessageContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
    Other(Value),
}

impl MessageContent {
    fn null() -> Self {
        MessageContent::Other(Value::Null)
    }
}

/// One element of a multi-part message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Known(KnownPart),
    Opaque(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KnownPart {
    Text { text: String },
    ImageUrl { image_url: Value },
}

/// Lenient view of a `/v1/chat/completions` body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatCompletionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default)]
    pub messages: Vec<ChatMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Fields the relay does not model (tools, response_format, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatCompletionPayload {
    /// Best-effort typed view of an already parsed body, read in place.
    pub fn inspect(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    pub fn is_streaming(&self) -> bool {
        self.stream.unwrap_or(false)
    }
}

/// Body of `/v1/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    pub prompt: String,

    #[serde(
        default = "default_temperature",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i64>,

    #[serde(default = "default_stream", skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl CompletionPayload {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            model: None,
            prompt: prompt.into(),
            temperature: default_temperature(),
            max_tokens: None,
            stream: default_stream(),
        }
    }

    /// Fill in `model` when the client left it unset.
    pub fn with_default_model(mut self, default_model: &str) -> Self {
        if self.model.is_none() {
            self.model = Some(default_model.to_string());
        }
        self
    }
}

/// `{"detail": "..."}` error envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_completion_defaults_applied() {
        let payload: CompletionPayload = serde_json::from_value(json!({ "prompt": "hi" })).unwrap();
        assert_eq!(payload.model, None);
        assert_eq!(payload.temperature, Some(0.7));
        assert_eq!(payload.max_tokens, None);
        assert_eq!(payload.stream, Some(false));
    }

    #[test]
    fn test_completion_omits_unset_fields() {
        let payload: CompletionPayload =
            serde_json::from_value(json!({ "prompt": "hi", "max_tokens": null })).unwrap();
        let out = serde_json::to_value(payload.with_default_model("test/model")).unwrap();
        assert_eq!(
            out,
            json!({
                "model": "test/model",
                "prompt": "hi",
                "temperature": 0.7,
                "stream": false
            })
        );
    }

    #[test]
    fn test_completion_explicit_null_is_omitted() {
        let payload: CompletionPayload =
            serde_json::from_value(json!({ "prompt": "hi", "temperature": null })).unwrap();
        let out = serde_json::to_value(&payload).unwrap();
        assert!(out.get("temperature").is_none());
        assert!(out.get("model").is_none());
    }

    #[test]
    fn test_completion_keeps_client_model() {
        let payload: CompletionPayload =
            serde_json::from_value(json!({ "prompt": "hi", "model": "anthropic/claude-3" }))
                .unwrap();
        let payload = payload.with_default_model("test/model");
        assert_eq!(payload.model.as_deref(), Some("anthropic/claude-3"));
    }

    #[test]
    fn test_completion_drops_unknown_fields() {
        let payload: CompletionPayload =
            serde_json::from_value(json!({ "prompt": "hi", "top_k": 3 })).unwrap();
        let out = serde_json::to_value(&payload).unwrap();
        assert!(out.get("top_k").is_none());
    }

    #[test]
    fn test_completion_requires_prompt() {
        let err = serde_json::from_value::<CompletionPayload>(json!({ "model": "x" })).unwrap_err();
        assert!(err.to_string().contains("prompt"));
    }

    #[test]
    fn test_message_content_shapes() {
        let text: ChatMessage =
            serde_json::from_value(json!({ "role": "user", "content": "hello" })).unwrap();
        assert_eq!(text.content, MessageContent::Text("hello".into()));

        let parts: ChatMessage = serde_json::from_value(json!({
            "role": "user",
            "content": [
                { "type": "text", "text": "what is this?" },
                { "type": "image_url", "image_url": { "url": "https://x/y.png" } },
                { "type": "input_audio", "input_audio": { "data": "..." } }
            ]
        }))
        .unwrap();
        match &parts.content {
            MessageContent::Parts(p) => {
                assert_eq!(p.len(), 3);
                assert_eq!(
                    p[0],
                    ContentPart::Known(KnownPart::Text {
                        text: "what is this?".into()
                    })
                );
                assert!(matches!(p[1], ContentPart::Known(KnownPart::ImageUrl { .. })));
                assert!(matches!(p[2], ContentPart::Opaque(_)));
            }
            other => panic!("expected parts, got {:?}", other),
        }

        let null: ChatMessage =
            serde_json::from_value(json!({ "role": "assistant", "content": null })).unwrap();
        assert_eq!(null.content, MessageContent::Other(Value::Null));
    }

    #[test]
    fn test_chat_payload_is_lenient() {
        let body = json!({
            "messages": [{ "role": "user", "content": "hi" }],
            "stream": true,
            "tools": [{ "type": "function" }]
        });
        let view = ChatCompletionPayload::inspect(&body).unwrap();
        assert!(view.is_streaming());
        assert_eq!(view.model, None);
        assert!(view.extra.contains_key("tools"));

        assert!(ChatCompletionPayload::inspect(&json!([1, 2, 3])).is_none());
    }

    #[test]
    fn test_completion_forwards_negative_max_tokens() {
        let payload: CompletionPayload =
            serde_json::from_value(json!({ "prompt": "hi", "max_tokens": -1 })).unwrap();
        assert_eq!(payload.max_tokens, Some(-1));
        let out = serde_json::to_value(&payload).unwrap();
        assert_eq!(out["max_tokens"], json!(-1));
    }

    #[test]
    fn test_chat_payload_view_borrows_body() {
        let body = json!({
            "model": "openai/gpt-4o",
            "messages": [{ "role": "user", "content": "hi" }],
            "max_tokens": -5
        });
        let view = ChatCompletionPayload::inspect(&body).unwrap();
        assert_eq!(view.model.as_deref(), Some("openai/gpt-4o"));
        assert_eq!(view.max_tokens, Some(-5));
        // The parsed body is still intact for forwarding.
        assert_eq!(body["messages"][0]["content"], json!("hi"));
    }

    #[test]
    fn test_health_status_shape() {
        assert_eq!(
            serde_json::to_value(HealthStatus::healthy()).unwrap(),
            json!({ "status": "healthy" })
        );
    }
}

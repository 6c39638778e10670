use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::application::errors::BotError;

/// A raw event record from one polling cycle. The transport is an events
/// firehose; most records carry no text and are skipped by the classifier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundEvent {
    pub text: Option<String>,
    pub user: Option<String>,
    pub channel: Option<String>,
}

impl InboundEvent {
    pub fn message(
        user: impl Into<String>,
        channel: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            text: Some(text.into()),
            user: Some(user.into()),
            channel: Some(channel.into()),
        }
    }
}

/// Outcome of classifying a batch of events. Transient: produced per polling
/// cycle, consumed immediately, never persisted.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Normalized (trimmed, lower-cased) message text, if any event yielded one
    pub text: Option<String>,
    /// Originating channel, captured from the first text-bearing event
    pub channel: Option<String>,
    /// True when the bot was explicitly @-mentioned
    pub active: bool,
    pub received_at: DateTime<Utc>,
}

impl Classification {
    pub fn empty() -> Self {
        Self {
            text: None,
            channel: None,
            active: false,
            received_at: Utc::now(),
        }
    }
}

/// An outgoing reply, dispatched to the matching send path at send time
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Plain(String),
    Formatted(FormattedReply),
}

/// A reply carrying attachment data, requiring the richer send path
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedReply {
    pub text: String,
    pub attachments: Vec<Value>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Reply::Plain(text.into())
    }

    /// Shape a structured payload into a formatted reply. Both `text` and
    /// `attachments` are required.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, BotError> {
        let text = payload
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| BotError::SendFormat("text".to_string()))?;

        let attachments = match payload.get("attachments") {
            Some(Value::Array(items)) => items.clone(),
            Some(other) => vec![other.clone()],
            None => return Err(BotError::SendFormat("attachments".to_string())),
        };

        Ok(Reply::Formatted(FormattedReply {
            text: text.to_string(),
            attachments,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn payload_with_text_and_attachments_is_formatted() {
        let reply = Reply::from_payload(&payload(json!({
            "text": "heads up",
            "attachments": [{"title": "details"}],
        })))
        .unwrap();

        match reply {
            Reply::Formatted(f) => {
                assert_eq!(f.text, "heads up");
                assert_eq!(f.attachments.len(), 1);
            }
            Reply::Plain(_) => panic!("expected formatted reply"),
        }
    }

    #[test]
    fn payload_missing_attachments_is_rejected() {
        let err = Reply::from_payload(&payload(json!({"text": "heads up"}))).unwrap_err();
        assert!(matches!(err, BotError::SendFormat(field) if field == "attachments"));
    }

    #[test]
    fn payload_missing_text_is_rejected() {
        let err = Reply::from_payload(&payload(json!({"attachments": []}))).unwrap_err();
        assert!(matches!(err, BotError::SendFormat(field) if field == "text"));
    }

    #[test]
    fn events_tolerate_unknown_wire_fields() {
        let event: InboundEvent = serde_json::from_str(
            r#"{"type": "message", "text": "hi", "user": "U1", "channel": "C1", "ts": "123.45"}"#,
        )
        .unwrap();
        assert_eq!(event.text.as_deref(), Some("hi"));
        assert_eq!(event.channel.as_deref(), Some("C1"));
    }
}

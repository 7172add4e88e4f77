use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Speaker identity of a message.
///
/// Unknown role strings from newer storage versions pass through as
/// [`MessageRole::Other`] instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    System,
    #[serde(untagged)]
    Other(String),
}

impl MessageRole {
    /// Map a raw role string to a known variant, passing unrecognized
    /// values through unchanged.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "user" => MessageRole::User,
            "assistant" => MessageRole::Assistant,
            "system" => MessageRole::System,
            other => MessageRole::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
            MessageRole::Other(raw) => raw,
        }
    }
}

impl Default for MessageRole {
    fn default() -> Self {
        MessageRole::Other("unknown".to_string())
    }
}

/// Which raw storage schema a session was normalized from.
///
/// Drives export formatting only; normalization itself branches on the
/// source file layout, not on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    ChatSession,
    ChatEditingSession,
    Other,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::ChatSession => "chat_session",
            SessionKind::ChatEditingSession => "chat_editing_session",
            SessionKind::Other => "other",
        }
    }
}

/// Single normalized message within a session.
///
/// `role` and `content` are always present (content may be empty for
/// pure-metadata records); everything else is optional and absent-safe.
/// Kind-specific raw fields (file paths touched, edit entries, snapshot
/// markers) are retained in `metadata` rather than forced into the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

/// One conversation or editing interaction extracted from a single source
/// file. Messages are kept in appearance order; an empty message list is a
/// valid session (e.g. an editing-session record carrying only metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub agent: String,
    pub kind: SessionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_known_values() {
        assert_eq!(MessageRole::parse("user"), MessageRole::User);
        assert_eq!(MessageRole::parse("assistant"), MessageRole::Assistant);
        assert_eq!(MessageRole::parse("system"), MessageRole::System);
    }

    #[test]
    fn role_passes_unknown_values_through() {
        let role = MessageRole::parse("tool");
        assert_eq!(role, MessageRole::Other("tool".to_string()));
        assert_eq!(role.as_str(), "tool");
    }

    #[test]
    fn role_default_is_unknown() {
        assert_eq!(MessageRole::default().as_str(), "unknown");
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");

        let json = serde_json::to_string(&MessageRole::Other("bot".into())).unwrap();
        assert_eq!(json, "\"bot\"");
    }

    #[test]
    fn role_deserializes_unknown_as_other() {
        let role: MessageRole = serde_json::from_str("\"moderator\"").unwrap();
        assert_eq!(role, MessageRole::Other("moderator".to_string()));
    }

    #[test]
    fn session_kind_wire_names() {
        assert_eq!(SessionKind::ChatSession.as_str(), "chat_session");
        assert_eq!(
            serde_json::to_string(&SessionKind::ChatEditingSession).unwrap(),
            "\"chat_editing_session\""
        );
    }

    #[test]
    fn message_optional_fields_are_skipped() {
        let message = Message {
            id: None,
            role: MessageRole::User,
            content: String::new(),
            timestamp: None,
            metadata: Map::new(),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "");
        assert!(json.get("id").is_none());
        assert!(json.get("timestamp").is_none());
        assert!(json.get("metadata").is_none());
    }
}

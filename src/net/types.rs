//! Wire DTOs for the chat server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the server's REST and websocket payloads so serde can
//! drive dispatch directly. Identifiers are opaque strings on the client; the
//! tolerant deserializers below also accept the numeric ids the server
//! assigns, so both forms parse to the same value.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A signed-in session as returned by the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    /// Login name, shown in the page header.
    pub username: String,
    pub email: String,
    /// Opaque session token.
    pub token: String,
}

/// A directory entry offered in the new-chat member picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    /// Optional display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Whether the account is enabled server-side.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Chat flavor on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    OneToOne,
    Group,
}

impl ChatKind {
    /// Wire name used in creation payloads.
    pub fn wire_name(self) -> &'static str {
        match self {
            ChatKind::OneToOne => "one_to_one",
            ChatKind::Group => "group",
        }
    }
}

/// A chat as listed for the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Explicit name; one-to-one chats usually have none.
    #[serde(default)]
    pub name: Option<String>,
    pub chat_type: ChatKind,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub created_by: Option<String>,
    /// ISO 8601 creation timestamp, passed through untouched.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Member user ids, including the signed-in user.
    #[serde(default, deserialize_with = "deserialize_id_vec")]
    pub members: Vec<String>,
}

/// One chat message, immutable once received.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned id, unique within a chat. Dedup key for the log.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub chat_id: Option<String>,
    #[serde(deserialize_with = "deserialize_id")]
    pub sender_id: String,
    pub content: String,
    /// ISO 8601 creation timestamp, passed through for display.
    pub created_at: String,
}

/// Presence payload carried by `user_online` and `user_offline` events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceUpdate {
    /// Authoritative full set of active user ids, not a delta.
    #[serde(default, deserialize_with = "deserialize_id_vec")]
    pub active_users: Vec<String>,
}

/// Inbound events on the live chat channel.
///
/// Unknown `type` tags fail deserialization and are discarded as malformed;
/// unknown fields inside a known event are ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelEvent {
    /// New message broadcast to every connected member.
    Message(Message),
    /// A user joined the channel.
    UserOnline(PresenceUpdate),
    /// A user left the channel.
    UserOffline(PresenceUpdate),
    /// Server-side rejection, reported without closing the channel.
    Error { message: String },
}

/// Outbound message payload, the only thing the client sends on the channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub content: String,
}

/// Registration payload for the auth endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(serde_json::Value::deserialize(deserializer)?).map_err(D::Error::custom)
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => id_from_value(value).map(Some).map_err(D::Error::custom),
    }
}

fn deserialize_id_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    values
        .into_iter()
        .map(|value| id_from_value(value).map_err(D::Error::custom))
        .collect()
}

fn id_from_value(value: serde_json::Value) -> Result<String, String> {
    match value {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(format!("expected a string or number id, got {other}")),
    }
}

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat turn. Ordering is positional within a conversation; there
/// is no per-message id or timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A titled, ordered sequence of chat messages with independent lifecycle.
///
/// The serialized form uses camelCase timestamp keys (`createdAt`,
/// `updatedAt`) to stay compatible with previously persisted data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    /// Creation time in milliseconds since Unix epoch. Never changes.
    pub created_at: i64,
    /// Last append or rename time in milliseconds since Unix epoch.
    pub updated_at: i64,
}

/// Request body for the generation service chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    /// Attached files as data URIs, parallel to `file_types`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_data: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_types: Option<Vec<String>>,
}

/// Reply body from the generation service.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

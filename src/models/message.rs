//! Message-related models

use serde::{Deserialize, Serialize};

/// A single message belonging to a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    #[serde(rename = "chatID")]
    pub chat_id: String,
    #[serde(rename = "senderName")]
    pub sender: String,
    #[serde(default)]
    pub text: String,
    /// ISO 8601 timestamp as delivered by the service, kept opaque
    #[serde(default)]
    pub timestamp: String,
    /// Whether the local account sent this message
    #[serde(default)]
    pub is_sender: bool,
}

/// Outcome of a send operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendResult {
    /// Message ID assigned by the service
    pub id: String,
    pub success: bool,
}

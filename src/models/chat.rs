//! Chat-related models

use serde::{Deserialize, Serialize};

/// A chat/conversation tracked by Beeper Desktop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Network the chat lives on (whatsapp, signal, ...)
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub is_muted: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_pinned: bool,
    /// Participant payload exactly as delivered by the service. Stored and
    /// re-serialized untouched; the structure is service-defined.
    #[serde(default)]
    pub participants: serde_json::Map<String, serde_json::Value>,
}

impl Chat {
    /// Display name: the title, falling back to the chat ID when empty.
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

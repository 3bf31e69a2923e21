//! Output formatting
//!
//! Pure rendering of API results into json, text, or markdown. Nothing in
//! here performs I/O or fails on well-typed input.

use std::fmt;
use std::str::FromStr;

use crate::models::{Chat, Message, SendResult};

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Text,
    Markdown,
}

/// Rejection from the strict format parser.
#[derive(Debug, thiserror::Error)]
#[error("invalid format: {0} (must be json, text, or markdown)")]
pub struct UnknownFormat(String);

impl Format {
    /// Parse a format name, mapping anything unrecognized to json. Use the
    /// strict `FromStr` when a bad name should be rejected instead.
    pub fn parse_lossy(name: &str) -> Self {
        name.parse().unwrap_or(Format::Json)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Text => "text",
            Format::Markdown => "markdown",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Format::Json),
            "text" => Ok(Format::Text),
            "markdown" => Ok(Format::Markdown),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

/// Render a chat collection in the requested format.
pub fn format_chats(chats: &[Chat], format: Format) -> String {
    match format {
        Format::Json => to_json(&chats),
        Format::Text => format_chats_text(chats),
        Format::Markdown => format_chats_markdown(chats),
    }
}

/// Render a message collection in the requested format.
pub fn format_messages(messages: &[Message], format: Format) -> String {
    match format {
        Format::Json => to_json(&messages),
        Format::Text => format_messages_text(messages),
        Format::Markdown => format_messages_markdown(messages),
    }
}

/// Render the outcome of a send operation.
pub fn format_send_result(result: &SendResult, format: Format) -> String {
    match format {
        Format::Json => to_json(result),
        Format::Text => {
            if result.success {
                format!("Message sent successfully. ID: {}\n", result.id)
            } else {
                "Failed to send message\n".to_string()
            }
        }
        Format::Markdown => {
            if result.success {
                format!("**Message sent successfully**\n\nID: `{}`\n", result.id)
            } else {
                "**Failed to send message**\n".to_string()
            }
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    // Our own model types always serialize
    let mut out = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    out.push('\n');
    out
}

fn chat_flags(chat: &Chat) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if chat.is_muted {
        flags.push("muted");
    }
    if chat.is_archived {
        flags.push("archived");
    }
    if chat.is_pinned {
        flags.push("pinned");
    }
    flags
}

fn format_chats_text(chats: &[Chat]) -> String {
    if chats.is_empty() {
        return "No chats found.\n".to_string();
    }

    let mut out = String::new();
    for chat in chats {
        out.push_str(&format!("Name: {}\n", chat.display_name()));
        out.push_str(&format!("ID: {}\n", chat.id));
        out.push_str(&format!("Network: {}\n", chat.network));
        out.push_str(&format!("Unread: {}\n", chat.unread_count));
        let flags = chat_flags(chat);
        if !flags.is_empty() {
            out.push_str(&format!("Flags: {}\n", flags.join(", ")));
        }
        out.push('\n');
    }
    out
}

fn format_chats_markdown(chats: &[Chat]) -> String {
    if chats.is_empty() {
        return "No chats found.\n".to_string();
    }

    let mut out = String::from("# Chats\n\n");
    for chat in chats {
        out.push_str(&format!("## {}\n\n", chat.display_name()));
        out.push_str(&format!("- **ID**: {}\n", chat.id));
        out.push_str(&format!("- **Network**: {}\n", chat.network));
        out.push_str(&format!("- **Unread**: {}\n", chat.unread_count));
        let flags = chat_flags(chat);
        if !flags.is_empty() {
            out.push_str(&format!("- **Flags**: {}\n", flags.join(", ")));
        }
        out.push('\n');
    }
    out
}

fn format_messages_text(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No messages found.\n".to_string();
    }

    let mut out = String::new();
    for msg in messages {
        out.push_str(&format!("[{}] {}: {}\n", msg.timestamp, msg.sender, msg.text));
    }
    out
}

fn format_messages_markdown(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No messages found.\n".to_string();
    }

    let mut out = String::from("# Messages\n\n");
    for msg in messages {
        out.push_str(&format!("### {} - {}\n\n", msg.sender, msg.timestamp));
        out.push_str(&format!("{}\n\n", msg.text));
        out.push_str("---\n\n");
    }
    out
}

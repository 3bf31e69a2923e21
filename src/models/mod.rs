//! Data models for Beeper entities

mod chat;
mod message;

pub use chat::*;
pub use message::*;

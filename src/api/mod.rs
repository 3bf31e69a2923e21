//! API client module for the Beeper Desktop service

mod client;
mod discover;
mod error;

pub use client::ApiClient;
pub use discover::discover;
pub use error::Error;

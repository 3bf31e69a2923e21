//! Error taxonomy for the API client

use thiserror::Error;

/// Every client operation fails with exactly one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (connection refused, timeout).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status. Body kept for diagnostics.
    #[error("service returned HTTP {status} for {url}: {body}")]
    Service {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// No candidate endpoint answered the health probe.
    #[error("could not discover a running Beeper Desktop API (tried: {})", .attempted.join(", "))]
    Discovery { attempted: Vec<String> },
}

//! HTTP client for the Beeper Desktop API
//!
//! Wraps reqwest::Client with bearer-token injection and a fixed request
//! timeout. Every operation is a single round trip; failures map onto the
//! taxonomy in `super::error` and are never retried here.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::{Chat, Message, SendResult};

use super::error::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client bound to one Beeper Desktop API endpoint.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

// Wire shapes, private to this module. Every list-shaped response uses the
// same `{"items": [...], "hasMore": bool}` envelope; only `items` is read.

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ListEnvelope<T> {
    #[serde(default)]
    items: Vec<T>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    id: String,
}

impl ApiClient {
    /// Build a client for `base_url`, attaching `token` as a bearer
    /// credential on every request when present.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            base_url,
            token,
        }
    }

    /// Health probe. Succeeds only when the service answers 200 OK.
    pub async fn ping(&self) -> Result<(), Error> {
        let url = format!("{}/health", self.base_url);
        tracing::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Service {
                status: status.as_u16(),
                url,
                body,
            });
        }
        Ok(())
    }

    /// List all chats. Ordering is whatever the service delivered.
    pub async fn list_chats(&self) -> Result<Vec<Chat>, Error> {
        let resp: ListEnvelope<Chat> = self.get_json("/v1/chats", &[]).await?;
        Ok(resp.items)
    }

    /// Fetch one chat by ID. A missing ID surfaces as the service's own
    /// status (typically 404), not as a special case.
    pub async fn get_chat(&self, chat_id: &str) -> Result<Chat, Error> {
        self.get_json(&format!("/v1/chats/{}", chat_id), &[]).await
    }

    /// Fetch up to `limit` messages from a chat, in service order.
    pub async fn list_messages(&self, chat_id: &str, limit: usize) -> Result<Vec<Message>, Error> {
        let path = format!("/v1/chats/{}/messages", chat_id);
        let resp: ListEnvelope<Message> = self
            .get_json(&path, &[("limit", limit.to_string())])
            .await?;
        Ok(resp.items)
    }

    /// Search messages across all chats by free-text query.
    pub async fn search_messages(&self, query: &str, limit: usize) -> Result<Vec<Message>, Error> {
        let resp: ListEnvelope<Message> = self
            .get_json(
                "/v1/messages/search",
                &[("q", query.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        Ok(resp.items)
    }

    /// Send a message and return the service-assigned ID.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<SendResult, Error> {
        let path = format!("/v1/chats/{}/messages", chat_id);
        let resp: SendMessageResponse = self
            .post_json(&path, &SendMessageRequest { text })
            .await?;
        Ok(SendResult {
            id: resp.id,
            success: true,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let mut req = self.http.get(&url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|source| Error::Transport {
            url: url.clone(),
            source,
        })?;
        Self::decode_response(resp, &url).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let mut req = self.http.post(&url).json(body);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|source| Error::Transport {
            url: url.clone(),
            source,
        })?;
        Self::decode_response(resp, &url).await
    }

    /// Require a 2xx status, then decode the body. A rejected request and
    /// an unparseable body stay distinguishable for the caller.
    async fn decode_response<T: DeserializeOwned>(
        resp: reqwest::Response,
        url: &str,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(|source| Error::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(Error::Service {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }
}

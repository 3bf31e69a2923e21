//! Endpoint discovery for the local Beeper Desktop API

use super::client::ApiClient;
use super::error::Error;

/// Ports Beeper Desktop binds its local API to, in probe order.
const CANDIDATE_PORTS: [u16; 3] = [39867, 39868, 39869];

/// Probe the default localhost candidates and return the first base URL
/// whose health check answers.
pub async fn discover() -> Result<String, Error> {
    let candidates: Vec<String> = CANDIDATE_PORTS
        .iter()
        .map(|port| format!("http://localhost:{}", port))
        .collect();
    discover_among(&candidates).await
}

/// Probe `candidates` strictly in order; the first URL whose `/health`
/// answers 200 wins and later candidates are not contacted.
pub async fn discover_among(candidates: &[String]) -> Result<String, Error> {
    for url in candidates {
        tracing::debug!("Probing {}", url);
        let client = ApiClient::new(url.clone(), None);
        match client.ping().await {
            Ok(()) => {
                tracing::info!("Found Beeper Desktop API at {}", url);
                return Ok(url.clone());
            }
            Err(err) => tracing::debug!("No API at {}: {}", url, err),
        }
    }

    Err(Error::Discovery {
        attempted: candidates.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    async fn health_mock(server: &MockServer, status: u16) -> httpmock::Mock<'_> {
        server
            .mock_async(move |when, then| {
                when.method(GET).path("/health");
                then.status(status);
            })
            .await
    }

    #[tokio::test]
    async fn test_returns_first_reachable_candidate() {
        let down = MockServer::start_async().await;
        let up = MockServer::start_async().await;
        let later = MockServer::start_async().await;

        let down_mock = health_mock(&down, 503).await;
        let up_mock = health_mock(&up, 200).await;
        let later_mock = health_mock(&later, 200).await;

        let candidates = vec![down.base_url(), up.base_url(), later.base_url()];
        let found = discover_among(&candidates).await.unwrap();

        assert_eq!(found, up.base_url());
        // The first candidate was tried before the winner; the probe
        // stopped before reaching the third.
        down_mock.assert_async().await;
        up_mock.assert_async().await;
        later_mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_failure_names_all_candidates() {
        let a = MockServer::start_async().await;
        let b = MockServer::start_async().await;
        health_mock(&a, 500).await;
        health_mock(&b, 503).await;

        let candidates = vec![a.base_url(), b.base_url()];
        let err = discover_among(&candidates).await.unwrap_err();

        match err {
            Error::Discovery { attempted } => assert_eq!(attempted, candidates),
            other => panic!("expected Discovery error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_candidate_is_skipped() {
        let up = MockServer::start_async().await;
        health_mock(&up, 200).await;

        // First candidate refuses connections entirely
        let candidates = vec!["http://127.0.0.1:1".to_string(), up.base_url()];
        let found = discover_among(&candidates).await.unwrap();
        assert_eq!(found, up.base_url());
    }
}

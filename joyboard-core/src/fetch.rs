//! Feed fetching over HTTP(S).

use std::time::Duration;

use crate::error::{JoyboardError, JoyboardResult};

/// Upper bound on how long a single feed fetch may take.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Retrieves raw calendar text from feed URLs.
///
/// Plain and TLS transport are both supported, chosen by the URL scheme.
/// No retries at this layer: retry policy belongs to the orchestrator, which
/// reports the failure per source instead.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
}

impl FeedFetcher {
    pub fn new() -> JoyboardResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| JoyboardError::Fetch(e.to_string()))?;

        Ok(FeedFetcher { client })
    }

    /// Fetch the full response body as text.
    ///
    /// Fails with a timeout-kind error when the bound expires (the in-flight
    /// request is aborted), a status-kind error on non-2xx responses, and a
    /// network-kind error otherwise.
    pub async fn fetch_text(&self, url: &str) -> JoyboardResult<String> {
        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(JoyboardError::FetchStatus(status.as_u16()));
        }

        response.text().await.map_err(classify)
    }
}

fn classify(err: reqwest::Error) -> JoyboardError {
    if err.is_timeout() {
        JoyboardError::FetchTimeout(FETCH_TIMEOUT_SECS)
    } else {
        JoyboardError::Fetch(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/feed.ics")
            .with_status(200)
            .with_header("content-type", "text/calendar")
            .with_body("BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n")
            .create_async()
            .await;

        let fetcher = FeedFetcher::new().unwrap();
        let body = fetcher
            .fetch_text(&format!("{}/feed.ics", server.url()))
            .await
            .unwrap();

        assert!(body.contains("BEGIN:VCALENDAR"));
    }

    #[tokio::test]
    async fn test_fetch_fails_on_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/feed.ics")
            .with_status(500)
            .create_async()
            .await;

        let fetcher = FeedFetcher::new().unwrap();
        let err = fetcher
            .fetch_text(&format!("{}/feed.ics", server.url()))
            .await
            .unwrap_err();

        match err {
            JoyboardError::FetchStatus(code) => assert_eq!(code, 500),
            other => panic!("Expected FetchStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_fails_on_unreachable_host() {
        let fetcher = FeedFetcher::new().unwrap();
        let err = fetcher
            .fetch_text("http://127.0.0.1:1/feed.ics")
            .await
            .unwrap_err();

        assert!(matches!(err, JoyboardError::Fetch(_)));
    }
}

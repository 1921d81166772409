//! Data loading for one dashboard mount.
//!
//! A [`QueryClient`] lives as long as the page it belongs to. Every key is
//! fetched at most once; concurrent or repeated reads of the same key wait
//! for and reuse the first result.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::instrument;

use crate::models::WeatherObservation;
use crate::{Result, WeatherError};

pub const WEATHER_QUERY_KEY: &str = "weatherData";

/// Message used when the proxy answers with a non-OK status
pub const REQUEST_FAILED: &str = "data request failed";

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Pending,
    Success(Vec<WeatherObservation>),
    Error(String),
}

/// How the page reaches the weather proxy
#[async_trait]
pub trait ProxyFetcher: Send + Sync {
    async fn fetch_weather(&self) -> Result<Vec<WeatherObservation>>;
}

/// Posts to the proxy endpoint over HTTP
#[derive(Debug, Clone)]
pub struct HttpProxyFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpProxyFetcher {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ItemsBody {
    #[serde(default)]
    items: Option<Vec<WeatherObservation>>,
}

#[async_trait]
impl ProxyFetcher for HttpProxyFetcher {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_weather(&self) -> Result<Vec<WeatherObservation>> {
        let response = self
            .client
            .post(&self.url)
            .send()
            .await
            .map_err(|e| WeatherError::fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::status(status.as_u16(), REQUEST_FAILED));
        }

        let body: ItemsBody = response
            .json()
            .await
            .map_err(|e| WeatherError::fetch(e.to_string()))?;
        Ok(body.items.unwrap_or_default())
    }
}

/// Per-mount query cache
#[derive(Debug, Default)]
pub struct QueryClient {
    entries: Mutex<HashMap<&'static str, Arc<OnceCell<QueryState>>>>,
}

impl QueryClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, key: &'static str) -> Arc<OnceCell<QueryState>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.entry(key).or_default().clone()
    }

    /// Run `fetch` for `key` unless it already ran, and return the settled state.
    pub async fn fetch<F, Fut>(&self, key: &'static str, fetch: F) -> QueryState
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<WeatherObservation>>>,
    {
        let cell = self.cell(key);
        cell.get_or_init(|| async move {
            match fetch().await {
                Ok(items) => {
                    tracing::debug!(key, count = items.len(), "Query settled");
                    QueryState::Success(items)
                }
                Err(e) => {
                    tracing::warn!(key, "Query failed: {}", e);
                    QueryState::Error(e.user_message())
                }
            }
        })
        .await
        .clone()
    }

    /// Current state without triggering a fetch
    #[must_use]
    pub fn state(&self, key: &'static str) -> QueryState {
        self.cell(key)
            .get()
            .cloned()
            .unwrap_or(QueryState::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_state_pending_before_fetch() {
        let client = QueryClient::new();
        assert_eq!(client.state(WEATHER_QUERY_KEY), QueryState::Pending);
    }

    #[tokio::test]
    async fn test_fetch_runs_once_per_key() {
        let client = QueryClient::new();
        let calls = &AtomicUsize::new(0);

        for _ in 0..3 {
            let state = client
                .fetch(WEATHER_QUERY_KEY, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![WeatherObservation::default()])
                })
                .await;
            assert!(matches!(state, QueryState::Success(ref items) if items.len() == 1));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(client.state(WEATHER_QUERY_KEY), QueryState::Success(_)));
    }

    #[tokio::test]
    async fn test_concurrent_fetches_are_deduplicated() {
        let client = &QueryClient::new();
        let calls = &AtomicUsize::new(0);
        let run = move || {
            client.fetch(WEATHER_QUERY_KEY, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                Ok(Vec::new())
            })
        };

        let (a, b) = tokio::join!(run(), run());
        assert_eq!(a, QueryState::Success(Vec::new()));
        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_is_kept() {
        let client = QueryClient::new();
        let state = client
            .fetch(WEATHER_QUERY_KEY, || async { Err(WeatherError::fetch("boom")) })
            .await;
        assert_eq!(state, QueryState::Error("boom".into()));
    }

    #[tokio::test]
    async fn test_error_keeps_user_message_without_status() {
        let client = QueryClient::new();
        let state = client
            .fetch(WEATHER_QUERY_KEY, || async {
                Err(WeatherError::status(500, REQUEST_FAILED))
            })
            .await;
        assert_eq!(state, QueryState::Error(REQUEST_FAILED.into()));
    }

    #[tokio::test]
    async fn test_http_fetcher_reads_items() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "tm": "20250301", "avgTa": "5.0", "stnId": "133" }]
            })))
            .mount(&server)
            .await;

        let url = format!("{}/api/v0", server.uri());
        let fetcher = HttpProxyFetcher::new(reqwest::Client::new(), url);
        let items = fetcher.fetch_weather().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tm, "20250301");
        assert_eq!(items[0].avg_ta, "5.0");
    }

    #[tokio::test]
    async fn test_http_fetcher_missing_items_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": null })))
            .mount(&server)
            .await;

        let fetcher = HttpProxyFetcher::new(reqwest::Client::new(), server.uri());
        assert!(fetcher.fetch_weather().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_http_fetcher_non_ok_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let fetcher = HttpProxyFetcher::new(reqwest::Client::new(), server.uri());
        let err = fetcher.fetch_weather().await.unwrap_err();
        assert!(matches!(err, WeatherError::Status { status: 500, .. }));
        assert!(err.to_string().contains(REQUEST_FAILED));
    }
}

//! Client for the ASOS daily weather service (`AsosDalyInfoService`).
//!
//! The service wraps its payload in an envelope:
//! `{ response: { header: { resultCode, resultMsg }, body: { items: { item: [...] } } } }`.
//! Items are handed on untouched as JSON values.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::instrument;

use crate::{Result, WeatherError};

/// Result code the service uses for a normal answer
pub const SUCCESS_RESULT_CODE: &str = "00";

/// Fixed request window: Daejeon station, spring 2025, first page of 20 days.
#[derive(Debug, Clone, PartialEq)]
pub struct AsosQuery {
    pub num_of_rows: u32,
    pub page_no: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub station_id: u32,
}

impl Default for AsosQuery {
    fn default() -> Self {
        Self {
            num_of_rows: 20,
            page_no: 1,
            start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap_or_default(),
            station_id: 133,
        }
    }
}

impl AsosQuery {
    /// Full request URL. The service key goes in as issued: the portal hands
    /// out keys that are already percent-encoded.
    #[must_use]
    pub fn url(&self, base_url: &str, service_key: &str) -> String {
        format!(
            "{}/getWthrDataList?dataType=json&serviceKey={}&numOfRows={}&pageNo={}&dataCd=ASOS&dateCd=DAY&startDt={}&endDt={}&stnIds={}",
            base_url.trim_end_matches('/'),
            service_key,
            self.num_of_rows,
            self.page_no,
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d"),
            self.station_id
        )
    }
}

/// Parsed response envelope
#[derive(Debug, Clone, PartialEq)]
pub struct AsosResponse(Value);

impl AsosResponse {
    #[must_use]
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// The nested item list, or an empty list when any level is missing or null.
    #[must_use]
    pub fn items(&self) -> Value {
        match self.0.pointer("/response/body/items/item") {
            Some(Value::Null) | None => Value::Array(Vec::new()),
            Some(items) => items.clone(),
        }
    }

    #[must_use]
    pub fn result_code(&self) -> Option<&str> {
        self.0
            .pointer("/response/header/resultCode")
            .and_then(Value::as_str)
    }

    #[must_use]
    pub fn result_message(&self) -> Option<&str> {
        self.0
            .pointer("/response/header/resultMsg")
            .and_then(Value::as_str)
    }

    /// A missing header counts as a failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result_code() == Some(SUCCESS_RESULT_CODE)
    }
}

/// HTTP client for the ASOS service
#[derive(Debug, Clone)]
pub struct AsosClient {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl AsosClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            service_key: service_key.into(),
        }
    }

    /// Fetch one page of daily observations
    #[instrument(skip(self), fields(station = query.station_id))]
    pub async fn fetch_daily(&self, query: &AsosQuery) -> Result<AsosResponse> {
        tracing::debug!("Calling the ASOS API");
        let url = query.url(&self.base_url, &self.service_key);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::upstream(format!("request failed: {e}")))?;

        let data: Value = response
            .json()
            .await
            .map_err(|e| WeatherError::upstream(format!("unreadable response body: {e}")))?;
        tracing::debug!(?data, "ASOS response");

        Ok(AsosResponse::new(data))
    }
}

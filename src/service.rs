use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::USER_AGENT;
use crate::error::FetchError;
use crate::models::{Coordinates, RawWeatherRecord};

/// Error envelope the provider returns alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for the provider's `forecast.json` endpoint
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl ForecastClient {
    /// Creates a client against `base_url` (the public endpoint, a mirror, or a test server)
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches `days` days of forecast plus current conditions for `coords`
    pub async fn fetch_forecast(
        &self,
        coords: Coordinates,
        days: u8,
    ) -> Result<RawWeatherRecord, FetchError> {
        tracing::info!(
            "Fetching {}-day forecast for coordinates: {}, {}",
            days,
            coords.latitude,
            coords.longitude
        );

        let url = format!("{}/forecast.json", self.base_url);
        let query = [
            ("key", self.api_key.clone()),
            ("q", coords.as_query()),
            ("days", days.to_string()),
        ];

        let record = self.make_request::<RawWeatherRecord>(&url, &query).await?;

        tracing::debug!(
            "Forecast for {} contains {} days",
            record.location.region,
            record.forecast.forecastday.len()
        );
        Ok(record)
    }
}

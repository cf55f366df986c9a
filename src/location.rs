//! Position providers.
//!
//! The widget asks exactly once for a position at startup. Which provider
//! answers is decided by configuration.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::constants::USER_AGENT;
use crate::error::LocationError;
use crate::models::Coordinates;

/// Single-shot position query
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position supplied up front (command line or environment)
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        validate(self.0)
    }
}

/// Stands in when no way to locate the user is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

#[async_trait]
impl LocationProvider for Unsupported {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// Approximate position from the caller's public IP address
#[derive(Debug, Clone)]
pub struct IpLocation {
    client: Client,
    base_url: String,
}

impl IpLocation {
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, LocationError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LocationProvider for IpLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let url = format!("{}/json", self.base_url);
        tracing::debug!("Looking up position via {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LocationError::PositionUnavailable(format!(
                "lookup returned status {}",
                response.status()
            )));
        }

        let body: IpApiResponse = response.json().await?;
        if body.status != "success" {
            return Err(LocationError::PositionUnavailable(
                body.message.unwrap_or(body.status),
            ));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => validate(Coordinates::new(lat, lon)),
            _ => Err(LocationError::PositionUnavailable(
                "lookup returned no coordinates".to_string(),
            )),
        }
    }
}

fn validate(coords: Coordinates) -> Result<Coordinates, LocationError> {
    if coords.is_valid() {
        Ok(coords)
    } else {
        Err(LocationError::PositionUnavailable(format!(
            "coordinates out of range: {}",
            coords.as_query()
        )))
    }
}

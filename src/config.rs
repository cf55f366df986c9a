use clap::Parser;
use std::time::Duration;

use crate::constants::{
    DEFAULT_FORECAST_DAYS, DEFAULT_TIMEOUT_SECS, FORECAST_API_BASE, IP_API_BASE, MAX_FORECAST_DAYS,
};
use crate::error::{FetchError, LocationError};
use crate::location::{FixedLocation, IpLocation, LocationProvider, Unsupported};
use crate::models::Coordinates;
use crate::service::ForecastClient;

/// Terminal weather widget: current conditions and a multi-day forecast
#[derive(Parser, Debug, Clone)]
#[command(name = "weather-widget", version, about)]
pub struct Config {
    /// WeatherAPI access key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Latitude (decimal). Example: 52.52
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude (decimal). Example: 13.41
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,

    /// Locate via public IP address when no coordinates are given
    #[arg(long)]
    pub ip_lookup: bool,

    /// Number of forecast days to request
    #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS,
          value_parser = clap::value_parser!(u8).range(1..=(MAX_FORECAST_DAYS as i64)))]
    pub days: u8,

    /// Forecast API base URL
    #[arg(long, env = "WEATHER_API_BASE", default_value = FORECAST_API_BASE)]
    pub api_base: String,

    /// IP geolocation base URL
    #[arg(long, env = "WEATHER_IP_API_BASE", default_value = IP_API_BASE)]
    pub ip_api_base: String,

    /// Timeout for each outbound request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    /// Fixed coordinates win over IP lookup; with neither, geolocation is unavailable
    pub fn location_provider(&self) -> Result<Box<dyn LocationProvider>, LocationError> {
        if let Some(coords) = self.coordinates() {
            return Ok(Box::new(FixedLocation(coords)));
        }
        if self.ip_lookup {
            return Ok(Box::new(IpLocation::with_base_url(
                &self.ip_api_base,
                self.timeout(),
            )?));
        }
        Ok(Box::new(Unsupported))
    }

    pub fn forecast_client(&self) -> Result<ForecastClient, FetchError> {
        ForecastClient::with_base_url(self.api_key.clone(), &self.api_base, self.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        let mut argv = vec!["weather-widget", "--api-key", "test_key"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.days, 7);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.coordinates().is_none());
        assert!(!config.ip_lookup);
    }

    #[test]
    fn test_negative_coordinates() {
        let config = parse(&["--lat", "-33.86", "--lon", "151.2"]).unwrap();
        assert_eq!(config.coordinates(), Some(Coordinates::new(-33.86, 151.2)));
    }

    #[test]
    fn test_lat_requires_lon() {
        assert!(parse(&["--lat", "10.0"]).is_err());
    }

    #[test]
    fn test_days_range() {
        assert!(parse(&["--days", "0"]).is_err());
        assert!(parse(&["--days", "11"]).is_err());
        assert_eq!(parse(&["--days", "3"]).unwrap().days, 3);
    }

    #[tokio::test]
    async fn test_without_location_source_is_unsupported() {
        let config = parse(&[]).unwrap();
        let provider = config.location_provider().unwrap();
        let err = provider.current_position().await.unwrap_err();
        assert!(matches!(err, LocationError::Unsupported));
    }

    #[tokio::test]
    async fn test_fixed_coordinates_take_precedence() {
        let config = parse(&["--lat", "1.5", "--lon", "2.5", "--ip-lookup"]).unwrap();
        let provider = config.location_provider().unwrap();
        let coords = provider.current_position().await.unwrap();
        assert_eq!(coords, Coordinates::new(1.5, 2.5));
    }
}

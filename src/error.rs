//! Error types for the widget.
//!
//! Each kind maps to one stage of the pipeline: resolving a position,
//! fetching the forecast, and selecting a day out of the cached record.

use thiserror::Error;

/// Position lookup failures.
///
/// `code()` follows the numbering browsers use for geolocation errors so the
/// log line reads the same regardless of which provider produced it.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location permission denied: {0}")]
    PermissionDenied(String),

    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("Location request timed out")]
    Timeout,

    #[error("Geolocation is not available")]
    Unsupported,
}

impl LocationError {
    pub fn code(&self) -> u16 {
        match self {
            LocationError::Unsupported => 0,
            LocationError::PermissionDenied(_) => 1,
            LocationError::PositionUnavailable(_) => 2,
            LocationError::Timeout => 3,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied(_) => "Location access was denied.",
            LocationError::PositionUnavailable(_) => "Your location could not be determined.",
            LocationError::Timeout => "Finding your location took too long.",
            LocationError::Unsupported => "Geolocation is not enabled on this system.",
        }
    }
}

impl From<reqwest::Error> for LocationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LocationError::Timeout
        } else {
            LocationError::PositionUnavailable(err.to_string())
        }
    }
}

/// Forecast download failures
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "Unable to reach the weather service.",
            FetchError::Status { status, .. } if *status >= 500 => {
                "The weather service is having trouble. Try again later."
            }
            FetchError::Status { .. } => "The weather service rejected the request.",
            FetchError::Parse(_) => "The weather service sent an unexpected response.",
        }
    }
}

/// Failures picking a day out of a cached record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Forecast day {day} is out of range ({available} days available)")]
    DayOutOfRange { day: usize, available: usize },

    #[error("Forecast contains no days")]
    NoForecastDays,
}

/// Day selector value that is neither empty nor an index
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid day selector: {0:?}")]
pub struct ParseDayError(pub String);

/// Any failure the widget can surface
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    ParseDay(#[from] ParseDayError),
}

impl WidgetError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WidgetError::Location(e) => e.user_message(),
            WidgetError::Fetch(e) => e.user_message(),
            WidgetError::Selection(_) => "That day is not part of the forecast.",
            WidgetError::ParseDay(_) => "Pick a day by its number.",
        }
    }
}

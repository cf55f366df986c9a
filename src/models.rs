use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseDayError;

// ============================================================================
// Position
// ============================================================================

/// Geographic position resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Formats the pair the way the provider's `q` parameter expects it
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

// ============================================================================
// WeatherAPI Forecast Models
// ============================================================================

/// Unmodified `forecast.json` response, held read-only for the session
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWeatherRecord {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub temp_f: f64,
    pub wind_kph: f64,
    #[serde(default)]
    pub wind_mph: Option<f64>,
    pub humidity: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    #[serde(default)]
    pub code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub day: DaySummary,
    pub astro: Astro,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avgtemp_c: f64,
    pub avgtemp_f: f64,
    pub maxwind_kph: f64,
    #[serde(default)]
    pub avgvis_km: Option<f64>,
    pub avghumidity: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

// ============================================================================
// View Models
// ============================================================================

/// Flat, UI-ready projection of one day of a [`RawWeatherRecord`].
///
/// Both temperature units are carried; the display layer picks one.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    pub weather_icon: String,
    pub sky: String,
    pub windspeed: String,
    pub humidity: String,
    pub sunrise: String,
    pub sunset: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub min_temp_f: f64,
    pub max_temp_f: f64,
    pub region: String,
}

impl DisplayRecord {
    /// Returns `(temp, min, max)` in the requested unit
    pub fn temperatures(&self, unit: UnitPreference) -> (f64, f64, f64) {
        match unit {
            UnitPreference::Celsius => (self.temp_c, self.min_temp_c, self.max_temp_c),
            UnitPreference::Fahrenheit => (self.temp_f, self.min_temp_f, self.max_temp_f),
        }
    }
}

/// Temperature unit shown in the three temperature slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitPreference {
    #[default]
    Celsius,
    Fahrenheit,
}

impl UnitPreference {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

/// Which day the widget shows: live conditions or a forecast day (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaySelector {
    #[default]
    Current,
    Forecast(usize),
}

impl FromStr for DaySelector {
    type Err = ParseDayError;

    /// An empty selector value means "current", anything else must be an index
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self::Current);
        }
        value
            .parse::<usize>()
            .map(Self::Forecast)
            .map_err(|_| ParseDayError(value.to_string()))
    }
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Forecast(day) => write!(f, "day {}", day),
        }
    }
}

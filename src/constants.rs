/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-widget/0.1.0";

/// WeatherAPI base URL (the `forecast.json` endpoint lives under it)
pub const FORECAST_API_BASE: &str = "https://api.weatherapi.com/v1";

/// IP geolocation service base URL
pub const IP_API_BASE: &str = "http://ip-api.com";

/// Number of forecast days requested at startup
pub const DEFAULT_FORECAST_DAYS: u8 = 7;

/// Upper bound the provider accepts for `days`
pub const MAX_FORECAST_DAYS: u8 = 10;

/// Request timeout for both outbound clients
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Suffix appended to every rendered temperature
pub const DEGREE_MARK: char = '\u{00b0}';

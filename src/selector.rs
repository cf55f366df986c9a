//! Pure projections from the cached forecast record into display records.

use crate::error::SelectionError;
use crate::models::{DaySelector, DisplayRecord, ForecastDay, RawWeatherRecord};

/// Live conditions, with min/max and astronomy taken from forecast day 0
pub fn current(record: &RawWeatherRecord) -> Result<DisplayRecord, SelectionError> {
    let today = record
        .forecast
        .forecastday
        .first()
        .ok_or(SelectionError::NoForecastDays)?;
    let now = &record.current;

    Ok(DisplayRecord {
        weather_icon: icon_url(&now.condition.icon),
        sky: now.condition.text.clone(),
        windspeed: format!("{} kph", now.wind_kph),
        humidity: format!("{}%", now.humidity),
        sunrise: today.astro.sunrise.clone(),
        sunset: today.astro.sunset.clone(),
        temp_c: now.temp_c,
        temp_f: now.temp_f,
        min_temp_c: today.day.mintemp_c,
        max_temp_c: today.day.maxtemp_c,
        min_temp_f: today.day.mintemp_f,
        max_temp_f: today.day.maxtemp_f,
        region: record.location.region.clone(),
    })
}

/// Forecast day `day` (0-based). Out-of-range indices fail instead of clamping.
pub fn forecast(record: &RawWeatherRecord, day: usize) -> Result<DisplayRecord, SelectionError> {
    let days = &record.forecast.forecastday;
    let ForecastDay { day: summary, astro, .. } =
        days.get(day).ok_or(SelectionError::DayOutOfRange {
            day,
            available: days.len(),
        })?;

    Ok(DisplayRecord {
        weather_icon: icon_url(&summary.condition.icon),
        sky: summary.condition.text.clone(),
        windspeed: format!("{} kph", summary.maxwind_kph),
        humidity: format!("{}%", summary.avghumidity),
        sunrise: astro.sunrise.clone(),
        sunset: astro.sunset.clone(),
        temp_c: summary.avgtemp_c,
        temp_f: summary.avgtemp_f,
        min_temp_c: summary.mintemp_c,
        max_temp_c: summary.maxtemp_c,
        min_temp_f: summary.mintemp_f,
        max_temp_f: summary.maxtemp_f,
        region: record.location.region.clone(),
    })
}

/// Dispatches on the day selector
pub fn select(
    record: &RawWeatherRecord,
    selector: DaySelector,
) -> Result<DisplayRecord, SelectionError> {
    match selector {
        DaySelector::Current => current(record),
        DaySelector::Forecast(day) => forecast(record, day),
    }
}

/// The provider hands out scheme-relative icon URLs (`//cdn...`)
fn icon_url(icon: &str) -> String {
    if icon.starts_with("//") {
        format!("https:{}", icon)
    } else {
        icon.to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_reads_current_block() {
        let record = fixtures::berlin();
        let display = current(&record).unwrap();

        assert_eq!(display.sky, "Sunny");
        assert_eq!(display.temp_c, 20.0);
        assert_eq!(display.temp_f, 68.0);
        assert_eq!(display.windspeed, "11.2 kph");
        assert_eq!(display.humidity, "40%");
        assert_eq!(
            display.weather_icon,
            "https://cdn.weatherapi.com/weather/64x64/day/113.png"
        );
        // min/max and astronomy come from day 0
        assert_eq!(display.min_temp_c, 14.5);
        assert_eq!(display.max_temp_c, 22.5);
        assert_eq!(display.sunrise, "06:12 AM");
        assert_eq!(display.region, "Berlin");
    }

    #[test]
    fn test_current_and_forecast_zero_differ() {
        let record = fixtures::berlin();
        let now = current(&record).unwrap();
        let today = forecast(&record, 0).unwrap();

        assert_ne!(now.sky, today.sky);
        assert_ne!(now.temp_c, today.temp_c);
        assert_eq!(now.min_temp_c, today.min_temp_c);
    }

    #[test]
    fn test_forecast_reads_day_summary() {
        let record = fixtures::berlin();
        let display = forecast(&record, 1).unwrap();

        assert_eq!(display.sky, "Light rain");
        assert_eq!(display.temp_c, 16.0);
        assert_eq!(display.temp_f, 60.8);
        assert_eq!(display.windspeed, "18.4 kph");
        assert_eq!(display.humidity, "55%");
    }

    #[test]
    fn test_forecast_out_of_range_fails() {
        let record = fixtures::berlin();
        assert_eq!(
            forecast(&record, 3),
            Err(SelectionError::DayOutOfRange {
                day: 3,
                available: 3
            })
        );
    }

    #[test]
    fn test_current_without_forecast_days_fails() {
        let mut record = fixtures::berlin();
        record.forecast.forecastday.clear();
        assert_eq!(current(&record), Err(SelectionError::NoForecastDays));
    }

    #[test]
    fn test_select_dispatch() {
        let record = fixtures::berlin();
        assert_eq!(
            select(&record, "".parse().unwrap()).unwrap(),
            current(&record).unwrap()
        );
        assert_eq!(
            select(&record, "2".parse().unwrap()).unwrap(),
            forecast(&record, 2).unwrap()
        );
    }

    #[test]
    fn test_select_is_deterministic() {
        let record = fixtures::berlin();
        let first = select(&record, DaySelector::Forecast(2)).unwrap();
        let second = select(&record, DaySelector::Forecast(2)).unwrap();
        assert_eq!(first, second);
    }
}
